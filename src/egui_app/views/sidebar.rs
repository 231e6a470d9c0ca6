use eframe::egui;

use crate::egui_app::state::AppState;

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.add_space(8.0);
    ui.horizontal(|ui| {
        ui.heading("Contacts");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("⟳").clicked() {
                state.store.fetch_users();
            }
        });
    });
    ui.separator();

    if state.store.is_users_loading && state.store.users.is_empty() {
        ui.spinner();
        return;
    }

    // Click selection is deferred until after the loop so the user list is
    // not borrowed when the store mutates.
    let mut clicked = None;

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            for user in &state.store.users {
                let selected = state.store.selected_peer_id == Some(user.id);
                let label = if state.store.has_unread(user.id) {
                    format!("● {}", user.username)
                } else {
                    user.username.clone()
                };

                if ui.selectable_label(selected, label).clicked() {
                    clicked = Some(user.id);
                }
            }
        });

    if let Some(peer_id) = clicked {
        state.select_peer(peer_id);
    }
}
