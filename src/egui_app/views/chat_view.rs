use eframe::egui;

use crate::egui_app::state::AppState;

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    let Some(peer_id) = state.store.selected_peer_id else {
        ui.centered_and_justified(|ui| {
            ui.label("Select a contact to start chatting");
        });
        return;
    };

    let peer_name = state
        .store
        .users
        .iter()
        .find(|u| u.id == peer_id)
        .map(|u| u.username.clone())
        .unwrap_or_else(|| peer_id.to_string());
    let my_id = state.auth.user.as_ref().map(|u| u.id);

    ui.add_space(4.0);
    ui.heading(&peer_name);
    ui.separator();

    // Input bar pinned to the bottom, messages fill the rest.
    egui::TopBottomPanel::bottom("input_bar")
        .show_separator_line(false)
        .show_inside(ui, |ui| {
            ui.horizontal(|ui| {
                let send_enabled = !state.store.is_sending;
                let input = ui.add_sized(
                    [ui.available_width() - 70.0, 28.0],
                    egui::TextEdit::singleline(&mut state.message_input)
                        .hint_text("Type a message..."),
                );

                let submitted =
                    input.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                let clicked = ui
                    .add_enabled(send_enabled, egui::Button::new("Send"))
                    .clicked();

                if send_enabled && (submitted || clicked) {
                    state.send_current_input();
                    input.request_focus();
                }
            });
            ui.add_space(4.0);
        });

    egui::CentralPanel::default().show_inside(ui, |ui| {
        if state.store.is_messages_loading {
            ui.spinner();
            return;
        }

        let mut delete_requested = None;

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .stick_to_bottom(true)
            .show(ui, |ui| {
                for message in &state.store.messages {
                    let mine = Some(message.sender_id) == my_id;
                    let layout = if mine {
                        egui::Layout::right_to_left(egui::Align::Min)
                    } else {
                        egui::Layout::left_to_right(egui::Align::Min)
                    };

                    ui.with_layout(layout, |ui| {
                        if mine {
                            let enabled = !state.store.is_deleting;
                            if ui.add_enabled(enabled, egui::Button::new("🗑")).clicked() {
                                delete_requested = Some(message.id);
                            }
                        }

                        egui::Frame::group(ui.style()).show(ui, |ui| {
                            ui.vertical(|ui| {
                                if let Some(ref text) = message.text {
                                    ui.label(text);
                                }
                                if let Some(ref image) = message.image {
                                    ui.hyperlink_to("📷 Image", image);
                                }
                                ui.small(message.created_at.format("%H:%M").to_string());
                            });
                        });
                    });
                    ui.add_space(4.0);
                }
            });

        if let Some(message_id) = delete_requested {
            state.store.delete(message_id);
        }
    });
}
