use eframe::egui;

use super::state::{AppState, AppView};

pub mod auth_view;
pub mod chat_view;
pub mod sidebar;

pub fn render_top_bar(ctx: &egui::Context, state: &mut AppState) {
    egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new("Ripple").size(18.0).strong());

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if state.auth.is_logged_in() {
                    if ui.button("Logout").clicked() {
                        state.logout();
                    }
                    if let Some(ref user) = state.auth.user {
                        ui.label(format!("@{}", user.username));
                    }
                }
            });
        });

        // Transient store errors surface here until dismissed.
        let mut dismissed = false;
        if let Some(ref notification) = state.notification {
            ui.horizontal(|ui| {
                ui.colored_label(egui::Color32::from_rgb(220, 53, 69), notification);
                if ui.small_button("✖").clicked() {
                    dismissed = true;
                }
            });
        }
        if dismissed {
            state.notification = None;
        }
    });
}

pub fn render_main_panel(ctx: &egui::Context, state: &mut AppState) {
    match state.current_view {
        AppView::Auth => {
            egui::CentralPanel::default().show(ctx, |ui| {
                auth_view::render(ui, state);
            });
        }
        AppView::Chat => {
            egui::SidePanel::left("sidebar")
                .resizable(false)
                .default_width(260.0)
                .show(ctx, |ui| {
                    sidebar::render(ui, state);
                });
            egui::CentralPanel::default().show(ctx, |ui| {
                chat_view::render(ui, state);
            });
        }
    }
}
