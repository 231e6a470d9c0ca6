use eframe::egui;

use crate::egui_app::state::AppState;

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    let available = ui.available_rect_before_wrap();

    ui.vertical_centered(|ui| {
        let form_height = if state.is_signup_mode { 300.0 } else { 240.0 };
        ui.add_space((available.height() - form_height).max(0.0) / 2.0);

        ui.label(egui::RichText::new("Ripple").size(32.0).strong());
        ui.add_space(8.0);
        ui.label(if state.is_signup_mode {
            "Create Account"
        } else {
            "Welcome Back"
        });
        ui.add_space(16.0);

        if let Some(ref error) = state.auth.error {
            ui.colored_label(egui::Color32::from_rgb(220, 53, 69), error);
            ui.add_space(8.0);
        }

        let input_width = 260.0;

        if state.is_signup_mode {
            ui.add_sized(
                [input_width, 28.0],
                egui::TextEdit::singleline(&mut state.username_input).hint_text("Username"),
            );
            ui.add_space(6.0);
        }

        ui.add_sized(
            [input_width, 28.0],
            egui::TextEdit::singleline(&mut state.email_input).hint_text("Email"),
        );
        ui.add_space(6.0);

        ui.add_sized(
            [input_width, 28.0],
            egui::TextEdit::singleline(&mut state.password_input)
                .hint_text("Password")
                .password(true),
        );
        ui.add_space(16.0);

        ui.horizontal(|ui| {
            ui.add_space((available.width() - 250.0).max(0.0) / 2.0);

            let label = if state.is_signup_mode { "Sign Up" } else { "Login" };
            if ui.add_sized([120.0, 30.0], egui::Button::new(label)).clicked() {
                if state.is_signup_mode {
                    state.handle_signup();
                } else {
                    state.handle_login();
                }
            }

            ui.add_space(10.0);

            let toggle = if state.is_signup_mode {
                "Back to Login"
            } else {
                "Create Account"
            };
            if ui.add_sized([120.0, 30.0], egui::Button::new(toggle)).clicked() {
                state.toggle_auth_mode();
            }
        });

        if state.auth.is_authenticating {
            ui.add_space(12.0);
            ui.spinner();
        }
    });
}
