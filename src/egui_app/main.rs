//! Ripple Desktop Client - Main Entry Point
//!
//! Implements eframe::App over the shared application state. Each frame
//! drains finished network work and pushed events, then renders.

use eframe::egui;
use ripple::egui_app::{views, AppState};

fn main() -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 700.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Ripple - Messaging",
        options,
        Box::new(|_cc| Ok(Box::new(RippleApp::default()))),
    )
}

#[derive(Default)]
struct RippleApp {
    state: AppState,
}

impl eframe::App for RippleApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.poll();

        views::render_top_bar(ctx, &mut self.state);
        views::render_main_panel(ctx, &mut self.state);

        // Pushed events arrive between frames; keep repainting so they show
        // without user input.
        ctx.request_repaint();
    }
}
