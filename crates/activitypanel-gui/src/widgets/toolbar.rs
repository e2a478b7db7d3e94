/// Top action bar -- reload, theme toggle, and branding.
use crate::state::{AppPhase, AppState};
use egui::Ui;

/// Draw the toolbar.
pub fn toolbar(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        ui.label(
            egui::RichText::new("📈 ActivityPanel")
                .size(18.0)
                .strong()
                .color(ui.visuals().hyperlink_color),
        );

        ui.separator();

        // One request at a time, reload included.
        let can_reload = matches!(state.phase(), AppPhase::Ready | AppPhase::Unloaded);
        if ui
            .add_enabled(
                can_reload,
                egui::Button::new("🔄 Reload").min_size(egui::vec2(70.0, 28.0)),
            )
            .on_hover_text(if can_reload {
                "Load the start page again"
            } else {
                "Wait for the current request to finish"
            })
            .clicked()
        {
            state.reload();
        }

        ui.label(
            egui::RichText::new(&state.start_url)
                .size(11.0)
                .color(ui.visuals().weak_text_color()),
        );

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("ℹ").on_hover_text("About ActivityPanel").clicked() {
                state.show_about = true;
            }

            let theme_label = if state.dark_mode { "☀" } else { "🌙" };
            let theme_tip = if state.dark_mode {
                "Switch to light mode"
            } else {
                "Switch to dark mode"
            };
            if ui.button(theme_label).on_hover_text(theme_tip).clicked() {
                state.dark_mode = !state.dark_mode;
            }
        });
    });
}
