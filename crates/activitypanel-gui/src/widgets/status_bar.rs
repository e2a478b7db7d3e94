/// Bottom status bar — load and request status.
use crate::state::{AppPhase, AppState};
use activitypanel_core::NavPhase;
use egui::Ui;

/// Draw the status bar at the bottom of the window.
pub fn status_bar(ui: &mut Ui, state: &AppState) {
    let color_weak = ui.visuals().weak_text_color();
    let color_normal = ui.visuals().text_color();
    let color_error = ui.visuals().error_fg_color;

    ui.horizontal(|ui| match state.phase() {
        AppPhase::Unloaded => {
            ui.label(
                egui::RichText::new("Not loaded")
                    .size(12.0)
                    .color(color_error),
            );
        }
        AppPhase::Loading => {
            ui.spinner();
            ui.label(
                egui::RichText::new(format!("Loading {}...", state.start_url))
                    .size(12.0)
                    .color(color_normal),
            );
        }
        AppPhase::Pending => {
            ui.spinner();
            if let Some(NavPhase::Pending { request, .. }) = state.panel.as_ref().map(|p| p.phase()) {
                ui.label(
                    egui::RichText::new(format!("Loading {}...", request.url()))
                        .size(12.0)
                        .color(color_normal),
                );
            }
        }
        AppPhase::Ready => {
            ui.label(egui::RichText::new("Ready").size(12.0).color(color_weak));
            if let Some(panel) = &state.panel {
                if let Some(page) = panel.current_page() {
                    ui.separator();
                    ui.label(
                        egui::RichText::new(format!("page index {page}"))
                            .size(12.0)
                            .color(color_normal),
                    );
                }
                ui.separator();
                ui.label(
                    egui::RichText::new(format!("{} rows", panel.fragment().rows().len()))
                        .size(12.0)
                        .color(color_weak),
                );
                if panel.notice().is_some() {
                    ui.separator();
                    ui.label(
                        egui::RichText::new("last request failed")
                            .size(12.0)
                            .color(color_error),
                    );
                }
            }
        }
    });
}
