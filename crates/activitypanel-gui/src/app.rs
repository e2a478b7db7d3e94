/// Main `eframe::App` implementation for ActivityPanel.
///
/// This is the top-level UI layout that composes all panels and widgets.
use crate::panels;
use crate::state::AppState;
use crate::theme::ActivityTheme;
use crate::widgets;

/// The ActivityPanel application.
pub struct ActivityPanelApp {
    state: AppState,
}

impl ActivityPanelApp {
    /// Create a new application instance from already-loaded state.
    ///
    /// Build the state *before* `eframe::run_native` so the first page is
    /// fetched before the window opens and the first frame already has
    /// counters to animate.
    pub fn with_state(cc: &eframe::CreationContext<'_>, state: AppState) -> Self {
        ActivityTheme::for_dark_mode(state.dark_mode).apply(&cc.egui_ctx);
        Self { state }
    }
}

impl eframe::App for ActivityPanelApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ── Apply theme ───────────────────────────────────────────────────
        ActivityTheme::for_dark_mode(self.state.dark_mode).apply(ctx);

        // ── Process background messages ───────────────────────────────────
        let _changed = self.state.process_fetch_messages();

        // Animations need every frame; a pending request only needs polling.
        if self.state.needs_repaint() {
            ctx.request_repaint_after(std::time::Duration::from_millis(16));
        }

        // ── Top toolbar ───────────────────────────────────────────────────
        egui::TopBottomPanel::top("toolbar")
            .min_height(36.0)
            .show(ctx, |ui| {
                ui.add_space(4.0);
                widgets::toolbar::toolbar(ui, &mut self.state);
                ui.add_space(4.0);
            });

        // ── About dialog ──────────────────────────────────────────────────
        let mut show_about = self.state.show_about;
        egui::Window::new("About ActivityPanel")
            .open(&mut show_about)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .fixed_size([320.0, 0.0])
            .show(ctx, |ui| {
                let accent = ui.visuals().hyperlink_color;
                let muted = ui.visuals().weak_text_color();
                ui.vertical_centered(|ui| {
                    ui.add_space(8.0);
                    ui.label(
                        egui::RichText::new("📈 ActivityPanel")
                            .size(22.0)
                            .strong()
                            .color(accent),
                    );
                    ui.label(
                        egui::RichText::new(format!("v{}", env!("CARGO_PKG_VERSION")))
                            .size(13.0)
                            .color(muted),
                    );
                    ui.add_space(8.0);
                    ui.label("Paginated activity dashboard with animated counters.");
                    ui.add_space(8.0);
                    ui.label(
                        egui::RichText::new("MIT License · Built with Rust & egui")
                            .size(11.0)
                            .color(muted),
                    );
                    ui.add_space(8.0);
                });
            });
        self.state.show_about = show_about;

        // ── Bottom status bar ─────────────────────────────────────────────
        egui::TopBottomPanel::bottom("status_bar")
            .min_height(24.0)
            .show(ctx, |ui| {
                ui.add_space(2.0);
                widgets::status_bar::status_bar(ui, &self.state);
                ui.add_space(2.0);
            });

        // ── Pagination controls ───────────────────────────────────────────
        egui::TopBottomPanel::bottom("pagination")
            .min_height(36.0)
            .show(ctx, |ui| {
                ui.add_space(4.0);
                widgets::pagination_bar::pagination_bar(ui, &mut self.state);
                ui.add_space(4.0);
            });

        // ── Central panel ─────────────────────────────────────────────────
        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(error) = self.state.load_error.clone() {
                ui.vertical_centered(|ui| {
                    ui.add_space(40.0);
                    ui.colored_label(ui.visuals().error_fg_color, error);
                    ui.add_space(8.0);
                    if self.state.is_loading() {
                        ui.spinner();
                    } else if ui.button("Retry").clicked() {
                        self.state.reload();
                    }
                });
                return;
            }

            egui::ScrollArea::vertical().show(ui, |ui| {
                panels::counters_panel::counters_panel(ui, &self.state);
                ui.add_space(12.0);
                panels::chart_panel::chart_panel(ui, &self.state);
                ui.add_space(12.0);
                ui.separator();
                ui.add_space(4.0);
                panels::content_panel::content_panel(ui, &self.state);
            });
        });
    }
}
