/// Pagination controls -- Previous, page-number field with its Go button,
/// Next, and the inline failure notice.
use crate::state::AppState;
use activitypanel_core::{Control, PanelEvent};
use egui::Ui;
use std::time::Instant;

/// Full width of the Go button once revealed.
const GO_WIDTH: f32 = 40.0;
const BUTTON_HEIGHT: f32 = 24.0;

/// Draw the pagination bar and forward clicks to the panel.
pub fn pagination_bar(ui: &mut Ui, state: &mut AppState) {
    let now = Instant::now();
    let Some(panel) = state.panel.as_ref() else {
        return;
    };
    let Some(page) = panel.current_page() else {
        return;
    };
    let enabled = panel.controls_enabled() && !state.is_loading();
    let loading = panel.loading_control();
    let go_width = panel.go_button_width(now);
    let mut input = panel.go_input().to_string();
    let notice = panel
        .notice()
        .map(|n| format!("{} ({})", n.message, n.at.format("%H:%M:%S")));

    let mut events = Vec::new();

    ui.horizontal(|ui| {
        if control_button(ui, "◀ Previous", Control::Previous, enabled, loading) {
            events.push(PanelEvent::Previous);
        }

        ui.label(egui::RichText::new(format!("Page {}", page + 1)).strong());

        let field = ui.add_enabled(
            enabled,
            egui::TextEdit::singleline(&mut input)
                .desired_width(48.0)
                .hint_text("page"),
        );
        if field.changed() {
            events.push(PanelEvent::InputChanged(input.clone()));
        }
        if field.gained_focus() {
            events.push(PanelEvent::InputFocused);
        }
        if field.lost_focus() {
            events.push(PanelEvent::InputBlurred);
            if ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                events.push(PanelEvent::GoTo);
            }
        }

        if go_width > 0.0 {
            let label = if loading == Some(Control::Go) {
                "…"
            } else if go_width >= 1.0 {
                "Go"
            } else {
                ""
            };
            if ui
                .add_enabled(
                    enabled,
                    egui::Button::new(label).min_size(egui::vec2(GO_WIDTH * go_width, BUTTON_HEIGHT)),
                )
                .clicked()
            {
                events.push(PanelEvent::GoTo);
            }
        }

        if control_button(ui, "Next ▶", Control::Next, enabled, loading) {
            events.push(PanelEvent::Next);
        }

        if loading.is_some() {
            ui.spinner();
        }
    });

    if let Some(error) = &state.input_error {
        ui.label(
            egui::RichText::new(error)
                .size(12.0)
                .color(ui.visuals().warn_fg_color),
        );
    }

    if let Some(message) = notice {
        ui.horizontal(|ui| {
            ui.label(
                egui::RichText::new(format!("⚠ {message}"))
                    .size(12.0)
                    .color(ui.visuals().error_fg_color),
            );
            if ui.small_button("✕").on_hover_text("Dismiss").clicked() {
                events.push(PanelEvent::DismissNotice);
            }
        });
    }

    for event in events {
        state.dispatch(event);
    }
}

/// A Previous/Next button; returns `true` when clicked.
fn control_button(
    ui: &mut Ui,
    label: &str,
    control: Control,
    enabled: bool,
    loading: Option<Control>,
) -> bool {
    let text = if loading == Some(control) { "…" } else { label };
    ui.add_enabled(
        enabled,
        egui::Button::new(text).min_size(egui::vec2(80.0, BUTTON_HEIGHT)),
    )
    .clicked()
}
