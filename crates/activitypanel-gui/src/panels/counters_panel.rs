/// Counters panel — the row of animated counter cards.
use crate::state::AppState;
use crate::theme::series_color;
use crate::widgets::counter_card::counter_card;
use activitypanel_core::format::FormatKind;
use egui::Ui;
use std::time::Instant;

/// Draw every counter of the current fragment.
pub fn counters_panel(ui: &mut Ui, state: &AppState) {
    let Some(panel) = &state.panel else {
        return;
    };
    let now = Instant::now();
    let opacity = panel.opacity(now);
    let texts = match panel.counter_texts(now) {
        Ok(texts) => texts,
        Err(e) => {
            ui.colored_label(ui.visuals().error_fg_color, e.to_string());
            return;
        }
    };

    ui.horizontal_wrapped(|ui| {
        for (i, (counter, text)) in panel.counters().iter().zip(&texts).enumerate() {
            let caption = match counter.spec().kind {
                FormatKind::Regular => "count",
                FormatKind::Space => "transferred",
            };
            counter_card(
                ui,
                text,
                caption,
                series_color(&panel.palettes().line, i),
                opacity,
            );
        }
    });
}
