/// Chart panel — one bar per counter, coloured from the panel's palettes.
///
/// Bars track the counters' animated values, so the chart rolls up with them.
use crate::state::AppState;
use crate::theme::{faded, series_color};
use activitypanel_core::format::{format_bytes, FormatKind, DEFAULT_DECIMALS};
use egui::{Pos2, Rect, Stroke, Ui, Vec2};
use std::time::Instant;

const BAR_WIDTH: f32 = 28.0;
const BAR_GAP: f32 = 12.0;
const CHART_HEIGHT: f32 = 120.0;

/// Draw the counter bar chart.
pub fn chart_panel(ui: &mut Ui, state: &AppState) {
    let Some(panel) = &state.panel else {
        return;
    };
    let counters = panel.counters();
    if counters.is_empty() {
        return;
    }
    let now = Instant::now();
    let opacity = panel.opacity(now);
    let palettes = panel.palettes();

    // Scale against the targets so bars grow toward a fixed height.
    let max = counters
        .iter()
        .map(|c| c.spec().target.max(c.start_value()))
        .fold(0.0_f64, f64::max);

    ui.heading("Counters");
    ui.add_space(4.0);

    let width = counters.len() as f32 * (BAR_WIDTH + BAR_GAP);
    let (rect, _) =
        ui.allocate_exact_size(Vec2::new(width, CHART_HEIGHT), egui::Sense::hover());
    let painter = ui.painter_at(rect);

    for (i, counter) in counters.iter().enumerate() {
        let fraction = if max > 0.0 {
            (counter.value(now) / max).clamp(0.0, 1.0) as f32
        } else {
            0.0
        };
        let height = CHART_HEIGHT * fraction;
        let left = rect.min.x + i as f32 * (BAR_WIDTH + BAR_GAP);
        let bar = Rect::from_min_max(
            Pos2::new(left, rect.max.y - height),
            Pos2::new(left + BAR_WIDTH, rect.max.y),
        );

        let fill = faded(series_color(&palettes.fill, i), opacity);
        let line = faded(series_color(&palettes.line, i), opacity);
        painter.rect_filled(bar, 0.0, fill);
        // Border on the top and sides, like a bar chart's stroke.
        let stroke = Stroke::new(1.5, line);
        painter.line_segment([bar.left_bottom(), bar.left_top()], stroke);
        painter.line_segment([bar.left_top(), bar.right_top()], stroke);
        painter.line_segment([bar.right_top(), bar.right_bottom()], stroke);

        let spec = counter.spec();
        let exact = match spec.kind {
            FormatKind::Space => format_bytes(spec.target, DEFAULT_DECIMALS),
            FormatKind::Regular => spec.kind.format(spec.target, &state.config.locale),
        };
        if let Ok(text) = exact {
            let column = Rect::from_min_max(
                Pos2::new(left, rect.min.y),
                Pos2::new(left + BAR_WIDTH, rect.max.y),
            );
            ui.interact(column, ui.id().with(("counter-bar", i)), egui::Sense::hover())
                .on_hover_text(text);
        }
    }
}
