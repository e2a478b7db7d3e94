/// Content panel — the fragment's table rows.
use crate::state::AppState;
use egui::Ui;
use egui_extras::{Column, TableBuilder};

const ROW_HEIGHT: f32 = 20.0;

/// Draw the current page's table.
pub fn content_panel(ui: &mut Ui, state: &AppState) {
    let Some(panel) = &state.panel else {
        return;
    };
    let rows = panel.fragment().rows();
    if rows.is_empty() {
        ui.label(
            egui::RichText::new("This page has no table.")
                .size(12.0)
                .color(ui.visuals().weak_text_color()),
        );
        ui.collapsing("Page markup", |ui| {
            let mut markup = panel.fragment().markup();
            ui.add(
                egui::TextEdit::multiline(&mut markup)
                    .code_editor()
                    .desired_width(f32::INFINITY),
            );
        });
        return;
    }

    let (header, body) = match rows.first() {
        Some(first) if first.header => (Some(first), &rows[1..]),
        _ => (None, rows),
    };
    let columns = rows.iter().map(|r| r.cells.len()).max().unwrap_or(1).max(1);

    let table = TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .columns(Column::auto().at_least(60.0), columns - 1)
        .column(Column::remainder());

    let cell = |row: &[String], i: usize| row.get(i).cloned().unwrap_or_default();

    let body_fn = |mut table_body: egui_extras::TableBody<'_>| {
        for row in body {
            table_body.row(ROW_HEIGHT, |mut table_row| {
                for i in 0..columns {
                    table_row.col(|ui| {
                        ui.label(cell(&row.cells, i));
                    });
                }
            });
        }
    };

    match header {
        Some(header) => table
            .header(ROW_HEIGHT, |mut table_row| {
                for i in 0..columns {
                    table_row.col(|ui| {
                        ui.strong(cell(&header.cells, i));
                    });
                }
            })
            .body(body_fn),
        None => table.body(body_fn),
    };
}
