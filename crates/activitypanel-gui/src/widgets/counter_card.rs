/// Counter card -- one animated counter value on a tinted card.
use crate::theme::faded;
use egui::{Color32, Ui};

/// Draw a counter card.
///
/// `accent` is the series colour the card is tinted with; `opacity` is the
/// panel's load fade-in.
pub fn counter_card(ui: &mut Ui, text: &str, caption: &str, accent: Color32, opacity: f32) {
    let value_color = faded(ui.visuals().strong_text_color(), opacity);
    let caption_color = faded(ui.visuals().weak_text_color(), opacity);

    egui::Frame::group(ui.style())
        .fill(faded(accent.gamma_multiply(0.25), opacity))
        .stroke(egui::Stroke::new(1.0, faded(accent, opacity)))
        .inner_margin(egui::Margin::same(10))
        .show(ui, |ui| {
            ui.set_min_width(140.0);
            ui.vertical(|ui| {
                ui.label(
                    egui::RichText::new(text)
                        .size(26.0)
                        .strong()
                        .color(value_color),
                );
                ui.label(egui::RichText::new(caption).size(11.0).color(caption_color));
            });
        });
}
