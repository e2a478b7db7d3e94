/// Colour scheme for ActivityPanel.
///
/// Provides dark and light themes plus the bridge from the core's CSS-style
/// palette strings to egui colours.
use activitypanel_core::format::{parse_rgba, ColorPalette};
use egui::{Color32, Stroke, Visuals};

/// Semantic colour palette for ActivityPanel.
pub struct ActivityTheme {
    pub background: Color32,
    pub surface: Color32,
    pub text_primary: Color32,
    pub accent: Color32,
    pub error: Color32,
    pub separator: Color32,
}

impl ActivityTheme {
    /// Dark theme — the default.
    pub fn dark() -> Self {
        Self {
            background: Color32::from_rgb(0x1e, 0x1e, 0x2e),
            surface: Color32::from_rgb(0x2a, 0x2a, 0x3c),
            text_primary: Color32::from_rgb(0xe4, 0xe4, 0xe8),
            accent: Color32::from_rgb(0x89, 0xb4, 0xfa),
            error: Color32::from_rgb(0xf3, 0x8b, 0xa8),
            separator: Color32::from_rgb(0x3a, 0x3a, 0x50),
        }
    }

    /// Light theme — optional toggle.
    pub fn light() -> Self {
        Self {
            background: Color32::from_rgb(0xf5, 0xf5, 0xf5),
            surface: Color32::from_rgb(0xff, 0xff, 0xff),
            text_primary: Color32::from_rgb(0x1e, 0x1e, 0x2e),
            accent: Color32::from_rgb(0x3a, 0x6f, 0xd8),
            error: Color32::from_rgb(0xd0, 0x40, 0x50),
            separator: Color32::from_rgb(0xd0, 0xd0, 0xd8),
        }
    }

    pub fn for_dark_mode(dark: bool) -> Self {
        if dark {
            Self::dark()
        } else {
            Self::light()
        }
    }

    /// Apply this theme to an egui context.
    pub fn apply(&self, ctx: &egui::Context) {
        let mut visuals = if self.background.r() < 128 {
            Visuals::dark()
        } else {
            Visuals::light()
        };

        visuals.panel_fill = self.background;
        visuals.window_fill = self.surface;
        visuals.extreme_bg_color = self.background;
        visuals.faint_bg_color = self.surface;
        visuals.hyperlink_color = self.accent;
        visuals.error_fg_color = self.error;
        visuals.widgets.noninteractive.bg_fill = self.surface;
        visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, self.text_primary);
        visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, self.separator);
        visuals.window_stroke = Stroke::new(1.0, self.separator);

        ctx.set_visuals(visuals);
    }
}

/// Convert a palette entry to an egui colour, falling back to grey for
/// entries the parser does not understand.
pub fn css_color(css: &str) -> Color32 {
    match parse_rgba(css) {
        Ok(c) => Color32::from_rgba_unmultiplied(c.r, c.g, c.b, c.alpha_u8()),
        Err(e) => {
            tracing::debug!("{e}");
            Color32::GRAY
        }
    }
}

/// Palette colour for series `index`.
pub fn series_color(palette: &ColorPalette, index: usize) -> Color32 {
    css_color(palette.color_for_index(index as i64))
}

/// Scale a colour's alpha by `opacity` (0.0 – 1.0), for the load fade-in.
pub fn faded(color: Color32, opacity: f32) -> Color32 {
    color.gamma_multiply(opacity.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_color_parses_palette_entries() {
        let line = ColorPalette::line();
        assert_eq!(
            series_color(&line, 0),
            Color32::from_rgba_unmultiplied(255, 99, 132, 255)
        );
        assert_eq!(series_color(&line, 6), series_color(&line, 0));
    }

    #[test]
    fn test_css_color_falls_back() {
        assert_eq!(css_color("chartreuse"), Color32::GRAY);
    }
}
