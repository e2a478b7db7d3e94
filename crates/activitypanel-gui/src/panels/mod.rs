/// Panels composed by the main window.

pub mod chart_panel;
pub mod content_panel;
pub mod counters_panel;
