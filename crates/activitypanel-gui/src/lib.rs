/// ActivityPanel GUI — egui-based desktop frontend.
///
/// This crate contains all UI code. Business logic lives in `activitypanel-core`.
pub mod app;
pub mod panels;
pub mod state;
pub mod theme;
pub mod widgets;

pub use app::ActivityPanelApp;
pub use state::AppState;
