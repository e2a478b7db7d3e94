/// ActivityPanel Core — formatting, fragments, and the panel state machines.
///
/// This crate contains all business logic with zero UI dependencies.
/// A frontend feeds it events and the current time, and renders what it
/// reports back.
///
/// # Modules
///
/// - [`format`] — Byte sizes, grouped counts, chart palettes.
/// - [`fragment`] — Parsing of server-rendered panel markup.
/// - [`animation`] — Counter roll-ups, fade-in, inline reveal.
/// - [`fetch`] — Page requests on a background worker.
/// - [`panel`] — `PaginatedPanel`, the navigation and counter state machines.
/// - [`config`] — JSON-loadable panel settings.
/// - [`error`] — `PanelError` and the crate `Result`.
pub mod animation;
pub mod config;
pub mod error;
pub mod fetch;
pub mod format;
pub mod fragment;
pub mod panel;

pub use config::PanelConfig;
pub use error::{PanelError, Result};
pub use panel::{Control, Dispatch, NavPhase, PaginatedPanel, PanelEvent};
