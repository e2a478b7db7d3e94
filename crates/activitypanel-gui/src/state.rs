/// Application state management.
///
/// Wraps the core `PaginatedPanel` with what only the window needs: the
/// start-page load, the theme, and the last input error. Fetch results are
/// applied in `process_fetch_messages()`, which runs once per frame.
///
/// Only the very first load, made before the window opens, blocks. Reloads
/// run on a worker like any page request.
use activitypanel_core::fetch::{start_load, HttpSource, LoadHandle, PageSource};
use activitypanel_core::{Dispatch, PaginatedPanel, PanelConfig, PanelError, PanelEvent};
use std::sync::Arc;
use std::time::Instant;

/// The current phase of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppPhase {
    /// The initial page could not be loaded; nothing to show yet.
    Unloaded,
    /// The start page is being (re)loaded.
    Loading,
    /// The panel is up and accepting input.
    Ready,
    /// A navigation request is in flight.
    Pending,
}

/// All application state.
pub struct AppState {
    // ── Panel ──────────────────────────────────────────
    pub start_url: String,
    pub config: PanelConfig,
    source: Arc<dyn PageSource>,
    pub panel: Option<PaginatedPanel>,
    /// Why the start page could not be loaded while no panel exists.
    pub load_error: Option<String>,
    load: Option<LoadHandle>,

    // ── UI state ───────────────────────────────────────
    /// Last rejected page-number entry.
    pub input_error: Option<String>,
    pub show_about: bool,
    /// `true` = dark mode (default), `false` = light mode.
    pub dark_mode: bool,
}

impl AppState {
    /// Load `start_url` over HTTP and build the panel from it.
    ///
    /// Relative `info-source` values are resolved against `start_url`.
    pub fn new(start_url: impl Into<String>, config: PanelConfig) -> anyhow::Result<Self> {
        let start_url = start_url.into();
        config.validate()?;
        let source = HttpSource::for_page(&start_url, config.request_timeout())?;
        Ok(Self::with_source(start_url, config, Arc::new(source)))
    }

    /// Build state over any page source, loading the start page before
    /// returning.
    pub fn with_source(
        start_url: impl Into<String>,
        config: PanelConfig,
        source: Arc<dyn PageSource>,
    ) -> Self {
        let mut state = Self {
            start_url: start_url.into(),
            config,
            source,
            panel: None,
            load_error: None,
            load: None,
            input_error: None,
            show_about: false,
            dark_mode: true,
        };
        tracing::info!("Loading {}", state.start_url);
        let result = state.source.fetch(&state.start_url);
        state.apply_load(result);
        state
    }

    /// Reload the start page in the background.
    ///
    /// Ignored while a load or a page request is already in flight. The
    /// result is applied by `process_fetch_messages()`.
    pub fn reload(&mut self) {
        if matches!(self.phase(), AppPhase::Loading | AppPhase::Pending) {
            tracing::debug!("Reload ignored: a request is in flight");
            return;
        }
        tracing::info!("Reloading {}", self.start_url);
        match start_load(self.source.clone(), self.start_url.clone()) {
            Ok(handle) => self.load = Some(handle),
            Err(e) => self.apply_load(Err(e)),
        }
    }

    /// Build a fresh panel from a load result.
    ///
    /// A new page load means new counter animations, so the panel is rebuilt
    /// from scratch. A failure keeps any panel already on screen and reports
    /// through its notice.
    fn apply_load(&mut self, result: activitypanel_core::Result<String>) {
        let result = result.and_then(|markup| {
            PaginatedPanel::new(
                markup,
                self.source.clone(),
                self.config.clone(),
                Instant::now(),
            )
        });
        match result {
            Ok(panel) => {
                self.panel = Some(panel);
                self.load_error = None;
                self.input_error = None;
            }
            Err(e) => match self.panel.as_mut() {
                Some(panel) => {
                    tracing::warn!("Reload failed, keeping current page: {e}");
                    panel.show_notice(&e);
                }
                None => {
                    tracing::warn!("Start page load failed: {e}");
                    self.load_error = Some(e.to_string());
                }
            },
        }
    }

    pub fn phase(&self) -> AppPhase {
        if self.load.is_some() {
            return AppPhase::Loading;
        }
        match &self.panel {
            None => AppPhase::Unloaded,
            Some(panel) if panel.is_pending() => AppPhase::Pending,
            Some(_) => AppPhase::Ready,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.load.is_some()
    }

    /// Forward a UI event to the panel.
    ///
    /// Rejected input is kept in `input_error` for the pagination bar.
    /// Controls stay disabled while the start page reloads.
    pub fn dispatch(&mut self, event: PanelEvent) -> Option<Dispatch> {
        if self.is_loading() && self.panel.is_some() {
            return Some(Dispatch::ControlsDisabled);
        }
        let panel = self.panel.as_mut()?;
        let is_navigation = matches!(
            event,
            PanelEvent::Next | PanelEvent::Previous | PanelEvent::GoTo
        );
        match panel.handle_event(event, Instant::now()) {
            Ok(dispatch) => {
                if is_navigation {
                    self.input_error = None;
                }
                Some(dispatch)
            }
            Err(PanelError::InvalidArgument(message)) => {
                self.input_error = Some(message);
                None
            }
            Err(e) => {
                self.input_error = Some(e.to_string());
                None
            }
        }
    }

    /// Apply any finished load or fetch. Called once per frame.
    ///
    /// Returns `true` if the UI should repaint.
    pub fn process_fetch_messages(&mut self) -> bool {
        let mut changed = false;
        if let Some(result) = self.load.as_ref().and_then(LoadHandle::try_result) {
            self.load = None;
            self.apply_load(result);
            changed = true;
        }
        if let Some(panel) = self.panel.as_mut() {
            changed |= panel.process_fetch_messages();
        }
        changed
    }

    /// Whether another frame is needed soon (animations or a pending request).
    pub fn needs_repaint(&self) -> bool {
        self.is_loading()
            || self
                .panel
                .as_ref()
                .is_some_and(|p| p.needs_repaint(Instant::now()))
    }
}
