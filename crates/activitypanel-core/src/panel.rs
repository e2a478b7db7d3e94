/// The paginated panel — counters, pagination controls, and the
/// fetch-and-replace cycle, as explicit state machines.
///
/// Input arrives as [`PanelEvent`]s from whatever frontend drives the
/// panel; the panel answers with a [`Dispatch`] describing what it did.
/// Fetch results come back through `process_fetch_messages()`, which the
/// frontend calls once per frame.
///
/// Navigation: **Ready** → **Pending** → **Ready**. While Pending every
/// control is disabled, so at most one request is ever in flight.
use crate::animation::{CounterAnimation, CounterPhase, FadeIn, Reveal};
use crate::config::PanelConfig;
use crate::error::{PanelError, Result};
use crate::fetch::{start_fetch, FetchHandle, FetchOutcome, PageFetchRequest, PageSource};
use crate::format::ChartPalettes;
use crate::fragment::{Fragment, PaginationState};

use chrono::{DateTime, Local};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// A pagination control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Previous,
    Next,
    Go,
}

/// User input the panel reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelEvent {
    /// Request the page after the current one.
    Next,
    /// Request the page before the current one.
    Previous,
    /// Request the 1-based page typed into the page-number field.
    GoTo,
    /// The page-number field's text changed.
    InputChanged(String),
    /// The page-number field gained focus; the Go button slides open.
    InputFocused,
    /// The page-number field lost focus. The Go button stays open.
    InputBlurred,
    /// Close the inline failure notice.
    DismissNotice,
}

/// Navigation phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavPhase {
    Ready,
    Pending {
        request: PageFetchRequest,
        control: Control,
    },
}

/// What the panel did with an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// A request was issued; the panel is now Pending.
    Requested(PageFetchRequest),
    /// The target page was negative, so nothing was requested.
    Suppressed { target: i64 },
    /// Controls are disabled while a request is pending.
    ControlsDisabled,
    /// The fragment has no pagination controls.
    NoControls,
    /// A non-navigation event was applied.
    Applied,
}

/// Inline notice shown after a failed navigation.
#[derive(Debug, Clone)]
pub struct Notice {
    pub message: String,
    pub at: DateTime<Local>,
}

pub struct PaginatedPanel {
    config: PanelConfig,
    source: Arc<dyn PageSource>,
    fragment: Fragment,
    counters: Vec<CounterAnimation>,
    fade: FadeIn,
    phase: NavPhase,
    fetch: Option<FetchHandle>,
    go_input: String,
    go_reveal: Reveal,
    notice: Option<Notice>,
}

impl PaginatedPanel {
    /// Initialise the panel from its first fragment.
    ///
    /// Every counter starts its roll-up and the fade-in begins at `now`.
    pub fn new(
        markup: impl Into<String>,
        source: Arc<dyn PageSource>,
        config: PanelConfig,
        now: Instant,
    ) -> Result<Self> {
        let fragment = Fragment::parse(markup)?;
        let mut counters = build_counters(&fragment, &config)?;
        for counter in &mut counters {
            counter.start(now, config.count_duration());
        }
        info!(
            "Panel initialised: {} counters, page {:?}",
            counters.len(),
            fragment.controls().map(|c| c.page)
        );

        Ok(Self {
            fade: FadeIn::new(now, config.fade_duration()),
            config,
            source,
            fragment,
            counters,
            phase: NavPhase::Ready,
            fetch: None,
            go_input: String::new(),
            go_reveal: Reveal::default(),
            notice: None,
        })
    }

    /// Apply one event.
    ///
    /// `GoTo` with a page field that does not start with an integer is
    /// `InvalidArgument` and issues nothing.
    pub fn handle_event(&mut self, event: PanelEvent, now: Instant) -> Result<Dispatch> {
        match event {
            PanelEvent::DismissNotice => {
                self.notice = None;
                Ok(Dispatch::Applied)
            }
            PanelEvent::InputBlurred => Ok(Dispatch::Applied),
            _ if self.is_pending() => {
                debug!("Ignoring {:?}: request pending", event);
                Ok(Dispatch::ControlsDisabled)
            }
            PanelEvent::InputChanged(text) => {
                self.go_input = text;
                Ok(Dispatch::Applied)
            }
            PanelEvent::InputFocused => {
                self.go_reveal.show(now, self.config.reveal_duration());
                Ok(Dispatch::Applied)
            }
            PanelEvent::Next => {
                let Some(page) = self.current_page() else {
                    return Ok(Dispatch::NoControls);
                };
                self.request(Control::Next, i64::from(page) + 1)
            }
            PanelEvent::Previous => {
                let Some(page) = self.current_page() else {
                    return Ok(Dispatch::NoControls);
                };
                self.request(Control::Previous, i64::from(page) - 1)
            }
            PanelEvent::GoTo => {
                if self.controls().is_none() {
                    return Ok(Dispatch::NoControls);
                }
                let page_number = parse_page_input(&self.go_input)?;
                self.request(Control::Go, page_number - 1)
            }
        }
    }

    /// Issue a request for 0-based `target`, unless it is negative.
    fn request(&mut self, control: Control, target: i64) -> Result<Dispatch> {
        if target < 0 {
            debug!("Suppressing request for page {target}");
            return Ok(Dispatch::Suppressed { target });
        }
        let page = u32::try_from(target)
            .map_err(|_| PanelError::invalid_argument(format!("page {target} is out of range")))?;
        let base = match self.controls() {
            Some(controls) => controls.info_source.clone(),
            None => return Ok(Dispatch::NoControls),
        };
        let request = PageFetchRequest::new(base, page);

        info!("Requesting page {} from {}", page, request.url());
        let handle = match start_fetch(self.source.clone(), request.clone()) {
            Ok(handle) => handle,
            Err(e) => {
                self.fail(&e);
                return Err(e);
            }
        };
        self.fetch = Some(handle);
        self.phase = NavPhase::Pending {
            request: request.clone(),
            control,
        };
        Ok(Dispatch::Requested(request))
    }

    /// Apply the outcome of the in-flight request, if it has arrived.
    ///
    /// Returns `true` if the panel changed.
    pub fn process_fetch_messages(&mut self) -> bool {
        let outcome = match self.fetch.as_ref().and_then(FetchHandle::try_outcome) {
            Some(outcome) => outcome,
            None => return false,
        };
        self.fetch = None;
        self.phase = NavPhase::Ready;

        match outcome {
            FetchOutcome::Loaded {
                request,
                body,
                elapsed,
            } => match self.replace(body) {
                Ok(()) => {
                    info!(
                        "Replaced panel with page {} ({} ms)",
                        request.page,
                        elapsed.as_millis()
                    );
                }
                Err(e) => {
                    let e = PanelError::request_failure(
                        request.url(),
                        format!("unusable response: {e}"),
                    );
                    self.fail(&e);
                }
            },
            FetchOutcome::Failed { error, .. } => self.fail(&error),
        }
        true
    }

    /// Swap in a new fragment. Its counters show their server text as-is;
    /// only the first page load animates.
    fn replace(&mut self, markup: String) -> Result<()> {
        let fragment = Fragment::parse(markup)?;
        let counters = build_counters(&fragment, &self.config)?;
        self.fragment = fragment;
        self.counters = counters;
        self.go_input.clear();
        self.go_reveal = Reveal::default();
        self.notice = None;
        Ok(())
    }

    /// Back to Ready with the old fragment, plus a notice.
    fn fail(&mut self, error: &PanelError) {
        warn!("Page request failed: {error}");
        self.phase = NavPhase::Ready;
        self.fetch = None;
        self.show_notice(error);
    }

    /// Surface `error` in the inline notice without touching the content
    /// or the navigation phase.
    pub fn show_notice(&mut self, error: &PanelError) {
        self.notice = Some(Notice {
            message: error.to_string(),
            at: Local::now(),
        });
    }

    // ── Queries ───────────────────────────────────────────────────────────

    pub fn phase(&self) -> &NavPhase {
        &self.phase
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.phase, NavPhase::Pending { .. })
    }

    /// Whether the pagination controls accept input.
    pub fn controls_enabled(&self) -> bool {
        !self.is_pending() && self.fragment.controls().is_some()
    }

    /// The control showing a loading indicator, if any.
    pub fn loading_control(&self) -> Option<Control> {
        match self.phase {
            NavPhase::Pending { control, .. } => Some(control),
            NavPhase::Ready => None,
        }
    }

    pub fn fragment(&self) -> &Fragment {
        &self.fragment
    }

    pub fn controls(&self) -> Option<&PaginationState> {
        self.fragment.controls()
    }

    /// Current 0-based page, if the fragment has controls.
    pub fn current_page(&self) -> Option<u32> {
        self.controls().map(|c| c.page)
    }

    pub fn counters(&self) -> &[CounterAnimation] {
        &self.counters
    }

    /// Display text of every counter at `now`.
    pub fn counter_texts(&self, now: Instant) -> Result<Vec<String>> {
        self.counters
            .iter()
            .map(|c| c.text(now, &self.config.locale))
            .collect()
    }

    /// Panel opacity from the load fade-in.
    pub fn opacity(&self, now: Instant) -> f32 {
        self.fade.opacity(now)
    }

    /// Go button width as a fraction of its full width.
    pub fn go_button_width(&self, now: Instant) -> f32 {
        self.go_reveal.width_fraction(now)
    }

    pub fn go_input(&self) -> &str {
        &self.go_input
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn palettes(&self) -> &ChartPalettes {
        &self.config.palettes
    }

    /// True while anything is moving or a request is outstanding.
    pub fn needs_repaint(&self, now: Instant) -> bool {
        self.is_pending()
            || self.fade.is_running(now)
            || self.go_reveal.is_running(now)
            || self
                .counters
                .iter()
                .any(|c| c.phase(now) == CounterPhase::Animating)
    }
}

fn build_counters(fragment: &Fragment, config: &PanelConfig) -> Result<Vec<CounterAnimation>> {
    fragment
        .counters()
        .iter()
        .cloned()
        .map(|spec| CounterAnimation::new(spec, &config.locale))
        .collect()
}

/// Read a page number the way a browser's `parseInt` does: leading
/// whitespace and a sign are accepted, anything after the digits is ignored.
pub fn parse_page_input(text: &str) -> Result<i64> {
    let trimmed = text.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..end];
    if digits.is_empty() {
        return Err(PanelError::invalid_argument(format!(
            "page number must be an integer, got {text:?}"
        )));
    }
    let value = digits
        .parse::<i64>()
        .map_err(|_| PanelError::invalid_argument(format!("page number {text:?} is too large")))?;
    Ok(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use support::Recorder;
    use std::time::Duration;

    /// Minimal recording source for unit tests.
    mod support {
        use crate::error::Result;
        use crate::fetch::PageSource;
        use std::sync::Mutex;

        #[derive(Default)]
        pub struct Recorder {
            pub urls: Mutex<Vec<String>>,
        }

        impl PageSource for Recorder {
            fn fetch(&self, url: &str) -> Result<String> {
                self.urls.lock().unwrap().push(url.to_string());
                let page = url.rsplit('=').next().unwrap_or("0");
                Ok(format!(
                    r#"<div id="table-buttons" page="{page}" info-source="/logs?page="></div>"#
                ))
            }
        }
    }

    fn markup(page: u32) -> String {
        format!(
            r#"<span class="counter" data-count="1500" format="regular">0</span>
               <div id="table-buttons" page="{page}" info-source="/logs?page="></div>"#
        )
    }

    fn panel(page: u32) -> (PaginatedPanel, Arc<Recorder>, Instant) {
        let source = Arc::new(Recorder::default());
        let now = Instant::now();
        let panel =
            PaginatedPanel::new(markup(page), source.clone(), PanelConfig::default(), now).unwrap();
        (panel, source, now)
    }

    fn settle(panel: &mut PaginatedPanel) {
        let deadline = Instant::now() + Duration::from_secs(10);
        while panel.is_pending() {
            assert!(Instant::now() < deadline, "request did not settle");
            panel.process_fetch_messages();
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_parse_page_input() {
        assert_eq!(parse_page_input("2").unwrap(), 2);
        assert_eq!(parse_page_input("  12abc").unwrap(), 12);
        assert_eq!(parse_page_input("-3").unwrap(), -3);
        assert_eq!(parse_page_input("+7").unwrap(), 7);
        assert!(parse_page_input("").is_err());
        assert!(parse_page_input("abc").is_err());
        assert!(parse_page_input("-").is_err());
        assert!(parse_page_input("99999999999999999999").is_err());
    }

    #[test]
    fn test_next_requests_following_page() {
        let (mut p, source, now) = panel(3);
        let d = p.handle_event(PanelEvent::Next, now).unwrap();
        assert_eq!(d, Dispatch::Requested(PageFetchRequest::new("/logs?page=", 4)));
        assert_eq!(p.loading_control(), Some(Control::Next));
        settle(&mut p);
        assert_eq!(source.urls.lock().unwrap().as_slice(), ["/logs?page=4"]);
        assert_eq!(p.current_page(), Some(4));
    }

    #[test]
    fn test_previous_on_first_page_is_suppressed() {
        let (mut p, source, now) = panel(0);
        let d = p.handle_event(PanelEvent::Previous, now).unwrap();
        assert_eq!(d, Dispatch::Suppressed { target: -1 });
        assert_eq!(p.phase(), &NavPhase::Ready);
        assert_eq!(p.current_page(), Some(0));
        assert!(source.urls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_go_to_converts_to_zero_based() {
        let (mut p, _source, now) = panel(0);
        p.handle_event(PanelEvent::InputChanged("2".into()), now).unwrap();
        let d = p.handle_event(PanelEvent::GoTo, now).unwrap();
        assert_eq!(d, Dispatch::Requested(PageFetchRequest::new("/logs?page=", 1)));
    }

    #[test]
    fn test_go_to_zero_is_suppressed_and_garbage_is_invalid() {
        let (mut p, _source, now) = panel(5);
        p.handle_event(PanelEvent::InputChanged("0".into()), now).unwrap();
        assert_eq!(
            p.handle_event(PanelEvent::GoTo, now).unwrap(),
            Dispatch::Suppressed { target: -1 }
        );
        p.handle_event(PanelEvent::InputChanged("two".into()), now).unwrap();
        assert!(matches!(
            p.handle_event(PanelEvent::GoTo, now),
            Err(PanelError::InvalidArgument(_))
        ));
        assert!(!p.is_pending());
    }

    #[test]
    fn test_focus_reveals_go_button_and_blur_keeps_it() {
        let (mut p, _source, now) = panel(0);
        assert_eq!(p.go_button_width(now), 0.0);
        p.handle_event(PanelEvent::InputFocused, now).unwrap();
        let later = now + Duration::from_millis(50);
        assert_eq!(p.go_button_width(later), 1.0);
        p.handle_event(PanelEvent::InputBlurred, later).unwrap();
        assert_eq!(p.go_button_width(later), 1.0);
    }

    #[test]
    fn test_counters_animate_on_load_only() {
        let (mut p, _source, now) = panel(0);
        let done = now + Duration::from_millis(1500);
        assert_eq!(p.counter_texts(done).unwrap(), vec!["1,500"]);
        assert!(p.needs_repaint(now));

        p.handle_event(PanelEvent::Next, done).unwrap();
        settle(&mut p);
        // The replacement fragment from the recorder has no counters.
        assert!(p.counters().is_empty());
    }

    #[test]
    fn test_fragment_without_controls_cannot_navigate() {
        let source = Arc::new(Recorder::default());
        let now = Instant::now();
        let mut p =
            PaginatedPanel::new("<p>static</p>", source, PanelConfig::default(), now).unwrap();
        assert!(!p.controls_enabled());
        assert_eq!(p.handle_event(PanelEvent::Next, now).unwrap(), Dispatch::NoControls);
        assert_eq!(p.handle_event(PanelEvent::GoTo, now).unwrap(), Dispatch::NoControls);
    }

    #[test]
    fn test_show_notice_keeps_content_and_phase() {
        let (mut p, _source, _now) = panel(2);
        p.show_notice(&PanelError::request_failure("/start", "connection refused"));
        assert!(p
            .notice()
            .is_some_and(|n| n.message.contains("connection refused")));
        assert_eq!(p.current_page(), Some(2));
        assert_eq!(p.phase(), &NavPhase::Ready);
        assert!(p.controls_enabled());
    }
}
