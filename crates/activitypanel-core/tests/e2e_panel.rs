/// End-to-end panel navigation tests.
///
/// These drive the real `PaginatedPanel` through full Ready → Pending →
/// Ready cycles. Two kinds of page source are used:
///
/// - A **gated source** whose responses are released by the test, so the
///   Pending state can be held open and poked at deterministically.
/// - The real `HttpSource` against a one-shot `TcpListener` server, so the
///   request line that goes over the wire is checked exactly.
use activitypanel_core::animation::CounterPhase;
use activitypanel_core::fetch::{HttpSource, PageFetchRequest, PageSource};
use activitypanel_core::{
    Dispatch, NavPhase, PaginatedPanel, PanelConfig, PanelError, PanelEvent, Result,
};
use crossbeam_channel::{Receiver, Sender};
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

// ── Helpers ──────────────────────────────────────────────────────────────────

fn fragment(page: u32, requests: u64) -> String {
    format!(
        r#"<div class="panel">
             <span class="counter" data-count="{requests}" format="regular">{requests}</span>
             <span class="counter" data-count="1500" format="space">0</span>
             <table><tr><th>Key</th></tr><tr><td>page {page}</td></tr></table>
             <div id="table-buttons" page="{page}" info-source="/logs?page=">
               <button id="table-previous">Previous</button>
               <input id="table-go-input"><button id="table-go">Go</button>
               <button id="table-next">Next</button>
             </div>
           </div>"#
    )
}

/// Source whose responses are fed by the test through a channel.
struct GatedSource {
    responses: Receiver<Result<String>>,
    urls: Mutex<Vec<String>>,
}

impl PageSource for GatedSource {
    fn fetch(&self, url: &str) -> Result<String> {
        self.urls.lock().unwrap().push(url.to_string());
        self.responses
            .recv_timeout(Duration::from_secs(10))
            .unwrap_or_else(|_| Err(PanelError::request_failure(url, "test gate timed out")))
    }
}

fn gated_panel(page: u32) -> (PaginatedPanel, Sender<Result<String>>, Arc<GatedSource>) {
    let (tx, rx) = crossbeam_channel::unbounded();
    let source = Arc::new(GatedSource {
        responses: rx,
        urls: Mutex::new(Vec::new()),
    });
    let panel = PaginatedPanel::new(
        fragment(page, 42),
        source.clone(),
        PanelConfig::default(),
        Instant::now(),
    )
    .unwrap();
    (panel, tx, source)
}

/// Pump `process_fetch_messages()` until the panel leaves Pending or the
/// deadline expires.
fn pump_until_ready(panel: &mut PaginatedPanel) {
    let deadline = Instant::now() + Duration::from_secs(30);
    while panel.is_pending() {
        assert!(
            Instant::now() < deadline,
            "request did not settle within 30 seconds"
        );
        panel.process_fetch_messages();
        thread::sleep(Duration::from_millis(5));
    }
}

/// Serve exactly one HTTP response and hand back the raw request head.
fn serve_once(status: &'static str, body: String) -> (String, thread::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut head = Vec::new();
        let mut buf = [0u8; 1024];
        while !head.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = stream.read(&mut buf).unwrap();
            if n == 0 {
                break;
            }
            head.extend_from_slice(&buf[..n]);
        }
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).unwrap();
        String::from_utf8_lossy(&head).into_owned()
    });
    (format!("http://{addr}/dashboard/"), handle)
}

fn http_panel(origin: &str, page: u32) -> PaginatedPanel {
    let source = HttpSource::new(
        Some(reqwest::Url::parse(origin).unwrap()),
        Duration::from_secs(10),
    )
    .unwrap();
    PaginatedPanel::new(
        fragment(page, 7),
        Arc::new(source),
        PanelConfig::default(),
        Instant::now(),
    )
    .unwrap()
}

// ── Pending state ────────────────────────────────────────────────────────────

/// While a request is in flight every control is a no-op.
#[test]
fn pending_request_disables_all_controls() {
    let (mut panel, tx, source) = gated_panel(3);
    let now = Instant::now();

    assert!(matches!(
        panel.handle_event(PanelEvent::Next, now).unwrap(),
        Dispatch::Requested(_)
    ));
    assert!(!panel.controls_enabled());

    for event in [
        PanelEvent::Next,
        PanelEvent::Previous,
        PanelEvent::GoTo,
        PanelEvent::InputChanged("9".into()),
        PanelEvent::InputFocused,
    ] {
        assert_eq!(
            panel.handle_event(event, now).unwrap(),
            Dispatch::ControlsDisabled
        );
    }
    assert_eq!(panel.go_input(), "");
    assert_eq!(panel.go_button_width(now + Duration::from_secs(1)), 0.0);

    tx.send(Ok(fragment(4, 42))).unwrap();
    pump_until_ready(&mut panel);

    assert_eq!(source.urls.lock().unwrap().as_slice(), ["/logs?page=4"]);
    assert_eq!(panel.current_page(), Some(4));
    assert!(panel.controls_enabled());
}

/// The control that triggered the request carries the loading indicator.
#[test]
fn pending_request_marks_triggering_control() {
    let (mut panel, tx, _source) = gated_panel(2);
    let now = Instant::now();
    panel.handle_event(PanelEvent::Previous, now).unwrap();
    match panel.phase() {
        NavPhase::Pending { request, control } => {
            assert_eq!(request, &PageFetchRequest::new("/logs?page=", 1));
            assert_eq!(*control, activitypanel_core::Control::Previous);
        }
        NavPhase::Ready => panic!("expected Pending"),
    }
    tx.send(Ok(fragment(1, 42))).unwrap();
    pump_until_ready(&mut panel);
    assert_eq!(panel.loading_control(), None);
}

// ── Replacement ──────────────────────────────────────────────────────────────

/// A replacement fragment's counters show their server text; only the
/// initial load animates.
#[test]
fn replacement_counters_are_static() {
    let (mut panel, tx, _source) = gated_panel(0);
    let now = Instant::now();
    assert!(panel
        .counters()
        .iter()
        .all(|c| c.phase(now) == CounterPhase::Animating));

    panel.handle_event(PanelEvent::Next, now).unwrap();
    tx.send(Ok(fragment(1, 99))).unwrap();
    pump_until_ready(&mut panel);

    let later = now + Duration::from_secs(5);
    assert!(panel
        .counters()
        .iter()
        .all(|c| c.phase(later) == CounterPhase::Idle));
    assert_eq!(panel.counter_texts(later).unwrap(), vec!["99", "0"]);
    assert_eq!(panel.fragment().rows()[1].cells, vec!["page 1"]);
}

/// Go input and its revealed button belong to the old markup and reset.
#[test]
fn replacement_resets_go_field() {
    let (mut panel, tx, _source) = gated_panel(0);
    let now = Instant::now();
    panel.handle_event(PanelEvent::InputFocused, now).unwrap();
    panel
        .handle_event(PanelEvent::InputChanged("6".into()), now)
        .unwrap();
    assert_eq!(
        panel.handle_event(PanelEvent::GoTo, now).unwrap(),
        Dispatch::Requested(PageFetchRequest::new("/logs?page=", 5))
    );
    tx.send(Ok(fragment(5, 42))).unwrap();
    pump_until_ready(&mut panel);

    assert_eq!(panel.current_page(), Some(5));
    assert_eq!(panel.go_input(), "");
    assert_eq!(panel.go_button_width(now + Duration::from_secs(1)), 0.0);
}

// ── Failure handling ─────────────────────────────────────────────────────────

/// A failed request re-enables controls, keeps the page, and sets a notice.
#[test]
fn failed_request_surfaces_notice_and_re_enables_controls() {
    let (mut panel, tx, _source) = gated_panel(3);
    let before = chrono::Local::now();
    panel.handle_event(PanelEvent::Next, Instant::now()).unwrap();
    tx.send(Err(PanelError::request_failure("/logs?page=4", "connection reset")))
        .unwrap();
    pump_until_ready(&mut panel);

    assert!(panel.controls_enabled());
    assert_eq!(panel.current_page(), Some(3));
    let notice = panel.notice().expect("notice after failure");
    assert!(notice.message.contains("connection reset"));
    assert!(notice.at >= before);

    // Controls work again straight away.
    assert!(matches!(
        panel.handle_event(PanelEvent::Next, Instant::now()).unwrap(),
        Dispatch::Requested(_)
    ));
    tx.send(Ok(fragment(4, 42))).unwrap();
    pump_until_ready(&mut panel);
    assert!(panel.notice().is_none(), "success clears the notice");
    assert_eq!(panel.current_page(), Some(4));
}

/// A body that is not a usable fragment is a failure, not a replacement.
#[test]
fn malformed_response_is_a_failure() {
    let (mut panel, tx, _source) = gated_panel(1);
    panel.handle_event(PanelEvent::Next, Instant::now()).unwrap();
    tx.send(Ok(
        r#"<b class="counter" data-count="1" format="percent">0</b>"#.to_string(),
    ))
    .unwrap();
    pump_until_ready(&mut panel);

    assert_eq!(panel.current_page(), Some(1));
    assert!(panel.notice().unwrap().message.contains("unusable response"));
}

/// Notices can be dismissed.
#[test]
fn notice_can_be_dismissed() {
    let (mut panel, tx, _source) = gated_panel(0);
    panel.handle_event(PanelEvent::Next, Instant::now()).unwrap();
    tx.send(Err(PanelError::request_failure("/logs?page=1", "boom")))
        .unwrap();
    pump_until_ready(&mut panel);
    assert!(panel.notice().is_some());
    panel
        .handle_event(PanelEvent::DismissNotice, Instant::now())
        .unwrap();
    assert!(panel.notice().is_none());
}

// ── Over HTTP ────────────────────────────────────────────────────────────────

/// `Next` on page 3 sends `GET <base>4` and the panel adopts the response.
#[test]
fn next_issues_get_for_following_page() {
    let (origin, server) = serve_once("200 OK", fragment(4, 11));
    let mut panel = http_panel(&origin, 3);

    panel.handle_event(PanelEvent::Next, Instant::now()).unwrap();
    pump_until_ready(&mut panel);

    let head = server.join().unwrap();
    assert!(
        head.starts_with("GET /logs?page=4 HTTP/1.1\r\n"),
        "unexpected request head: {head}"
    );
    assert!(panel.notice().is_none());
    assert_eq!(panel.current_page(), Some(4));
}

/// A server error status becomes a notice.
#[test]
fn server_error_status_becomes_notice() {
    let (origin, server) = serve_once("500 Internal Server Error", "oops".to_string());
    let mut panel = http_panel(&origin, 0);

    panel.handle_event(PanelEvent::Next, Instant::now()).unwrap();
    pump_until_ready(&mut panel);
    server.join().unwrap();

    assert_eq!(panel.current_page(), Some(0));
    assert!(panel.controls_enabled());
    assert!(panel.notice().unwrap().message.contains("500"));
}

/// Nothing listening: the transport error becomes a notice.
#[test]
fn connection_refused_becomes_notice() {
    let addr = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let mut panel = http_panel(&format!("http://{addr}/"), 0);

    panel.handle_event(PanelEvent::Next, Instant::now()).unwrap();
    pump_until_ready(&mut panel);

    assert!(panel.controls_enabled());
    assert!(matches!(
        panel.notice(),
        Some(n) if n.message.contains("/logs?page=1")
    ));
}
