/// Page fetching — runs one request off the UI thread.
///
/// The UI thread owns the panel; a request runs on a short-lived worker
/// that reports exactly one message over a crossbeam channel. Navigation
/// requests report a [`FetchOutcome`] through a [`FetchHandle`]; loads of the
/// start page report through a [`LoadHandle`]. Both are drained once per
/// frame by the owner's `process_fetch_messages()`.
pub mod http;

use crate::error::{PanelError, Result};

use crossbeam_channel::{Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::debug;

pub use http::HttpSource;

/// A page to request: the container's `info-source` plus a page index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageFetchRequest {
    pub base: String,
    pub page: u32,
}

impl PageFetchRequest {
    pub fn new(base: impl Into<String>, page: u32) -> Self {
        Self {
            base: base.into(),
            page,
        }
    }

    /// Request URL: the base with the index appended verbatim.
    pub fn url(&self) -> String {
        format!("{}{}", self.base, self.page)
    }
}

/// Something that can turn a request URL into fragment markup.
///
/// [`HttpSource`] is the real implementation; tests substitute their own.
pub trait PageSource: Send + Sync {
    fn fetch(&self, url: &str) -> Result<String>;
}

/// The single message a fetch worker sends.
#[derive(Debug)]
pub enum FetchOutcome {
    /// The server answered with a fragment body.
    Loaded {
        request: PageFetchRequest,
        body: String,
        elapsed: Duration,
    },
    /// Transport error, bad status, or the worker vanished.
    Failed {
        request: PageFetchRequest,
        error: PanelError,
    },
}

/// Handle to an in-flight page request.
pub struct FetchHandle {
    /// Receiver for the worker's outcome.
    pub outcome_rx: Receiver<FetchOutcome>,
    request: PageFetchRequest,
    /// Join handle for the worker thread.
    _thread: Option<thread::JoinHandle<()>>,
}

impl FetchHandle {
    /// Non-blocking poll.
    ///
    /// A worker that exits without sending is reported as a failure, so the
    /// panel can never be left waiting on a dead request.
    pub fn try_outcome(&self) -> Option<FetchOutcome> {
        match self.outcome_rx.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(FetchOutcome::Failed {
                request: self.request.clone(),
                error: PanelError::request_failure(
                    self.request.url(),
                    "fetch worker exited without a response",
                ),
            }),
        }
    }
}

/// Handle to an in-flight load of a whole page by URL.
pub struct LoadHandle {
    /// Receiver for the fetched body or the error.
    pub result_rx: Receiver<Result<String>>,
    url: String,
    /// Join handle for the worker thread.
    _thread: Option<thread::JoinHandle<()>>,
}

impl LoadHandle {
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Non-blocking poll. A vanished worker is reported as a failure.
    pub fn try_result(&self) -> Option<Result<String>> {
        match self.result_rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(PanelError::request_failure(
                self.url.clone(),
                "load worker exited without a response",
            ))),
        }
    }
}

/// Start fetching `request` from `source` on a background thread.
pub fn start_fetch(source: Arc<dyn PageSource>, request: PageFetchRequest) -> Result<FetchHandle> {
    let (outcome_tx, outcome_rx) = crossbeam_channel::bounded::<FetchOutcome>(1);
    let worker_request = request.clone();

    let thread = spawn_worker(request.url(), outcome_tx, move || {
        let url = worker_request.url();
        debug!("Fetching {url}");
        let started = Instant::now();
        match source.fetch(&url) {
            Ok(body) => FetchOutcome::Loaded {
                request: worker_request,
                body,
                elapsed: started.elapsed(),
            },
            Err(error) => FetchOutcome::Failed {
                request: worker_request,
                error,
            },
        }
    })?;

    Ok(FetchHandle {
        outcome_rx,
        request,
        _thread: Some(thread),
    })
}

/// Start loading `url` from `source` on a background thread.
pub fn start_load(source: Arc<dyn PageSource>, url: impl Into<String>) -> Result<LoadHandle> {
    let url = url.into();
    let (result_tx, result_rx) = crossbeam_channel::bounded::<Result<String>>(1);
    let worker_url = url.clone();

    let thread = spawn_worker(url.clone(), result_tx, move || {
        debug!("Loading {worker_url}");
        source.fetch(&worker_url)
    })?;

    Ok(LoadHandle {
        result_rx,
        url,
        _thread: Some(thread),
    })
}

/// Run `work` on a named worker and send its single message to `tx`.
fn spawn_worker<T, F>(url: String, tx: Sender<T>, work: F) -> Result<thread::JoinHandle<()>>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    thread::Builder::new()
        .name("activitypanel-fetch".into())
        .spawn(move || {
            // The receiver may have been dropped; nothing left to tell.
            let _ = tx.send(work());
        })
        .map_err(|e| PanelError::request_failure(url, format!("could not start fetch worker: {e}")))
}
