/// HTTP page source backed by a blocking `reqwest` client.
///
/// `info-source` values are usually relative paths, so the source keeps the
/// origin the panel was loaded from and resolves against it.
use crate::error::{PanelError, Result};
use crate::fetch::PageSource;

use reqwest::blocking::Client;
use reqwest::Url;
use std::time::Duration;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub struct HttpSource {
    client: Client,
    origin: Option<Url>,
}

impl HttpSource {
    /// Build a source. `origin` resolves relative request URLs; without one
    /// only absolute URLs can be fetched.
    pub fn new(origin: Option<Url>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("activitypanel/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| PanelError::invalid_argument(format!("could not build HTTP client: {e}")))?;
        Ok(Self { client, origin })
    }

    /// Build a source whose origin is the page at `page_url`.
    pub fn for_page(page_url: &str, timeout: Duration) -> Result<Self> {
        let origin = Url::parse(page_url)
            .map_err(|e| PanelError::invalid_argument(format!("bad page URL {page_url:?}: {e}")))?;
        Self::new(Some(origin), timeout)
    }

    /// Resolve `url` to an absolute URL.
    pub fn resolve(&self, url: &str) -> Result<Url> {
        if let Ok(absolute) = Url::parse(url) {
            return Ok(absolute);
        }
        let origin = self.origin.as_ref().ok_or_else(|| {
            PanelError::invalid_argument(format!("relative URL {url:?} with no origin to resolve it"))
        })?;
        origin
            .join(url)
            .map_err(|e| PanelError::invalid_argument(format!("bad request URL {url:?}: {e}")))
    }
}

impl PageSource for HttpSource {
    fn fetch(&self, url: &str) -> Result<String> {
        let target = self
            .resolve(url)
            .map_err(|e| PanelError::request_failure(url, e.to_string()))?;
        let response = self
            .client
            .get(target.clone())
            .send()
            .map_err(|e| PanelError::request_failure(target.as_str(), e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(PanelError::request_failure(
                target.as_str(),
                format!("server returned {status}"),
            ));
        }
        response
            .text()
            .map_err(|e| PanelError::request_failure(target.as_str(), e.to_string()))
    }
}
