/// Panel configuration, optionally loaded from a JSON file.
///
/// Every field has a default, so `{}` is a valid config and a file only
/// needs to name what it changes.
use crate::animation::{COUNT_DURATION, FADE_DURATION, REVEAL_DURATION};
use crate::error::{PanelError, Result};
use crate::fetch::http::DEFAULT_TIMEOUT;
use crate::format::{ChartPalettes, NumberLocale};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    /// Counter roll-up length in milliseconds.
    pub count_duration_ms: u64,
    /// Panel fade-in length in milliseconds.
    pub fade_duration_ms: u64,
    /// Go button reveal length in milliseconds.
    pub reveal_duration_ms: u64,
    /// Page request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Digit grouping for `regular` counters.
    pub locale: NumberLocale,
    /// Chart colours.
    pub palettes: ChartPalettes,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            count_duration_ms: COUNT_DURATION.as_millis() as u64,
            fade_duration_ms: FADE_DURATION.as_millis() as u64,
            reveal_duration_ms: REVEAL_DURATION.as_millis() as u64,
            request_timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            locale: NumberLocale::default(),
            palettes: ChartPalettes::default(),
        }
    }
}

impl PanelConfig {
    /// Parse a JSON config.
    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: &Path) -> Result<Self> {
        let config_error = |message: String| PanelError::Config {
            path: path.to_path_buf(),
            message,
        };
        let text = std::fs::read_to_string(path).map_err(|e| config_error(e.to_string()))?;
        let config = Self::from_json(&text).map_err(|e| config_error(e.to_string()))?;
        config.validate().map_err(|e| config_error(e.to_string()))?;
        Ok(config)
    }

    /// Reject values no request could work with.
    ///
    /// A zero timeout would fail every request the moment it starts.
    pub fn validate(&self) -> Result<()> {
        if self.request_timeout_secs == 0 {
            return Err(PanelError::invalid_argument(
                "request_timeout_secs must be at least 1",
            ));
        }
        Ok(())
    }

    pub fn count_duration(&self) -> Duration {
        Duration::from_millis(self.count_duration_ms)
    }

    pub fn fade_duration(&self) -> Duration {
        Duration::from_millis(self.fade_duration_ms)
    }

    pub fn reveal_duration(&self) -> Duration {
        Duration::from_millis(self.reveal_duration_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_object_is_default() {
        assert_eq!(PanelConfig::from_json("{}").unwrap(), PanelConfig::default());
        let d = PanelConfig::default();
        assert_eq!(d.count_duration(), Duration::from_millis(1500));
        assert_eq!(d.fade_duration(), Duration::from_millis(1000));
        assert_eq!(d.reveal_duration(), Duration::from_millis(50));
        assert_eq!(d.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_partial_override() {
        let cfg = PanelConfig::from_json(
            r##"{ "count_duration_ms": 200, "locale": { "group_separator": "." },
                 "palettes": { "line": ["#ff0000", "#00ff00"] } }"##,
        )
        .unwrap();
        assert_eq!(cfg.count_duration(), Duration::from_millis(200));
        assert_eq!(cfg.fade_duration_ms, 1000);
        assert_eq!(cfg.locale.group_separator, '.');
        assert_eq!(cfg.locale.group_size, 3);
        assert_eq!(cfg.palettes.line.len(), 2);
        assert_eq!(cfg.palettes.fill, ChartPalettes::default().fill);
    }

    #[test]
    fn test_empty_palette_rejected() {
        assert!(PanelConfig::from_json(r#"{ "palettes": { "fill": [] } }"#).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "request_timeout_secs": 5 }}"#).unwrap();
        let cfg = PanelConfig::load(file.path()).unwrap();
        assert_eq!(cfg.request_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let cfg = PanelConfig::from_json(r#"{ "request_timeout_secs": 0 }"#).unwrap();
        assert!(matches!(cfg.validate(), Err(PanelError::InvalidArgument(_))));
        assert!(PanelConfig::default().validate().is_ok());

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "request_timeout_secs": 0 }}"#).unwrap();
        match PanelConfig::load(file.path()) {
            Err(PanelError::Config { path, message }) => {
                assert_eq!(path, file.path());
                assert!(message.contains("request_timeout_secs"));
            }
            other => panic!("expected Config error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        match PanelConfig::load(&missing) {
            Err(PanelError::Config { path, .. }) => assert_eq!(path, missing),
            other => panic!("expected Config error, got {other:?}"),
        }
    }
}
