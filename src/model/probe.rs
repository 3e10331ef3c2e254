use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Which probe function the "Ping Server" button runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProbeMode {
    #[default]
    Http, // real HEAD request
    Simulated, // random outcome, no network
}

/// Outcome of a single probe run.
///
/// Built only through the constructors below, so a result never carries an
/// `error` while claiming success.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeResult {
    pub success: bool,
    /// Elapsed time in milliseconds, two decimals
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Target host, only set by the simulated probe
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    /// HTTP status seen by the real probe. Any status counts as success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl ProbeResult {
    pub fn success(elapsed: Duration, status: Option<u16>) -> Self {
        Self {
            success: true,
            time: Some(format_millis(elapsed.as_secs_f64() * 1000.0)),
            error: None,
            host: None,
            status,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            time: None,
            error: Some(error.into()),
            host: None,
            status: None,
        }
    }

    pub fn simulated_success(host: impl Into<String>, millis: f64) -> Self {
        Self {
            success: true,
            time: Some(format_millis(millis)),
            error: None,
            host: Some(host.into()),
            status: None,
        }
    }

    pub fn simulated_failure(host: impl Into<String>) -> Self {
        Self {
            success: false,
            time: None,
            error: None,
            host: Some(host.into()),
            status: None,
        }
    }

    /// Parsed `time` in milliseconds.
    pub fn time_ms(&self) -> Option<f64> {
        self.time.as_deref().and_then(|t| t.parse().ok())
    }
}

impl fmt::Display for ProbeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.success, &self.time, &self.error) {
            (true, Some(time), _) => {
                write!(f, "ok in {time} ms")?;
                if let Some(status) = self.status {
                    write!(f, " (HTTP {status})")?;
                }
                Ok(())
            }
            (true, None, _) => write!(f, "ok"),
            (false, _, Some(error)) => write!(f, "failed: {error}"),
            (false, _, None) => write!(f, "failed: no response"),
        }
    }
}

/// Formats milliseconds with two decimals, like `Number.toFixed(2)`.
pub fn format_millis(millis: f64) -> String {
    format!("{:.2}", millis.max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_has_time_and_no_error() {
        let r = ProbeResult::success(Duration::from_micros(50_004), Some(200));
        assert!(r.success);
        assert_eq!(r.time.as_deref(), Some("50.00"));
        assert!(r.error.is_none());
        assert!(r.host.is_none());
        assert_eq!(r.status, Some(200));
    }

    #[test]
    fn test_failure_has_error_and_no_time() {
        let r = ProbeResult::failure("Failed to fetch");
        assert!(!r.success);
        assert!(r.time.is_none());
        assert_eq!(r.error.as_deref(), Some("Failed to fetch"));
    }

    #[test]
    fn test_simulated_failure_keeps_host_only() {
        let r = ProbeResult::simulated_failure("example.org");
        assert!(!r.success);
        assert!(r.time.is_none());
        assert!(r.error.is_none());
        assert_eq!(r.host.as_deref(), Some("example.org"));
    }

    #[test]
    fn test_time_ms_parses_back() {
        let r = ProbeResult::simulated_success("h", 12.346);
        assert_eq!(r.time.as_deref(), Some("12.35"));
        assert_eq!(r.time_ms(), Some(12.35));
    }

    #[test]
    fn test_serialized_shape_omits_empty_fields() {
        let json = serde_json::to_string(&ProbeResult::failure("boom")).unwrap();
        assert_eq!(json, r#"{"success":false,"error":"boom"}"#);
    }

    #[test]
    fn test_display() {
        let ok = ProbeResult::success(Duration::from_millis(120), Some(503));
        assert_eq!(ok.to_string(), "ok in 120.00 ms (HTTP 503)");
        assert_eq!(
            ProbeResult::simulated_failure("h").to_string(),
            "failed: no response"
        );
    }

    #[test]
    fn test_probe_mode_default_is_http() {
        assert_eq!(ProbeMode::default(), ProbeMode::Http);
    }
}
