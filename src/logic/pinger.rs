use crate::error::ProbeError;
use crate::model::ProbeResult;
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, RngExt, SeedableRng};
use reqwest::Client;
use reqwest::header::{CACHE_CONTROL, HeaderMap, HeaderValue, PRAGMA};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::time::Instant;

/// Name under which both ping variants store their results.
pub const PING_PROBE: &str = "ping";

/// Success probability of the simulated ping.
pub const SIMULATED_SUCCESS_RATE: f64 = 0.8;
/// Upper bound (exclusive) of the simulated latency in milliseconds.
pub const SIMULATED_MAX_LATENCY_MS: f64 = 50.0;
pub const SIMULATED_DELAY: Duration = Duration::from_secs(2);

/// Something the runner can execute and record under `name()`.
#[async_trait]
pub trait Probe: Send + Sync {
    fn name(&self) -> &str;
    fn describe(&self) -> String;
    async fn probe(&self) -> Result<ProbeResult, ProbeError>;
}

/// Issues the HEAD request for the real ping. Returns the HTTP status when the
/// transport can see one.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn head(&self, url: &str) -> Result<Option<u16>, ProbeError>;
}

pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// No request timeout is configured: a hanging server keeps the probe pending.
    pub fn new() -> Result<Self, ProbeError> {
        let mut headers = HeaderMap::new();
        // What a browser sends for a `cache: "no-store"` fetch
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(ProbeError::Client)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn head(&self, url: &str) -> Result<Option<u16>, ProbeError> {
        let response = self
            .client
            .head(url)
            .send()
            .await
            .map_err(|e| ProbeError::network(&e))?;
        Ok(Some(response.status().as_u16()))
    }
}

/// Times one HEAD request against `target`.
///
/// Any response, whatever its status, is a success; only a failure to get a
/// response at all is reported as an error.
pub async fn ping<T: Transport + ?Sized>(transport: &T, target: &str) -> ProbeResult {
    let start = Instant::now();
    match transport.head(target).await {
        Ok(status) => {
            let elapsed = start.elapsed();
            log::debug!("HEAD {target} answered in {elapsed:?} (status {status:?})");
            ProbeResult::success(elapsed, status)
        }
        Err(e) => {
            log::warn!("HEAD {target} failed: {e}");
            ProbeResult::failure(e.to_string())
        }
    }
}

pub struct HttpPing {
    transport: Arc<dyn Transport>,
    target: String,
}

impl HttpPing {
    pub fn new(transport: Arc<dyn Transport>, target: impl Into<String>) -> Self {
        Self {
            transport,
            target: target.into(),
        }
    }
}

#[async_trait]
impl Probe for HttpPing {
    fn name(&self) -> &str {
        PING_PROBE
    }

    fn describe(&self) -> String {
        format!("HEAD {}", self.target)
    }

    async fn probe(&self) -> Result<ProbeResult, ProbeError> {
        Ok(ping(self.transport.as_ref(), &self.target).await)
    }
}

/// Draws a simulated outcome for `host` without waiting.
pub fn simulate_outcome<R: Rng + ?Sized>(host: &str, rng: &mut R) -> ProbeResult {
    if rng.random_bool(SIMULATED_SUCCESS_RATE) {
        let millis = rng.random_range(0.0..SIMULATED_MAX_LATENCY_MS);
        // Truncate so that formatting never rounds up to the bound
        ProbeResult::simulated_success(host, (millis * 100.0).floor() / 100.0)
    } else {
        ProbeResult::simulated_failure(host)
    }
}

/// Placeholder ping: no network traffic, random outcome after `delay`.
pub async fn simulate_ping<R: Rng + ?Sized>(host: &str, rng: &mut R, delay: Duration) -> ProbeResult {
    let outcome = simulate_outcome(host, rng);
    tokio::time::sleep(delay).await;
    outcome
}

pub struct SimulatedPing {
    host: String,
    delay: Duration,
    rng: Mutex<StdRng>,
}

impl SimulatedPing {
    pub fn new(host: impl Into<String>) -> Self {
        Self::with_rng(host, StdRng::from_rng(&mut rand::rng()))
    }

    pub fn with_seed(host: impl Into<String>, seed: u64) -> Self {
        Self::with_rng(host, StdRng::seed_from_u64(seed))
    }

    fn with_rng(host: impl Into<String>, rng: StdRng) -> Self {
        Self {
            host: host.into(),
            delay: SIMULATED_DELAY,
            rng: Mutex::new(rng),
        }
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[async_trait]
impl Probe for SimulatedPing {
    fn name(&self) -> &str {
        PING_PROBE
    }

    fn describe(&self) -> String {
        format!("simulated ping to {}", self.host)
    }

    async fn probe(&self) -> Result<ProbeResult, ProbeError> {
        // The generator must not be held across the delay
        let outcome = {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            simulate_outcome(&self.host, &mut *rng)
        };
        tokio::time::sleep(self.delay).await;
        Ok(outcome)
    }
}

#[cfg(test)]
#[path = "pinger_tests.rs"]
mod pinger_tests;
