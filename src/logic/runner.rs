use super::pinger::Probe;
use crate::model::{AppState, ProbeResult};
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

pub type SharedState = Arc<Mutex<AppState>>;
pub type ProbeJobs = UnboundedSender<Arc<dyn Probe>>;

/// Locks the shared state, recovering it if a previous holder panicked.
pub fn lock_state(state: &SharedState) -> MutexGuard<'_, AppState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Starts probes on behalf of the UI.
///
/// A run is marked pending before `run` returns; the probe itself executes on
/// the background dispatcher. Overlapping runs are allowed.
#[derive(Clone)]
pub struct ProbeRunner {
    state: SharedState,
    jobs: ProbeJobs,
}

impl ProbeRunner {
    pub fn new(state: SharedState, jobs: ProbeJobs) -> Self {
        Self { state, jobs }
    }

    pub fn state(&self) -> &SharedState {
        &self.state
    }

    pub fn run(&self, probe: Arc<dyn Probe>) {
        let name = probe.name().to_string();
        lock_state(&self.state).run.start_probe(&name);
        log::info!("starting probe '{}': {}", name, probe.describe());

        if self.jobs.send(probe).is_err() {
            log::error!("probe dispatcher is gone, '{name}' cannot run");
            lock_state(&self.state)
                .run
                .settle_failure(&name, "probe dispatcher is not running");
        }
    }
}

/// Background loop: every queued probe gets its own task.
pub async fn probe_dispatcher(state: SharedState, mut jobs: UnboundedReceiver<Arc<dyn Probe>>) {
    while let Some(probe) = jobs.recv().await {
        log::debug!("dispatching '{}'", probe.name());
        tokio::spawn(execute(state.clone(), probe));
    }
    log::debug!("probe queue closed, dispatcher exiting");
}

/// Awaits one probe and records its outcome. Errors and panics raised by the
/// probe become failure results.
pub async fn execute(state: SharedState, probe: Arc<dyn Probe>) {
    let name = probe.name().to_string();

    let result = match AssertUnwindSafe(probe.probe()).catch_unwind().await {
        Ok(Ok(result)) => result,
        Ok(Err(e)) => {
            log::warn!("probe '{name}' failed: {e}");
            ProbeResult::failure(e.to_string())
        }
        Err(panic) => {
            let message = panic
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| panic.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "probe panicked".to_string());
            log::error!("probe '{name}' panicked: {message}");
            ProbeResult::failure(message)
        }
    };

    log::info!("probe '{name}' settled: {result}");
    lock_state(&state).run.settle(&name, result);
}
