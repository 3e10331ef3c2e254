use super::probe::ProbeResult;
use std::collections::HashMap;

/// Session-only record of probe runs. Never persisted.
#[derive(Debug, Clone, Default)]
pub struct RunState {
    /// True while at least one started probe has not settled yet
    pub pending: bool,
    /// Number of started but unsettled probes
    pub in_flight: usize,
    /// Probe currently running or last run
    pub selected: Option<String>,
    /// Latest result per probe name
    pub results: HashMap<String, ProbeResult>,
}

impl RunState {
    /// Marks a new run as started. Results of every probe are cleared, not only
    /// the ones for `name`.
    pub fn start_probe(&mut self, name: &str) {
        self.results.clear();
        self.selected = Some(name.to_string());
        self.in_flight += 1;
        self.pending = true;
    }

    /// Stores the outcome of a run. The last settle for a name wins.
    pub fn settle(&mut self, name: &str, result: ProbeResult) {
        self.results.insert(name.to_string(), result);
        self.in_flight = self.in_flight.saturating_sub(1);
        self.pending = self.in_flight > 0;
    }

    pub fn settle_success(&mut self, name: &str, result: ProbeResult) {
        debug_assert!(result.success);
        self.settle(name, result);
    }

    pub fn settle_failure(&mut self, name: &str, message: impl Into<String>) {
        self.settle(name, ProbeResult::failure(message));
    }

    /// Result of the selected probe, if it has settled.
    pub fn selected_result(&self) -> Option<&ProbeResult> {
        self.selected
            .as_ref()
            .and_then(|name| self.results.get(name))
    }
}

#[cfg(test)]
#[path = "run_state_tests.rs"]
mod run_state_tests;
