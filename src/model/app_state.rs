use super::probe::ProbeMode;
use super::run_state::RunState;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct AppState {
    #[serde(default)]
    pub probe_mode: ProbeMode,
    #[serde(skip, default)]
    pub run: RunState,
}
