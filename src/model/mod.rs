pub mod app_state;
pub mod probe;
pub mod run_state;
pub mod status;

pub use app_state::AppState;
pub use probe::{ProbeMode, ProbeResult};
pub use run_state::RunState;
pub use status::{Fact, ServerFacts, TARGET_HOST, TARGET_URL};
