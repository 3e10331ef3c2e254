pub mod pinger;
pub mod runner;

pub use pinger::{HttpPing, PING_PROBE, Probe, ReqwestTransport, SimulatedPing, Transport};
pub use runner::{ProbeJobs, ProbeRunner, SharedState, execute, lock_state, probe_dispatcher};
