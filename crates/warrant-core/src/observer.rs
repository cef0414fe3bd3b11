//! Reporting voter faults.

use crate::error::VoterError;

/// Receives voter faults that the manager degraded to an abstention.
///
/// Implementations must be cheap and must not fail; they run inline on the
/// decision path.
pub trait FaultObserver: Send + Sync {
    /// `voter` failed with `error` while voting on `attribute`.
    fn voter_failed(&self, voter: &str, attribute: &str, error: &VoterError);
}

/// Writes faults to the `log` facade at warn level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogFaultObserver;

impl FaultObserver for LogFaultObserver {
    fn voter_failed(&self, voter: &str, attribute: &str, error: &VoterError) {
        log::warn!("Voter '{voter}' failed on '{attribute}', counted as abstain: {error}");
    }
}
