//! Disarmer port — the pipeline seam the trigger switch fires into.

use std::future::Future;

use disarmrelay_domain::error::RelayError;

/// Successful disarm outcome.
#[derive(Debug, Clone, Default)]
pub struct Disarmed {
    /// Parsed response body from the HTTP endpoint; absent for registry
    /// targets, kept for logging.
    pub response: Option<serde_json::Value>,
}

/// One disarm attempt: resolve the target, command it.
pub trait Disarmer: Send + Sync {
    fn disarm(&self) -> impl Future<Output = Result<Disarmed, RelayError>> + Send;
}
