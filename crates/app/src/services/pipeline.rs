//! Disarm pipeline — resolve the target, then command it. One attempt.

use disarmrelay_domain::error::RelayError;

use crate::ports::{AccessoryCatalog, CharacteristicWriter, Disarmed, Disarmer, DisarmHttpClient};
use crate::services::executor::DisarmExecutor;
use crate::services::resolver::AlarmResolver;

/// The full disarm sequence behind the trigger switch.
///
/// Resolution runs afresh on every attempt; no target, timer, or connection
/// survives between activations, and no attempt is ever retried.
pub struct DisarmPipeline<C, W, H> {
    resolver: AlarmResolver<C>,
    executor: DisarmExecutor<W, H>,
}

impl<C, W, H> DisarmPipeline<C, W, H>
where
    C: AccessoryCatalog,
    W: CharacteristicWriter,
    H: DisarmHttpClient,
{
    /// Wire a resolver and an executor into one pipeline.
    pub fn new(resolver: AlarmResolver<C>, executor: DisarmExecutor<W, H>) -> Self {
        Self { resolver, executor }
    }
}

impl<C, W, H> Disarmer for DisarmPipeline<C, W, H>
where
    C: AccessoryCatalog,
    W: CharacteristicWriter,
    H: DisarmHttpClient,
{
    async fn disarm(&self) -> Result<Disarmed, RelayError> {
        let target = self.resolver.resolve().await?;
        self.executor.execute(&target).await
    }
}
