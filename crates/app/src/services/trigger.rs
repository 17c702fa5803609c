//! Trigger switch — the stateless on/off control surface.
//!
//! Momentary-button semantics layered on a persistent-looking boolean
//! characteristic: any transition to on settles back to off after
//! [`RESET_DELAY`], whatever the disarm pipeline did in between. The state
//! is in-memory only and starts off on every process run.

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::PoisonError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::ports::{Disarmer, SwitchStatePublisher};

/// Delay before an activated switch settles back to off.
pub const RESET_DELAY: Duration = Duration::from_millis(1000);

/// The virtual switch exposed to the host.
pub struct TriggerSwitch<D, P> {
    state: Arc<AtomicBool>,
    disarmer: Arc<D>,
    publisher: Arc<P>,
    /// Handle of the most recently scheduled reset. Owned so a future
    /// revision can cancel a superseded reset; replacing it does NOT abort
    /// the previous task, so an earlier reset can still stomp a later
    /// activation.
    reset_task: Mutex<Option<JoinHandle<()>>>,
}

impl<D, P> TriggerSwitch<D, P>
where
    D: Disarmer + 'static,
    P: SwitchStatePublisher + 'static,
{
    /// Create a switch in the off state.
    pub fn new(disarmer: D, publisher: P) -> Self {
        Self {
            state: Arc::new(AtomicBool::new(false)),
            disarmer: Arc::new(disarmer),
            publisher: Arc::new(publisher),
            reset_task: Mutex::new(None),
        }
    }

    /// Current switch value. Never blocks, never triggers resolution.
    #[must_use]
    pub fn get_on(&self) -> bool {
        self.state.load(Ordering::SeqCst)
    }

    /// Handle a host-delivered "set on" event.
    ///
    /// Turning on fires the disarm pipeline without awaiting it and
    /// schedules the reset; turning off transitions immediately with no
    /// side effect.
    pub fn set_on(&self, on: bool) {
        self.state.store(on, Ordering::SeqCst);
        tracing::info!(on, "switch triggered");
        if !on {
            return;
        }

        self.spawn_disarm();
        self.schedule_reset();
    }

    /// Run the disarm pipeline detached. Its outcome is logged here and
    /// never propagates past the switch boundary.
    fn spawn_disarm(&self) {
        let disarmer = Arc::clone(&self.disarmer);
        tokio::spawn(async move {
            tracing::info!("activating disarm sequence");
            match disarmer.disarm().await {
                Ok(outcome) => match outcome.response {
                    Some(body) => tracing::info!(%body, "alarm disarmed"),
                    None => tracing::info!("alarm disarmed"),
                },
                Err(err) => tracing::error!(error = %err, "disarm attempt failed"),
            }
        });
    }

    /// Schedule the unconditional reset to off, replacing (but not
    /// cancelling) any reset still pending from an earlier activation.
    fn schedule_reset(&self) {
        let state = Arc::clone(&self.state);
        let publisher = Arc::clone(&self.publisher);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(RESET_DELAY).await;
            state.store(false, Ordering::SeqCst);
            publisher.publish_on(false).await;
            tracing::info!("switch reset to off");
        });

        let mut slot = self
            .reset_task
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        *slot = Some(handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::future::Future;

    use disarmrelay_domain::error::{NotFoundError, RelayError};

    use crate::ports::Disarmed;

    struct StubDisarmer {
        fail: bool,
    }

    impl Disarmer for StubDisarmer {
        fn disarm(&self) -> impl Future<Output = Result<Disarmed, RelayError>> + Send {
            let result = if self.fail {
                Err(NotFoundError::name("Target Alarm", Vec::new()).into())
            } else {
                Ok(Disarmed::default())
            };
            async { result }
        }
    }

    #[derive(Default)]
    struct RecordingPublisher {
        published: Mutex<Vec<bool>>,
    }

    impl SwitchStatePublisher for &'static RecordingPublisher {
        fn publish_on(&self, on: bool) -> impl Future<Output = ()> + Send {
            self.published.lock().unwrap().push(on);
            async {}
        }
    }

    fn leaked_publisher() -> &'static RecordingPublisher {
        Box::leak(Box::new(RecordingPublisher::default()))
    }

    #[tokio::test(start_paused = true)]
    async fn should_start_off() {
        let switch = TriggerSwitch::new(StubDisarmer { fail: false }, leaked_publisher());
        assert!(!switch.get_on());
    }

    #[tokio::test(start_paused = true)]
    async fn should_reset_to_off_after_delay() {
        let publisher = leaked_publisher();
        let switch = TriggerSwitch::new(StubDisarmer { fail: false }, publisher);

        switch.set_on(true);
        assert!(switch.get_on());

        // Still on just before the reset window closes.
        tokio::time::sleep(RESET_DELAY - Duration::from_millis(50)).await;
        assert!(switch.get_on());

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(!switch.get_on());
        assert_eq!(*publisher.published.lock().unwrap(), vec![false]);
    }

    #[tokio::test(start_paused = true)]
    async fn should_reset_to_off_even_when_disarm_fails() {
        let publisher = leaked_publisher();
        let switch = TriggerSwitch::new(StubDisarmer { fail: true }, publisher);

        switch.set_on(true);
        tokio::time::sleep(RESET_DELAY + Duration::from_millis(50)).await;

        assert!(!switch.get_on());
        assert_eq!(*publisher.published.lock().unwrap(), vec![false]);
    }

    #[tokio::test(start_paused = true)]
    async fn should_turn_off_immediately_without_side_effect() {
        let publisher = leaked_publisher();
        let switch = TriggerSwitch::new(StubDisarmer { fail: false }, publisher);

        switch.set_on(false);
        assert!(!switch.get_on());

        // No reset was scheduled, so nothing is ever published.
        tokio::time::sleep(RESET_DELAY * 2).await;
        assert!(publisher.published.lock().unwrap().is_empty());
    }

    // Pins the current overlap contract: the first activation's reset timer
    // is not cancelled by a second activation and stomps its on state early.
    #[tokio::test(start_paused = true)]
    async fn should_let_earlier_reset_stomp_later_activation() {
        let publisher = leaked_publisher();
        let switch = TriggerSwitch::new(StubDisarmer { fail: false }, publisher);

        switch.set_on(true);
        tokio::time::sleep(Duration::from_millis(600)).await;
        switch.set_on(true);

        // 1000 ms after the FIRST activation, only 400 ms after the second.
        tokio::time::sleep(Duration::from_millis(450)).await;
        assert!(!switch.get_on());
    }
}
