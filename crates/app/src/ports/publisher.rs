//! Publisher port — pushes the switch's externally-visible value to the host.

use std::future::Future;

/// Sink for "On" characteristic updates originated by this plugin (as
/// opposed to values the host reads on demand).
pub trait SwitchStatePublisher: Send + Sync {
    /// Push the current "On" value. Delivery is best-effort; the host drops
    /// updates for accessories it no longer tracks.
    fn publish_on(&self, on: bool) -> impl Future<Output = ()> + Send;
}
