//! Notification surfaces consumed by the cart store.
//!
//! Both traits are fire-and-forget: the store tells the UI layer what
//! happened and never waits on, or reads anything back from, the
//! rendering. A toast that gets dismissed early (or never rendered at
//! all) has no effect on cart state.

use std::time::Duration;

/// Transient success notification (toast).
pub trait Notifier {
    /// Show `message` for roughly `duration`. The duration is cosmetic.
    fn toast(&self, message: &str, duration: Duration);
}

/// Observer of cart count changes, e.g. the header badge.
pub trait CartObserver {
    /// The cart now holds `count` units in total.
    fn cart_changed(&self, count: u32);
}

/// Default notifier that writes toasts to the log.
///
/// Hosts with a real notification surface inject their own [`Notifier`];
/// this keeps headless contexts (tests, tooling) observable.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn toast(&self, message: &str, duration: Duration) {
        let duration_ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        tracing::info!(duration_ms, "toast: {message}");
    }
}
