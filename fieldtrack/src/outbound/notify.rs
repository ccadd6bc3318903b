//! Notification adapter emitting notices through `tracing`.

use tracing::{info, warn};

use crate::domain::{Notice, Notifier, Severity};

/// Delivers store notifications to the tracing subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        match notice.severity() {
            Severity::Info => info!(title = notice.title(), "{}", notice.body()),
            Severity::Alert => warn!(title = notice.title(), "{}", notice.body()),
        }
    }
}
