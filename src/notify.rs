//! Failure notification seam.
//!
//! When the listing answers with an error status the fetcher composes a
//! diagnostic and hands it to a [`Notifier`]. Delivery to an alerting channel
//! is not wired; [`LogNotifier`] only writes the message to the log so the
//! rest of the code can call it unconditionally.

use std::fmt;
use tracing::warn;

pub trait Notifier: Send + Sync + fmt::Debug {
    fn notify(&self, message: &str);
}

/// Writes diagnostics to the log at `warn` level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, message: &str) {
        warn!(diagnostic = %message, "Parser failure notification (delivery disabled)");
    }
}

/// Notifier that keeps every message, for assertions in tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingNotifier {
    messages: std::sync::Mutex<Vec<String>>,
}

#[cfg(test)]
impl RecordingNotifier {
    pub(crate) fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

#[cfg(test)]
impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}
