//! Terminal notifier: prints notifications to stderr so rendered pages on
//! stdout stay clean.

use qkart_storefront::{Notification, Notifier};

#[derive(Debug, Default)]
pub(crate) struct ConsoleNotifier {
    errors: usize,
}

impl ConsoleNotifier {
    /// Number of error notifications shown so far.
    pub(crate) fn errors(&self) -> usize {
        self.errors
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&mut self, notification: Notification) {
        if notification.severity == qkart_storefront::Severity::Error {
            self.errors += 1;
        }
        eprintln!("[{}] {}", notification.severity, notification.message);
    }
}
