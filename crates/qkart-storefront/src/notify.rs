//! User-facing notifications, the CLI equivalent of a snackbar.

use std::fmt;

pub const FETCH_FAILED: &str = "Something went wrong. Check the backend console for more details";
pub const CART_UNREACHABLE: &str = "Could not fetch cart details. Check that the backend is running, reachable and returns valid JSON.";
pub const BACKEND_UNREACHABLE: &str =
    "Something went wrong. Check that the backend is running, reachable and returns valid JSON.";
pub const LOGIN_REQUIRED: &str = "Login to add an item to the Cart";
pub const ALREADY_IN_CART: &str =
    "Item already in cart. Use the cart sidebar to update quantity or remove item.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Success => write!(f, "success"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub severity: Severity,
    pub message: String,
}

impl Notification {
    #[must_use]
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
        }
    }
}

/// Sink for user-facing notifications.
pub trait Notifier {
    fn notify(&mut self, notification: Notification);

    fn success(&mut self, message: &str) {
        self.notify(Notification::new(Severity::Success, message));
    }

    fn warning(&mut self, message: &str) {
        tracing::warn!(message, "user warning");
        self.notify(Notification::new(Severity::Warning, message));
    }

    fn error(&mut self, message: &str) {
        tracing::error!(message, "user error");
        self.notify(Notification::new(Severity::Error, message));
    }
}

/// Collects notifications in order; handy for tests and batch callers.
impl Notifier for Vec<Notification> {
    fn notify(&mut self, notification: Notification) {
        self.push(notification);
    }
}
