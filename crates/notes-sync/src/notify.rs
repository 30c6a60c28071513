//! User Notification
//!
//! The surface through which failures reach the user.

/// Blocking, user-visible messages
pub trait Notifier {
    /// Show an error and wait for the user to dismiss it
    fn alert(&self, message: &str);

    /// A refresh round finished without hearing from `pending`
    fn stale(&self, pending: &[String]) {
        log::warn!("[Notifier] views may be out of date: {}", pending.join(", "));
    }

    /// A refresh round heard back from every view; clears any staleness notice
    fn fresh(&self) {}
}
