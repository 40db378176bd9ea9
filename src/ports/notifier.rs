//! Notifier outbound port. Surface user-visible notifications.

use crate::domain::Notification;

/// Port for showing a notification to the user (toast, status line, terminal message).
///
/// Called from the session controller after a flow fails. Implementations must not block:
/// the session calls this synchronously right after updating state.
pub trait NotifierPort: Send + Sync {
    fn notify(&self, notification: &Notification);
}
