//! Notification adapters. Implement NotifierPort.

use crate::domain::{Notification, NotificationKind};
use crate::ports::NotifierPort;
use crossterm::ExecutableCommand;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use std::io::{Write, stderr};
use std::sync::{Mutex, PoisonError};
use tracing::warn;

/// Prints notifications to stderr in red, like a toast on a status line.
///
/// While an interactive prompt owns the terminal, call `hold`; notifications are queued and
/// printed by `release` once the prompt has returned.
#[derive(Debug, Default)]
pub struct TerminalNotifier {
    held: Mutex<Option<Vec<Notification>>>,
}

impl TerminalNotifier {
    pub fn hold(&self) {
        self.held
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get_or_insert_with(Vec::new);
    }

    /// Stop queueing and print whatever arrived while held.
    pub fn release(&self) {
        let queued = self
            .held
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .unwrap_or_default();
        for notification in &queued {
            print_notification(notification);
        }
    }
}

fn print_notification(notification: &Notification) {
    let mut err = stderr();
    let _ = err.execute(SetForegroundColor(Color::Red));
    let _ = err.execute(Print(format!("✖ {}\n", notification.message)));
    let _ = err.execute(ResetColor);
    let _ = err.flush();
}

impl NotifierPort for TerminalNotifier {
    fn notify(&self, notification: &Notification) {
        warn!(kind = ?notification.kind, message = %notification.message, "notification");
        let mut held = self.held.lock().unwrap_or_else(PoisonError::into_inner);
        match held.as_mut() {
            Some(queue) => queue.push(notification.clone()),
            None => {
                drop(held);
                print_notification(notification);
            }
        }
    }
}

/// Keeps every notification in memory. For tests and headless runs.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn notifications(&self) -> Vec<Notification> {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.notifications()
            .into_iter()
            .map(|n| n.message)
            .collect()
    }

    pub fn count(&self, kind: NotificationKind) -> usize {
        self.notifications()
            .iter()
            .filter(|n| n.kind == kind)
            .count()
    }
}

impl NotifierPort for RecordingNotifier {
    fn notify(&self, notification: &Notification) {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification.clone());
    }
}
