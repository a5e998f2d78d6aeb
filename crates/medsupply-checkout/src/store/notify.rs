//! User-facing notifications (toasts).

use std::cell::RefCell;
use std::rc::Rc;

/// Receives success and error messages meant for the shopper.
pub trait Notifier {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn success(&self, message: &str) {
        (**self).success(message)
    }

    fn error(&self, message: &str) {
        (**self).error(message)
    }
}

impl<N: Notifier + ?Sized> Notifier for Rc<N> {
    fn success(&self, message: &str) {
        (**self).success(message)
    }

    fn error(&self, message: &str) {
        (**self).error(message)
    }
}

/// Writes notifications to the `tracing` subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn success(&self, message: &str) {
        tracing::info!(target: "medsupply::notify", %message, "notify success");
    }

    fn error(&self, message: &str) {
        tracing::warn!(target: "medsupply::notify", %message, "notify error");
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

/// Buffers notifications until the UI drains them.
#[derive(Debug, Default)]
pub struct NotificationQueue {
    pending: RefCell<Vec<Notification>>,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every buffered notification, oldest first.
    pub fn drain(&self) -> Vec<Notification> {
        self.pending.borrow_mut().drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.pending.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.borrow().is_empty()
    }

    /// Messages of buffered errors, without draining.
    pub fn errors(&self) -> Vec<String> {
        self.pending
            .borrow()
            .iter()
            .filter(|n| n.kind == NotificationKind::Error)
            .map(|n| n.message.clone())
            .collect()
    }

    fn push(&self, kind: NotificationKind, message: &str) {
        self.pending.borrow_mut().push(Notification {
            kind,
            message: message.to_string(),
        });
    }
}

impl Notifier for NotificationQueue {
    fn success(&self, message: &str) {
        self.push(NotificationKind::Success, message);
    }

    fn error(&self, message: &str) {
        self.push(NotificationKind::Error, message);
    }
}
