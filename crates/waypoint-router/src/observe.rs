//! Change notification
//!
//! Every router and tab router carries a revision counter published through a
//! `tokio::sync::watch` channel. Renderers subscribe, wait for the revision to
//! move, and then read the new state through the router's accessors. Updates
//! use `send_modify`, which never fails and needs no runtime, so navigation
//! works the same with or without subscribers.

use std::rc::Rc;
use tokio::sync::watch;

/// Shared revision counter
#[derive(Debug, Clone)]
pub struct ChangeNotifier {
    tx: Rc<watch::Sender<u64>>,
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeNotifier {
    /// Create a notifier at revision 0
    pub fn new() -> Self {
        let (tx, _) = watch::channel(0);
        Self { tx: Rc::new(tx) }
    }

    /// Bump the revision
    pub fn notify(&self, reason: &'static str) {
        self.tx.send_modify(|revision| *revision += 1);
        tracing::trace!(reason, revision = *self.tx.borrow(), "Navigation state changed");
    }

    /// Current revision
    pub fn revision(&self) -> u64 {
        *self.tx.borrow()
    }

    /// Subscribe to revision changes
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.tx.subscribe()
    }
}
