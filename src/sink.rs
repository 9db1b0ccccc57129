//! Trigger sinks.
//!
//! A sink receives every notification the registry found relevant. Turning a
//! notification into reconcile keys, deduplicating them and rate limiting is
//! the sink's business; the registry only decides.

use std::sync::atomic::{AtomicU64, Ordering};

use crossbeam_channel::{bounded, Receiver, Sender};
use serde::{Deserialize, Serialize};

use crate::notification::{Notification, Operation};
use crate::resource::{ObjectKey, ResourceKind};

/// Receiver of positive verdicts.
pub trait TriggerSink: Send + Sync {
    /// Called once per relevant notification. Must not block.
    fn trigger(&self, notification: &Notification);
}

/// Summary of a relevant notification, as queued by [`ChannelSink`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerEvent {
    /// Kind of the changed object.
    pub kind: ResourceKind,
    /// What happened to it.
    pub operation: Operation,
    /// Which object it was.
    pub key: ObjectKey,
}

impl From<&Notification> for TriggerEvent {
    fn from(notification: &Notification) -> Self {
        Self {
            kind: notification.kind(),
            operation: notification.operation(),
            key: notification.key(),
        }
    }
}

/// Sink backed by a bounded channel.
///
/// `trigger` uses `try_send`; when the queue is full or the receiver is gone
/// the event is dropped and counted.
#[derive(Debug)]
pub struct ChannelSink {
    tx: Sender<TriggerEvent>,
    dropped: AtomicU64,
}

impl ChannelSink {
    /// Creates a sink and the receiving end of its queue.
    #[must_use]
    pub fn new(capacity: usize) -> (Self, Receiver<TriggerEvent>) {
        let (tx, rx) = bounded(capacity.max(1));
        (
            Self {
                tx,
                dropped: AtomicU64::new(0),
            },
            rx,
        )
    }

    /// Number of events dropped because the queue was full or closed.
    #[must_use]
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}

impl TriggerSink for ChannelSink {
    fn trigger(&self, notification: &Notification) {
        if self.tx.try_send(TriggerEvent::from(notification)).is_err() {
            self.dropped.fetch_add(1, Ordering::Relaxed);
        }
    }
}
