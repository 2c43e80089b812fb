//! Outbound delivery of mention events.

use std::sync::Mutex;
use std::sync::mpsc::{Receiver, SyncSender, TrySendError, sync_channel};

use crate::model::MentionEvent;

/// Fire and forget destination for mention events.
///
/// Implementations must not block the caller on delivery and have no way to
/// report failure back to the extractor.
pub trait EventSink: Send + Sync {
    fn publish(&self, event: MentionEvent);
}

/// Sink that keeps every published event in memory.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<MentionEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns published events in publish order.
    pub fn events(&self) -> Vec<MentionEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Removes and returns published events.
    pub fn drain(&self) -> Vec<MentionEvent> {
        match self.events.lock() {
            Ok(mut events) => std::mem::take(&mut *events),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

impl EventSink for RecordingSink {
    fn publish(&self, event: MentionEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event),
            Err(poisoned) => poisoned.into_inner().push(event),
        }
    }
}

/// Sink backed by a bounded channel.
///
/// When the channel is full or the receiver is gone the event is dropped
/// and a warning is logged.
#[derive(Debug)]
pub struct ChannelSink {
    sender: SyncSender<MentionEvent>,
}

impl ChannelSink {
    /// Creates a sink and the receiver a consumer drains.
    pub fn bounded(capacity: usize) -> (Self, Receiver<MentionEvent>) {
        let (sender, receiver) = sync_channel(capacity);
        (Self { sender }, receiver)
    }
}

impl EventSink for ChannelSink {
    fn publish(&self, event: MentionEvent) {
        match self.sender.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(event)) => tracing::warn!(
                target_id = event.target,
                from_id = event.from_id,
                from_type = %event.from_type,
                "Mention channel full, dropping event"
            ),
            Err(TrySendError::Disconnected(event)) => tracing::warn!(
                target_id = event.target,
                from_id = event.from_id,
                from_type = %event.from_type,
                "Mention consumer gone, dropping event"
            ),
        }
    }
}
