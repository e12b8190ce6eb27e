//! Core event bus for the Peakline pipeline.
//!
//! The bus provides a typed event enum, sequential identifiers, and a bounded
//! live broadcast built on `tokio::broadcast`. Subscribers that fall behind
//! skip ahead to the oldest retained event instead of stalling publishers,
//! matching the desired backpressure behaviour for progress reporting.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use tokio::sync::broadcast;
use tokio::sync::broadcast::{Receiver, Sender};

/// Identifier assigned to each event emitted by the pipeline.
pub type EventId = u64;

/// Default buffer size for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1_024;

/// Typed domain events surfaced while processing a notification batch.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// A notification batch was accepted for processing.
    BatchReceived {
        /// Number of records in the batch.
        records: usize,
    },
    /// A record was skipped before any network or filesystem work.
    RecordSkipped {
        /// Object key when the record carried one.
        key: Option<String>,
        /// Reason the record was skipped.
        reason: String,
    },
    /// One pipeline step finished for a record.
    StepCompleted {
        /// Object key the step applies to.
        key: String,
        /// Step identifier (`fetch`, `stage`, `generate`, `read`, `upload`).
        step: String,
    },
    /// A record completed and its artifact was uploaded.
    RecordSucceeded {
        /// Source object key.
        key: String,
        /// Destination key the artifact was stored under.
        destination_key: String,
    },
    /// A record failed at some pipeline step.
    RecordFailed {
        /// Source object key.
        key: String,
        /// Rendered failure detail.
        message: String,
    },
}

impl Event {
    /// Machine-friendly discriminator for metrics and log consumers.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Event::BatchReceived { .. } => "batch_received",
            Event::RecordSkipped { .. } => "record_skipped",
            Event::StepCompleted { .. } => "step_completed",
            Event::RecordSucceeded { .. } => "record_succeeded",
            Event::RecordFailed { .. } => "record_failed",
        }
    }
}

/// Metadata wrapper around events. Each envelope tracks the event id and
/// emission timestamp.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct EventEnvelope {
    pub id: EventId,
    pub timestamp: DateTime<Utc>,
    pub event: Event,
}

/// Shared event bus built on top of `tokio::broadcast`.
#[derive(Clone)]
pub struct EventBus {
    sender: Sender<EventEnvelope>,
    next_id: Arc<AtomicU64>,
}

impl EventBus {
    /// Construct a new bus with the provided broadcast capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "event bus capacity must be positive");
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Construct a bus with the default buffer size.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Publish a new event to the bus, assigning it a sequential identifier.
    pub fn publish(&self, event: Event) -> EventId {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let envelope = EventEnvelope {
            id,
            timestamp: Utc::now(),
            event,
        };
        let _ = self.sender.send(envelope);
        id
    }

    /// Subscribe to events published after this call.
    #[must_use]
    pub fn subscribe(&self) -> EventStream {
        EventStream {
            receiver: self.sender.subscribe(),
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Stream wrapper over the live broadcast channel that tolerates lag.
pub struct EventStream {
    receiver: Receiver<EventEnvelope>,
}

impl EventStream {
    /// Receive the next event, skipping past any dropped backlog.
    pub async fn next(&mut self) -> Option<EventEnvelope> {
        loop {
            match self.receiver.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(_)) => {}
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_step_event(id: usize) -> Event {
        Event::StepCompleted {
            key: format!("uploads/track-{id}.mp3"),
            step: "fetch".to_string(),
        }
    }

    #[test]
    fn event_kinds_are_stable() {
        assert_eq!(
            Event::BatchReceived { records: 3 }.kind(),
            "batch_received"
        );
        assert_eq!(
            Event::RecordSkipped {
                key: None,
                reason: "not a storage event".into()
            }
            .kind(),
            "record_skipped"
        );
        assert_eq!(
            Event::RecordFailed {
                key: "uploads/a.mp3".into(),
                message: "boom".into()
            }
            .kind(),
            "record_failed"
        );
    }

    #[tokio::test]
    async fn publish_assigns_sequential_ids() {
        let bus = EventBus::with_capacity(16);
        let mut stream = bus.subscribe();

        let mut last_id = 0;
        for i in 0..5 {
            last_id = bus.publish(sample_step_event(i));
        }
        assert_eq!(last_id, 5);

        let mut received = Vec::new();
        for _ in 0..5 {
            if let Some(envelope) = stream.next().await {
                received.push(envelope.id);
            }
        }
        assert_eq!(received, vec![1, 2, 3, 4, 5]);
    }

    #[tokio::test]
    async fn stream_ends_when_all_publishers_drop() {
        let bus = EventBus::with_capacity(4);
        let mut stream = bus.subscribe();
        bus.publish(sample_step_event(0));
        drop(bus);

        assert!(stream.next().await.is_some());
        assert!(stream.next().await.is_none());
    }

    #[tokio::test]
    async fn lagged_subscriber_skips_ahead() {
        let bus = EventBus::with_capacity(2);
        let mut stream = bus.subscribe();
        for i in 0..6 {
            bus.publish(sample_step_event(i));
        }

        let first = stream.next().await.expect("expected buffered event");
        assert!(first.id >= 5, "expected oldest retained event, got {}", first.id);
    }
}
