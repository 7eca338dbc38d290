//! Headless, typed, topic-based publish/subscribe event bus.
//!
//! Built on [`tokio::sync::broadcast`] so every subscriber receives
//! every message without any single slow subscriber blocking the
//! others. Traffic is partitioned into two lanes:
//!
//! | Topic | Typical traffic |
//! |---|---|
//! | [`Topic::Telemetry`] | Periodic status snapshots |
//! | [`Topic::Alerts`] | Alarm latches, suppression transitions, ignored operator commands, mode changes |

use ares_types::Event;
use tokio::sync::broadcast;
use tracing::trace;

/// Default per-topic channel capacity before old events are dropped
/// for slow subscribers.
const DEFAULT_CAPACITY: usize = 256;

/// Routing lane on the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    /// High-frequency, loss-tolerant status traffic.
    Telemetry,
    /// Low-frequency, operator-significant events.
    Alerts,
}

/// Shared event bus. Clone it cheaply; all clones share the same
/// underlying broadcast channels.
#[derive(Clone, Debug)]
pub struct EventBus {
    telemetry: broadcast::Sender<Event>,
    alerts: broadcast::Sender<Event>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl EventBus {
    /// Create a bus; `capacity` applies to each topic independently.
    pub fn new(capacity: usize) -> Self {
        let (telemetry, _) = broadcast::channel(capacity);
        let (alerts, _) = broadcast::channel(capacity);
        Self { telemetry, alerts }
    }

    /// Publish `event` on `topic`, returning the number of receivers
    /// it reached. Zero subscribers is a normal condition (the bench
    /// harness often runs headless), not an error.
    pub fn publish(&self, topic: Topic, event: Event) -> usize {
        match self.sender(topic).send(event) {
            Ok(n) => n,
            Err(broadcast::error::SendError(event)) => {
                trace!(?topic, payload = ?event.payload, "event dropped: no subscribers");
                0
            }
        }
    }

    /// Subscribe to one topic. The receiver yields only events
    /// published on that lane.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.sender(topic).subscribe()
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Telemetry => &self.telemetry,
            Topic::Alerts => &self.alerts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ares_types::{EventPayload, NavigationMode};

    fn mode_event() -> Event {
        Event::now(
            "test",
            EventPayload::ModeChanged {
                mode: NavigationMode::Manual,
            },
        )
    }

    #[test]
    fn publish_without_subscribers_reports_zero() {
        let bus = EventBus::default();
        assert_eq!(bus.publish(Topic::Alerts, mode_event()), 0);
    }

    #[test]
    fn subscriber_receives_published_event() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe(Topic::Alerts);
        let event = mode_event();
        assert_eq!(bus.publish(Topic::Alerts, event.clone()), 1);

        let received = rx.try_recv().unwrap();
        assert_eq!(received.id, event.id);
    }

    #[test]
    fn topics_are_isolated() {
        let bus = EventBus::default();
        let mut alerts_rx = bus.subscribe(Topic::Alerts);
        bus.publish(Topic::Telemetry, mode_event());
        assert!(alerts_rx.try_recv().is_err());
    }

    #[test]
    fn clones_share_channels() {
        let bus = EventBus::default();
        let clone = bus.clone();
        let mut rx = bus.subscribe(Topic::Telemetry);
        clone.publish(Topic::Telemetry, mode_event());
        assert!(rx.try_recv().is_ok());
    }
}
