//! EventBus — in-process domain event fan-out
//!
//! A thin wrapper over a tokio broadcast channel. Publishers never
//! block and never fail: with no subscribers the event is simply
//! dropped. Subscribers that fall behind the channel capacity lose
//! the oldest events (the stream side logs the lag and continues);
//! clients needing full state re-sync via the REST endpoints.
//!
//! Dropping a receiver unsubscribes it. There is no explicit
//! unsubscribe call and therefore no leak on abrupt disconnect.

use shared::Event;
use tokio::sync::broadcast;

/// Buffer per subscriber before lag kicks in
const BROADCAST_CAPACITY: usize = 256;

#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<Event>,
}

impl EventBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(BROADCAST_CAPACITY);
        Self { tx }
    }

    /// Publish to all current subscribers
    pub fn publish(&self, event: Event) {
        // send errors only when no receiver exists
        let _ = self.tx.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{Order, OrderStatus, Urgency};

    fn order(id: i64) -> Order {
        let now = chrono::Utc::now();
        Order {
            id,
            from_code: "A1".into(),
            to_code: "L1".into(),
            urgency: Urgency::Standard,
            note: None,
            status: OrderStatus::New,
            assignee_id: None,
            created_at: now,
            updated_at: now,
            taken_at: None,
            done_at: None,
            canceled_at: None,
        }
    }

    #[tokio::test]
    async fn fan_out_reaches_all_subscribers() {
        let bus = EventBus::new();
        let mut a = bus.subscribe();
        let mut b = bus.subscribe();

        bus.publish(Event::OrderCreated(order(1)));

        for rx in [&mut a, &mut b] {
            let event = rx.recv().await.unwrap();
            assert_eq!(event.name(), "order.created");
        }
    }

    #[test]
    fn publish_without_subscribers_is_a_noop() {
        let bus = EventBus::new();
        bus.publish(Event::OrderCreated(order(1)));
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn dropped_receiver_is_unsubscribed() {
        let bus = EventBus::new();
        let rx = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 1);
        drop(rx);
        assert_eq!(bus.subscriber_count(), 0);
    }
}
