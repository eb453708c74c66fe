//! Live-stream event types
//!
//! Events are ephemeral: published on the in-process bus at transition
//! time, forwarded to matching SSE subscribers, never stored. The payload
//! is a value snapshot of the affected order at publish time.

use serde::Serialize;

use crate::models::Order;

/// Domain event carried by the event bus and the SSE stream
#[derive(Debug, Clone)]
pub enum Event {
    /// A new order entered the queue
    OrderCreated(Order),
    /// An order moved along its lifecycle (taken / done / canceled)
    OrderStatusChanged(Order),
    /// Operator dashboard metrics changed
    MetricsUpdated(serde_json::Value),
}

/// Heartbeat frame type on the SSE stream (not a bus event)
pub const PING_EVENT: &str = "ping";

impl Event {
    /// SSE frame event name (`event: <name>`)
    pub fn name(&self) -> &'static str {
        match self {
            Self::OrderCreated(_) => "order.created",
            Self::OrderStatusChanged(_) => "order.status_changed",
            Self::MetricsUpdated(_) => "metrics.updated",
        }
    }

    /// The order snapshot carried by this event, if any
    pub fn order(&self) -> Option<&Order> {
        match self {
            Self::OrderCreated(order) | Self::OrderStatusChanged(order) => Some(order),
            Self::MetricsUpdated(_) => None,
        }
    }

    /// JSON payload for the SSE `data:` line
    pub fn payload_json(&self) -> String {
        fn to_json<T: Serialize>(value: &T) -> String {
            serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
        }
        match self {
            Self::OrderCreated(order) | Self::OrderStatusChanged(order) => to_json(order),
            Self::MetricsUpdated(value) => to_json(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{OrderStatus, Urgency};
    use chrono::Utc;

    fn order() -> Order {
        Order {
            id: 7,
            from_code: "A01".into(),
            to_code: "G22".into(),
            urgency: Urgency::Standard,
            note: None,
            status: OrderStatus::New,
            assignee_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            taken_at: None,
            done_at: None,
            canceled_at: None,
        }
    }

    #[test]
    fn event_names() {
        assert_eq!(Event::OrderCreated(order()).name(), "order.created");
        assert_eq!(
            Event::OrderStatusChanged(order()).name(),
            "order.status_changed"
        );
        assert_eq!(
            Event::MetricsUpdated(serde_json::json!([])).name(),
            "metrics.updated"
        );
    }

    #[test]
    fn payload_is_order_snapshot() {
        let event = Event::OrderCreated(order());
        let payload: serde_json::Value = serde_json::from_str(&event.payload_json()).unwrap();
        assert_eq!(payload["id"], 7);
        assert_eq!(payload["fromCode"], "A01");
        assert_eq!(payload["status"], "new");
    }
}
