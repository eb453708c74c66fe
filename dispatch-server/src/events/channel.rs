//! SSE subscriber streams
//!
//! Each connected client gets a broadcast receiver filtered down to
//! what its role may see, merged with a 25-second heartbeat ping.
//! The first ping fires immediately on connect so proxies flush the
//! response headers. When the client disconnects, axum drops the
//! stream and with it the receiver — cleanup is automatic.

use std::convert::Infallible;
use std::time::Duration;

use axum::response::sse::Event as SseEvent;
use futures::Stream;
use shared::models::Role;
use shared::{Event, PING_EVENT};
use tokio::sync::broadcast;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::{BroadcastStream, IntervalStream};
use tokio_stream::StreamExt;

const PING_INTERVAL: Duration = Duration::from_secs(25);

/// Role-based event visibility
///
/// - Workers see every new order, and status changes only for orders
///   assigned to them.
/// - Operators see metrics updates and status changes; a home storage
///   code narrows status changes to orders originating there.
/// - Admins keep the connection for liveness only: heartbeats, no
///   domain events.
pub fn event_visible(event: &Event, role: Role, user_id: i64, home: Option<&str>) -> bool {
    match role {
        Role::Worker => match event {
            Event::OrderCreated(_) => true,
            Event::OrderStatusChanged(order) => order.assignee_id == Some(user_id),
            Event::MetricsUpdated(_) => false,
        },
        Role::Operator => match event {
            Event::MetricsUpdated(_) => true,
            Event::OrderStatusChanged(order) => match home {
                Some(home) => order.from_code == home,
                None => true,
            },
            Event::OrderCreated(_) => false,
        },
        Role::Admin => false,
    }
}

/// Build the per-client SSE stream
pub fn subscriber_stream(
    rx: broadcast::Receiver<Event>,
    role: Role,
    user_id: i64,
    home: Option<String>,
) -> impl Stream<Item = Result<SseEvent, Infallible>> {
    let events = BroadcastStream::new(rx).filter_map(move |item| {
        let event = match item {
            Ok(event) => event,
            Err(BroadcastStreamRecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "SSE subscriber lagged, events dropped");
                return None;
            }
        };
        if !event_visible(&event, role, user_id, home.as_deref()) {
            return None;
        }
        Some(Ok(SseEvent::default()
            .event(event.name())
            .data(event.payload_json())))
    });

    // interval's first tick completes immediately: the on-connect ping
    let pings = IntervalStream::new(tokio::time::interval(PING_INTERVAL))
        .map(|_| Ok(SseEvent::default().event(PING_EVENT).data("{}")));

    events.merge(pings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventBus;
    use shared::models::{Order, OrderStatus, Urgency};

    fn order(from: &str, assignee: Option<i64>) -> Order {
        let now = chrono::Utc::now();
        Order {
            id: 1,
            from_code: from.into(),
            to_code: "L1".into(),
            urgency: Urgency::Standard,
            note: None,
            status: OrderStatus::InProgress,
            assignee_id: assignee,
            created_at: now,
            updated_at: now,
            taken_at: None,
            done_at: None,
            canceled_at: None,
        }
    }

    #[test]
    fn worker_sees_every_new_order() {
        let event = Event::OrderCreated(order("A1", None));
        assert!(event_visible(&event, Role::Worker, 5, None));
    }

    #[test]
    fn worker_sees_own_status_changes_only() {
        let mine = Event::OrderStatusChanged(order("A1", Some(5)));
        let other = Event::OrderStatusChanged(order("A1", Some(9)));
        // a cancel from `new` carries no assignee and reaches no worker
        let unassigned = Event::OrderStatusChanged(order("A1", None));
        assert!(event_visible(&mine, Role::Worker, 5, None));
        assert!(!event_visible(&other, Role::Worker, 5, None));
        assert!(!event_visible(&unassigned, Role::Worker, 5, None));
    }

    #[test]
    fn worker_never_sees_metrics() {
        let event = Event::MetricsUpdated(serde_json::json!([]));
        assert!(!event_visible(&event, Role::Worker, 5, None));
    }

    #[test]
    fn operator_home_scopes_status_changes() {
        let a1 = Event::OrderStatusChanged(order("A1", Some(5)));
        let b2 = Event::OrderStatusChanged(order("B2", Some(5)));
        assert!(event_visible(&a1, Role::Operator, 8, Some("A1")));
        assert!(!event_visible(&b2, Role::Operator, 8, Some("A1")));
        // no home set: everything comes through
        assert!(event_visible(&b2, Role::Operator, 8, None));
    }

    #[test]
    fn operator_always_sees_metrics_never_creations() {
        let metrics = Event::MetricsUpdated(serde_json::json!([]));
        let created = Event::OrderCreated(order("A1", None));
        assert!(event_visible(&metrics, Role::Operator, 8, Some("A1")));
        assert!(!event_visible(&created, Role::Operator, 8, None));
    }

    #[tokio::test]
    async fn stream_delivers_matching_events_and_heartbeats() {
        let bus = EventBus::new();
        let rx = bus.subscribe();
        bus.publish(Event::OrderCreated(order("A1", None)));

        let mut stream = Box::pin(subscriber_stream(rx, Role::Worker, 5, None));

        // queued domain event first, then the on-connect heartbeat
        let first = format!("{:?}", stream.next().await.unwrap().unwrap());
        assert!(first.contains("order.created"), "{first}");
        let second = format!("{:?}", stream.next().await.unwrap().unwrap());
        assert!(second.contains("ping"), "{second}");
    }

    #[test]
    fn admin_gets_heartbeats_only() {
        for event in [
            Event::OrderCreated(order("A1", None)),
            Event::OrderStatusChanged(order("A1", Some(1))),
            Event::MetricsUpdated(serde_json::json!([])),
        ] {
            assert!(!event_visible(&event, Role::Admin, 1, None));
        }
    }
}
