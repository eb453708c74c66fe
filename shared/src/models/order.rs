//! Order model — one transport task between two storage locations

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Order lifecycle status
///
/// Transitions form a fixed directed graph:
/// `new → in_progress → done`, with `canceled` reachable from `new` and
/// `in_progress`. `done` and `canceled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(
    feature = "db",
    sqlx(type_name = "order_status", rename_all = "snake_case")
)]
pub enum OrderStatus {
    New,
    InProgress,
    Done,
    Canceled,
}

impl OrderStatus {
    /// Terminal states accept no further transitions
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Canceled)
    }

    /// Whether `self → to` is a legal lifecycle edge
    pub fn can_transition_to(&self, to: OrderStatus) -> bool {
        matches!(
            (self, to),
            (Self::New, Self::InProgress)
                | (Self::New, Self::Canceled)
                | (Self::InProgress, Self::Done)
                | (Self::InProgress, Self::Canceled)
        )
    }
}

/// Priority tag on an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(type_name = "urgency", rename_all = "UPPERCASE"))]
pub enum Urgency {
    Standard,
    Urgent,
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,
    pub from_code: String,
    pub to_code: String,
    pub urgency: Urgency,
    pub note: Option<String>,
    pub status: OrderStatus,
    pub assignee_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub taken_at: Option<DateTime<Utc>>,
    pub done_at: Option<DateTime<Utc>>,
    pub canceled_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifecycle_edges() {
        use OrderStatus::*;
        assert!(New.can_transition_to(InProgress));
        assert!(New.can_transition_to(Canceled));
        assert!(InProgress.can_transition_to(Done));
        assert!(InProgress.can_transition_to(Canceled));

        // no other edge exists
        assert!(!New.can_transition_to(Done));
        assert!(!InProgress.can_transition_to(New));
        assert!(!Done.can_transition_to(Canceled));
        assert!(!Canceled.can_transition_to(New));
        assert!(!Done.can_transition_to(InProgress));
    }

    #[test]
    fn terminal_states() {
        assert!(!OrderStatus::New.is_terminal());
        assert!(!OrderStatus::InProgress.is_terminal());
        assert!(OrderStatus::Done.is_terminal());
        assert!(OrderStatus::Canceled.is_terminal());
    }

    #[test]
    fn wire_casing() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::InProgress).unwrap(),
            "\"in_progress\""
        );
        assert_eq!(
            serde_json::to_string(&Urgency::Urgent).unwrap(),
            "\"URGENT\""
        );
    }
}
