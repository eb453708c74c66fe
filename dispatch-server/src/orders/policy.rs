//! Role policy for order actions
//!
//! One closed match per action so adding a role forces every decision
//! to be revisited at compile time.

use shared::models::{OrderStatus, Role};

/// Who may create orders
pub fn can_create(role: Role) -> bool {
    match role {
        Role::Operator | Role::Admin => true,
        Role::Worker => false,
    }
}

/// Who may claim an order from the queue
pub fn can_take(role: Role) -> bool {
    match role {
        Role::Worker | Role::Admin => true,
        Role::Operator => false,
    }
}

/// Who may complete a claimed order
pub fn can_complete(role: Role) -> bool {
    match role {
        Role::Worker | Role::Admin => true,
        Role::Operator => false,
    }
}

/// Who may read the per-origin queue metrics
pub fn can_view_metrics(role: Role) -> bool {
    match role {
        Role::Operator | Role::Admin => true,
        Role::Worker => false,
    }
}

/// Who may list the order queue
pub fn can_list(role: Role) -> bool {
    match role {
        Role::Worker | Role::Admin => true,
        Role::Operator => false,
    }
}

/// The statuses a role may cancel an order from
///
/// Workers may back out of unclaimed orders only; once claimed, the
/// order finishes or an operator intervenes.
pub fn cancelable_from(role: Role) -> &'static [OrderStatus] {
    match role {
        Role::Worker => &[OrderStatus::New],
        Role::Operator | Role::Admin => &[OrderStatus::New, OrderStatus::InProgress],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creation_is_operator_and_admin() {
        assert!(can_create(Role::Operator));
        assert!(can_create(Role::Admin));
        assert!(!can_create(Role::Worker));
    }

    #[test]
    fn operators_neither_claim_nor_complete() {
        for role in [Role::Worker, Role::Admin] {
            assert!(can_take(role));
            assert!(can_complete(role));
        }
        assert!(!can_take(Role::Operator));
        assert!(!can_complete(Role::Operator));
    }

    #[test]
    fn metrics_are_for_dispatchers() {
        assert!(can_view_metrics(Role::Operator));
        assert!(can_view_metrics(Role::Admin));
        assert!(!can_view_metrics(Role::Worker));
    }

    #[test]
    fn workers_cancel_unclaimed_only() {
        assert_eq!(cancelable_from(Role::Worker), &[OrderStatus::New]);
        assert!(cancelable_from(Role::Operator).contains(&OrderStatus::InProgress));
        assert!(cancelable_from(Role::Admin).contains(&OrderStatus::InProgress));
    }
}
