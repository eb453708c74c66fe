//! API routes for dispatch-server

pub mod auth;
pub mod events;
pub mod health;
pub mod layout;
pub mod orders;
pub mod priority_rules;
pub mod routes;
pub mod storages;
pub mod users;

use axum::routing::{delete, get, post};
use axum::{middleware, Router};

use crate::auth::auth_middleware;
use crate::state::AppState;

/// Create the combined router
///
/// Everything except `/health` and the login endpoints sits behind the
/// bearer-token middleware. Paths are mounted at the root; the
/// frontend expects no `/api` prefix.
pub fn create_router(state: AppState) -> Router {
    let public = Router::new()
        .route("/health", get(health::health_check))
        .route("/login", post(auth::login))
        .route("/auth/login", post(auth::login));

    let protected = Router::new()
        .route("/orders", get(orders::list).post(orders::create))
        .route("/orders/metrics", get(orders::metrics))
        .route("/orders/{id}/take", post(orders::take))
        .route("/orders/{id}/done", post(orders::done))
        .route("/orders/{id}/cancel", post(orders::cancel))
        .route("/events", get(events::stream))
        .route("/storages", get(storages::list).post(storages::create))
        .route(
            "/storages/{id}",
            axum::routing::patch(storages::patch).delete(storages::remove),
        )
        .route("/routes", get(routes::list).post(routes::create))
        .route("/routes/bulk", post(routes::bulk_create))
        .route("/routes/{id}", delete(routes::remove))
        .route(
            "/priority-rules",
            get(priority_rules::list).post(priority_rules::create),
        )
        .route(
            "/priority-rules/{id}",
            axum::routing::patch(priority_rules::patch).delete(priority_rules::remove),
        )
        .route("/layout", get(layout::get_layout).post(layout::save_layout))
        .route("/users", get(users::list).post(users::create))
        .route(
            "/users/{id}",
            axum::routing::patch(users::patch).delete(users::remove),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new().merge(public).merge(protected).with_state(state)
}
