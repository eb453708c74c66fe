//! SSE live stream endpoint

use std::convert::Infallible;

use axum::extract::{Query, State};
use axum::response::sse::{Event as SseEvent, Sse};
use axum::Extension;
use futures::Stream;
use serde::Deserialize;
use shared::models::Role;

use crate::auth::AuthUser;
use crate::events::channel;
use crate::state::AppState;

/// Scope overrides; defaults come from the JWT
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeQuery {
    role: Option<Role>,
    user_id: Option<i64>,
    home: Option<String>,
}

/// GET /events?role=&userId=&home=
///
/// Long-lived `text/event-stream`. The subscriber scope defaults to
/// the authenticated identity; query parameters may narrow it (a
/// dashboard opening a worker-view stream, for instance). Heartbeats
/// are produced inside the stream, so no extra keep-alive layer here.
pub async fn stream(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<ScopeQuery>,
) -> Sse<impl Stream<Item = Result<SseEvent, Infallible>>> {
    let role = query.role.unwrap_or(user.role);
    let user_id = query.user_id.unwrap_or(user.id);
    let home = query.home.or(user.home_storage_code);

    let rx = state.bus.subscribe();
    tracing::info!(
        user_id,
        ?role,
        subscribers = state.bus.subscriber_count(),
        "SSE subscriber connected"
    );
    Sse::new(channel::subscriber_stream(rx, role, user_id, home))
}
