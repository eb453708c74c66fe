//! Bearer-token middleware
//!
//! Verifies the JWT and injects [`AuthUser`] into request extensions.
//! The token normally travels in the `Authorization` header; for SSE
//! the browser `EventSource` API cannot set headers, so a `token`
//! query parameter is accepted as a fallback.

use axum::{
    extract::{Query, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use shared::models::Role;
use shared::AppError;

use crate::auth::jwt;
use crate::state::AppState;

/// Authenticated identity carried through request extensions
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: i64,
    pub username: String,
    pub role: Role,
    pub home_storage_code: Option<String>,
}

#[derive(Deserialize)]
struct TokenQuery {
    token: Option<String>,
}

pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, Response> {
    let header_token = request
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_owned);

    let token = match header_token {
        Some(token) => token,
        None => {
            let Query(query) = Query::<TokenQuery>::try_from_uri(request.uri())
                .unwrap_or_else(|_| Query(TokenQuery { token: None }));
            query.token.ok_or_else(|| {
                AppError::unauthorized("Missing credentials").into_response()
            })?
        }
    };

    let claims = jwt::decode_token(&token, &state.jwt_secret)
        .map_err(IntoResponse::into_response)?;

    let id: i64 = claims
        .sub
        .parse()
        .map_err(|_| AppError::unauthorized("Invalid token subject").into_response())?;

    request.extensions_mut().insert(AuthUser {
        id,
        username: claims.username,
        role: claims.role,
        home_storage_code: claims.home,
    });

    Ok(next.run(request).await)
}

/// Guard for admin-only management endpoints
pub fn require_admin(user: &AuthUser) -> Result<(), AppError> {
    if user.role == Role::Admin {
        Ok(())
    } else {
        Err(AppError::forbidden("Admin role required"))
    }
}
