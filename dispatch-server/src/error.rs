//! Service-layer error bridge
//!
//! `ServiceError` sits between the DB layer (`sqlx::Error`) and the API
//! layer (`shared::AppError`) so handlers and the lifecycle engine can
//! use `?` without `.map_err` boilerplate at every call site.

use axum::response::IntoResponse;
use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Service-layer error — only two variants, keeps things simple.
///
/// - `Db`: database/infrastructure errors (auto-logged, mapped to DB_ERROR)
/// - `App`: business-rule errors (transparent pass-through to the client)
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Database or infrastructure error
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
    /// Business-rule error (already an AppError with the correct code)
    #[error(transparent)]
    App(#[from] AppError),
}

/// Convenience alias for service-layer results
pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::App(app_err) => app_err,
            ServiceError::Db(db_err) => {
                tracing::error!(error = %db_err, "database error");
                AppError::new(ErrorCode::DbError)
            }
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> axum::response::Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
