//! Application state for dispatch-server

use sqlx::PgPool;

use crate::auth::password;
use crate::config::Config;
use crate::db;
use crate::events::EventBus;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL connection pool
    pub pool: PgPool,
    /// Domain event fan-out to SSE subscribers
    pub bus: EventBus,
    /// JWT signing secret
    pub jwt_secret: String,
}

impl AppState {
    pub async fn new(config: &Config) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let pool = db::connect(&config.database_url).await?;
        let state = Self {
            pool,
            bus: EventBus::new(),
            jwt_secret: config.jwt_secret.clone(),
        };
        state.seed_admin(&config.admin_password).await?;
        Ok(state)
    }

    /// Create the bootstrap admin account when no admin exists yet
    async fn seed_admin(
        &self,
        admin_password: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        if db::users::count_admins(&self.pool).await? > 0 {
            return Ok(());
        }
        let hash = password::hash_password(admin_password)
            .map_err(|e| format!("failed to hash bootstrap admin password: {e}"))?;
        let user =
            db::users::insert(&self.pool, "admin", &hash, shared::models::Role::Admin, None)
                .await?;
        tracing::info!(user_id = user.id, "seeded bootstrap admin account");
        Ok(())
    }
}
