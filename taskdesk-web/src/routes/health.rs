/// Health check endpoint
///
/// Reports whether the server is running, the database answers and the
/// schema carries every embedded migration.
///
/// # Endpoint
///
/// ```text
/// GET /health
/// ```
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "database": "connected",
///   "migrations": "up_to_date",
///   "schema_version": 20250101000004
/// }
/// ```

use crate::app::AppState;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use taskdesk_shared::db::{migrations, pool};

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `healthy` or `degraded`
    pub status: String,

    /// Application version
    pub version: String,

    /// `connected` or `disconnected`
    pub database: String,

    /// `up_to_date`, `pending` or `unknown` (database unreachable)
    pub migrations: String,

    /// Highest applied migration version
    pub schema_version: Option<i64>,
}

/// Health check handler
///
/// Always answers 200; a database outage or a schema behind the binary
/// shows up as `degraded`.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let connected = match pool::health_check(&state.db).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Health check could not reach the database");
            false
        }
    };

    let schema = if connected {
        match migrations::get_migration_status(&state.db).await {
            Ok(status) => Some(status),
            Err(e) => {
                tracing::warn!(error = %e, "Health check could not read migration status");
                None
            }
        }
    } else {
        None
    };

    let (migration_state, schema_version, up_to_date) = match &schema {
        Some(status) if status.is_up_to_date => ("up_to_date", status.latest_version, true),
        Some(status) => ("pending", status.latest_version, false),
        None => ("unknown", None, false),
    };

    Json(HealthResponse {
        status: if connected && up_to_date { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: if connected { "connected" } else { "disconnected" }.to_string(),
        migrations: migration_state.to_string(),
        schema_version,
    })
}
