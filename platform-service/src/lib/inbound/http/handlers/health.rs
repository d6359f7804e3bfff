use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::inbound::http::router::AppState;

const HEALTHY: &str = "healthy";
const UNHEALTHY: &str = "unhealthy";

/// Liveness and database readiness. Returned without the API envelope so
/// load balancers can read it directly.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let database = match state.health_check.check_database().await {
        Ok(()) => HEALTHY,
        Err(e) => {
            tracing::warn!(error = %e, "Database health check failed");
            UNHEALTHY
        }
    };

    let (status, code) = if database == HEALTHY {
        (HEALTHY, StatusCode::OK)
    } else {
        (UNHEALTHY, StatusCode::SERVICE_UNAVAILABLE)
    };

    (
        code,
        Json(HealthResponse {
            status: status.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: database.to_string(),
            },
        }),
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthChecks {
    pub database: String,
}
