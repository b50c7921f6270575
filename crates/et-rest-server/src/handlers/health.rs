//! Health and database check endpoints

use crate::state::AppState;
use crate::ServerResult;
use axum::{extract::State, Json};
use et_api_contract::{ApiEnvelope, DbTestReport, HealthStatus};

/// Health check endpoint
pub async fn health_check(
    State(state): State<AppState>,
) -> ServerResult<Json<ApiEnvelope<HealthStatus>>> {
    let response = HealthStatus {
        status: "ok".to_string(),
        uptime: state.uptime_secs(),
        timestamp: chrono::Utc::now(),
    };
    Ok(Json(ApiEnvelope::ok(response)))
}

/// Database connectivity check: first five categories plus a count
pub async fn db_test(
    State(state): State<AppState>,
) -> ServerResult<Json<ApiEnvelope<DbTestReport>>> {
    let categories = state.db().list_categories()?;
    let count = categories.len();
    let report = DbTestReport {
        message: "Database connection successful".to_string(),
        count,
        categories: categories.into_iter().take(5).map(crate::mapping::category).collect(),
    };
    Ok(Json(ApiEnvelope::ok(report)))
}
