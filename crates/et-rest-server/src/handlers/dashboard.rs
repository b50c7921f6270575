//! Dashboard aggregation

use crate::handlers::equipment::summarize;
use crate::state::AppState;
use crate::ServerResult;
use axum::{extract::State, Json};
use et_api_contract::{ApiEnvelope, DashboardStats};

pub async fn stats(
    State(state): State<AppState>,
) -> ServerResult<Json<ApiEnvelope<DashboardStats>>> {
    let details = state.db().list_equipment_detailed()?;
    let summary = summarize(&details);
    Ok(Json(ApiEnvelope::ok(DashboardStats {
        total_equipment: summary.total_equipment,
        active_equipment: summary.active_equipment,
        maintenance_count: summary.maintenance_count,
    })))
}
