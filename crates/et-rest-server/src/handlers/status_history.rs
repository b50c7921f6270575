//! Equipment status history endpoints

use crate::error::ServerError;
use crate::mapping;
use crate::state::AppState;
use crate::ServerResult;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use et_api_contract::{ApiEnvelope, CreateStatusHistoryRequest, StatusHistoryEntry};
use validator::Validate;

pub async fn create_entry(
    State(state): State<AppState>,
    Json(payload): Json<CreateStatusHistoryRequest>,
) -> ServerResult<(StatusCode, Json<ApiEnvelope<StatusHistoryEntry>>)> {
    payload.validate()?;

    if !state.db().equipment_exists(payload.equipment_id)? {
        return Err(ServerError::not_found("Equipment", payload.equipment_id));
    }

    let changed_by = match payload.changed_by_id.as_deref() {
        Some(user_id) => Some(state.db().user_by_id(user_id)?.ok_or_else(|| {
            ServerError::BadRequest(format!("User with ID {user_id} does not exist"))
        })?),
        None => None,
    };

    let entry = state.db().insert_status_history(
        payload.equipment_id,
        &payload.status,
        payload.changed_by_id.as_deref(),
        payload.notes.as_deref(),
    )?;
    tracing::info!(
        equipment_id = entry.equipment_id,
        status = %entry.status,
        "status history recorded"
    );

    let changed_by = changed_by.map(mapping::user_summary).transpose()?;
    Ok((
        StatusCode::CREATED,
        Json(ApiEnvelope::ok(StatusHistoryEntry {
            id: entry.id,
            equipment_id: entry.equipment_id,
            status: entry.status,
            notes: entry.notes,
            changed_at: entry.changed_at,
            changed_by,
        })),
    ))
}

pub async fn list_for_equipment(
    State(state): State<AppState>,
    Path(equipment_id): Path<i64>,
) -> ServerResult<Json<ApiEnvelope<Vec<StatusHistoryEntry>>>> {
    if !state.db().equipment_exists(equipment_id)? {
        return Err(ServerError::not_found("Equipment", equipment_id));
    }

    let entries = state
        .db()
        .status_history_for_equipment(equipment_id)?
        .into_iter()
        .map(mapping::status_entry)
        .collect::<ServerResult<Vec<_>>>()?;
    Ok(Json(ApiEnvelope::ok(entries)))
}
