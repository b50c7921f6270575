//! Equipment location history endpoints

use crate::error::ServerError;
use crate::mapping;
use crate::state::AppState;
use crate::ServerResult;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use et_api_contract::{ApiEnvelope, CreateLocationHistoryRequest, LocationHistoryEntry};
use validator::Validate;

pub async fn create_entry(
    State(state): State<AppState>,
    Json(payload): Json<CreateLocationHistoryRequest>,
) -> ServerResult<(StatusCode, Json<ApiEnvelope<LocationHistoryEntry>>)> {
    payload.validate()?;

    if !state.db().equipment_exists(payload.equipment_id)? {
        return Err(ServerError::not_found("Equipment", payload.equipment_id));
    }
    let room = state
        .db()
        .room_by_id(payload.room_id)?
        .ok_or_else(|| ServerError::not_found("Room", payload.room_id))?;

    let assigned_by = match payload.assigned_by_id.as_deref() {
        Some(user_id) => Some(state.db().user_by_id(user_id)?.ok_or_else(|| {
            ServerError::BadRequest(format!("User with ID {user_id} does not exist"))
        })?),
        None => None,
    };

    // Re-assigning to the room the equipment is already in is a no-op the
    // client should be told about.
    if let Some(current) = state.db().latest_room(payload.equipment_id)? {
        if current.id == payload.room_id {
            return Err(ServerError::BadRequest(format!(
                "Equipment {} is already assigned to room {}",
                payload.equipment_id, payload.room_id
            )));
        }
    }

    let entry = state.db().insert_location_history(
        payload.equipment_id,
        payload.room_id,
        payload.assigned_by_id.as_deref(),
    )?;
    tracing::info!(
        equipment_id = entry.equipment_id,
        room_id = entry.room_id,
        "location history recorded"
    );

    let assigned_by = assigned_by.map(mapping::user_summary).transpose()?;
    Ok((
        StatusCode::CREATED,
        Json(ApiEnvelope::ok(LocationHistoryEntry {
            id: entry.id,
            equipment_id: entry.equipment_id,
            room: mapping::room(room),
            assigned_at: entry.assigned_at,
            assigned_by,
        })),
    ))
}

pub async fn list_for_equipment(
    State(state): State<AppState>,
    Path(equipment_id): Path<i64>,
) -> ServerResult<Json<ApiEnvelope<Vec<LocationHistoryEntry>>>> {
    if !state.db().equipment_exists(equipment_id)? {
        return Err(ServerError::not_found("Equipment", equipment_id));
    }

    let entries = state
        .db()
        .location_history_for_equipment(equipment_id)?
        .into_iter()
        .map(mapping::location_entry)
        .collect::<ServerResult<Vec<_>>>()?;
    Ok(Json(ApiEnvelope::ok(entries)))
}
