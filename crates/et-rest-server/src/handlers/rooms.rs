//! Room CRUD endpoints

use crate::error::{db_entity, ServerError};
use crate::mapping;
use crate::state::AppState;
use crate::ServerResult;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use et_api_contract::{ApiEnvelope, CreateRoomRequest, Room, UpdateRoomRequest};
use validator::Validate;

pub async fn create_room(
    State(state): State<AppState>,
    Json(payload): Json<CreateRoomRequest>,
) -> ServerResult<(StatusCode, Json<ApiEnvelope<Room>>)> {
    payload.validate()?;
    let record = state
        .db()
        .insert_room(
            &payload.name,
            payload.building.as_deref(),
            payload.floor.as_deref(),
        )
        .map_err(db_entity("room"))?;
    Ok((
        StatusCode::CREATED,
        Json(ApiEnvelope::ok(mapping::room(record))),
    ))
}

pub async fn list_rooms(
    State(state): State<AppState>,
) -> ServerResult<Json<ApiEnvelope<Vec<Room>>>> {
    let rooms = state.db().list_rooms()?.into_iter().map(mapping::room).collect();
    Ok(Json(ApiEnvelope::ok(rooms)))
}

pub async fn get_room(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ServerResult<Json<ApiEnvelope<Room>>> {
    let record = state
        .db()
        .room_by_id(id)?
        .ok_or_else(|| ServerError::not_found("Room", id))?;
    Ok(Json(ApiEnvelope::ok(mapping::room(record))))
}

pub async fn update_room(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateRoomRequest>,
) -> ServerResult<Json<ApiEnvelope<Room>>> {
    payload.validate()?;
    state
        .db()
        .room_by_id(id)?
        .ok_or_else(|| ServerError::not_found("Room", id))?;

    state
        .db()
        .update_room(
            id,
            payload.name.as_deref(),
            payload.building.as_deref(),
            payload.floor.as_deref(),
        )
        .map_err(db_entity("room"))?;

    let record = state
        .db()
        .room_by_id(id)?
        .ok_or_else(|| ServerError::not_found("Room", id))?;
    Ok(Json(ApiEnvelope::ok(mapping::room(record))))
}

pub async fn delete_room(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ServerResult<Json<ApiEnvelope<Room>>> {
    let record = state
        .db()
        .room_by_id(id)?
        .ok_or_else(|| ServerError::not_found("Room", id))?;

    state.db().delete_room(id).map_err(db_entity("room"))?;
    Ok(Json(ApiEnvelope::ok(mapping::room(record))))
}
