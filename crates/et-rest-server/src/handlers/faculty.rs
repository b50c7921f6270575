//! Faculty account CRUD endpoints

use crate::auth::hash_password;
use crate::error::{db_entity, ServerError};
use crate::mapping;
use crate::state::AppState;
use crate::ServerResult;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use et_api_contract::validation::normalize_employee_id;
use et_api_contract::{ApiEnvelope, CreateFacultyRequest, Faculty, UpdateFacultyRequest};
use et_local_db::records::FacultyUpdate;
use validator::Validate;

const DEFAULT_STATUS: &str = "ACTIVE";

pub async fn create_faculty(
    State(state): State<AppState>,
    Json(payload): Json<CreateFacultyRequest>,
) -> ServerResult<(StatusCode, Json<ApiEnvelope<Faculty>>)> {
    payload.validate()?;
    let employee_id = normalize_employee_id(&payload.employee_id);
    let password_hash = hash_password(&payload.password)?;
    let status = payload.status.as_deref().unwrap_or(DEFAULT_STATUS);

    let record = state
        .db()
        .insert_faculty(&payload.name, &employee_id, &password_hash, status)
        .map_err(db_entity("faculty"))?;
    tracing::info!(faculty_id = %record.id, "faculty account created");

    Ok((
        StatusCode::CREATED,
        Json(ApiEnvelope::ok(mapping::faculty(record))),
    ))
}

pub async fn list_faculty(
    State(state): State<AppState>,
) -> ServerResult<Json<ApiEnvelope<Vec<Faculty>>>> {
    let faculty = state.db().list_faculty()?.into_iter().map(mapping::faculty).collect();
    Ok(Json(ApiEnvelope::ok(faculty)))
}

pub async fn get_faculty(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ServerResult<Json<ApiEnvelope<Faculty>>> {
    let record = state
        .db()
        .faculty_by_id(&id)?
        .ok_or_else(|| ServerError::not_found("Faculty", &id))?;
    Ok(Json(ApiEnvelope::ok(mapping::faculty(record))))
}

pub async fn update_faculty(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateFacultyRequest>,
) -> ServerResult<Json<ApiEnvelope<Faculty>>> {
    payload.validate()?;
    state
        .db()
        .faculty_by_id(&id)?
        .ok_or_else(|| ServerError::not_found("Faculty", &id))?;

    let update = FacultyUpdate {
        name: payload.name,
        employee_id: payload.employee_id.as_deref().map(normalize_employee_id),
        password_hash: match payload.password.as_deref() {
            Some(password) => Some(hash_password(password)?),
            None => None,
        },
        status: payload.status,
    };

    state.db().update_faculty(&id, &update).map_err(db_entity("faculty"))?;

    let record = state
        .db()
        .faculty_by_id(&id)?
        .ok_or_else(|| ServerError::not_found("Faculty", &id))?;
    Ok(Json(ApiEnvelope::ok(mapping::faculty(record))))
}

pub async fn delete_faculty(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ServerResult<Json<ApiEnvelope<Faculty>>> {
    let record = state
        .db()
        .faculty_by_id(&id)?
        .ok_or_else(|| ServerError::not_found("Faculty", &id))?;

    state.db().delete_faculty(&id).map_err(db_entity("faculty"))?;
    tracing::info!(faculty_id = %id, "faculty account deleted");
    Ok(Json(ApiEnvelope::ok(mapping::faculty(record))))
}
