//! Faculty password-reset request workflow

use crate::auth::{hash_password, AuthContext};
use crate::error::ServerError;
use crate::mapping;
use crate::state::AppState;
use crate::ServerResult;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use et_api_contract::validation::normalize_employee_id;
use et_api_contract::{
    ApiEnvelope, CreatePasswordRequestRequest, PasswordRequestAck, PasswordResetRequest,
    ResetStatus, ResolvePasswordRequestRequest,
};
use validator::Validate;

/// The response never discloses whether the employee id matched an account.
const ACK_MESSAGE: &str = "If an account exists, a request has been submitted";

pub async fn create_request(
    State(state): State<AppState>,
    Json(payload): Json<CreatePasswordRequestRequest>,
) -> ServerResult<(StatusCode, Json<ApiEnvelope<PasswordRequestAck>>)> {
    payload.validate()?;
    let employee_id = normalize_employee_id(&payload.employee_id);

    if let Some(faculty) = state.db().faculty_by_employee_id(&employee_id)? {
        if !state.db().pending_request_exists(&faculty.id)? {
            let request = state.db().insert_password_request(&faculty.id)?;
            tracing::info!(request_id = %request.id, "password reset request submitted");
        }
    }

    Ok((
        StatusCode::CREATED,
        Json(ApiEnvelope::ok(PasswordRequestAck {
            message: ACK_MESSAGE.to_string(),
        })),
    ))
}

pub async fn list_requests(
    State(state): State<AppState>,
) -> ServerResult<Json<ApiEnvelope<Vec<PasswordResetRequest>>>> {
    let requests = state
        .db()
        .list_password_requests()?
        .into_iter()
        .map(mapping::password_request)
        .collect::<ServerResult<Vec<_>>>()?;
    Ok(Json(ApiEnvelope::ok(requests)))
}

pub async fn resolve_request(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Path(id): Path<String>,
    Json(payload): Json<ResolvePasswordRequestRequest>,
) -> ServerResult<Json<ApiEnvelope<PasswordResetRequest>>> {
    payload.validate()?;

    let request = state
        .db()
        .password_request_by_id(&id)?
        .ok_or_else(|| ServerError::not_found("Password reset request", &id))?;

    if request.status != ResetStatus::Pending.as_str() {
        return Err(ServerError::BadRequest(
            "Password reset request is already completed".to_string(),
        ));
    }

    let password_hash = hash_password(&payload.new_password)?;
    state.db().resolve_password_request(
        &request.id,
        &request.faculty_id,
        &password_hash,
        &context.account_id,
    )?;
    tracing::info!(
        request_id = %request.id,
        admin_id = %context.account_id,
        "password reset request resolved"
    );

    let detail = state
        .db()
        .password_request_detail(&request.id)?
        .ok_or_else(|| ServerError::not_found("Password reset request", &id))?;
    Ok(Json(ApiEnvelope::ok(mapping::password_request(detail)?)))
}
