//! Admin-only account management

use crate::auth::hash_password;
use crate::error::ServerError;
use crate::mapping;
use crate::state::AppState;
use crate::ServerResult;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use et_api_contract::validation::{
    normalize_email, normalize_employee_id, validate_create_user_request,
};
use et_api_contract::{ApiEnvelope, CreateUserRequest, CreatedAccount, Role, User};
use validator::Validate;

/// Creates either a SUPER_ADMIN row in `users` or a USER row in `faculty`,
/// depending on the requested role.
pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> ServerResult<(StatusCode, Json<ApiEnvelope<CreatedAccount>>)> {
    payload.validate()?;
    validate_create_user_request(&payload).map_err(ServerError::BadRequest)?;

    let password_hash = hash_password(&payload.password)?;

    let account = match payload.role {
        Role::SuperAdmin => {
            // validate_create_user_request guarantees the email is present
            let email = payload
                .email
                .as_deref()
                .map(normalize_email)
                .ok_or_else(|| {
                    ServerError::BadRequest("Email is required for SUPER_ADMIN".to_string())
                })?;
            let user = state
                .db()
                .insert_user(&payload.name, &email, &password_hash)
                .map_err(|err| {
                    if err.is_unique_violation() {
                        ServerError::Conflict("SUPER_ADMIN account already exists".to_string())
                    } else {
                        ServerError::Database(err)
                    }
                })?;
            CreatedAccount {
                account_type: Role::SuperAdmin,
                id: user.id,
                name: user.name,
                email: Some(user.email),
                employee_id: None,
                created_at: user.created_at,
                updated_at: user.updated_at,
            }
        }
        Role::User => {
            let employee_id = payload
                .employee_id
                .as_deref()
                .map(normalize_employee_id)
                .ok_or_else(|| {
                    ServerError::BadRequest("employeeId is required for USER".to_string())
                })?;
            let faculty = state
                .db()
                .insert_faculty(&payload.name, &employee_id, &password_hash, "ACTIVE")
                .map_err(|err| {
                    if err.is_unique_violation() {
                        ServerError::Conflict("Faculty account already exists".to_string())
                    } else {
                        ServerError::Database(err)
                    }
                })?;
            CreatedAccount {
                account_type: Role::User,
                id: faculty.id,
                name: faculty.name,
                email: None,
                employee_id: Some(faculty.employee_id),
                created_at: faculty.created_at,
                updated_at: faculty.updated_at,
            }
        }
    };

    tracing::info!(account_id = %account.id, account_type = %account.account_type, "account created");
    Ok((StatusCode::CREATED, Json(ApiEnvelope::ok(account))))
}

pub async fn list_users(
    State(state): State<AppState>,
) -> ServerResult<Json<ApiEnvelope<Vec<User>>>> {
    let users = state
        .db()
        .list_users()?
        .into_iter()
        .map(mapping::user)
        .collect::<ServerResult<Vec<_>>>()?;
    Ok(Json(ApiEnvelope::ok(users)))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ServerResult<Json<ApiEnvelope<User>>> {
    let user = state
        .db()
        .user_by_id(&id)?
        .ok_or_else(|| ServerError::NotFound("User not found".to_string()))?;
    Ok(Json(ApiEnvelope::ok(mapping::user(user)?)))
}
