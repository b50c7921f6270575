//! Login and profile endpoints
//!
//! Login responses are returned bare (no success envelope) so existing
//! clients can read `access_token` at the top level; `/auth/me` uses the
//! standard envelope like the rest of the API.

use crate::auth::{verify_password, AuthContext, Claims};
use crate::error::ServerError;
use crate::state::AppState;
use crate::ServerResult;
use axum::{extract::State, Extension, Json};
use et_api_contract::validation::{normalize_email, normalize_employee_id};
use et_api_contract::{
    AdminLoginRequest, ApiEnvelope, AuthUser, FacultyLoginRequest, LoginResponse, Role,
};
use validator::Validate;

const INVALID_CREDENTIALS: &str = "Invalid credentials";

pub async fn login_admin(
    State(state): State<AppState>,
    Json(payload): Json<AdminLoginRequest>,
) -> ServerResult<Json<LoginResponse>> {
    payload.validate()?;
    let email = normalize_email(&payload.email);

    let user = state
        .db()
        .user_by_email(&email)?
        .ok_or_else(|| ServerError::Auth(INVALID_CREDENTIALS.to_string()))?;

    if !verify_password(&payload.password, &user.password_hash) {
        return Err(ServerError::Auth(INVALID_CREDENTIALS.to_string()));
    }

    let access_token = state.auth.issue_token(&Claims::for_admin(&user))?;
    tracing::info!(user_id = %user.id, "admin login");

    Ok(Json(LoginResponse {
        access_token,
        user: AuthUser {
            id: user.id,
            name: user.name,
            role: Role::SuperAdmin,
            email: Some(user.email),
            employee_id: None,
            created_at: user.created_at,
        },
    }))
}

pub async fn login_faculty(
    State(state): State<AppState>,
    Json(payload): Json<FacultyLoginRequest>,
) -> ServerResult<Json<LoginResponse>> {
    payload.validate()?;
    let employee_id = normalize_employee_id(&payload.employee_id);

    let faculty = state
        .db()
        .faculty_by_employee_id(&employee_id)?
        .ok_or_else(|| ServerError::Auth(INVALID_CREDENTIALS.to_string()))?;

    if !verify_password(&payload.password, &faculty.password_hash) {
        return Err(ServerError::Auth(INVALID_CREDENTIALS.to_string()));
    }

    let access_token = state.auth.issue_token(&Claims::for_faculty(&faculty))?;
    tracing::info!(faculty_id = %faculty.id, "faculty login");

    Ok(Json(LoginResponse {
        access_token,
        user: AuthUser {
            id: faculty.id,
            name: faculty.name,
            role: Role::User,
            email: None,
            employee_id: Some(faculty.employee_id),
            created_at: faculty.created_at,
        },
    }))
}

/// Re-resolve the token subject against the database, so revoked accounts
/// stop authenticating even with a live token.
pub async fn me(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
) -> ServerResult<Json<ApiEnvelope<AuthUser>>> {
    let user = match context.role {
        Role::SuperAdmin => {
            let user = state
                .db()
                .user_by_id(&context.account_id)?
                .ok_or_else(|| ServerError::Auth("Account no longer exists".to_string()))?;
            AuthUser {
                id: user.id,
                name: user.name,
                role: Role::SuperAdmin,
                email: Some(user.email),
                employee_id: None,
                created_at: user.created_at,
            }
        }
        Role::User => {
            let faculty = state
                .db()
                .faculty_by_id(&context.account_id)?
                .ok_or_else(|| ServerError::Auth("Account no longer exists".to_string()))?;
            AuthUser {
                id: faculty.id,
                name: faculty.name,
                role: Role::User,
                email: None,
                employee_id: Some(faculty.employee_id),
                created_at: faculty.created_at,
            }
        }
    };

    Ok(Json(ApiEnvelope::ok(user)))
}
