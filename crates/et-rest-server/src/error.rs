//! Server error types and handling

use et_api_contract::ProblemDetails;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

/// Server result type
pub type ServerResult<T> = Result<T, ServerError>;

/// Server error types
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Database error: {0}")]
    Database(#[from] et_local_db::Error),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Authorization error: {0}")]
    Forbidden(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Rate limited")]
    RateLimited,
}

impl ServerError {
    /// `{Entity} with ID {id} not found`, the 404 shape every resource uses.
    pub fn not_found(entity: &str, id: impl std::fmt::Display) -> Self {
        ServerError::NotFound(format!("{entity} with ID {id} not found"))
    }

    /// Convert error to Problem+JSON response
    pub fn to_problem(&self) -> ProblemDetails {
        match self {
            ServerError::Database(err) => ProblemDetails {
                problem_type: "https://docs.example.com/errors/database".to_string(),
                title: "Database Error".to_string(),
                status: Some(StatusCode::INTERNAL_SERVER_ERROR.as_u16()),
                detail: format!("Database operation failed: {}", err),
                errors: Default::default(),
            },
            ServerError::Auth(msg) => ProblemDetails {
                problem_type: "https://docs.example.com/errors/auth".to_string(),
                title: "Authentication Failed".to_string(),
                status: Some(StatusCode::UNAUTHORIZED.as_u16()),
                detail: msg.clone(),
                errors: Default::default(),
            },
            ServerError::Forbidden(msg) => ProblemDetails {
                problem_type: "https://docs.example.com/errors/authz".to_string(),
                title: "Authorization Failed".to_string(),
                status: Some(StatusCode::FORBIDDEN.as_u16()),
                detail: msg.clone(),
                errors: Default::default(),
            },
            ServerError::Validation(err) => ProblemDetails {
                problem_type: "https://docs.example.com/errors/validation".to_string(),
                title: "Validation Error".to_string(),
                status: Some(StatusCode::BAD_REQUEST.as_u16()),
                detail: err.to_string(),
                errors: Default::default(),
            },
            ServerError::NotFound(msg) => ProblemDetails {
                problem_type: "https://docs.example.com/errors/not-found".to_string(),
                title: "Not Found".to_string(),
                status: Some(StatusCode::NOT_FOUND.as_u16()),
                detail: msg.clone(),
                errors: Default::default(),
            },
            ServerError::Conflict(msg) => ProblemDetails {
                problem_type: "https://docs.example.com/errors/conflict".to_string(),
                title: "Conflict".to_string(),
                status: Some(StatusCode::CONFLICT.as_u16()),
                detail: msg.clone(),
                errors: Default::default(),
            },
            ServerError::BadRequest(msg) => ProblemDetails {
                problem_type: "https://docs.example.com/errors/bad-request".to_string(),
                title: "Bad Request".to_string(),
                status: Some(StatusCode::BAD_REQUEST.as_u16()),
                detail: msg.clone(),
                errors: Default::default(),
            },
            ServerError::Internal(msg) => ProblemDetails {
                problem_type: "https://docs.example.com/errors/internal".to_string(),
                title: "Internal Server Error".to_string(),
                status: Some(StatusCode::INTERNAL_SERVER_ERROR.as_u16()),
                detail: msg.clone(),
                errors: Default::default(),
            },
            ServerError::RateLimited => ProblemDetails {
                problem_type: "https://docs.example.com/errors/rate-limited".to_string(),
                title: "Rate Limited".to_string(),
                status: Some(StatusCode::TOO_MANY_REQUESTS.as_u16()),
                detail: "Too many requests".to_string(),
                errors: Default::default(),
            },
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let problem = self.to_problem();
        let status = StatusCode::from_u16(problem.status.unwrap_or(500))
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(problem)).into_response()
    }
}

/// Convert any error to ServerError
impl From<anyhow::Error> for ServerError {
    fn from(err: anyhow::Error) -> Self {
        ServerError::Internal(err.to_string())
    }
}

/// Convert IO errors
impl From<std::io::Error> for ServerError {
    fn from(err: std::io::Error) -> Self {
        ServerError::Internal(format!("IO error: {}", err))
    }
}

/// Translate a constraint failure on `entity` into the client-facing 400 the
/// dashboard expects; anything else stays a database error.
pub fn db_entity(entity: &'static str) -> impl FnOnce(et_local_db::Error) -> ServerError {
    move |err| {
        if err.is_unique_violation() {
            ServerError::BadRequest(format!(
                "A {entity} with the same unique value already exists"
            ))
        } else if err.is_foreign_key_violation() {
            ServerError::BadRequest(format!(
                "Cannot delete this {entity} because it is referenced by other records"
            ))
        } else {
            ServerError::Database(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_uses_entity_and_id() {
        let err = ServerError::not_found("Category", 7);
        let problem = err.to_problem();
        assert_eq!(problem.status, Some(404));
        assert_eq!(problem.detail, "Category with ID 7 not found");
    }

    #[test]
    fn unique_violation_maps_to_duplicate_message() {
        let err = db_entity("room")(et_local_db::Error::UniqueViolation { table: "rooms" });
        let problem = err.to_problem();
        assert_eq!(problem.status, Some(400));
        assert_eq!(
            problem.detail,
            "A room with the same unique value already exists"
        );
    }

    #[test]
    fn foreign_key_violation_maps_to_referenced_message() {
        let err =
            db_entity("category")(et_local_db::Error::ForeignKeyViolation { table: "categories" });
        assert_eq!(
            err.to_problem().detail,
            "Cannot delete this category because it is referenced by other records"
        );
    }
}
