//! Authentication and authorization
//!
//! Argon2 password hashing, HS256 JWT issuing/validation, and the request
//! middleware that enforces the public/authenticated/admin route split.

use crate::error::ServerError;
use crate::state::AppState;
use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use axum::{
    extract::Request,
    http::{header, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::{Duration, Utc};
use et_api_contract::Role;
use et_local_db::records::{FacultyRecord, UserRecord};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

const TOKEN_LIFETIME_HOURS: i64 = 24;

/// Authentication configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
}

impl AuthConfig {
    pub fn new(jwt_secret: String) -> Self {
        Self { jwt_secret }
    }

    /// Sign a token for the given claims.
    pub fn issue_token(&self, claims: &Claims) -> Result<String, ServerError> {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )
        .map_err(|err| ServerError::Internal(format!("token signing failed: {err}")))
    }

    /// Validate JWT token
    pub fn validate_jwt(&self, token: &str) -> Result<Claims, ServerError> {
        let decoding_key = DecodingKey::from_secret(self.jwt_secret.as_ref());
        let validation = Validation::default();

        let token_data = decode::<Claims>(token, &decoding_key, &validation)
            .map_err(|_| ServerError::Auth("Invalid JWT token".to_string()))?;

        Ok(token_data.claims)
    }
}

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (account ID)
    pub sub: String,
    pub role: String,
    /// Expiration time (unix seconds)
    pub exp: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "employeeId", skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
}

impl Claims {
    fn expiry() -> usize {
        (Utc::now() + Duration::hours(TOKEN_LIFETIME_HOURS)).timestamp() as usize
    }

    pub fn for_admin(user: &UserRecord) -> Self {
        Self {
            sub: user.id.clone(),
            role: Role::SuperAdmin.as_str().to_string(),
            exp: Self::expiry(),
            name: Some(user.name.clone()),
            email: Some(user.email.clone()),
            employee_id: None,
        }
    }

    pub fn for_faculty(faculty: &FacultyRecord) -> Self {
        Self {
            sub: faculty.id.clone(),
            role: Role::User.as_str().to_string(),
            exp: Self::expiry(),
            name: Some(faculty.name.clone()),
            email: None,
            employee_id: Some(faculty.employee_id.clone()),
        }
    }
}

/// Authenticated principal, attached to the request extensions by the
/// middleware and read by handlers that need the acting account.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub account_id: String,
    pub role: Role,
}

/// Hash a password with argon2id and a fresh salt.
pub fn hash_password(password: &str) -> Result<String, ServerError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| ServerError::Internal(format!("password hashing failed: {err}")))
}

/// Verify a password against a stored PHC hash. Malformed hashes verify as
/// false rather than erroring, so login failures stay uniform.
pub fn verify_password(password: &str, hash: &str) -> bool {
    PasswordHash::new(hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

fn is_public(path: &str, method: &Method) -> bool {
    path == "/api/health"
        || path == "/api/db-test"
        || path.starts_with("/api/auth/login/")
        || (path == "/api/password-requests" && method == Method::POST)
}

fn requires_admin(path: &str, method: &Method) -> bool {
    path == "/api/users"
        || path.starts_with("/api/users/")
        || path == "/api/user"
        || path.starts_with("/api/user/")
        || (path == "/api/password-requests" && method == Method::GET)
        || (path.starts_with("/api/password-requests/") && path.ends_with("/resolve"))
}

/// Authentication middleware
pub async fn auth_middleware(
    state: AppState,
    mut req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let path = req.uri().path().to_string();
    let method = req.method().clone();

    if is_public(&path, &method) {
        return Ok(next.run(req).await);
    }

    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let context = match auth_header {
        Some(auth) if auth.starts_with("Bearer ") => {
            let token = auth.trim_start_matches("Bearer ");
            state.auth.validate_jwt(token).and_then(|claims| {
                let role = claims
                    .role
                    .parse::<Role>()
                    .map_err(|_| ServerError::Auth("Invalid JWT token".to_string()))?;
                Ok(AuthContext {
                    account_id: claims.sub,
                    role,
                })
            })
        }
        _ => Err(ServerError::Auth(
            "Missing or invalid authorization header".to_string(),
        )),
    };

    let context = match context {
        Ok(context) => context,
        Err(err) => return Ok(err.into_response()),
    };

    if requires_admin(&path, &method) && context.role != Role::SuperAdmin {
        return Ok(
            ServerError::Forbidden("Administrator access required".to_string()).into_response(),
        );
    }

    req.extensions_mut().insert(context);
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_round_trip() {
        let hash = hash_password("correct horse battery").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("correct horse battery", &hash));
        assert!(!verify_password("wrong", &hash));
    }

    #[test]
    fn malformed_hash_never_verifies() {
        assert!(!verify_password("anything", "not-a-phc-string"));
    }

    #[test]
    fn token_round_trip_preserves_claims() {
        let config = AuthConfig::new("test_secret".to_string());
        let claims = Claims {
            sub: "user-1".to_string(),
            role: "SUPER_ADMIN".to_string(),
            exp: Claims::expiry(),
            name: Some("Admin".to_string()),
            email: Some("admin@lnu.local".to_string()),
            employee_id: None,
        };

        let token = config.issue_token(&claims).unwrap();
        let decoded = config.validate_jwt(&token).unwrap();
        assert_eq!(decoded.sub, "user-1");
        assert_eq!(decoded.role, "SUPER_ADMIN");
        assert_eq!(decoded.email.as_deref(), Some("admin@lnu.local"));
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let signer = AuthConfig::new("secret-a".to_string());
        let verifier = AuthConfig::new("secret-b".to_string());
        let token = signer
            .issue_token(&Claims {
                sub: "user-1".to_string(),
                role: "USER".to_string(),
                exp: Claims::expiry(),
                name: None,
                email: None,
                employee_id: Some("FAC-0001".to_string()),
            })
            .unwrap();
        assert!(verifier.validate_jwt(&token).is_err());
    }

    #[test]
    fn route_classification() {
        assert!(is_public("/api/health", &Method::GET));
        assert!(is_public("/api/auth/login/admin", &Method::POST));
        assert!(is_public("/api/password-requests", &Method::POST));
        assert!(!is_public("/api/password-requests", &Method::GET));
        assert!(!is_public("/api/equipment", &Method::GET));

        assert!(requires_admin("/api/users", &Method::POST));
        assert!(requires_admin("/api/user/abc", &Method::GET));
        assert!(requires_admin("/api/password-requests", &Method::GET));
        assert!(requires_admin(
            "/api/password-requests/abc/resolve",
            &Method::POST
        ));
        assert!(!requires_admin("/api/equipment", &Method::GET));
    }
}
