//! Validation helpers for API contract types

use crate::error::ApiContractError;
use crate::types::*;
use validator::Validate;

/// Canonical form for admin emails: trimmed and lowercased
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Canonical form for employee ids: trimmed and uppercased
pub fn normalize_employee_id(employee_id: &str) -> String {
    employee_id.trim().to_uppercase()
}

/// Validate an account creation request, including the cross-field rules
/// that tie identifiers to roles.
pub fn validate_create_user_request(request: &CreateUserRequest) -> Result<(), String> {
    if let Err(err) = request.validate() {
        return Err(err.to_string());
    }

    match request.role {
        Role::SuperAdmin => {
            if request.email.is_none() {
                return Err("Email is required for SUPER_ADMIN".to_string());
            }
            if request.employee_id.is_some() {
                return Err("employeeId is not allowed for SUPER_ADMIN".to_string());
            }
        }
        Role::User => {
            if request.employee_id.is_none() {
                return Err("employeeId is required for USER".to_string());
            }
            if request.email.is_some() {
                return Err("Email is not allowed for USER".to_string());
            }
        }
    }

    Ok(())
}

/// Validate UUID format
pub fn validate_uuid(uuid_str: &str) -> Result<(), ApiContractError> {
    uuid::Uuid::parse_str(uuid_str)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_request(role: Role, email: Option<&str>, employee_id: Option<&str>) -> CreateUserRequest {
        CreateUserRequest {
            name: "Jane Admin".to_string(),
            role,
            email: email.map(str::to_string),
            employee_id: employee_id.map(str::to_string),
            password: "hunter2hunter2".to_string(),
        }
    }

    #[test]
    fn normalization_is_idempotent() {
        assert_eq!(normalize_email("  Admin@LNU.local "), "admin@lnu.local");
        assert_eq!(normalize_employee_id(" fac-0001 "), "FAC-0001");
        assert_eq!(
            normalize_employee_id(&normalize_employee_id("fac-0001")),
            "FAC-0001"
        );
    }

    #[test]
    fn super_admin_requires_email() {
        let request = user_request(Role::SuperAdmin, None, None);
        assert_eq!(
            validate_create_user_request(&request).unwrap_err(),
            "Email is required for SUPER_ADMIN"
        );

        let request = user_request(Role::SuperAdmin, Some("admin@lnu.local"), Some("FAC-1"));
        assert_eq!(
            validate_create_user_request(&request).unwrap_err(),
            "employeeId is not allowed for SUPER_ADMIN"
        );

        let request = user_request(Role::SuperAdmin, Some("admin@lnu.local"), None);
        assert!(validate_create_user_request(&request).is_ok());
    }

    #[test]
    fn faculty_account_requires_employee_id() {
        let request = user_request(Role::User, None, None);
        assert_eq!(
            validate_create_user_request(&request).unwrap_err(),
            "employeeId is required for USER"
        );

        let request = user_request(Role::User, Some("x@y.z"), Some("FAC-0001"));
        assert_eq!(
            validate_create_user_request(&request).unwrap_err(),
            "Email is not allowed for USER"
        );

        let request = user_request(Role::User, None, Some("FAC-0001"));
        assert!(validate_create_user_request(&request).is_ok());
    }

    #[test]
    fn uuid_validation() {
        assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_uuid("not-a-uuid").is_err());
    }
}
