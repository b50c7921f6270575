//! API contract types for the EquipTrack REST service

use crate::error::ApiContractError;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Standard success envelope used by all resource endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiEnvelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Account roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "SUPER_ADMIN")]
    SuperAdmin,
    #[serde(rename = "USER")]
    User,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::SuperAdmin => "SUPER_ADMIN",
            Role::User => "USER",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = ApiContractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SUPER_ADMIN" => Ok(Role::SuperAdmin),
            "USER" => Ok(Role::User),
            other => Err(ApiContractError::InvalidRole(other.to_string())),
        }
    }
}

/// Recognized equipment status buckets
///
/// Status history rows store whatever string the client sent; this enum is
/// only used for filter parsing and summary bucketing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EquipmentStatus {
    Assigned,
    Available,
    Maintenance,
    Defective,
}

impl EquipmentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            EquipmentStatus::Assigned => "ASSIGNED",
            EquipmentStatus::Available => "AVAILABLE",
            EquipmentStatus::Maintenance => "MAINTENANCE",
            EquipmentStatus::Defective => "DEFECTIVE",
        }
    }

    /// Case-insensitive parse; unknown strings are not an error, they simply
    /// fall outside every bucket.
    pub fn parse_lenient(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "ASSIGNED" => Some(EquipmentStatus::Assigned),
            "AVAILABLE" => Some(EquipmentStatus::Available),
            "MAINTENANCE" => Some(EquipmentStatus::Maintenance),
            "DEFECTIVE" => Some(EquipmentStatus::Defective),
            _ => None,
        }
    }
}

/// Password reset request lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ResetStatus {
    Pending,
    Completed,
}

impl ResetStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ResetStatus::Pending => "PENDING",
            ResetStatus::Completed => "COMPLETED",
        }
    }
}

impl std::str::FromStr for ResetStatus {
    type Err = ApiContractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(ResetStatus::Pending),
            "COMPLETED" => Ok(ResetStatus::Completed),
            other => Err(ApiContractError::InvalidResetStatus(other.to_string())),
        }
    }
}

/// Time window for the equipment timeline endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimelineRange {
    #[default]
    #[serde(rename = "24h")]
    Day,
    #[serde(rename = "7d")]
    Week,
    #[serde(rename = "30d")]
    Month,
}

impl TimelineRange {
    pub fn window(self) -> Duration {
        match self {
            TimelineRange::Day => Duration::hours(24),
            TimelineRange::Week => Duration::days(7),
            TimelineRange::Month => Duration::days(30),
        }
    }
}

impl std::str::FromStr for TimelineRange {
    type Err = ApiContractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "24h" => Ok(TimelineRange::Day),
            "7d" => Ok(TimelineRange::Week),
            "30d" => Ok(TimelineRange::Month),
            other => Err(ApiContractError::InvalidTimelineRange(other.to_string())),
        }
    }
}

/// Kinds of events surfaced on an equipment timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TimelineEventType {
    Status,
    Maintenance,
    Location,
    Faculty,
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

/// Admin login request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AdminLoginRequest {
    #[validate(email, length(min = 5, max = 150))]
    pub email: String,
    #[validate(length(min = 8, max = 72))]
    pub password: String,
}

/// Faculty login request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FacultyLoginRequest {
    #[validate(length(min = 3, max = 50))]
    pub employee_id: String,
    #[validate(length(min = 8, max = 72))]
    pub password: String,
}

/// Authenticated principal, as returned by login and `/auth/me`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub id: String,
    pub name: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Login response; returned bare, without the success envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub user: AuthUser,
}

// ---------------------------------------------------------------------------
// Categories and rooms
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCategoryRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: String,
    #[validate(length(max = 255))]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateCategoryRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: Option<String>,
    #[validate(length(max = 255))]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub building: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floor: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateRoomRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: String,
    #[validate(length(max = 100))]
    pub building: Option<String>,
    #[validate(length(max = 50))]
    pub floor: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateRoomRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: Option<String>,
    #[validate(length(max = 100))]
    pub building: Option<String>,
    #[validate(length(max = 50))]
    pub floor: Option<String>,
}

// ---------------------------------------------------------------------------
// Faculty
// ---------------------------------------------------------------------------

/// Faculty account; the password hash is never serialized
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Faculty {
    pub id: String,
    pub name: String,
    pub employee_id: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateFacultyRequest {
    #[validate(length(min = 2, max = 120))]
    pub name: String,
    #[validate(length(min = 3, max = 50))]
    pub employee_id: String,
    #[validate(length(min = 8, max = 72))]
    pub password: String,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFacultyRequest {
    #[validate(length(min = 2, max = 120))]
    pub name: Option<String>,
    #[validate(length(min = 3, max = 50))]
    pub employee_id: Option<String>,
    #[validate(length(min = 8, max = 72))]
    pub password: Option<String>,
    pub status: Option<String>,
}

// ---------------------------------------------------------------------------
// Equipment
// ---------------------------------------------------------------------------

/// Latest status entry attached to an equipment record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentStatus {
    pub id: i64,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub changed_at: DateTime<Utc>,
}

/// Equipment record with its relations resolved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    pub id: i64,
    pub serial_number: String,
    pub name: String,
    pub category_id: i64,
    pub faculty_id: String,
    pub date_purchased: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub category: Category,
    pub faculty: Faculty,
    pub current_status: Option<CurrentStatus>,
    pub current_room: Option<Room>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEquipmentRequest {
    #[validate(length(min = 2, max = 150))]
    pub serial_number: String,
    #[validate(length(min = 2, max = 150))]
    pub name: String,
    #[validate(range(min = 1))]
    pub category_id: i64,
    #[validate(length(min = 1))]
    pub faculty_id: String,
    pub date_purchased: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEquipmentRequest {
    #[validate(length(min = 2, max = 150))]
    pub serial_number: Option<String>,
    #[validate(length(min = 2, max = 150))]
    pub name: Option<String>,
    #[validate(range(min = 1))]
    pub category_id: Option<i64>,
    #[validate(length(min = 1))]
    pub faculty_id: Option<String>,
    pub date_purchased: Option<DateTime<Utc>>,
}

/// Query parameters for equipment listing
///
/// `category_id` stays a string here so the handler can reject garbage with
/// the same message the dashboard expects.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentFilterQuery {
    pub search: Option<String>,
    pub status: Option<String>,
    pub category_id: Option<String>,
}

/// Equipment counts bucketed by current status
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentSummary {
    pub total_equipment: u32,
    pub active_equipment: u32,
    pub maintenance_count: u32,
    pub defective_count: u32,
    pub assigned_count: u32,
    pub available_count: u32,
    pub uncategorized_count: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TimelineQuery {
    pub range: Option<String>,
}

/// One event on an equipment timeline, merged from both history tables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEvent {
    pub id: String,
    #[serde(rename = "type")]
    pub event_type: TimelineEventType,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// Recent-activity feed entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

/// Acting user attached to history entries, without the password hash
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateStatusHistoryRequest {
    #[validate(range(min = 1))]
    pub equipment_id: i64,
    #[validate(length(min = 1, max = 100))]
    pub status: String,
    #[validate(length(min = 1))]
    pub changed_by_id: Option<String>,
    #[validate(length(max = 255))]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusHistoryEntry {
    pub id: i64,
    pub equipment_id: i64,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub changed_at: DateTime<Utc>,
    pub changed_by: Option<UserSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateLocationHistoryRequest {
    #[validate(range(min = 1))]
    pub equipment_id: i64,
    #[validate(range(min = 1))]
    pub room_id: i64,
    #[validate(length(min = 1))]
    pub assigned_by_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationHistoryEntry {
    pub id: i64,
    pub equipment_id: i64,
    pub room: Room,
    pub assigned_at: DateTime<Utc>,
    pub assigned_by: Option<UserSummary>,
}

// ---------------------------------------------------------------------------
// Password reset requests
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePasswordRequestRequest {
    #[validate(length(min = 3, max = 50))]
    pub employee_id: String,
}

/// Deliberately vague acknowledgement; never discloses whether the account exists
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PasswordRequestAck {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ResolvePasswordRequestRequest {
    #[validate(length(min = 8, max = 72))]
    pub new_password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacultySummary {
    pub id: String,
    pub name: String,
    pub employee_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminSummary {
    pub id: String,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordResetRequest {
    pub id: String,
    pub status: ResetStatus,
    pub requested_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<DateTime<Utc>>,
    pub faculty: FacultySummary,
    pub resolved_by_admin: Option<AdminSummary>,
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Account creation request; `role` decides which table the account lands in
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[validate(length(min = 2, max = 120))]
    pub name: String,
    pub role: Role,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 3, max = 50))]
    pub employee_id: Option<String>,
    #[validate(length(min = 8, max = 72))]
    pub password: String,
}

/// Result of account creation, tagged with the account kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedAccount {
    pub account_type: Role,
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Dashboard, health
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_equipment: u32,
    pub active_equipment: u32,
    pub maintenance_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub uptime: u64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DbTestReport {
    pub message: String,
    pub count: usize,
    pub categories: Vec<Category>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_serializes_success_flag() {
        let body = serde_json::to_value(ApiEnvelope::ok(vec![1, 2, 3])).unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["data"], serde_json::json!([1, 2, 3]));
    }

    #[test]
    fn equipment_status_parses_leniently() {
        assert_eq!(
            EquipmentStatus::parse_lenient("maintenance"),
            Some(EquipmentStatus::Maintenance)
        );
        assert_eq!(
            EquipmentStatus::parse_lenient("  Assigned "),
            Some(EquipmentStatus::Assigned)
        );
        assert_eq!(EquipmentStatus::parse_lenient("retired"), None);
    }

    #[test]
    fn timeline_range_round_trips() {
        assert_eq!("24h".parse::<TimelineRange>().unwrap(), TimelineRange::Day);
        assert_eq!("7d".parse::<TimelineRange>().unwrap(), TimelineRange::Week);
        assert_eq!("30d".parse::<TimelineRange>().unwrap(), TimelineRange::Month);
        assert!("90d".parse::<TimelineRange>().is_err());
    }

    #[test]
    fn timeline_event_uses_type_key() {
        let event = TimelineEvent {
            id: "status-1".into(),
            event_type: TimelineEventType::Maintenance,
            description: "Status updated to MAINTENANCE for Dell Optiplex (PC-001)".into(),
            created_at: Utc::now(),
        };
        let body = serde_json::to_value(&event).unwrap();
        assert_eq!(body["type"], "MAINTENANCE");
        assert_eq!(body["id"], "status-1");
    }

    #[test]
    fn faculty_never_exposes_password_fields() {
        let faculty = Faculty {
            id: "f-1".into(),
            name: "Dr. Santos".into(),
            employee_id: "FAC-0001".into(),
            status: "ACTIVE".into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let body = serde_json::to_string(&faculty).unwrap();
        assert!(!body.contains("password"));
        assert!(body.contains("employeeId"));
    }
}
