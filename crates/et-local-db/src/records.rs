//! Record types mirroring the database schema
//!
//! These are storage-level rows; the REST server maps them onto the API
//! contract types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacultyRecord {
    pub id: String,
    pub name: String,
    pub employee_id: String,
    pub password_hash: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRecord {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomRecord {
    pub id: i64,
    pub name: String,
    pub building: Option<String>,
    pub floor: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentRecord {
    pub id: i64,
    pub serial_number: String,
    pub name: String,
    pub category_id: i64,
    pub faculty_id: String,
    pub date_purchased: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Equipment row with its relations resolved, as served by the list and
/// detail endpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct EquipmentDetail {
    pub equipment: EquipmentRecord,
    pub category: CategoryRecord,
    pub faculty: FacultyRecord,
    pub current_status: Option<StatusHistoryRecord>,
    pub current_room: Option<RoomRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusHistoryRecord {
    pub id: i64,
    pub equipment_id: i64,
    pub status: String,
    pub changed_by_id: Option<String>,
    pub notes: Option<String>,
    pub changed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationHistoryRecord {
    pub id: i64,
    pub equipment_id: i64,
    pub room_id: i64,
    pub assigned_by_id: Option<String>,
    pub assigned_at: DateTime<Utc>,
}

/// Status history entry joined with the acting user.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusEvent {
    pub entry: StatusHistoryRecord,
    pub changed_by: Option<UserRecord>,
}

/// Location history entry joined with its room and the acting user.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationEvent {
    pub entry: LocationHistoryRecord,
    pub room: RoomRecord,
    pub assigned_by: Option<UserRecord>,
}

/// Recent status change with just enough context for an activity feed line.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusActivity {
    pub id: i64,
    pub status: String,
    pub changed_at: DateTime<Utc>,
    pub equipment_name: String,
    pub serial_number: String,
}

/// Recent room assignment with context for an activity feed line.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationActivity {
    pub id: i64,
    pub assigned_at: DateTime<Utc>,
    pub equipment_name: String,
    pub serial_number: String,
    pub room_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PasswordRequestRecord {
    pub id: String,
    pub faculty_id: String,
    pub status: String,
    pub requested_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub resolved_by: Option<String>,
}

/// Password reset request joined with its faculty and resolving admin.
#[derive(Debug, Clone, PartialEq)]
pub struct PasswordRequestDetail {
    pub request: PasswordRequestRecord,
    pub faculty_name: String,
    pub faculty_employee_id: String,
    pub resolved_by_admin: Option<UserRecord>,
}

/// Field updates for a faculty row; `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct FacultyUpdate {
    pub name: Option<String>,
    pub employee_id: Option<String>,
    pub password_hash: Option<String>,
    pub status: Option<String>,
}

/// Field updates for an equipment row.
#[derive(Debug, Clone, Default)]
pub struct EquipmentUpdate {
    pub serial_number: Option<String>,
    pub name: Option<String>,
    pub category_id: Option<i64>,
    pub faculty_id: Option<String>,
    pub date_purchased: Option<DateTime<Utc>>,
}
