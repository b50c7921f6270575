//! Conversions from storage records to API contract types

use crate::error::{ServerError, ServerResult};
use et_api_contract::{
    AdminSummary, Category, CurrentStatus, Equipment, Faculty, FacultySummary,
    LocationHistoryEntry, PasswordResetRequest, Room, StatusHistoryEntry, User, UserSummary,
};
use et_local_db::records::{
    CategoryRecord, EquipmentDetail, FacultyRecord, LocationEvent, PasswordRequestDetail,
    RoomRecord, StatusEvent, UserRecord,
};

pub fn category(record: CategoryRecord) -> Category {
    Category {
        id: record.id,
        name: record.name,
        description: record.description,
    }
}

pub fn room(record: RoomRecord) -> Room {
    Room {
        id: record.id,
        name: record.name,
        building: record.building,
        floor: record.floor,
    }
}

/// The password hash stays behind in the record.
pub fn faculty(record: FacultyRecord) -> Faculty {
    Faculty {
        id: record.id,
        name: record.name,
        employee_id: record.employee_id,
        status: record.status,
        created_at: record.created_at,
        updated_at: record.updated_at,
    }
}

pub fn user(record: UserRecord) -> ServerResult<User> {
    let role = record
        .role
        .parse()
        .map_err(|_| ServerError::Internal(format!("unknown role in users table: {}", record.role)))?;
    Ok(User {
        id: record.id,
        name: record.name,
        email: record.email,
        role,
        created_at: record.created_at,
        updated_at: record.updated_at,
    })
}

pub fn user_summary(record: UserRecord) -> ServerResult<UserSummary> {
    let role = record
        .role
        .parse()
        .map_err(|_| ServerError::Internal(format!("unknown role in users table: {}", record.role)))?;
    Ok(UserSummary {
        id: record.id,
        name: record.name,
        email: record.email,
        role,
        created_at: record.created_at,
    })
}

pub fn equipment(detail: EquipmentDetail) -> Equipment {
    Equipment {
        id: detail.equipment.id,
        serial_number: detail.equipment.serial_number,
        name: detail.equipment.name,
        category_id: detail.equipment.category_id,
        faculty_id: detail.equipment.faculty_id,
        date_purchased: detail.equipment.date_purchased,
        created_at: detail.equipment.created_at,
        category: category(detail.category),
        faculty: faculty(detail.faculty),
        current_status: detail.current_status.map(|entry| CurrentStatus {
            id: entry.id,
            status: entry.status,
            notes: entry.notes,
            changed_at: entry.changed_at,
        }),
        current_room: detail.current_room.map(room),
    }
}

pub fn status_entry(event: StatusEvent) -> ServerResult<StatusHistoryEntry> {
    let changed_by = event.changed_by.map(user_summary).transpose()?;
    Ok(StatusHistoryEntry {
        id: event.entry.id,
        equipment_id: event.entry.equipment_id,
        status: event.entry.status,
        notes: event.entry.notes,
        changed_at: event.entry.changed_at,
        changed_by,
    })
}

pub fn location_entry(event: LocationEvent) -> ServerResult<LocationHistoryEntry> {
    let assigned_by = event.assigned_by.map(user_summary).transpose()?;
    Ok(LocationHistoryEntry {
        id: event.entry.id,
        equipment_id: event.entry.equipment_id,
        room: room(event.room),
        assigned_at: event.entry.assigned_at,
        assigned_by,
    })
}

pub fn password_request(detail: PasswordRequestDetail) -> ServerResult<PasswordResetRequest> {
    let status = detail
        .request
        .status
        .parse()
        .map_err(|_| {
            ServerError::Internal(format!(
                "unknown password request status: {}",
                detail.request.status
            ))
        })?;
    Ok(PasswordResetRequest {
        id: detail.request.id,
        status,
        requested_at: detail.request.requested_at,
        resolved_at: detail.request.resolved_at,
        faculty: FacultySummary {
            id: detail.request.faculty_id,
            name: detail.faculty_name,
            employee_id: detail.faculty_employee_id,
        },
        resolved_by_admin: detail.resolved_by_admin.map(|admin| AdminSummary {
            id: admin.id,
            name: admin.name,
            email: admin.email,
        }),
    })
}
