//! Equipment endpoints: CRUD, filtered listing, summary buckets, timeline

use crate::error::{db_entity, ServerError};
use crate::mapping;
use crate::state::AppState;
use crate::ServerResult;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use et_api_contract::{
    ApiEnvelope, CreateEquipmentRequest, Equipment, EquipmentFilterQuery, EquipmentStatus,
    EquipmentSummary, TimelineEvent, TimelineEventType, TimelineQuery, TimelineRange,
    UpdateEquipmentRequest,
};
use et_local_db::records::{EquipmentDetail, EquipmentUpdate};
use validator::Validate;

pub async fn create_equipment(
    State(state): State<AppState>,
    Json(payload): Json<CreateEquipmentRequest>,
) -> ServerResult<(StatusCode, Json<ApiEnvelope<Equipment>>)> {
    payload.validate()?;

    if state.db().category_by_id(payload.category_id)?.is_none() {
        return Err(ServerError::BadRequest(format!(
            "Category with ID {} does not exist",
            payload.category_id
        )));
    }
    if state.db().faculty_by_id(&payload.faculty_id)?.is_none() {
        return Err(ServerError::BadRequest(format!(
            "Faculty with ID {} does not exist",
            payload.faculty_id
        )));
    }

    let record = state
        .db()
        .insert_equipment(
            &payload.serial_number,
            &payload.name,
            payload.category_id,
            &payload.faculty_id,
            payload.date_purchased,
        )
        .map_err(db_entity("equipment"))?;
    tracing::info!(equipment_id = record.id, "equipment registered");

    let detail = state
        .db()
        .equipment_detail(record.id)?
        .ok_or_else(|| ServerError::not_found("Equipment", record.id))?;
    Ok((
        StatusCode::CREATED,
        Json(ApiEnvelope::ok(mapping::equipment(detail))),
    ))
}

pub async fn list_equipment(
    State(state): State<AppState>,
    Query(query): Query<EquipmentFilterQuery>,
) -> ServerResult<Json<ApiEnvelope<Vec<Equipment>>>> {
    // An empty categoryId= means "no filter", not a malformed number.
    let category_id = match query.category_id.as_deref() {
        None | Some("") => None,
        Some(raw) => Some(raw.parse::<i64>().map_err(|_| {
            ServerError::BadRequest("categoryId must be a valid number".to_string())
        })?),
    };
    let search = query.search.as_deref().map(str::to_lowercase);
    let status = query.status.as_deref().map(str::to_uppercase);

    let items = state
        .db()
        .list_equipment_detailed()?
        .into_iter()
        .filter(|detail| {
            category_id.map_or(true, |id| detail.equipment.category_id == id)
        })
        .filter(|detail| {
            search.as_deref().map_or(true, |needle| {
                detail.equipment.name.to_lowercase().contains(needle)
                    || detail.equipment.serial_number.to_lowercase().contains(needle)
            })
        })
        .filter(|detail| {
            status.as_deref().map_or(true, |wanted| {
                detail
                    .current_status
                    .as_ref()
                    .is_some_and(|entry| entry.status.to_uppercase() == wanted)
            })
        })
        .map(mapping::equipment)
        .collect();

    Ok(Json(ApiEnvelope::ok(items)))
}

/// Bucket all equipment by its current status.
pub(crate) fn summarize(details: &[EquipmentDetail]) -> EquipmentSummary {
    let mut summary = EquipmentSummary {
        total_equipment: details.len() as u32,
        ..Default::default()
    };

    for detail in details {
        let bucket = detail
            .current_status
            .as_ref()
            .and_then(|entry| EquipmentStatus::parse_lenient(&entry.status));
        match bucket {
            Some(EquipmentStatus::Assigned) => summary.assigned_count += 1,
            Some(EquipmentStatus::Available) => summary.available_count += 1,
            Some(EquipmentStatus::Maintenance) => summary.maintenance_count += 1,
            Some(EquipmentStatus::Defective) => summary.defective_count += 1,
            None => summary.uncategorized_count += 1,
        }
    }

    summary.active_equipment = summary.assigned_count + summary.available_count;
    summary
}

pub async fn summary(
    State(state): State<AppState>,
) -> ServerResult<Json<ApiEnvelope<EquipmentSummary>>> {
    let details = state.db().list_equipment_detailed()?;
    Ok(Json(ApiEnvelope::ok(summarize(&details))))
}

pub async fn get_equipment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ServerResult<Json<ApiEnvelope<Equipment>>> {
    let detail = state
        .db()
        .equipment_detail(id)?
        .ok_or_else(|| ServerError::not_found("Equipment", id))?;
    Ok(Json(ApiEnvelope::ok(mapping::equipment(detail))))
}

pub async fn update_equipment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateEquipmentRequest>,
) -> ServerResult<Json<ApiEnvelope<Equipment>>> {
    payload.validate()?;
    if !state.db().equipment_exists(id)? {
        return Err(ServerError::not_found("Equipment", id));
    }

    if let Some(category_id) = payload.category_id {
        if state.db().category_by_id(category_id)?.is_none() {
            return Err(ServerError::BadRequest(format!(
                "Category with ID {category_id} does not exist"
            )));
        }
    }
    if let Some(faculty_id) = payload.faculty_id.as_deref() {
        if state.db().faculty_by_id(faculty_id)?.is_none() {
            return Err(ServerError::BadRequest(format!(
                "Faculty with ID {faculty_id} does not exist"
            )));
        }
    }

    let update = EquipmentUpdate {
        serial_number: payload.serial_number,
        name: payload.name,
        category_id: payload.category_id,
        faculty_id: payload.faculty_id,
        date_purchased: payload.date_purchased,
    };
    state.db().update_equipment(id, &update).map_err(db_entity("equipment"))?;

    let detail = state
        .db()
        .equipment_detail(id)?
        .ok_or_else(|| ServerError::not_found("Equipment", id))?;
    Ok(Json(ApiEnvelope::ok(mapping::equipment(detail))))
}

pub async fn delete_equipment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ServerResult<Json<ApiEnvelope<Equipment>>> {
    let detail = state
        .db()
        .equipment_detail(id)?
        .ok_or_else(|| ServerError::not_found("Equipment", id))?;

    state.db().delete_equipment(id).map_err(db_entity("equipment"))?;
    tracing::info!(equipment_id = id, "equipment deleted");
    Ok(Json(ApiEnvelope::ok(mapping::equipment(detail))))
}

pub async fn timeline(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<TimelineQuery>,
) -> ServerResult<Json<ApiEnvelope<Vec<TimelineEvent>>>> {
    let equipment = state
        .db()
        .equipment_by_id(id)?
        .ok_or_else(|| ServerError::not_found("Equipment", id))?;

    let range = match query.range.as_deref() {
        Some(raw) => raw.parse::<TimelineRange>().map_err(|_| {
            ServerError::BadRequest("range must be one of 24h, 7d, 30d".to_string())
        })?,
        None => TimelineRange::default(),
    };
    let cutoff = Utc::now() - range.window();

    let mut events = Vec::new();

    for event in state.db().status_history_for_equipment(id)? {
        if event.entry.changed_at < cutoff {
            continue;
        }
        let event_type = classify_status_event(&event.entry.status, event.entry.notes.as_deref());
        events.push(TimelineEvent {
            id: format!("status-{}", event.entry.id),
            event_type,
            description: format!(
                "Status updated to {} for {} ({})",
                event.entry.status, equipment.name, equipment.serial_number
            ),
            created_at: event.entry.changed_at,
        });
    }

    for event in state.db().location_history_for_equipment(id)? {
        if event.entry.assigned_at < cutoff {
            continue;
        }
        events.push(TimelineEvent {
            id: format!("location-{}", event.entry.id),
            event_type: TimelineEventType::Location,
            description: format!(
                "{} ({}) assigned to {}",
                equipment.name, equipment.serial_number, event.room.name
            ),
            created_at: event.entry.assigned_at,
        });
    }

    events.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(Json(ApiEnvelope::ok(events)))
}

fn classify_status_event(status: &str, notes: Option<&str>) -> TimelineEventType {
    match EquipmentStatus::parse_lenient(status) {
        Some(EquipmentStatus::Maintenance) | Some(EquipmentStatus::Defective) => {
            TimelineEventType::Maintenance
        }
        _ => {
            if notes.is_some_and(|notes| notes.to_lowercase().contains("faculty")) {
                TimelineEventType::Faculty
            } else {
                TimelineEventType::Status
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use et_local_db::records::{
        CategoryRecord, EquipmentRecord, FacultyRecord, StatusHistoryRecord,
    };

    fn detail(status: Option<&str>) -> EquipmentDetail {
        let now = Utc::now();
        EquipmentDetail {
            equipment: EquipmentRecord {
                id: 1,
                serial_number: "PC-001".into(),
                name: "Dell Optiplex".into(),
                category_id: 1,
                faculty_id: "f-1".into(),
                date_purchased: now,
                created_at: now,
            },
            category: CategoryRecord {
                id: 1,
                name: "Computer".into(),
                description: None,
            },
            faculty: FacultyRecord {
                id: "f-1".into(),
                name: "Dr. Santos".into(),
                employee_id: "FAC-0001".into(),
                password_hash: "$hash".into(),
                status: "ACTIVE".into(),
                created_at: now,
                updated_at: now,
            },
            current_status: status.map(|status| StatusHistoryRecord {
                id: 1,
                equipment_id: 1,
                status: status.into(),
                changed_by_id: None,
                notes: None,
                changed_at: now,
            }),
            current_room: None,
        }
    }

    #[test]
    fn summary_buckets_by_uppercased_status() {
        let details = vec![
            detail(Some("assigned")),
            detail(Some("AVAILABLE")),
            detail(Some("Maintenance")),
            detail(Some("DEFECTIVE")),
            detail(Some("retired")),
            detail(None),
        ];
        let summary = summarize(&details);
        assert_eq!(summary.total_equipment, 6);
        assert_eq!(summary.assigned_count, 1);
        assert_eq!(summary.available_count, 1);
        assert_eq!(summary.maintenance_count, 1);
        assert_eq!(summary.defective_count, 1);
        assert_eq!(summary.uncategorized_count, 2);
        assert_eq!(summary.active_equipment, 2);
    }

    #[test]
    fn status_events_classify_by_status_then_notes() {
        assert_eq!(
            classify_status_event("MAINTENANCE", None),
            TimelineEventType::Maintenance
        );
        assert_eq!(
            classify_status_event("defective", Some("screen cracked")),
            TimelineEventType::Maintenance
        );
        assert_eq!(
            classify_status_event("ASSIGNED", Some("Reassigned to faculty Dr. Cruz")),
            TimelineEventType::Faculty
        );
        assert_eq!(
            classify_status_event("AVAILABLE", None),
            TimelineEventType::Status
        );
    }
}
