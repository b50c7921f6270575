//! Recent activity feed merged from both history tables

use crate::state::AppState;
use crate::ServerResult;
use axum::{extract::State, Json};
use et_api_contract::{Activity, ApiEnvelope};

const FEED_LIMIT: usize = 12;

pub async fn recent_activities(
    State(state): State<AppState>,
) -> ServerResult<Json<ApiEnvelope<Vec<Activity>>>> {
    let mut activities = Vec::new();

    for entry in state.db().recent_status_activity(FEED_LIMIT as u32)? {
        activities.push(Activity {
            id: format!("status-{}", entry.id),
            description: format!(
                "Status updated to {} for {} ({})",
                entry.status, entry.equipment_name, entry.serial_number
            ),
            created_at: entry.changed_at,
        });
    }

    for entry in state.db().recent_location_activity(FEED_LIMIT as u32)? {
        activities.push(Activity {
            id: format!("location-{}", entry.id),
            description: format!(
                "{} ({}) assigned to {}",
                entry.equipment_name, entry.serial_number, entry.room_name
            ),
            created_at: entry.assigned_at,
        });
    }

    activities.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    activities.truncate(FEED_LIMIT);

    Ok(Json(ApiEnvelope::ok(activities)))
}
