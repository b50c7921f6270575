//! Category CRUD endpoints

use crate::error::{db_entity, ServerError};
use crate::mapping;
use crate::state::AppState;
use crate::ServerResult;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use et_api_contract::{ApiEnvelope, Category, CreateCategoryRequest, UpdateCategoryRequest};
use validator::Validate;

pub async fn create_category(
    State(state): State<AppState>,
    Json(payload): Json<CreateCategoryRequest>,
) -> ServerResult<(StatusCode, Json<ApiEnvelope<Category>>)> {
    payload.validate()?;
    let record = state
        .db()
        .insert_category(&payload.name, payload.description.as_deref())
        .map_err(db_entity("category"))?;
    Ok((
        StatusCode::CREATED,
        Json(ApiEnvelope::ok(mapping::category(record))),
    ))
}

pub async fn list_categories(
    State(state): State<AppState>,
) -> ServerResult<Json<ApiEnvelope<Vec<Category>>>> {
    let categories =
        state.db().list_categories()?.into_iter().map(mapping::category).collect();
    Ok(Json(ApiEnvelope::ok(categories)))
}

pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ServerResult<Json<ApiEnvelope<Category>>> {
    let record = state
        .db()
        .category_by_id(id)?
        .ok_or_else(|| ServerError::not_found("Category", id))?;
    Ok(Json(ApiEnvelope::ok(mapping::category(record))))
}

pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateCategoryRequest>,
) -> ServerResult<Json<ApiEnvelope<Category>>> {
    payload.validate()?;
    state
        .db()
        .category_by_id(id)?
        .ok_or_else(|| ServerError::not_found("Category", id))?;

    state
        .db()
        .update_category(id, payload.name.as_deref(), payload.description.as_deref())
        .map_err(db_entity("category"))?;

    let record = state
        .db()
        .category_by_id(id)?
        .ok_or_else(|| ServerError::not_found("Category", id))?;
    Ok(Json(ApiEnvelope::ok(mapping::category(record))))
}

pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ServerResult<Json<ApiEnvelope<Category>>> {
    let record = state
        .db()
        .category_by_id(id)?
        .ok_or_else(|| ServerError::not_found("Category", id))?;

    state.db().delete_category(id).map_err(db_entity("category"))?;
    Ok(Json(ApiEnvelope::ok(mapping::category(record))))
}
