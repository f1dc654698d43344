//! `/items` handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;

use crate::dto::{ItemRequest, ItemResponse};
use crate::error::ApiResult;
use crate::services::catalog;
use crate::AppState;

pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<ItemResponse>>> {
    Ok(Json(catalog::list_items(&state.db).await?))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ItemResponse>> {
    Ok(Json(catalog::get_item(&state.db, &id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<ItemRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(req) = payload?;
    let created = catalog::create_item(&state.db, req).await?;
    let location = format!("/items/{}", created.item_id);

    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(created)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ItemRequest>, JsonRejection>,
) -> ApiResult<Json<ItemResponse>> {
    let Json(req) = payload?;
    Ok(Json(catalog::update_item(&state.db, &id, req).await?))
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<StatusCode> {
    catalog::delete_item(&state.db, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
