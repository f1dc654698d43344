//! `/clients` handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;

use crate::dto::{ClientRequest, ClientResponse};
use crate::error::ApiResult;
use crate::services::catalog;
use crate::AppState;

pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<ClientResponse>>> {
    Ok(Json(catalog::list_clients(&state.db).await?))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ClientResponse>> {
    Ok(Json(catalog::get_client(&state.db, &id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<ClientRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(req) = payload?;
    let created = catalog::create_client(&state.db, req).await?;
    let location = format!("/clients/{}", created.client_id);

    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(created)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ClientRequest>, JsonRejection>,
) -> ApiResult<Json<ClientResponse>> {
    let Json(req) = payload?;
    Ok(Json(catalog::update_client(&state.db, &id, req).await?))
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<StatusCode> {
    catalog::delete_client(&state.db, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
