//! `/companies` handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;

use crate::dto::{CompanyRequest, CompanyResponse};
use crate::error::ApiResult;
use crate::services::catalog;
use crate::AppState;

pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<CompanyResponse>>> {
    Ok(Json(catalog::list_companies(&state.db).await?))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<CompanyResponse>> {
    Ok(Json(catalog::get_company(&state.db, &id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CompanyRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(req) = payload?;
    let created = catalog::create_company(&state.db, req).await?;
    let location = format!("/companies/{}", created.company_id);

    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(created)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<CompanyRequest>, JsonRejection>,
) -> ApiResult<Json<CompanyResponse>> {
    let Json(req) = payload?;
    Ok(Json(catalog::update_company(&state.db, &id, req).await?))
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<StatusCode> {
    catalog::delete_company(&state.db, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
