//! `/types` handlers.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;

use crate::dto::{CompanyNameQuery, TypeRequest, TypeResponse};
use crate::error::ApiResult;
use crate::services::types;
use crate::AppState;

pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<TypeResponse>>> {
    Ok(Json(types::list_types(&state.db).await?))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<TypeResponse>> {
    Ok(Json(types::get_type(&state.db, &id).await?))
}

/// `GET /types/GetTypesByCompanyName?companyName=…`
pub async fn by_company_name(
    State(state): State<AppState>,
    query: Result<Query<CompanyNameQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<TypeResponse>>> {
    let Query(query) = query?;
    let found = types::types_by_company_name(&state.db, query.company_name.as_deref()).await?;
    Ok(Json(found))
}

/// Responds 201 with a `Location` pointing at the new type.
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<TypeRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(req) = payload?;
    let created = types::create_type(&state.db, req).await?;
    let location = format!("/types/{}", created.type_id);

    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(created)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<TypeRequest>, JsonRejection>,
) -> ApiResult<Json<TypeResponse>> {
    let Json(req) = payload?;
    Ok(Json(types::update_type(&state.db, &id, req).await?))
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<StatusCode> {
    types::delete_type(&state.db, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
