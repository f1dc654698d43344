//! `/invoices` handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::dto::{InvoiceRequest, InvoiceResponse, InvoiceTotalsResponse};
use crate::error::ApiResult;
use crate::services::invoices;
use crate::AppState;

pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<InvoiceResponse>>> {
    Ok(Json(invoices::list_invoices(&state.db).await?))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<InvoiceResponse>> {
    Ok(Json(invoices::get_invoice(&state.db, &id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<InvoiceRequest>, JsonRejection>,
) -> ApiResult<Json<InvoiceTotalsResponse>> {
    let Json(req) = payload?;
    Ok(Json(invoices::create_invoice(&state.db, req).await?))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<InvoiceRequest>, JsonRejection>,
) -> ApiResult<Json<InvoiceTotalsResponse>> {
    let Json(req) = payload?;
    Ok(Json(invoices::update_invoice(&state.db, &id, req).await?))
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<StatusCode> {
    invoices::delete_invoice(&state.db, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
