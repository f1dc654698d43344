//! # HTTP Routes
//!
//! | Path                              | Public     | Bearer token required      |
//! |-----------------------------------|------------|----------------------------|
//! | `/health`                         | GET        |                            |
//! | `/invoices`                       | GET        | POST                       |
//! | `/invoices/{id}`                  |            | GET, PUT, DELETE           |
//! | `/types`                          | GET        | POST                       |
//! | `/types/GetTypesByCompanyName`    | GET        |                            |
//! | `/types/{id}`                     |            | GET, PUT, DELETE           |
//! | `/companies`, `/clients`, `/items`| GET        | POST                       |
//! | `/companies/{id}` (and the others)|            | GET, PUT, DELETE           |

pub mod clients;
pub mod companies;
pub mod health;
pub mod invoices;
pub mod items;
pub mod types;

use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::auth::require_auth;
use crate::AppState;

/// Builds the application router over the given state.
pub fn router(state: AppState) -> Router {
    let public = Router::new()
        .route("/health", get(health::health))
        .route("/invoices", get(invoices::list))
        .route("/types", get(types::list))
        .route("/types/GetTypesByCompanyName", get(types::by_company_name))
        .route("/companies", get(companies::list))
        .route("/clients", get(clients::list))
        .route("/items", get(items::list));

    let protected = Router::new()
        .route("/invoices", post(invoices::create))
        .route(
            "/invoices/{id}",
            get(invoices::get).put(invoices::update).delete(invoices::delete),
        )
        .route("/types", post(types::create))
        .route(
            "/types/{id}",
            get(types::get).put(types::update).delete(types::delete),
        )
        .route("/companies", post(companies::create))
        .route(
            "/companies/{id}",
            get(companies::get).put(companies::update).delete(companies::delete),
        )
        .route("/clients", post(clients::create))
        .route(
            "/clients/{id}",
            get(clients::get).put(clients::update).delete(clients::delete),
        )
        .route("/items", post(items::create))
        .route(
            "/items/{id}",
            get(items::get).put(items::update).delete(items::delete),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    public
        .merge(protected)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}
