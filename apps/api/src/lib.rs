//! # Bill API
//!
//! HTTP/JSON back-office for invoices, product types and their reference
//! data.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                            Bill API                                     │
//! │                                                                         │
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────────────────┐│
//! │  │  routes/       │  │  services/     │  │  bill-db                   ││
//! │  │                │  │                │  │                            ││
//! │  │ • invoices     │─►│ • invoices     │─►│ • UnitOfWork               ││
//! │  │ • types        │  │ • types        │  │ • Repository<T>            ││
//! │  │ • companies    │  │ • catalog      │  │ • SQLite (WAL)             ││
//! │  │ • clients      │  │                │  │                            ││
//! │  │ • items        │  └────────────────┘  └────────────────────────────┘│
//! │  │ • health       │                                                     │
//! │  └────────────────┘        auth.rs: bearer JWT on non-public routes    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables:
//! - `BILL_HTTP_PORT` - HTTP listen port (default: 8080)
//! - `BILL_DB_PATH` - SQLite database file (default: ./bill.db)
//! - `BILL_DB_MAX_CONNECTIONS` - Pool size (default: 5)
//! - `JWT_SECRET` - Secret for JWT signing
//! - `JWT_ACCESS_LIFETIME_SECS` - Access token lifetime (default: 3600)

pub mod auth;
pub mod config;
pub mod dto;
pub mod error;
pub mod routes;
pub mod services;

use std::sync::Arc;

use bill_db::Database;

// Re-exports
pub use auth::JwtManager;
pub use config::ApiConfig;
pub use error::{ApiError, ApiResult, ErrorCode};
pub use routes::router;

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
    pub jwt: JwtManager,
    pub config: Arc<ApiConfig>,
}

impl AppState {
    /// Builds the state, deriving the token manager from the configuration.
    pub fn new(db: Database, config: ApiConfig) -> Self {
        let jwt = JwtManager::new(config.jwt_secret.clone(), config.jwt_access_lifetime_secs);

        AppState {
            db,
            jwt,
            config: Arc::new(config),
        }
    }
}
