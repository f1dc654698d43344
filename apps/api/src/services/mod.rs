//! # Workflow Services
//!
//! Business workflows behind the HTTP handlers. Each public function runs
//! inside exactly one unit of work:
//!
//! ```text
//! handler ──► service fn
//!               │  validate request fields        (bill_core::validation)
//!               │  db.unit_of_work()              BEGIN
//!               │  resolve references             (404 / 400 on miss)
//!               │  write rows
//!               │  uow.complete()                 COMMIT
//!               ▼
//!             DTO
//! ```
//!
//! An error anywhere before `complete()` drops the unit of work, which rolls
//! back every write it made.

pub mod catalog;
pub mod invoices;
pub mod types;

use bill_core::validation::validate_uuid;

use crate::error::ApiResult;

/// Rejects path ids that are not UUIDs (400) before touching the database.
pub(crate) fn check_path_id(id: &str) -> ApiResult<()> {
    validate_uuid("id", id)?;
    Ok(())
}
