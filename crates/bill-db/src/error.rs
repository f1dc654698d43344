//! # Database Error Types
//!
//! What can go wrong between a unit of work and the SQLite file.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  sqlx::Error ──► classify_constraint(message)                           │
//! │       │              UNIQUE  → UniqueViolation   (companies.name)       │
//! │       │              FOREIGN → ForeignKeyViolation (still referenced)   │
//! │       │              CHECK   → CheckViolation    (cents, qty, bps)      │
//! │       ▼                                                                 │
//! │  DbError ──► ApiError: constraint kinds → 400, the rest → 500           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Database operation errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// An update or delete by id matched no row.
    ///
    /// `entity` is the row kind (`"Invoice"`, `"Type"`, ...).
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// A UNIQUE index rejected the write.
    ///
    /// Only `companies.name` is unique in this schema; the company
    /// repository fills in the offending name.
    #[error("Duplicate {field}: '{value}' already exists")]
    UniqueViolation { field: String, value: String },

    /// A row is still referenced, or a reference points nowhere.
    ///
    /// ## When This Occurs
    /// - Deleting a client that invoices still bill
    /// - Deleting an invoice before its lines
    /// - Writing an invoice for a client id that does not exist
    #[error("Foreign key violation: {message}")]
    ForeignKeyViolation { message: String },

    /// A CHECK constraint rejected a value.
    ///
    /// Negative prices, non-positive quantities and discounts outside
    /// 0..=10000 bps; validation normally stops these first.
    #[error("Check constraint failed: {column}")]
    CheckViolation { column: String },

    /// The SQLite file could not be opened, or the pool was closed.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// The embedded `migrations/sqlite` set did not apply, e.g. a file
    /// already carrying a different schema version.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// SQL that SQLite refused for another reason.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// BEGIN, COMMIT or ROLLBACK of a unit of work failed.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// Every pooled connection is held by an open unit of work.
    ///
    /// In-memory databases have exactly one, so a second concurrent unit of
    /// work waits here until the acquire timeout.
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Anything sqlx reports that has no better bucket (decode errors, I/O).
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    pub fn duplicate(field: impl Into<String>, value: impl Into<String>) -> Self {
        DbError::UniqueViolation {
            field: field.into(),
            value: value.into(),
        }
    }

    /// True for the kinds caused by request data rather than the database.
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            DbError::UniqueViolation { .. }
                | DbError::ForeignKeyViolation { .. }
                | DbError::CheckViolation { .. }
        )
    }
}

/// Maps an SQLite error message to a constraint kind.
///
/// ```text
/// "UNIQUE constraint failed: companies.name"        → UniqueViolation
/// "FOREIGN KEY constraint failed"                   → ForeignKeyViolation
/// "CHECK constraint failed: quantity > 0"           → CheckViolation
/// anything else                                     → QueryFailed
/// ```
pub(crate) fn classify_constraint(msg: &str) -> DbError {
    if let Some(field) = msg.strip_prefix("UNIQUE constraint failed: ") {
        DbError::UniqueViolation {
            field: field.to_string(),
            value: "unknown".to_string(),
        }
    } else if msg.starts_with("FOREIGN KEY constraint failed") {
        DbError::ForeignKeyViolation {
            message: msg.to_string(),
        }
    } else if let Some(expr) = msg.strip_prefix("CHECK constraint failed: ") {
        // SQLite reports the expression; its first word is the column.
        let column = expr.split_whitespace().next().unwrap_or(expr);
        DbError::CheckViolation {
            column: column.to_string(),
        }
    } else {
        DbError::QueryFailed(msg.to_string())
    }
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::not_found("Row", "unknown"),
            sqlx::Error::Database(db_err) => classify_constraint(db_err.message()),
            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,
            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),
            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_helpers() {
        let err = DbError::not_found("Invoice", "abc");
        assert_eq!(err.to_string(), "Invoice not found: abc");

        let err = DbError::duplicate("companies.name", "Acme");
        assert_eq!(err.to_string(), "Duplicate companies.name: 'Acme' already exists");
    }

    #[test]
    fn test_classify_sqlite_messages() {
        match classify_constraint("UNIQUE constraint failed: companies.name") {
            DbError::UniqueViolation { field, .. } => assert_eq!(field, "companies.name"),
            other => panic!("unexpected: {other:?}"),
        }

        let err = classify_constraint("FOREIGN KEY constraint failed");
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));

        match classify_constraint("CHECK constraint failed: quantity > 0") {
            DbError::CheckViolation { column } => assert_eq!(column, "quantity"),
            other => panic!("unexpected: {other:?}"),
        }

        let err = classify_constraint("no such table: invoices");
        assert!(matches!(err, DbError::QueryFailed(_)));
        assert!(!err.is_constraint_violation());
    }

    #[test]
    fn test_pool_errors() {
        let err: DbError = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(err, DbError::PoolExhausted));

        let err: DbError = sqlx::Error::PoolClosed.into();
        assert!(matches!(err, DbError::ConnectionFailed(_)));
    }
}
