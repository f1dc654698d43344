//! # Error Types
//!
//! Domain-specific error types for bill-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  bill-core errors (this file)                                          │
//! │  ├── CoreError        - Lookups and business rule failures             │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  bill-db errors (separate crate)                                       │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  HTTP errors (in app)                                                  │
//! │  └── ApiError         - What the client sees (status + JSON body)      │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → HTTP response          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Not Found vs. Invalid Reference
//! The same missing row means different things depending on where its id
//! came from. An id in the URL path that does not resolve is a *not found*
//! (404). An id inside the request body that does not resolve (the client of
//! an invoice, the catalog item of a line) is an *invalid input* (400).

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Invoice addressed by the request path does not exist.
    #[error("Invoice with ID {0} not found")]
    InvoiceNotFound(String),

    /// Type addressed by the request path does not exist (or has no company).
    #[error("Type not found: {0}")]
    TypeNotFound(String),

    /// Company addressed by the request path does not exist.
    #[error("Company not found: {0}")]
    CompanyNotFound(String),

    /// Client addressed by the request path does not exist.
    #[error("Client not found: {0}")]
    ClientNotFound(String),

    /// Catalog item addressed by the request path does not exist.
    #[error("Item not found: {0}")]
    ItemNotFound(String),

    /// The client referenced by an invoice body does not exist.
    #[error("Invalid Client ID: {0}")]
    UnknownClient(String),

    /// A line item references a catalog item that does not exist.
    #[error("Item with ID {0} not found")]
    UnknownItem(String),

    /// A catalog item references a type that does not exist.
    #[error("Invalid Type ID: {0}")]
    UnknownType(String),

    /// No company carries the given name.
    ///
    /// ## When This Occurs
    /// Creating or updating a type under a company name that matches no
    /// company record exactly.
    #[error("Company Not Found: {0}")]
    UnknownCompany(String),

    /// A type with this name already exists under the company.
    #[error("Type name '{name}' already exists in company {company}")]
    DuplicateTypeName { name: String, company: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Returns true when the error names a missing resource addressed by path.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CoreError::InvoiceNotFound(_)
                | CoreError::TypeNotFound(_)
                | CoreError::CompanyNotFound(_)
                | CoreError::ClientNotFound(_)
                | CoreError::ItemNotFound(_)
        )
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// They are raised before anything is written.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be greater than zero")]
    MustBePositive { field: String },

    /// Invalid format (e.g., invalid UUID).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g., duplicate company name).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
