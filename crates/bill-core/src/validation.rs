//! # Validation Module
//!
//! Input validation utilities for the invoicing workflows.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP extractors (axum + serde)                               │
//! │  └── Type validation (deserialization)                                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Workflow services                                            │
//! │  ├── THIS MODULE: field rules (date present, quantity > 0, ...)        │
//! │  └── Reference lookups (client, item, company exist)                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / CHECK constraints                                      │
//! │  ├── UNIQUE constraints                                                │
//! │  └── Foreign key constraints                                           │
//! │                                                                         │
//! │  Everything in layers 1-2 runs before the first write.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::money::DiscountRate;
use crate::{MAX_NAME_LEN, MAX_NOTES_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a display name and returns it trimmed.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most [`MAX_NAME_LEN`] characters
///
/// ## Example
/// ```rust
/// use bill_core::validation::validate_name;
///
/// assert_eq!(validate_name("companyName", "  Acme ").unwrap(), "Acme");
/// assert!(validate_name("companyName", "   ").is_err());
/// ```
pub fn validate_name(field: &str, name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(name.to_string())
}

/// Validates optional free-text notes.
pub fn validate_notes(notes: Option<&str>) -> ValidationResult<()> {
    match notes {
        Some(text) if text.chars().count() > MAX_NOTES_LEN => Err(ValidationError::TooLong {
            field: "typeNotes".to_string(),
            max: MAX_NOTES_LEN,
        }),
        _ => Ok(()),
    }
}

// =============================================================================
// Invoice Validators
// =============================================================================

/// Validates that an invoice date was supplied.
///
/// ## Example
/// ```rust
/// use bill_core::validation::validate_invoice_date;
/// use chrono::NaiveDate;
///
/// assert!(validate_invoice_date(NaiveDate::from_ymd_opt(2024, 1, 31)).is_ok());
/// assert!(validate_invoice_date(None).is_err());
/// ```
pub fn validate_invoice_date(date: Option<NaiveDate>) -> ValidationResult<NaiveDate> {
    date.ok_or_else(|| ValidationError::Required {
        field: "date".to_string(),
    })
}

/// Validates a bill number (must be positive).
pub fn validate_bill_number(bill_number: i64) -> ValidationResult<()> {
    if bill_number <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "billNumber".to_string(),
        });
    }

    Ok(())
}

/// Validates a line item quantity.
///
/// ## Rules
/// - Must be positive (> 0)
///
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Invoice submission                                                     │
/// │                                                                         │
/// │  for each line:                                                         │
/// │       ├── item exists?      no → "Item with ID … not found"            │
/// │       ├── quantity > 0?     no → "quantity must be greater than zero"  │
/// │       └── OK → total_value = selling_price × quantity                  │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a price in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items)
///
/// ## Example
/// ```rust
/// use bill_core::validation::validate_price_cents;
///
/// assert!(validate_price_cents("sellingPriceCents", 1099).is_ok());
/// assert!(validate_price_cents("sellingPriceCents", 0).is_ok());
/// assert!(validate_price_cents("sellingPriceCents", -100).is_err());
/// ```
pub fn validate_price_cents(field: &str, cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a discount given as a percentage number and converts it.
///
/// ## Rules
/// - Must be a finite number between 0 and 100 (inclusive)
pub fn validate_discount_percentage(pct: f64) -> ValidationResult<DiscountRate> {
    if !pct.is_finite() || !(0.0..=100.0).contains(&pct) {
        return Err(ValidationError::OutOfRange {
            field: "percentageDiscount".to_string(),
            min: 0,
            max: 100,
        });
    }

    Ok(DiscountRate::from_percentage(pct))
}

// =============================================================================
// UUID Validators
// =============================================================================

/// Validates a UUID string format.
///
/// ## Example
/// ```rust
/// use bill_core::validation::validate_uuid;
///
/// assert!(validate_uuid("id", "550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_uuid("id", "not-a-uuid").is_err());
/// ```
pub fn validate_uuid(field: &str, id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
