//! # Invoice Totals
//!
//! The three derived aggregates of an invoice. They are never a source of
//! truth on their own: every read and every write recomputes them from the
//! line items through [`compute_totals`].
//!
//! ```text
//! BillTotal = Σ item.total_value
//! NetTotal  = BillTotal − discount(BillTotal)
//! TheRest   = PaidUp − NetTotal
//! ```
//!
//! Every step is checked: an aggregate that does not fit in `i64` cents is
//! a validation failure, never a wrapped value.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::{DiscountRate, Money};
use crate::validation::ValidationResult;

/// Derived monetary aggregates of one invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InvoiceTotals {
    /// Sum of all line totals.
    pub bill_total: Money,
    /// Bill total after the invoice discount.
    pub net_total: Money,
    /// Paid amount minus net total. Negative while the client still owes.
    pub the_rest: Money,
}

/// Computes the derived aggregates from line totals, discount and paid amount.
///
/// ## Errors
/// `OutOfRange` on `invoiceItems` when the line totals overflow, and on
/// `paidUpCents` when `PaidUp − NetTotal` does.
///
/// ## Example
/// ```rust
/// use bill_core::money::{DiscountRate, Money};
/// use bill_core::totals::compute_totals;
///
/// let totals = compute_totals(
///     [Money::from_cents(2000), Money::from_cents(1500)],
///     DiscountRate::from_percentage(10.0),
///     Money::from_cents(4000),
/// )
/// .unwrap();
/// assert_eq!(totals.net_total.cents(), 3150);
/// ```
pub fn compute_totals<I>(
    line_totals: I,
    discount: DiscountRate,
    paid_up: Money,
) -> ValidationResult<InvoiceTotals>
where
    I: IntoIterator<Item = Money>,
{
    let mut bill_total = Money::zero();
    for line in line_totals {
        bill_total = bill_total
            .checked_add(line)
            .ok_or_else(|| out_of_range("invoiceItems", 0, i64::MAX))?;
    }

    let net_total = bill_total
        .checked_sub(bill_total.discount_amount(discount))
        .ok_or_else(|| out_of_range("percentageDiscount", 0, 100))?;

    let the_rest = paid_up.checked_sub(net_total).ok_or_else(|| {
        out_of_range(
            "paidUpCents",
            i64::MIN.saturating_add(net_total.cents().max(0)),
            i64::MAX.saturating_add(net_total.cents().min(0)),
        )
    })?;

    Ok(InvoiceTotals {
        bill_total,
        net_total,
        the_rest,
    })
}

fn out_of_range(field: &str, min: i64, max: i64) -> ValidationError {
    ValidationError::OutOfRange {
        field: field.to_string(),
        min,
        max,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
