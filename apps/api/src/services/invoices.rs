//! # Invoice Workflow
//!
//! Create, read, update and delete invoices together with their lines.
//!
//! ## Create / Update
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. date present?                  no  → 400 "date is required"        │
//! │  2. bill number > 0, discount 0-100                                    │
//! │  3. client exists?                 no  → 400 "Invalid Client ID: …"    │
//! │  4. for each line:                                                     │
//! │       item exists?                 no  → 400 "Item with ID … not found"│
//! │       quantity > 0?                no  → 400                           │
//! │       total_value = price × qty                                        │
//! │     totals fit in i64 cents?       no  → 400                           │
//! │  5. write header + lines (update: replace the whole line set)          │
//! │  6. totals recomputed from the persisted lines                         │
//! │  7. COMMIT                                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Steps 1-4 run before the first write; a failure leaves nothing behind.

use std::collections::HashMap;

use bill_core::validation::{
    validate_bill_number, validate_discount_percentage, validate_invoice_date,
    validate_price_cents, validate_quantity,
};
use bill_core::{new_id, Client, CoreError, Invoice, InvoiceItem, Money, ValidationError};
use bill_db::{Database, Repository, UnitOfWork};
use chrono::Utc;
use tracing::info;

use crate::dto::{ClientRef, InvoiceItemRequest, InvoiceRequest, InvoiceResponse, InvoiceTotalsResponse};
use crate::error::ApiResult;
use crate::services::check_path_id;

/// Lists every invoice with its client, lines and aggregates.
pub async fn list_invoices(db: &Database) -> ApiResult<Vec<InvoiceResponse>> {
    let mut uow = db.unit_of_work().await?;

    let invoices = uow.invoices().list().await?;

    let clients: HashMap<String, Client> = uow
        .clients()
        .list()
        .await?
        .into_iter()
        .map(|c| (c.id.clone(), c))
        .collect();

    let mut lines_by_invoice: HashMap<String, Vec<InvoiceItem>> = HashMap::new();
    for line in uow.invoice_items().list().await? {
        lines_by_invoice
            .entry(line.invoice_id.clone())
            .or_default()
            .push(line);
    }

    let responses = invoices
        .iter()
        .map(|invoice| {
            let lines = lines_by_invoice
                .get(&invoice.id)
                .map(Vec::as_slice)
                .unwrap_or_default();
            InvoiceResponse::project(invoice, client_ref(&clients, &invoice.client_id), lines)
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(responses)
}

/// Loads one invoice projection.
pub async fn get_invoice(db: &Database, id: &str) -> ApiResult<InvoiceResponse> {
    check_path_id(id)?;

    let mut uow = db.unit_of_work().await?;

    let invoice = uow
        .invoices()
        .get_by_id(id)
        .await?
        .ok_or_else(|| CoreError::InvoiceNotFound(id.to_string()))?;

    let client = match uow.clients().get_by_id(&invoice.client_id).await? {
        Some(c) => ClientRef { id: c.id, name: c.name },
        None => ClientRef {
            id: invoice.client_id.clone(),
            name: String::new(),
        },
    };

    let lines = uow.invoice_items().list_for_invoice(id).await?;

    Ok(InvoiceResponse::project(&invoice, client, &lines)?)
}

/// Validates and persists a new invoice with its lines.
///
/// Any `billTotal` in the request has no effect; the returned totals come
/// from the lines as stored.
pub async fn create_invoice(db: &Database, req: InvoiceRequest) -> ApiResult<InvoiceTotalsResponse> {
    let date = validate_invoice_date(req.date)?;
    validate_bill_number(req.bill_number)?;
    let discount = validate_discount_percentage(req.percentage_discount)?;

    let mut uow = db.unit_of_work().await?;

    let client = resolve_client(&mut uow, &req.client_id).await?;

    let now = Utc::now();
    let invoice = Invoice {
        id: new_id(),
        bill_number: req.bill_number,
        date,
        client_id: client.id,
        discount_bps: discount.bps(),
        paid_up_cents: req.paid_up_cents,
        created_at: now,
        updated_at: now,
    };

    let lines = build_lines(&mut uow, &invoice.id, &req.invoice_items).await?;
    invoice.totals(&lines)?;

    uow.invoices().add(&invoice).await?;
    for line in &lines {
        uow.invoice_items().add(line).await?;
    }

    let stored = uow.invoice_items().list_for_invoice(&invoice.id).await?;
    let totals = invoice.totals(&stored)?;

    uow.complete().await?;

    info!(
        invoice_id = %invoice.id,
        bill_number = invoice.bill_number,
        lines = stored.len(),
        bill_total = %totals.bill_total,
        "Invoice created"
    );

    Ok(InvoiceTotalsResponse::new(&invoice.id, &totals))
}

/// Replaces an invoice's header fields and its entire line set.
pub async fn update_invoice(
    db: &Database,
    id: &str,
    req: InvoiceRequest,
) -> ApiResult<InvoiceTotalsResponse> {
    check_path_id(id)?;

    let mut uow = db.unit_of_work().await?;

    let existing = uow
        .invoices()
        .get_by_id(id)
        .await?
        .ok_or_else(|| CoreError::InvoiceNotFound(id.to_string()))?;

    let date = validate_invoice_date(req.date)?;
    validate_bill_number(req.bill_number)?;
    let discount = validate_discount_percentage(req.percentage_discount)?;

    let client = resolve_client(&mut uow, &req.client_id).await?;

    let lines = build_lines(&mut uow, &existing.id, &req.invoice_items).await?;

    let invoice = Invoice {
        bill_number: req.bill_number,
        date,
        client_id: client.id,
        discount_bps: discount.bps(),
        paid_up_cents: req.paid_up_cents,
        updated_at: Utc::now(),
        ..existing
    };
    invoice.totals(&lines)?;

    uow.invoices().update(&invoice).await?;

    let removed = uow.invoice_items().delete_for_invoice(&invoice.id).await?;
    for line in &lines {
        uow.invoice_items().add(line).await?;
    }

    let stored = uow.invoice_items().list_for_invoice(&invoice.id).await?;
    let totals = invoice.totals(&stored)?;

    uow.complete().await?;

    info!(
        invoice_id = %invoice.id,
        removed_lines = removed,
        lines = stored.len(),
        bill_total = %totals.bill_total,
        "Invoice updated"
    );

    Ok(InvoiceTotalsResponse::new(&invoice.id, &totals))
}

/// Deletes an invoice after removing all of its lines.
pub async fn delete_invoice(db: &Database, id: &str) -> ApiResult<()> {
    check_path_id(id)?;

    let mut uow = db.unit_of_work().await?;

    if uow.invoices().get_by_id(id).await?.is_none() {
        return Err(CoreError::InvoiceNotFound(id.to_string()).into());
    }

    let removed = uow.invoice_items().delete_for_invoice(id).await?;
    uow.invoices().delete(id).await?;

    uow.complete().await?;

    info!(invoice_id = %id, removed_lines = removed, "Invoice deleted");
    Ok(())
}

// =============================================================================
// Helpers
// =============================================================================

async fn resolve_client(uow: &mut UnitOfWork, client_id: &str) -> ApiResult<Client> {
    let client = uow
        .clients()
        .get_by_id(client_id)
        .await?
        .ok_or_else(|| CoreError::UnknownClient(client_id.to_string()))?;

    Ok(client)
}

/// Resolves and validates submitted lines, in submission order.
async fn build_lines(
    uow: &mut UnitOfWork,
    invoice_id: &str,
    requested: &[InvoiceItemRequest],
) -> ApiResult<Vec<InvoiceItem>> {
    let mut lines = Vec::with_capacity(requested.len());

    for line in requested {
        let item = uow
            .items()
            .get_by_id(&line.item_id)
            .await?
            .ok_or_else(|| CoreError::UnknownItem(line.item_id.clone()))?;

        validate_quantity(line.quantity)?;
        validate_price_cents("sellingPriceCents", line.selling_price_cents)?;

        if line.selling_price_cents.checked_mul(line.quantity).is_none() {
            return Err(ValidationError::OutOfRange {
                field: "quantity".to_string(),
                min: 1,
                max: i64::MAX / line.selling_price_cents.max(1),
            }
            .into());
        }

        lines.push(InvoiceItem::new(
            invoice_id,
            &item,
            Money::from_cents(line.selling_price_cents),
            line.quantity,
        ));
    }

    Ok(lines)
}

fn client_ref(clients: &HashMap<String, Client>, client_id: &str) -> ClientRef {
    match clients.get(client_id) {
        Some(c) => ClientRef {
            id: c.id.clone(),
            name: c.name.clone(),
        },
        None => ClientRef {
            id: client_id.to_string(),
            name: String::new(),
        },
    }
}
