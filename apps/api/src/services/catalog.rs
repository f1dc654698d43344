//! # Catalog Reference Data
//!
//! Companies, clients and catalog items: the records invoices and types
//! point at.

use bill_core::validation::{validate_name, validate_price_cents};
use bill_core::{Client, Company, CoreError, Item, Money, ValidationError};
use bill_db::{Database, Repository, UnitOfWork};
use tracing::info;

use crate::dto::{
    ClientRequest, ClientResponse, CompanyRequest, CompanyResponse, ItemRequest, ItemResponse,
};
use crate::error::{ApiError, ApiResult};
use crate::services::check_path_id;

// =============================================================================
// Companies
// =============================================================================

pub async fn list_companies(db: &Database) -> ApiResult<Vec<CompanyResponse>> {
    let mut uow = db.unit_of_work().await?;
    let companies = uow.companies().list().await?;
    Ok(companies.into_iter().map(CompanyResponse::from).collect())
}

pub async fn get_company(db: &Database, id: &str) -> ApiResult<CompanyResponse> {
    check_path_id(id)?;

    let mut uow = db.unit_of_work().await?;
    let company = uow
        .companies()
        .get_by_id(id)
        .await?
        .ok_or_else(|| CoreError::CompanyNotFound(id.to_string()))?;

    Ok(company.into())
}

/// Creates a company; names are unique (exact match).
pub async fn create_company(db: &Database, req: CompanyRequest) -> ApiResult<CompanyResponse> {
    let name = validate_name("companyName", &req.company_name)?;

    let mut uow = db.unit_of_work().await?;
    ensure_company_name_free(&mut uow, &name, None).await?;

    let company = Company::new(name);
    uow.companies().add(&company).await?;
    uow.complete().await?;

    info!(company_id = %company.id, "Company created");
    Ok(company.into())
}

/// Renames a company. Its types follow, being linked by id.
pub async fn update_company(
    db: &Database,
    id: &str,
    req: CompanyRequest,
) -> ApiResult<CompanyResponse> {
    check_path_id(id)?;

    let mut uow = db.unit_of_work().await?;
    let existing = uow
        .companies()
        .get_by_id(id)
        .await?
        .ok_or_else(|| CoreError::CompanyNotFound(id.to_string()))?;

    let name = validate_name("companyName", &req.company_name)?;
    ensure_company_name_free(&mut uow, &name, Some(id)).await?;

    let company = Company { name, ..existing };
    uow.companies().update(&company).await?;
    uow.complete().await?;

    info!(company_id = %company.id, "Company updated");
    Ok(company.into())
}

/// Deletes a company. Its types stay, detached, and drop out of listings.
pub async fn delete_company(db: &Database, id: &str) -> ApiResult<()> {
    check_path_id(id)?;

    let mut uow = db.unit_of_work().await?;
    if uow.companies().get_by_id(id).await?.is_none() {
        return Err(CoreError::CompanyNotFound(id.to_string()).into());
    }

    uow.companies().delete(id).await?;
    uow.complete().await?;

    info!(company_id = %id, "Company deleted");
    Ok(())
}

async fn ensure_company_name_free(
    uow: &mut UnitOfWork,
    name: &str,
    exclude_id: Option<&str>,
) -> ApiResult<()> {
    match uow.companies().find_by_name(name).await? {
        Some(other) if Some(other.id.as_str()) != exclude_id => Err(ValidationError::Duplicate {
            field: "companyName".to_string(),
            value: name.to_string(),
        }
        .into()),
        _ => Ok(()),
    }
}

// =============================================================================
// Clients
// =============================================================================

pub async fn list_clients(db: &Database) -> ApiResult<Vec<ClientResponse>> {
    let mut uow = db.unit_of_work().await?;
    let clients = uow.clients().list().await?;
    Ok(clients.into_iter().map(ClientResponse::from).collect())
}

pub async fn get_client(db: &Database, id: &str) -> ApiResult<ClientResponse> {
    check_path_id(id)?;

    let mut uow = db.unit_of_work().await?;
    let client = uow
        .clients()
        .get_by_id(id)
        .await?
        .ok_or_else(|| CoreError::ClientNotFound(id.to_string()))?;

    Ok(client.into())
}

pub async fn create_client(db: &Database, req: ClientRequest) -> ApiResult<ClientResponse> {
    let name = validate_name("clientName", &req.client_name)?;

    let mut uow = db.unit_of_work().await?;
    let client = Client::new(name);
    uow.clients().add(&client).await?;
    uow.complete().await?;

    info!(client_id = %client.id, "Client created");
    Ok(client.into())
}

pub async fn update_client(db: &Database, id: &str, req: ClientRequest) -> ApiResult<ClientResponse> {
    check_path_id(id)?;

    let mut uow = db.unit_of_work().await?;
    let existing = uow
        .clients()
        .get_by_id(id)
        .await?
        .ok_or_else(|| CoreError::ClientNotFound(id.to_string()))?;

    let name = validate_name("clientName", &req.client_name)?;

    let client = Client { name, ..existing };
    uow.clients().update(&client).await?;
    uow.complete().await?;

    Ok(client.into())
}

/// Deletes a client no invoice refers to.
pub async fn delete_client(db: &Database, id: &str) -> ApiResult<()> {
    check_path_id(id)?;

    let mut uow = db.unit_of_work().await?;
    if uow.clients().get_by_id(id).await?.is_none() {
        return Err(CoreError::ClientNotFound(id.to_string()).into());
    }

    // invoices.client_id has no cascade; the FK check answers "still billed?"
    uow.clients().delete(id).await?;
    uow.complete().await?;

    info!(client_id = %id, "Client deleted");
    Ok(())
}

// =============================================================================
// Catalog Items
// =============================================================================

pub async fn list_items(db: &Database) -> ApiResult<Vec<ItemResponse>> {
    let mut uow = db.unit_of_work().await?;
    let items = uow.items().list().await?;
    Ok(items.into_iter().map(ItemResponse::from).collect())
}

pub async fn get_item(db: &Database, id: &str) -> ApiResult<ItemResponse> {
    check_path_id(id)?;

    let mut uow = db.unit_of_work().await?;
    let item = uow
        .items()
        .get_by_id(id)
        .await?
        .ok_or_else(|| CoreError::ItemNotFound(id.to_string()))?;

    Ok(item.into())
}

pub async fn create_item(db: &Database, req: ItemRequest) -> ApiResult<ItemResponse> {
    let name = validate_name("itemName", &req.item_name)?;
    validate_price_cents("unitPriceCents", req.unit_price_cents)?;

    let mut uow = db.unit_of_work().await?;
    ensure_type_exists(&mut uow, req.type_id.as_deref()).await?;

    let item = Item::new(name, Money::from_cents(req.unit_price_cents), req.type_id);
    uow.items().add(&item).await?;
    uow.complete().await?;

    info!(item_id = %item.id, "Item created");
    Ok(item.into())
}

/// Updates a catalog item. Existing invoice lines keep their frozen name
/// and price.
pub async fn update_item(db: &Database, id: &str, req: ItemRequest) -> ApiResult<ItemResponse> {
    check_path_id(id)?;

    let mut uow = db.unit_of_work().await?;
    let existing = uow
        .items()
        .get_by_id(id)
        .await?
        .ok_or_else(|| CoreError::ItemNotFound(id.to_string()))?;

    let name = validate_name("itemName", &req.item_name)?;
    validate_price_cents("unitPriceCents", req.unit_price_cents)?;
    ensure_type_exists(&mut uow, req.type_id.as_deref()).await?;

    let item = Item {
        name,
        unit_price_cents: req.unit_price_cents,
        type_id: req.type_id,
        ..existing
    };
    uow.items().update(&item).await?;
    uow.complete().await?;

    Ok(item.into())
}

pub async fn delete_item(db: &Database, id: &str) -> ApiResult<()> {
    check_path_id(id)?;

    let mut uow = db.unit_of_work().await?;
    if uow.items().get_by_id(id).await?.is_none() {
        return Err(CoreError::ItemNotFound(id.to_string()).into());
    }

    if uow.items().is_invoiced(id).await? {
        return Err(ApiError::validation(format!(
            "Item {} is still used by invoice lines",
            id
        )));
    }

    uow.items().delete(id).await?;
    uow.complete().await?;

    info!(item_id = %id, "Item deleted");
    Ok(())
}

async fn ensure_type_exists(uow: &mut UnitOfWork, type_id: Option<&str>) -> ApiResult<()> {
    if let Some(type_id) = type_id {
        if uow.types().get_by_id(type_id).await?.is_none() {
            return Err(CoreError::UnknownType(type_id.to_string()).into());
        }
    }

    Ok(())
}
