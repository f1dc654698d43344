//! # Catalog-Type Workflow
//!
//! Product types are scoped to a company, addressed by the company's name
//! in requests.
//!
//! ## Duplicate Rule
//! ```text
//! create:  same type name (exact)  AND  same company id
//! update:  same type name (exact)  AND  company name equal ignoring case
//!          AND a different type id
//! ```
//! The two checks differ in case handling; [`CompanyMatch`] names the mode
//! at each call.

use bill_core::validation::{validate_name, validate_notes};
use bill_core::{CoreError, ProductType, ValidationError};
use bill_db::{CompanyMatch, Database, Repository};
use tracing::{info, warn};

use crate::dto::{TypeRequest, TypeResponse};
use crate::error::ApiResult;
use crate::services::check_path_id;

/// Lists types whose company resolves.
pub async fn list_types(db: &Database) -> ApiResult<Vec<TypeResponse>> {
    let mut uow = db.unit_of_work().await?;

    let types = uow.types().list_with_company().await?;

    Ok(types.into_iter().map(TypeResponse::from).collect())
}

/// Loads one type; types without a company count as missing.
pub async fn get_type(db: &Database, id: &str) -> ApiResult<TypeResponse> {
    check_path_id(id)?;

    let mut uow = db.unit_of_work().await?;

    let ty = uow
        .types()
        .get_with_company(id)
        .await?
        .ok_or_else(|| CoreError::TypeNotFound(id.to_string()))?;

    Ok(ty.into())
}

/// Lists the types of a company, matching its name ignoring case.
pub async fn types_by_company_name(
    db: &Database,
    company_name: Option<&str>,
) -> ApiResult<Vec<TypeResponse>> {
    let company_name = match company_name {
        Some(name) if !name.is_empty() => name,
        _ => {
            return Err(ValidationError::Required {
                field: "companyName".to_string(),
            }
            .into())
        }
    };

    let mut uow = db.unit_of_work().await?;

    let types = uow
        .types()
        .list_by_company_name_ignore_case(company_name)
        .await?;

    Ok(types.into_iter().map(TypeResponse::from).collect())
}

/// Creates a type under the company named in the request.
pub async fn create_type(db: &Database, req: TypeRequest) -> ApiResult<TypeResponse> {
    let name = validate_name("typeName", &req.type_name)?;
    validate_notes(req.type_notes.as_deref())?;

    let mut uow = db.unit_of_work().await?;

    let company = uow
        .companies()
        .find_by_name(&req.company_name)
        .await?
        .ok_or_else(|| CoreError::UnknownCompany(req.company_name.clone()))?;

    if let Some(existing) = uow
        .types()
        .find_duplicate(&name, CompanyMatch::Id(&company.id), None)
        .await?
    {
        warn!(type_name = %name, company = %company.name, "Duplicate type rejected");
        return Err(CoreError::DuplicateTypeName {
            name,
            company: existing.company_name,
        }
        .into());
    }

    let ty = ProductType::new(name, req.type_notes, company.id.clone());
    uow.types().add(&ty).await?;

    uow.complete().await?;

    info!(type_id = %ty.id, company = %company.name, "Type created");

    Ok(TypeResponse {
        type_id: ty.id,
        type_name: ty.name,
        type_notes: ty.notes,
        company_name: company.name,
    })
}

/// Updates a type's name, notes and company.
///
/// Types left without a company are still addressable here.
pub async fn update_type(db: &Database, id: &str, req: TypeRequest) -> ApiResult<TypeResponse> {
    check_path_id(id)?;

    let mut uow = db.unit_of_work().await?;

    let existing = uow
        .types()
        .get_by_id(id)
        .await?
        .ok_or_else(|| CoreError::TypeNotFound(id.to_string()))?;

    let name = validate_name("typeName", &req.type_name)?;
    validate_notes(req.type_notes.as_deref())?;

    let company = uow
        .companies()
        .find_by_name(&req.company_name)
        .await?
        .ok_or_else(|| CoreError::UnknownCompany(req.company_name.clone()))?;

    if let Some(other) = uow
        .types()
        .find_duplicate(
            &name,
            CompanyMatch::NameIgnoreCase(&req.company_name),
            Some(id),
        )
        .await?
    {
        warn!(type_id = %id, duplicate_of = %other.id, "Duplicate type rejected");
        return Err(CoreError::DuplicateTypeName {
            name,
            company: other.company_name,
        }
        .into());
    }

    let ty = ProductType {
        name,
        notes: req.type_notes,
        company_id: Some(company.id.clone()),
        ..existing
    };
    uow.types().update(&ty).await?;

    uow.complete().await?;

    info!(type_id = %ty.id, "Type updated");

    Ok(TypeResponse {
        type_id: ty.id,
        type_name: ty.name,
        type_notes: ty.notes,
        company_name: company.name,
    })
}

/// Deletes a type. Catalog items classified by it lose their type.
pub async fn delete_type(db: &Database, id: &str) -> ApiResult<()> {
    check_path_id(id)?;

    let mut uow = db.unit_of_work().await?;

    if uow.types().get_by_id(id).await?.is_none() {
        return Err(CoreError::TypeNotFound(id.to_string()).into());
    }

    uow.types().delete(id).await?;
    uow.complete().await?;

    info!(type_id = %id, "Type deleted");
    Ok(())
}
