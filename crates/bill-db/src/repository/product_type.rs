//! # Product Type Repository
//!
//! Types are classification records scoped to a company.
//!
//! ## Company Resolution
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  types.company_id ──► companies.id      (INNER JOIN for every listing) │
//! │                                                                         │
//! │  company deleted  →  company_id = NULL  →  type hidden from listings   │
//! │                                             but still reachable by id  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Duplicate Checks
//! A type name must be unique per company. Creation checks within the
//! resolved company id; an update checks against the company *name*
//! ignoring case. Both are expressed through [`CompanyMatch`].

use chrono::Utc;
use sqlx::SqliteConnection;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::repository::Repository;
use bill_core::{ProductType, ProductTypeWithCompany};

/// How [`ProductTypeRepository::find_duplicate`] scopes a type name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompanyMatch<'a> {
    /// Same company id.
    Id(&'a str),
    /// Company name equal ignoring case.
    NameIgnoreCase(&'a str),
}

/// Repository for product type database operations.
#[derive(Debug)]
pub struct ProductTypeRepository<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> ProductTypeRepository<'c> {
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        ProductTypeRepository { conn }
    }

    /// Lists every type whose company resolves, with the company name.
    pub async fn list_with_company(&mut self) -> DbResult<Vec<ProductTypeWithCompany>> {
        let types = sqlx::query_as::<_, ProductTypeWithCompany>(
            r#"
            SELECT
                t.id,
                t.name,
                t.notes,
                c.id   AS company_id,
                c.name AS company_name
            FROM types t
            INNER JOIN companies c ON c.id = t.company_id
            ORDER BY c.name, t.name
            "#,
        )
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(types)
    }

    /// Fetches one type with its company name.
    ///
    /// `None` both when the id is unknown and when its company is gone.
    pub async fn get_with_company(&mut self, id: &str) -> DbResult<Option<ProductTypeWithCompany>> {
        let ty = sqlx::query_as::<_, ProductTypeWithCompany>(
            r#"
            SELECT
                t.id,
                t.name,
                t.notes,
                c.id   AS company_id,
                c.name AS company_name
            FROM types t
            INNER JOIN companies c ON c.id = t.company_id
            WHERE t.id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(ty)
    }

    /// Lists types of the company whose name matches ignoring case.
    ///
    /// Matching is done on Unicode upper case in Rust; SQLite's `UPPER()`
    /// only folds ASCII.
    pub async fn list_by_company_name_ignore_case(
        &mut self,
        company_name: &str,
    ) -> DbResult<Vec<ProductTypeWithCompany>> {
        let wanted = company_name.to_uppercase();

        let types = self
            .list_with_company()
            .await?
            .into_iter()
            .filter(|t| t.company_name.to_uppercase() == wanted)
            .collect();

        Ok(types)
    }

    /// Looks for another type with exactly `name` under the given company.
    ///
    /// ## Arguments
    /// * `name` - Type name, compared case-sensitively
    /// * `company` - Company scope, see [`CompanyMatch`]
    /// * `exclude_id` - Type to ignore (the one being updated)
    pub async fn find_duplicate(
        &mut self,
        name: &str,
        company: CompanyMatch<'_>,
        exclude_id: Option<&str>,
    ) -> DbResult<Option<ProductTypeWithCompany>> {
        let candidates = sqlx::query_as::<_, ProductTypeWithCompany>(
            r#"
            SELECT
                t.id,
                t.name,
                t.notes,
                c.id   AS company_id,
                c.name AS company_name
            FROM types t
            INNER JOIN companies c ON c.id = t.company_id
            WHERE t.name = ?1
            "#,
        )
        .bind(name)
        .fetch_all(&mut *self.conn)
        .await?;

        let duplicate = candidates.into_iter().find(|t| {
            if exclude_id == Some(t.id.as_str()) {
                return false;
            }
            match company {
                CompanyMatch::Id(id) => t.company_id == id,
                CompanyMatch::NameIgnoreCase(company_name) => {
                    t.company_name.to_lowercase() == company_name.to_lowercase()
                }
            }
        });

        Ok(duplicate)
    }

    /// Counts all types, detached ones included.
    pub async fn count(&mut self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM types")
            .fetch_one(&mut *self.conn)
            .await?;

        Ok(count)
    }
}

impl Repository<ProductType> for ProductTypeRepository<'_> {
    async fn get_by_id(&mut self, id: &str) -> DbResult<Option<ProductType>> {
        let ty = sqlx::query_as::<_, ProductType>(
            r#"
            SELECT id, name, notes, company_id, created_at, updated_at
            FROM types
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(ty)
    }

    /// Every stored type, detached ones included.
    async fn list(&mut self) -> DbResult<Vec<ProductType>> {
        let types = sqlx::query_as::<_, ProductType>(
            r#"
            SELECT id, name, notes, company_id, created_at, updated_at
            FROM types
            ORDER BY name
            "#,
        )
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(types)
    }

    async fn add(&mut self, ty: &ProductType) -> DbResult<()> {
        debug!(id = %ty.id, name = %ty.name, company_id = ?ty.company_id, "Inserting type");

        sqlx::query(
            r#"
            INSERT INTO types (id, name, notes, company_id, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&ty.id)
        .bind(&ty.name)
        .bind(&ty.notes)
        .bind(&ty.company_id)
        .bind(ty.created_at)
        .bind(ty.updated_at)
        .execute(&mut *self.conn)
        .await?;

        Ok(())
    }

    async fn update(&mut self, ty: &ProductType) -> DbResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE types SET
                name = ?2,
                notes = ?3,
                company_id = ?4,
                updated_at = ?5
            WHERE id = ?1
            "#,
        )
        .bind(&ty.id)
        .bind(&ty.name)
        .bind(&ty.notes)
        .bind(&ty.company_id)
        .bind(Utc::now())
        .execute(&mut *self.conn)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Type", &ty.id));
        }

        Ok(())
    }

    async fn delete(&mut self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting type");

        let result = sqlx::query("DELETE FROM types WHERE id = ?1")
            .bind(id)
            .execute(&mut *self.conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Type", id));
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig, UnitOfWork};
    use bill_core::Company;

    async fn seed(uow: &mut UnitOfWork) -> (Company, Company) {
        let acme = Company::new("Acme");
        let globex = Company::new("Globex");
        uow.companies().add(&acme).await.unwrap();
        uow.companies().add(&globex).await.unwrap();

        uow.types()
            .add(&ProductType::new("Hardware", Some("bolts".into()), acme.id.clone()))
            .await
            .unwrap();
        uow.types()
            .add(&ProductType::new("Software", None, acme.id.clone()))
            .await
            .unwrap();
        uow.types()
            .add(&ProductType::new("Hardware", None, globex.id.clone()))
            .await
            .unwrap();

        (acme, globex)
    }

    #[tokio::test]
    async fn test_list_with_company() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mut uow = db.unit_of_work().await.unwrap();
        seed(&mut uow).await;

        let types = uow.types().list_with_company().await.unwrap();
        let pairs: Vec<(&str, &str)> = types
            .iter()
            .map(|t| (t.company_name.as_str(), t.name.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![("Acme", "Hardware"), ("Acme", "Software"), ("Globex", "Hardware")]
        );
    }

    #[tokio::test]
    async fn test_deleted_company_hides_types() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mut uow = db.unit_of_work().await.unwrap();
        let (acme, _) = seed(&mut uow).await;

        uow.companies().delete(&acme.id).await.unwrap();

        let types = uow.types().list_with_company().await.unwrap();
        assert_eq!(types.len(), 1);
        assert_eq!(types[0].company_name, "Globex");

        // the rows survive, detached
        assert_eq!(uow.types().count().await.unwrap(), 3);
        let detached: Vec<ProductType> = uow
            .types()
            .list()
            .await
            .unwrap()
            .into_iter()
            .filter(|t| t.company_id.is_none())
            .collect();
        assert_eq!(detached.len(), 2);
        assert!(uow
            .types()
            .get_with_company(&detached[0].id)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_list_by_company_name_ignores_case() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mut uow = db.unit_of_work().await.unwrap();
        seed(&mut uow).await;

        let types = uow.types().list_by_company_name_ignore_case("aCME").await.unwrap();
        assert_eq!(types.len(), 2);
        assert!(types.iter().all(|t| t.company_name == "Acme"));

        assert!(uow
            .types()
            .list_by_company_name_ignore_case("Initech")
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_find_duplicate_by_company_id() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mut uow = db.unit_of_work().await.unwrap();
        let (acme, _) = seed(&mut uow).await;

        let dup = uow
            .types()
            .find_duplicate("Hardware", CompanyMatch::Id(&acme.id), None)
            .await
            .unwrap();
        assert!(dup.is_some());

        // name comparison is exact
        let dup = uow
            .types()
            .find_duplicate("hardware", CompanyMatch::Id(&acme.id), None)
            .await
            .unwrap();
        assert!(dup.is_none());
    }

    #[tokio::test]
    async fn test_find_duplicate_by_company_name_excludes_self() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mut uow = db.unit_of_work().await.unwrap();
        seed(&mut uow).await;

        let hardware = uow
            .types()
            .find_duplicate("Hardware", CompanyMatch::NameIgnoreCase("ACME"), None)
            .await
            .unwrap()
            .unwrap();

        let again = uow
            .types()
            .find_duplicate(
                "Hardware",
                CompanyMatch::NameIgnoreCase("acme"),
                Some(&hardware.id),
            )
            .await
            .unwrap();
        assert!(again.is_none());
    }
}
