//! # Company Repository
//!
//! Companies own product types. Deleting a company detaches its types
//! (`company_id` becomes NULL) rather than deleting them.

use chrono::Utc;
use sqlx::SqliteConnection;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::repository::Repository;
use bill_core::Company;

/// Repository for company database operations.
#[derive(Debug)]
pub struct CompanyRepository<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> CompanyRepository<'c> {
    /// Creates a repository over an open connection.
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        CompanyRepository { conn }
    }

    /// Finds a company by its exact (case-sensitive) name.
    pub async fn find_by_name(&mut self, name: &str) -> DbResult<Option<Company>> {
        let company = sqlx::query_as::<_, Company>(
            r#"
            SELECT id, name, created_at, updated_at
            FROM companies
            WHERE name = ?1
            "#,
        )
        .bind(name)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(company)
    }

    /// Counts all companies.
    pub async fn count(&mut self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM companies")
            .fetch_one(&mut *self.conn)
            .await?;

        Ok(count)
    }
}

impl Repository<Company> for CompanyRepository<'_> {
    async fn get_by_id(&mut self, id: &str) -> DbResult<Option<Company>> {
        let company = sqlx::query_as::<_, Company>(
            r#"
            SELECT id, name, created_at, updated_at
            FROM companies
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(company)
    }

    async fn list(&mut self) -> DbResult<Vec<Company>> {
        let companies = sqlx::query_as::<_, Company>(
            r#"
            SELECT id, name, created_at, updated_at
            FROM companies
            ORDER BY name
            "#,
        )
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(companies)
    }

    async fn add(&mut self, company: &Company) -> DbResult<()> {
        debug!(id = %company.id, name = %company.name, "Inserting company");

        sqlx::query(
            r#"
            INSERT INTO companies (id, name, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&company.id)
        .bind(&company.name)
        .bind(company.created_at)
        .bind(company.updated_at)
        .execute(&mut *self.conn)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::UniqueViolation { field, .. } => DbError::duplicate(field, &company.name),
            other => other,
        })?;

        Ok(())
    }

    async fn update(&mut self, company: &Company) -> DbResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE companies SET
                name = ?2,
                updated_at = ?3
            WHERE id = ?1
            "#,
        )
        .bind(&company.id)
        .bind(&company.name)
        .bind(Utc::now())
        .execute(&mut *self.conn)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::UniqueViolation { field, .. } => DbError::duplicate(field, &company.name),
            other => other,
        })?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Company", &company.id));
        }

        Ok(())
    }

    async fn delete(&mut self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting company");

        let result = sqlx::query("DELETE FROM companies WHERE id = ?1")
            .bind(id)
            .execute(&mut *self.conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Company", id));
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
    use crate::{Database, DbConfig};

    #[tokio::test]
    async fn test_add_and_find_by_name() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mut uow = db.unit_of_work().await.unwrap();

        let acme = Company::new("Acme");
        uow.companies().add(&acme).await.unwrap();

        let found = uow.companies().find_by_name("Acme").await.unwrap().unwrap();
        assert_eq!(found.id, acme.id);

        // exact match only
        assert!(uow.companies().find_by_name("acme").await.unwrap().is_none());
        assert_eq!(uow.companies().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_name_rejected() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mut uow = db.unit_of_work().await.unwrap();

        uow.companies().add(&Company::new("Acme")).await.unwrap();
        let err = uow.companies().add(&Company::new("Acme")).await.unwrap_err();

        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_update_and_delete_missing() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mut uow = db.unit_of_work().await.unwrap();

        let mut acme = Company::new("Acme");
        uow.companies().add(&acme).await.unwrap();

        acme.name = "Acme Ltd".to_string();
        uow.companies().update(&acme).await.unwrap();
        let stored = uow.companies().get_by_id(&acme.id).await.unwrap().unwrap();
        assert_eq!(stored.name, "Acme Ltd");

        let ghost = Company::new("Ghost");
        assert!(matches!(
            uow.companies().update(&ghost).await,
            Err(DbError::NotFound { .. })
        ));
        assert!(matches!(
            uow.companies().delete(&ghost.id).await,
            Err(DbError::NotFound { .. })
        ));

        uow.companies().delete(&acme.id).await.unwrap();
        assert!(uow.companies().list().await.unwrap().is_empty());
    }
}
