//! # Client Repository

use chrono::Utc;
use sqlx::SqliteConnection;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::repository::Repository;
use bill_core::Client;

/// Repository for client database operations.
#[derive(Debug)]
pub struct ClientRepository<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> ClientRepository<'c> {
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        ClientRepository { conn }
    }

    /// Counts all clients.
    pub async fn count(&mut self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM clients")
            .fetch_one(&mut *self.conn)
            .await?;

        Ok(count)
    }
}

impl Repository<Client> for ClientRepository<'_> {
    async fn get_by_id(&mut self, id: &str) -> DbResult<Option<Client>> {
        let client = sqlx::query_as::<_, Client>(
            "SELECT id, name, created_at, updated_at FROM clients WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(client)
    }

    async fn list(&mut self) -> DbResult<Vec<Client>> {
        let clients = sqlx::query_as::<_, Client>(
            "SELECT id, name, created_at, updated_at FROM clients ORDER BY name",
        )
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(clients)
    }

    async fn add(&mut self, client: &Client) -> DbResult<()> {
        debug!(id = %client.id, "Inserting client");

        sqlx::query(
            r#"
            INSERT INTO clients (id, name, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&client.id)
        .bind(&client.name)
        .bind(client.created_at)
        .bind(client.updated_at)
        .execute(&mut *self.conn)
        .await?;

        Ok(())
    }

    async fn update(&mut self, client: &Client) -> DbResult<()> {
        let result = sqlx::query("UPDATE clients SET name = ?2, updated_at = ?3 WHERE id = ?1")
            .bind(&client.id)
            .bind(&client.name)
            .bind(Utc::now())
            .execute(&mut *self.conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Client", &client.id));
        }

        Ok(())
    }

    /// Fails with a foreign key violation while invoices still bill this client.
    async fn delete(&mut self, id: &str) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM clients WHERE id = ?1")
            .bind(id)
            .execute(&mut *self.conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Client", id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};

    #[tokio::test]
    async fn test_client_crud() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mut uow = db.unit_of_work().await.unwrap();

        let mut client = Client::new("Zed");
        uow.clients().add(&client).await.unwrap();
        uow.clients().add(&Client::new("Amy")).await.unwrap();

        let names: Vec<String> = uow
            .clients()
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Amy", "Zed"]);

        client.name = "Zed Jr".to_string();
        uow.clients().update(&client).await.unwrap();
        assert_eq!(
            uow.clients().get_by_id(&client.id).await.unwrap().unwrap().name,
            "Zed Jr"
        );

        uow.clients().delete(&client.id).await.unwrap();
        assert_eq!(uow.clients().count().await.unwrap(), 1);
        assert!(matches!(
            uow.clients().delete(&client.id).await,
            Err(DbError::NotFound { .. })
        ));
    }
}
