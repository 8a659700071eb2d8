//! SQLite Store Module
//!
//! `ContactStore` implementation over an sqlx connection pool.

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::{debug, info};

use super::migrations::apply_migrations;
use super::ContactStore;
use crate::config::Config;
use crate::error::{ContactError, Result};
use crate::models::{Contact, ContactChanges, NewContact};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

// == SQLite Contact Store ==
/// Contact storage backed by a single SQLite table.
///
/// Cloning is cheap; clones share the underlying pool.
#[derive(Debug, Clone)]
pub struct SqliteContactStore {
    pool: SqlitePool,
}

impl SqliteContactStore {
    // == Constructors ==
    /// Opens the database named by `config.database_url` and applies migrations.
    ///
    /// The database file is created if it does not exist.
    pub async fn connect(config: &Config) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(&config.database_url)?
            .create_if_missing(true)
            .busy_timeout(BUSY_TIMEOUT);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await?;
        info!(url = %config.database_url, "database connected");

        Self::from_pool(pool).await
    }

    /// Opens a private in-memory database with migrations applied.
    ///
    /// The pool holds exactly one connection that is never recycled, since each
    /// SQLite in-memory connection is its own database.
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        Self::from_pool(pool).await
    }

    /// Wraps an existing pool, applying pending migrations first.
    pub async fn from_pool(pool: SqlitePool) -> Result<Self> {
        apply_migrations(&pool).await?;
        Ok(Self { pool })
    }

    /// Returns the underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Closes every pooled connection.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl ContactStore for SqliteContactStore {
    async fn get_contact(&self, id: i64) -> Result<Contact> {
        sqlx::query_as::<_, Contact>("SELECT id, name, phone FROM contacts WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(ContactError::NotFound(id))
    }

    async fn list_contacts(&self) -> Result<Vec<Contact>> {
        let contacts =
            sqlx::query_as::<_, Contact>("SELECT id, name, phone FROM contacts ORDER BY id")
                .fetch_all(&self.pool)
                .await?;
        debug!(count = contacts.len(), "listed contacts");
        Ok(contacts)
    }

    async fn create_contact(&self, contact: NewContact) -> Result<Contact> {
        let created = sqlx::query_as::<_, Contact>(
            "INSERT INTO contacts (name, phone) VALUES (?, ?) RETURNING id, name, phone",
        )
        .bind(contact.name)
        .bind(contact.phone)
        .fetch_one(&self.pool)
        .await?;
        debug!(id = created.id, "created contact");
        Ok(created)
    }

    async fn edit_contact(&self, id: i64, changes: ContactChanges) -> Result<Contact> {
        let updated = sqlx::query_as::<_, Contact>(
            "UPDATE contacts SET name = COALESCE(?, name), phone = COALESCE(?, phone) \
             WHERE id = ? RETURNING id, name, phone",
        )
        .bind(changes.name)
        .bind(changes.phone)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(ContactError::NotFound(id))?;
        debug!(id, "updated contact");
        Ok(updated)
    }

    async fn delete_contact(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM contacts WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        debug!(id, removed = result.rows_affected(), "deleted contact");
        Ok(())
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::migrations::{current_version, latest_version};

    async fn test_store() -> SqliteContactStore {
        SqliteContactStore::in_memory().await.unwrap()
    }

    #[tokio::test]
    async fn test_store_migrated() {
        let store = test_store().await;
        let version = current_version(store.pool()).await.unwrap();
        assert_eq!(version, latest_version());
    }

    #[tokio::test]
    async fn test_migrations_idempotent() {
        let store = test_store().await;
        store
            .create_contact(NewContact::new("Ada", "555-1111"))
            .await
            .unwrap();

        // Re-applying on an up-to-date database keeps existing rows
        apply_migrations(store.pool()).await.unwrap();
        assert_eq!(store.list_contacts().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_rejects_newer_schema() {
        let store = test_store().await;
        sqlx::raw_sql("PRAGMA user_version = 99")
            .execute(store.pool())
            .await
            .unwrap();

        let result = apply_migrations(store.pool()).await;
        assert!(matches!(
            result,
            Err(ContactError::UnsupportedSchemaVersion { db_version: 99, .. })
        ));
    }

    #[tokio::test]
    async fn test_list_empty() {
        let store = test_store().await;
        assert!(store.list_contacts().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let store = test_store().await;

        let created = store
            .create_contact(NewContact::new("Ada", "555-1111"))
            .await
            .unwrap();
        assert!(created.id > 0);

        let fetched = store.get_contact(created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_get_nonexistent() {
        let store = test_store().await;

        let result = store.get_contact(12).await;
        assert!(matches!(result, Err(ContactError::NotFound(12))));
    }

    #[tokio::test]
    async fn test_duplicate_phone_rejected() {
        let store = test_store().await;

        store
            .create_contact(NewContact::new("Ada", "555-1111"))
            .await
            .unwrap();
        let result = store
            .create_contact(NewContact::new("Grace", "555-1111"))
            .await;

        assert!(matches!(result, Err(ContactError::Persistence(_))));
        assert_eq!(store.list_contacts().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_edit_partial() {
        let store = test_store().await;
        let created = store
            .create_contact(NewContact::new("Ada", "555-1111"))
            .await
            .unwrap();

        let changes = ContactChanges {
            name: Some("Ada L.".to_string()),
            phone: None,
        };
        let updated = store.edit_contact(created.id, changes).await.unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Ada L.");
        assert_eq!(updated.phone, "555-1111");

        assert_eq!(store.get_contact(created.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_edit_to_taken_phone_fails() {
        let store = test_store().await;
        store
            .create_contact(NewContact::new("Ada", "555-1111"))
            .await
            .unwrap();
        let grace = store
            .create_contact(NewContact::new("Grace", "555-2222"))
            .await
            .unwrap();

        let changes = ContactChanges {
            name: None,
            phone: Some("555-1111".to_string()),
        };
        let result = store.edit_contact(grace.id, changes).await;
        assert!(matches!(result, Err(ContactError::Persistence(_))));
        assert_eq!(store.get_contact(grace.id).await.unwrap().phone, "555-2222");
    }

    #[tokio::test]
    async fn test_edit_nonexistent() {
        let store = test_store().await;

        let result = store.edit_contact(5, ContactChanges::default()).await;
        assert!(matches!(result, Err(ContactError::NotFound(5))));
    }

    #[tokio::test]
    async fn test_delete() {
        let store = test_store().await;
        let created = store
            .create_contact(NewContact::new("Ada", "555-1111"))
            .await
            .unwrap();

        store.delete_contact(created.id).await.unwrap();
        assert!(matches!(
            store.get_contact(created.id).await,
            Err(ContactError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_nonexistent() {
        let store = test_store().await;
        assert!(store.delete_contact(404).await.is_ok());
    }

    #[tokio::test]
    async fn test_ids_not_reused_after_delete() {
        let store = test_store().await;
        let first = store
            .create_contact(NewContact::new("Ada", "555-1111"))
            .await
            .unwrap();
        store.delete_contact(first.id).await.unwrap();

        let second = store
            .create_contact(NewContact::new("Ada", "555-1111"))
            .await
            .unwrap();
        assert!(second.id > first.id);
    }
}
