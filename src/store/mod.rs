//! Store Module
//!
//! Durable CRUD access to contact records. Handlers depend only on the
//! [`ContactStore`] trait; [`SqliteContactStore`] is the SQLite-backed
//! implementation.

pub mod migrations;
mod sqlite;


use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Contact, ContactChanges, NewContact};

pub use sqlite::SqliteContactStore;

// == Contact Store ==
/// Persistence capability for contacts.
///
/// Every operation is a single statement and independently transactional.
#[async_trait]
pub trait ContactStore: Send + Sync {
    /// Fetches one contact, failing with `NotFound` when no row matches.
    async fn get_contact(&self, id: i64) -> Result<Contact>;

    /// Returns every contact. An empty table yields an empty vec.
    async fn list_contacts(&self) -> Result<Vec<Contact>>;

    /// Inserts a contact and returns it with its assigned id.
    ///
    /// A duplicate phone surfaces as a persistence error.
    async fn create_contact(&self, contact: NewContact) -> Result<Contact>;

    /// Overwrites the provided fields of an existing contact.
    async fn edit_contact(&self, id: i64, changes: ContactChanges) -> Result<Contact>;

    /// Removes a contact. Deleting an unknown id is not an error.
    async fn delete_contact(&self, id: i64) -> Result<()>;
}
