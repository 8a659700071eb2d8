//! The contact entity and the inputs the store accepts.

use serde::{Deserialize, Serialize};

/// A persisted contact record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Contact {
    /// Server-assigned identifier
    pub id: i64,
    pub name: String,
    /// Unique across all contacts
    pub phone: String,
}

/// Validated input for creating a contact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContact {
    pub name: String,
    pub phone: String,
}

impl NewContact {
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
        }
    }
}

/// Field-level changes for a partial update. `None` leaves the stored value alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactChanges {
    pub name: Option<String>,
    pub phone: Option<String>,
}

impl ContactChanges {
    /// Returns true if no field would change.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.phone.is_none()
    }
}
