//! Request DTOs for the contacts API
//!
//! Defines the structure of incoming HTTP request bodies. Both JSON and
//! urlencoded form bodies deserialize into these types.

use serde::Deserialize;

use crate::models::{ContactChanges, NewContact};

/// Request body for POST /contacts
///
/// Absent fields deserialize as empty strings so that a missing field and an
/// empty one produce the same validation error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateContactRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
}

impl CreateContactRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.name.is_empty() || self.phone.is_empty() {
            return Some("missing name and/or phone body parameters".to_string());
        }
        None
    }

    pub fn into_new_contact(self) -> NewContact {
        NewContact::new(self.name, self.phone)
    }
}

/// Request body for PATCH /contact/:id
///
/// Only the fields present in the body are changed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateContactRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl UpdateContactRequest {
    /// Validates the request data
    ///
    /// A field that is present must be non-empty.
    pub fn validate(&self) -> Option<String> {
        if self.name.as_deref() == Some("") {
            return Some("name cannot be empty".to_string());
        }
        if self.phone.as_deref() == Some("") {
            return Some("phone cannot be empty".to_string());
        }
        None
    }

    pub fn into_changes(self) -> ContactChanges {
        ContactChanges {
            name: self.name,
            phone: self.phone,
        }
    }
}
