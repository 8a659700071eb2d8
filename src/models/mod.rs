//! Domain and transport models for the contacts API
//!
//! `Contact` is the persisted entity. Request and response DTOs are kept
//! separate so partial updates can track which fields were provided.

pub mod contact;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use contact::{Contact, ContactChanges, NewContact};
pub use requests::{CreateContactRequest, UpdateContactRequest};
pub use responses::{ErrorResponse, HealthResponse};
