//! API Handlers
//!
//! HTTP request handlers for each contacts endpoint. Each handler parses its
//! input, delegates to the store, and serializes the result.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use super::extract::ContactPayload;
use crate::error::{ContactError, Result};
use crate::models::{Contact, CreateContactRequest, HealthResponse, UpdateContactRequest};
use crate::store::ContactStore;

/// Application state shared across all handlers.
///
/// Holds the store behind a trait object so any `ContactStore` can be injected.
#[derive(Clone)]
pub struct AppState {
    /// Contact persistence
    pub store: Arc<dyn ContactStore>,
}

impl AppState {
    /// Creates a new AppState around the given store.
    pub fn new(store: impl ContactStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

/// Parses a contact id path segment.
///
/// Any integer is accepted; ids with no matching row are the store's concern.
fn parse_id(raw: &str) -> Result<i64> {
    raw.parse::<i64>()
        .map_err(|err| ContactError::InvalidRequest(format!("error parsing id: {err}")))
}

/// Handler for GET /contacts
pub async fn list_contacts_handler(State(state): State<AppState>) -> Result<Json<Vec<Contact>>> {
    let contacts = state.store.list_contacts().await?;
    Ok(Json(contacts))
}

/// Handler for GET /contact/:id
pub async fn get_contact_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Contact>> {
    let id = parse_id(&id)?;
    let contact = state.store.get_contact(id).await?;

    Ok(Json(contact))
}

/// Handler for POST /contacts
///
/// Accepts a JSON or form body. Both `name` and `phone` are required.
pub async fn create_contact_handler(
    State(state): State<AppState>,
    ContactPayload(req): ContactPayload<CreateContactRequest>,
) -> Result<Json<Contact>> {
    if let Some(error_msg) = req.validate() {
        return Err(ContactError::InvalidRequest(error_msg));
    }

    let contact = state.store.create_contact(req.into_new_contact()).await?;
    info!(id = contact.id, "contact created");

    Ok(Json(contact))
}

/// Handler for PATCH /contact/:id
///
/// The contact must exist before the body is looked at, so an unknown id is
/// a 404 even when the body is malformed.
pub async fn edit_contact_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: std::result::Result<ContactPayload<UpdateContactRequest>, ContactError>,
) -> Result<Json<Contact>> {
    let id = parse_id(&id)?;
    let existing = state.store.get_contact(id).await?;

    let ContactPayload(req) = payload?;
    if let Some(error_msg) = req.validate() {
        return Err(ContactError::InvalidRequest(error_msg));
    }

    let changes = req.into_changes();
    if changes.is_empty() {
        return Ok(Json(existing));
    }

    let contact = state.store.edit_contact(id, changes).await?;
    info!(id, "contact updated");

    Ok(Json(contact))
}

/// Handler for DELETE /contact/:id
///
/// Responds 204 whether or not the contact existed.
pub async fn delete_contact_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let id = parse_id(&id)?;
    state.store.delete_contact(id).await?;
    info!(id, "contact deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
