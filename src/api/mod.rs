//! API Module
//!
//! HTTP handlers and routing for the contacts REST API.
//!
//! # Endpoints
//! - `GET /contacts` - List every contact
//! - `POST /contacts` - Create a contact
//! - `GET /contact/:id` - Fetch one contact
//! - `PATCH /contact/:id` - Update some fields of a contact
//! - `DELETE /contact/:id` - Delete a contact
//! - `GET /health` - Health check endpoint

pub mod extract;
pub mod handlers;
pub mod routes;

pub use extract::ContactPayload;
pub use handlers::*;
pub use routes::create_router;
