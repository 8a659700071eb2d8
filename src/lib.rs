//! Contacts API - A small contact book HTTP service
//!
//! Provides create, read, update and delete over contact records stored in SQLite.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod store;

pub use api::AppState;
pub use config::Config;
pub use error::ContactError;
pub use store::{ContactStore, SqliteContactStore};
