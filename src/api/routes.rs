//! API Routes
//!
//! Configures the Axum router with all contacts endpoints.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    create_contact_handler, delete_contact_handler, edit_contact_handler, get_contact_handler,
    health_handler, list_contacts_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/contacts",
            get(list_contacts_handler).post(create_contact_handler),
        )
        .route(
            "/contact/:id",
            get(get_contact_handler)
                .patch(edit_contact_handler)
                .delete(delete_contact_handler),
        )
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
