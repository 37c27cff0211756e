//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                        - Storefront page (opens a page session)
//! POST /pages/{page_id}/events  - Every click on the page (HTMX, out-of-band fragments)
//! GET  /health                  - Health check
//! GET  /static/*                - Stylesheet
//! ```

pub mod events;
pub mod home;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the page session routes router.
pub fn page_routes() -> Router<AppState> {
    Router::new().route("/{page_id}/events", post(events::handle))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .nest("/pages", page_routes())
}
