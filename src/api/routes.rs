//! API route configuration.

use crate::api::handlers::{contact_handler, portfolio_handler, projects_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// All API routes.
///
/// # Endpoints
///
/// - `POST /contact`             - Relay a contact form submission
/// - `GET  /portfolio`           - Full portfolio content
/// - `GET  /portfolio/projects`  - Project list with search and featured filter
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/contact", post(contact_handler))
        .route("/portfolio", get(portfolio_handler))
        .route("/portfolio/projects", get(projects_handler))
}
