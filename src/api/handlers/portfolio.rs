//! Handlers for the portfolio content endpoints.

use axum::{
    Json,
    extract::{Query, State},
};
use std::sync::Arc;
use validator::Validate;

use crate::api::dto::portfolio::{ProjectsQuery, ProjectsResponse};
use crate::domain::entities::Portfolio;
use crate::error::AppError;
use crate::state::AppState;

/// Returns every portfolio section.
///
/// # Endpoint
///
/// `GET /api/portfolio`
///
/// # Errors
///
/// - **502 Bad Gateway**: Content store unreachable or answered with an error
/// - **500 Internal Server Error**: Content store returned a malformed document
pub async fn portfolio_handler(
    State(state): State<AppState>,
) -> Result<Json<Arc<Portfolio>>, AppError> {
    let portfolio = state.portfolio_service.portfolio().await?;
    Ok(Json(portfolio))
}

/// Returns the project list, optionally filtered.
///
/// # Endpoint
///
/// `GET /api/portfolio/projects?q=scanner&featured=true`
///
/// # Query Parameters
///
/// - `q` (optional): Case-insensitive title search, at most 100 characters
/// - `featured` (optional): Only featured projects, first three
pub async fn projects_handler(
    State(state): State<AppState>,
    Query(params): Query<ProjectsQuery>,
) -> Result<Json<ProjectsResponse>, AppError> {
    params.validate()?;

    let items = state.portfolio_service.projects(&params.into()).await?;

    Ok(Json(ProjectsResponse {
        total: items.len(),
        items,
    }))
}
