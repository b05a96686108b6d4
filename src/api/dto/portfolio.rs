//! DTOs for the portfolio endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::{Project, ProjectFilter};

/// Query parameters of `GET /api/portfolio/projects`.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ProjectsQuery {
    /// Case-insensitive title search.
    #[validate(length(max = 100, message = "Search term is too long"))]
    pub q: Option<String>,

    /// Only featured projects.
    pub featured: Option<bool>,
}

impl From<ProjectsQuery> for ProjectFilter {
    fn from(query: ProjectsQuery) -> Self {
        ProjectFilter {
            search: query.q,
            featured_only: query.featured.unwrap_or(false),
        }
    }
}

/// Project list response.
#[derive(Debug, Serialize)]
pub struct ProjectsResponse {
    pub total: usize,
    pub items: Vec<Project>,
}
