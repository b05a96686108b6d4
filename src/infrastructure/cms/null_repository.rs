//! Content repository used when no CMS is configured.

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::domain::repositories::{ContentError, ContentRepository, DocumentQuery};

/// A repository with no documents.
///
/// Used when `CMS_PROJECT_ID` is not set: the portfolio API serves an empty
/// portfolio instead of failing.
pub struct NullContentRepository;

impl NullContentRepository {
    /// Creates a new NullContentRepository instance.
    pub fn new() -> Self {
        debug!("Using NullContentRepository (CMS disabled)");
        Self
    }
}

impl Default for NullContentRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContentRepository for NullContentRepository {
    async fn query(&self, _query: &DocumentQuery) -> Result<Vec<Value>, ContentError> {
        Ok(Vec::new())
    }

    fn image_url(&self, _reference: &str) -> Option<String> {
        None
    }

    fn is_enabled(&self) -> bool {
        false
    }

    async fn health_check(&self) -> bool {
        true
    }
}
