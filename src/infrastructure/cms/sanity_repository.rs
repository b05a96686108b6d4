//! Sanity HTTP query API implementation of [`ContentRepository`].

use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use crate::config::CmsSettings;
use crate::domain::repositories::{ContentError, ContentRepository, DocumentQuery};
use crate::utils::image_url::ImageUrlBuilder;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Response envelope of the query endpoint: `{ "query": ..., "result": ... }`.
#[derive(Debug, Deserialize)]
struct QueryEnvelope {
    #[serde(default)]
    result: Value,
}

/// Reads documents through Sanity's GROQ query endpoint.
pub struct SanityRepository {
    http: reqwest::Client,
    query_url: Url,
    images: ImageUrlBuilder,
}

impl SanityRepository {
    /// Creates a repository for the configured project and dataset.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint URL cannot be built or the HTTP
    /// client fails to initialize.
    pub fn new(settings: &CmsSettings) -> Result<Self> {
        let query_url = Url::parse(&query_endpoint(settings))?;
        let images = ImageUrlBuilder::new(&settings.project_id, &settings.dataset);

        Self::with_endpoint(query_url, images)
    }

    /// Creates a repository against an explicit query endpoint.
    pub fn with_endpoint(query_url: Url, images: ImageUrlBuilder) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            query_url,
            images,
        })
    }

    /// Runs a raw GROQ query and returns its `result`.
    async fn run(&self, groq: &str) -> Result<Value, ContentError> {
        let mut url = self.query_url.clone();
        url.query_pairs_mut().append_pair("query", groq);

        debug!(query = groq, "Querying content store");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| ContentError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), query = groq, "Content store query failed");
            return Err(ContentError::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ContentError::Transport(e.to_string()))?;

        let envelope: QueryEnvelope = serde_json::from_slice(&body)?;
        Ok(envelope.result)
    }
}

#[async_trait]
impl ContentRepository for SanityRepository {
    async fn query(&self, query: &DocumentQuery) -> Result<Vec<Value>, ContentError> {
        let documents = match self.run(&query.to_groq()).await? {
            Value::Array(documents) => documents,
            Value::Null => Vec::new(),
            document => vec![document],
        };

        Ok(documents)
    }

    fn image_url(&self, reference: &str) -> Option<String> {
        self.images.resolve(reference)
    }

    fn is_enabled(&self) -> bool {
        true
    }

    async fn health_check(&self) -> bool {
        self.run(r#"count(*[_type == "about"])"#).await.is_ok()
    }
}

/// `https://<project>.api[cdn].sanity.io/v<version>/data/query/<dataset>`
fn query_endpoint(settings: &CmsSettings) -> String {
    let host = if settings.use_cdn {
        "apicdn.sanity.io"
    } else {
        "api.sanity.io"
    };

    format!(
        "https://{}.{}/v{}/data/query/{}",
        settings.project_id, host, settings.api_version, settings.dataset
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(use_cdn: bool) -> CmsSettings {
        CmsSettings {
            project_id: "cjwn5jgq".to_string(),
            dataset: "production".to_string(),
            api_version: "2023-01-01".to_string(),
            use_cdn,
        }
    }

    #[test]
    fn test_query_endpoint_cdn() {
        assert_eq!(
            query_endpoint(&settings(true)),
            "https://cjwn5jgq.apicdn.sanity.io/v2023-01-01/data/query/production"
        );
    }

    #[test]
    fn test_query_endpoint_live_api() {
        assert_eq!(
            query_endpoint(&settings(false)),
            "https://cjwn5jgq.api.sanity.io/v2023-01-01/data/query/production"
        );
    }

    #[test]
    fn test_repository_resolves_images_for_its_project() {
        let repository = SanityRepository::new(&settings(true)).unwrap();

        assert!(repository.is_enabled());
        assert_eq!(
            repository.image_url("image-abc-10x10-webp").unwrap(),
            "https://cdn.sanity.io/images/cjwn5jgq/production/abc-10x10.webp"
        );
    }
}
