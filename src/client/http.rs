//! Submission transport used by the form controller.

use async_trait::async_trait;
use std::sync::LazyLock;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use crate::api::dto::contact::{ContactRequest, ContactResponse};
use crate::domain::submission::Submission;

static USER_AGENT: LazyLock<String> =
    LazyLock::new(|| format!("portfolio-contact/{}", env!("CARGO_PKG_VERSION")));

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// What came back from one submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The endpoint answered with a success status.
    Accepted,
    /// The endpoint answered with any other status.
    Rejected {
        status: u16,
        /// Parsed response envelope, when the body was one.
        body: Option<ContactResponse>,
    },
    /// No response was received at all.
    Unreachable(String),
}

/// Sends one submission to the contact endpoint.
///
/// Implementations never retry; every call is exactly one request.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmissionClient: Send + Sync {
    async fn send(&self, submission: Submission) -> SubmitOutcome;
}

/// [`SubmissionClient`] that POSTs JSON to the contact endpoint.
#[derive(Debug, Clone)]
pub struct HttpSubmissionClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl HttpSubmissionClient {
    /// Creates a client for the given endpoint, e.g.
    /// `http://localhost:3000/api/contact`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn new(endpoint: Url) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT.as_str())
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl SubmissionClient for HttpSubmissionClient {
    async fn send(&self, submission: Submission) -> SubmitOutcome {
        let request = ContactRequest::from(&submission);

        let response = match self
            .http
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(endpoint = %self.endpoint, error = %e, "Contact endpoint unreachable");
                return SubmitOutcome::Unreachable(e.to_string());
            }
        };

        let status = response.status();
        debug!(status = status.as_u16(), "Contact endpoint responded");

        if status.is_success() {
            return SubmitOutcome::Accepted;
        }

        SubmitOutcome::Rejected {
            status: status.as_u16(),
            body: response.json::<ContactResponse>().await.ok(),
        }
    }
}
