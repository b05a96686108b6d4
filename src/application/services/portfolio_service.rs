//! Portfolio content service backed by the headless CMS.

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::domain::entities::{
    About, ContactInfo, Education, Experience, Portfolio, Project, ProjectFilter, Skill, Tool,
};
use crate::domain::repositories::{ContentError, ContentRepository, DocumentQuery, DocumentType};

struct Snapshot {
    portfolio: Arc<Portfolio>,
    fetched_at: Instant,
}

/// Assembles the portfolio from CMS documents.
///
/// The assembled portfolio is reused until the revalidation window elapses;
/// the next request after that refetches every document type.
pub struct PortfolioService {
    repository: Arc<dyn ContentRepository>,
    revalidate: Duration,
    snapshot: RwLock<Option<Snapshot>>,
}

impl PortfolioService {
    /// Creates a new portfolio service.
    pub fn new(repository: Arc<dyn ContentRepository>, revalidate: Duration) -> Self {
        Self {
            repository,
            revalidate,
            snapshot: RwLock::new(None),
        }
    }

    /// Returns the full portfolio.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError`] if any document type fails to load. An expired
    /// snapshot is never served, so the next request retries the fetch.
    ///
    /// A refresh holds the write lock for the whole fetch. Concurrent callers
    /// wait for it, up to the content store's request timeout, and then
    /// share its result instead of fetching again.
    pub async fn portfolio(&self) -> Result<Arc<Portfolio>, ContentError> {
        if let Some(snapshot) = self.snapshot.read().await.as_ref()
            && snapshot.fetched_at.elapsed() < self.revalidate
        {
            return Ok(Arc::clone(&snapshot.portfolio));
        }

        let mut guard = self.snapshot.write().await;

        // Another request may have refreshed while this one waited.
        if let Some(snapshot) = guard.as_ref()
            && snapshot.fetched_at.elapsed() < self.revalidate
        {
            return Ok(Arc::clone(&snapshot.portfolio));
        }

        let portfolio = Arc::new(self.fetch().await?);
        *guard = Some(Snapshot {
            portfolio: Arc::clone(&portfolio),
            fetched_at: Instant::now(),
        });

        info!(
            projects = portfolio.projects.len(),
            skills = portfolio.skills.len(),
            "Portfolio refreshed from content store"
        );

        Ok(portfolio)
    }

    /// Returns the projects selected by `filter`, in CMS order.
    pub async fn projects(&self, filter: &ProjectFilter) -> Result<Vec<Project>, ContentError> {
        let portfolio = self.portfolio().await?;
        Ok(filter.apply(&portfolio.projects))
    }

    pub fn is_enabled(&self) -> bool {
        self.repository.is_enabled()
    }

    pub async fn health_check(&self) -> bool {
        self.repository.health_check().await
    }

    async fn fetch(&self) -> Result<Portfolio, ContentError> {
        debug!("Fetching portfolio documents");

        let (about, skills, experience, education, projects, tools, contact) = tokio::try_join!(
            self.load::<About>(DocumentQuery::all(DocumentType::About)),
            self.load::<Skill>(DocumentQuery::all(DocumentType::Skill)),
            self.load::<Experience>(DocumentQuery::newest_first(
                DocumentType::Experience,
                "startDate"
            )),
            self.load::<Education>(DocumentQuery::newest_first(
                DocumentType::Education,
                "startDate"
            )),
            self.load::<Project>(DocumentQuery::all(DocumentType::Project)),
            self.load::<Tool>(DocumentQuery::all(DocumentType::Tool)),
            self.load::<ContactInfo>(DocumentQuery::all(DocumentType::Contact)),
        )?;

        let about = about.into_iter().next().map(|mut about| {
            about.profile_picture_url = about
                .profile_picture
                .as_ref()
                .and_then(|image| self.repository.image_url(&image.asset.reference));
            about
        });

        let projects = projects
            .into_iter()
            .map(|mut project| {
                project.image_url = project
                    .image
                    .as_ref()
                    .and_then(|image| self.repository.image_url(&image.asset.reference));
                project
            })
            .collect();

        Ok(Portfolio {
            about,
            skills,
            experience,
            education,
            projects,
            tools,
            contact: contact.into_iter().next(),
        })
    }

    async fn load<T: DeserializeOwned>(&self, query: DocumentQuery) -> Result<Vec<T>, ContentError> {
        self.repository
            .query(&query)
            .await?
            .into_iter()
            .map(|document: Value| serde_json::from_value(document).map_err(ContentError::from))
            .collect()
    }
}
