//! Repository trait for read access to the headless content store.

use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Document types the portfolio reads from the content store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentType {
    About,
    Skill,
    Experience,
    Education,
    Project,
    Tool,
    Contact,
}

impl DocumentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::About => "about",
            DocumentType::Skill => "skill",
            DocumentType::Experience => "experience",
            DocumentType::Education => "education",
            DocumentType::Project => "project",
            DocumentType::Tool => "tool",
            DocumentType::Contact => "contact",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// All documents of one type, optionally ordered by a field, newest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentQuery {
    pub doc_type: DocumentType,
    pub order_desc_by: Option<&'static str>,
}

impl DocumentQuery {
    pub fn all(doc_type: DocumentType) -> Self {
        Self {
            doc_type,
            order_desc_by: None,
        }
    }

    pub fn newest_first(doc_type: DocumentType, field: &'static str) -> Self {
        Self {
            doc_type,
            order_desc_by: Some(field),
        }
    }

    /// Renders the query as GROQ, e.g. `*[_type == "experience"] | order(startDate desc)`.
    pub fn to_groq(&self) -> String {
        match self.order_desc_by {
            Some(field) => format!(
                "*[_type == \"{}\"] | order({} desc)",
                self.doc_type, field
            ),
            None => format!("*[_type == \"{}\"]", self.doc_type),
        }
    }
}

/// Errors reading from the content store.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("content store request failed: {0}")]
    Transport(String),

    #[error("content store responded with status {0}")]
    Status(u16),

    #[error("malformed content document: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Repository interface over the headless CMS.
///
/// # Implementations
///
/// - [`crate::infrastructure::cms::SanityRepository`] - Sanity HTTP query API
/// - [`crate::infrastructure::cms::NullContentRepository`] - CMS not configured
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentRepository: Send + Sync {
    /// Fetches raw documents matching the query.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError`] when the store is unreachable, answers with a
    /// non-success status or returns a malformed body.
    async fn query(&self, query: &DocumentQuery) -> Result<Vec<Value>, ContentError>;

    /// Resolves an image asset reference to a public URL.
    ///
    /// Returns `None` for references that cannot be resolved.
    fn image_url(&self, reference: &str) -> Option<String>;

    /// Whether a real content store is behind this repository.
    fn is_enabled(&self) -> bool;

    /// Checks whether the store answers queries.
    async fn health_check(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groq_for_all_documents() {
        assert_eq!(
            DocumentQuery::all(DocumentType::Skill).to_groq(),
            r#"*[_type == "skill"]"#
        );
    }

    #[test]
    fn test_groq_with_ordering() {
        assert_eq!(
            DocumentQuery::newest_first(DocumentType::Experience, "startDate").to_groq(),
            r#"*[_type == "experience"] | order(startDate desc)"#
        );
    }
}
