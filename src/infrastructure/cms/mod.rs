//! Headless CMS access for the portfolio API.
//!
//! Provides two [`ContentRepository`](crate::domain::repositories::ContentRepository)
//! implementations:
//! - [`SanityRepository`] - Sanity GROQ query API over HTTP
//! - [`NullContentRepository`] - Empty store for deployments without a CMS

mod null_repository;
mod sanity_repository;

pub use null_repository::NullContentRepository;
pub use sanity_repository::SanityRepository;
