//! Repository trait definitions for the domain layer.
//!
//! These traits abstract read access to external content following the
//! Repository pattern. Concrete implementations live in
//! `crate::infrastructure::cms`; mock implementations are auto-generated via
//! `mockall` for testing.

pub mod content_repository;

pub use content_repository::{ContentError, ContentRepository, DocumentQuery, DocumentType};

#[cfg(test)]
pub use content_repository::MockContentRepository;
