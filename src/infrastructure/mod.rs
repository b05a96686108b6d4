//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces used by the application layer, providing
//! concrete implementations for outbound mail and content retrieval.
//!
//! # Modules
//!
//! - [`mail`] - Mail transport abstraction (SMTP and dry-run implementations)
//! - [`cms`] - Content store repositories (Sanity and no-op implementations)

pub mod cms;
pub mod mail;
