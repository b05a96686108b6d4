//! Domain layer containing business entities and rules.
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers.
//!
//! # Architecture
//!
//! - [`submission`] - Contact form submission and its validation rules
//! - [`email`] - The two messages derived from a submission
//! - [`entities`] - Portfolio content documents
//! - [`repositories`] - Content store trait definitions
//!
//! # Submission Flow
//!
//! 1. The form controller checks a [`submission::Submission`] locally
//! 2. The HTTP handler checks it again with the same rules
//! 3. [`crate::application::services::ContactService`] renders both
//!    [`email::OutgoingEmail`] values and dispatches them in order

pub mod email;
pub mod entities;
pub mod repositories;
pub mod submission;
