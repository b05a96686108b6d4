//! Client side of the contact pipeline.
//!
//! [`ContactForm`] holds the field values, per-field errors and the status
//! line. It validates locally and hands a valid [`Submission`](crate::domain::submission::Submission)
//! to a [`SubmissionClient`], which performs the single request.
//!
//! # Modules
//!
//! - [`form`] - Form state, validation and status mapping
//! - [`http`] - Submission client over HTTP

pub mod form;
pub mod http;

pub use form::{ContactForm, FormStatus};
pub use http::{HttpSubmissionClient, SubmissionClient, SubmitOutcome};

#[cfg(test)]
pub use http::MockSubmissionClient;
