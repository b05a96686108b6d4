//! # Portfolio Contact
//!
//! Backend for a personal portfolio site: relays contact form submissions by
//! email and serves portfolio content from a headless CMS. Built with Axum
//! and lettre.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Submission rules, outgoing messages, portfolio entities
//! - **Application Layer** ([`application`]) - Contact relay and portfolio services
//! - **Infrastructure Layer** ([`infrastructure`]) - SMTP transport and CMS access
//! - **API Layer** ([`api`]) - REST API handlers, DTOs, and middleware
//! - **Client** ([`client`]) - Contact form controller and HTTP submission client
//!
//! ## Contact pipeline
//!
//! 1. The form controller validates name, email and message locally
//! 2. `POST /api/contact` validates again and renders two messages
//! 3. The owner notification is sent, then the sender acknowledgement
//! 4. The endpoint answers `{"success":true}` or a generic failure
//!
//! ## Quick Start
//!
//! ```bash
//! export SMTP_HOST="smtp.gmail.com"
//! export SMTP_USER="me@gmail.com"
//! export SMTP_PASS="app-password"
//! export RECEIVER_EMAIL="me@gmail.com"
//!
//! cargo run
//!
//! # Submit from the terminal
//! cargo run --bin contact -- --name Ana --email ana@example.com --message Hi
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod client;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{
        ContactError, ContactService, ContactSettings, PortfolioService,
    };
    pub use crate::client::{ContactForm, FormStatus, HttpSubmissionClient, SubmitOutcome};
    pub use crate::domain::email::OutgoingEmail;
    pub use crate::domain::submission::{Field, FieldErrors, Submission};
    pub use crate::error::AppError;
    pub use crate::infrastructure::mail::{MailError, MailResult, MailTransport};
    pub use crate::state::AppState;
}
