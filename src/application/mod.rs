//! Application layer services implementing business logic.
//!
//! Services consume the mail transport and content repository traits and
//! provide a clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::contact_service::ContactService`] - Contact submission relay
//! - [`services::portfolio_service::PortfolioService`] - Portfolio content with revalidation

pub mod services;
