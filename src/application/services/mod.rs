//! Business logic services for the application layer.

pub mod contact_service;
pub mod portfolio_service;

pub use contact_service::{ContactError, ContactService, ContactSettings};
pub use portfolio_service::PortfolioService;
