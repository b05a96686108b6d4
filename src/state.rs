//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{ContactService, PortfolioService};

#[derive(Clone)]
pub struct AppState {
    pub contact_service: Arc<ContactService>,
    pub portfolio_service: Arc<PortfolioService>,
}

impl AppState {
    pub fn new(contact_service: ContactService, portfolio_service: PortfolioService) -> Self {
        Self {
            contact_service: Arc::new(contact_service),
            portfolio_service: Arc::new(portfolio_service),
        }
    }
}
