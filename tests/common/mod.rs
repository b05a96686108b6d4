#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use portfolio_contact::application::services::{ContactService, ContactSettings, PortfolioService};
use portfolio_contact::domain::email::OutgoingEmail;
use portfolio_contact::domain::repositories::ContentRepository;
use portfolio_contact::infrastructure::cms::NullContentRepository;
use portfolio_contact::infrastructure::mail::{MailError, MailResult, MailTransport};
use portfolio_contact::state::AppState;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

pub const RECEIVER: &str = "owner@example.com";
pub const SENDER: &str = "site@example.com";
pub const SIGNATURE: &str = "Jane Doe";

/// Mail transport that records every message it is asked to send.
#[derive(Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<OutgoingEmail>>,
    fail_at: Option<usize>,
    unhealthy: bool,
}

impl RecordingTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Fails the `index`-th send (0 = owner notification).
    pub fn failing_at(index: usize) -> Arc<Self> {
        Arc::new(Self {
            fail_at: Some(index),
            ..Self::default()
        })
    }

    pub fn unhealthy() -> Arc<Self> {
        Arc::new(Self {
            unhealthy: true,
            ..Self::default()
        })
    }

    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MailTransport for RecordingTransport {
    async fn send(&self, email: OutgoingEmail) -> MailResult<()> {
        let mut sent = self.sent.lock().unwrap();
        if self.fail_at == Some(sent.len()) {
            return Err(MailError::Rejected("535 authentication failed".to_string()));
        }
        sent.push(email);
        Ok(())
    }

    async fn health_check(&self) -> bool {
        !self.unhealthy
    }
}

pub fn contact_settings() -> ContactSettings {
    ContactSettings {
        receiver: Some(RECEIVER.to_string()),
        sender: Some(SENDER.to_string()),
        signature: SIGNATURE.to_string(),
    }
}

pub fn create_test_state(
    transport: Arc<dyn MailTransport>,
    repository: Arc<dyn ContentRepository>,
) -> AppState {
    AppState::new(
        ContactService::new(transport, contact_settings()),
        PortfolioService::new(repository, Duration::from_secs(60)),
    )
}

pub fn contact_state(transport: Arc<dyn MailTransport>) -> AppState {
    contact_state_with(transport, contact_settings())
}

pub fn contact_state_with(transport: Arc<dyn MailTransport>, settings: ContactSettings) -> AppState {
    AppState::new(
        ContactService::new(transport, settings),
        PortfolioService::new(
            Arc::new(NullContentRepository::new()),
            Duration::from_secs(60),
        ),
    )
}

/// Serves `app` on an ephemeral local port.
pub async fn spawn_app(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    addr
}
