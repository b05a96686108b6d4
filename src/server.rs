//! HTTP server initialization and runtime setup.
//!
//! Wires the mail transport and content repository into services and runs
//! the Axum server until a shutdown signal arrives.

use crate::application::services::{ContactService, ContactSettings, PortfolioService};
use crate::config::Config;
use crate::domain::repositories::ContentRepository;
use crate::infrastructure::cms::{NullContentRepository, SanityRepository};
use crate::infrastructure::mail::{DryRunMailer, MailTransport, SmtpMailer};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

/// Builds the application state from configuration.
///
/// # Errors
///
/// Returns an error if the CMS HTTP client cannot be created.
pub fn build_state(config: &Config) -> Result<AppState> {
    let transport: Arc<dyn MailTransport> = if config.mail_dry_run {
        tracing::warn!("MAIL_DRY_RUN enabled: messages are logged, not sent");
        Arc::new(DryRunMailer::new())
    } else {
        Arc::new(SmtpMailer::new(config.smtp.clone()))
    };

    let repository: Arc<dyn ContentRepository> = match &config.cms {
        Some(cms) => {
            tracing::info!(project = %cms.project_id, dataset = %cms.dataset, "CMS enabled (Sanity)");
            Arc::new(SanityRepository::new(cms)?)
        }
        None => {
            tracing::info!("CMS disabled (NullContentRepository)");
            Arc::new(NullContentRepository::new())
        }
    };

    let contact_service = ContactService::new(
        transport,
        ContactSettings {
            receiver: config.receiver_email.clone(),
            sender: config.sender_email.clone(),
            signature: config.contact_signature.clone(),
        },
    );

    let portfolio_service = PortfolioService::new(
        repository,
        Duration::from_secs(config.cms_revalidate_seconds),
    );

    Ok(AppState::new(contact_service, portfolio_service))
}

/// Runs the HTTP server with the given configuration.
///
/// The SMTP connection pool is created on the first submission and released
/// when the server stops.
///
/// # Errors
///
/// Returns an error if:
/// - The CMS client cannot be created
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let state = build_state(&config)?;

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
