//! Mail transport that only logs.

use super::service::{MailResult, MailTransport};
use crate::domain::email::OutgoingEmail;
use async_trait::async_trait;
use tracing::{debug, info};

/// A transport that logs every message instead of sending it.
///
/// Enabled with `MAIL_DRY_RUN=true` for local development without a relay.
pub struct DryRunMailer;

impl DryRunMailer {
    /// Creates a new DryRunMailer instance.
    pub fn new() -> Self {
        debug!("Using DryRunMailer (messages are not sent)");
        Self
    }
}

impl Default for DryRunMailer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MailTransport for DryRunMailer {
    async fn send(&self, email: OutgoingEmail) -> MailResult<()> {
        info!(
            from = %email.from,
            to = %email.to,
            subject = %email.subject,
            body_len = email.body.len(),
            "Dry run: message not sent"
        );
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}
