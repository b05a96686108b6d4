//! Mail transport trait and error types.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::email::OutgoingEmail;

/// Errors that can occur while handing a message to the relay.
#[derive(Debug, Error)]
pub enum MailError {
    #[error("mail transport is not configured: {0} is missing")]
    NotConfigured(&'static str),

    #[error("invalid address '{address}'")]
    Address {
        address: String,
        #[source]
        source: lettre::address::AddressError,
    },

    #[error("failed to build message")]
    Message(#[from] lettre::error::Error),

    #[error("SMTP transport error")]
    Transport(#[from] lettre::transport::smtp::Error),

    #[error("message rejected by relay with code {0}")]
    Rejected(String),
}

/// Result type for mail operations.
pub type MailResult<T> = Result<T, MailError>;

/// Trait for dispatching outgoing email.
///
/// Implementations must be thread-safe; one instance is shared by all
/// concurrent submissions.
///
/// # Implementations
///
/// - [`crate::infrastructure::mail::SmtpMailer`] - SMTP relay via `lettre`
/// - [`crate::infrastructure::mail::DryRunMailer`] - logs messages without sending
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Sends one message and waits for the relay to accept it.
    ///
    /// # Errors
    ///
    /// Returns [`MailError`] when the transport is not configured, an address
    /// does not parse, or the relay is unreachable or refuses the message.
    async fn send(&self, email: OutgoingEmail) -> MailResult<()>;

    /// Checks whether the relay accepts connections.
    ///
    /// Used by health check endpoints to report mail status.
    async fn health_check(&self) -> bool;
}
