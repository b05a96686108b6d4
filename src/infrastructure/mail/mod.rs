//! Outbound mail for contact submissions.
//!
//! Provides a [`MailTransport`] trait with two implementations:
//! - [`SmtpMailer`] - Production SMTP relay
//! - [`DryRunMailer`] - Log-only implementation for local development

mod dry_run_mailer;
mod service;
mod smtp_mailer;

pub use dry_run_mailer::DryRunMailer;
pub use service::{MailError, MailResult, MailTransport};
pub use smtp_mailer::SmtpMailer;

#[cfg(test)]
pub use service::MockMailTransport;
