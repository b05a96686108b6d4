//! SMTP relay transport built on `lettre`.

use async_trait::async_trait;
use lettre::message::{Mailbox, header::ContentType};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use super::service::{MailError, MailResult, MailTransport};
use crate::config::{SmtpSecurity, SmtpSettings};
use crate::domain::email::OutgoingEmail;

type SmtpTransport = AsyncSmtpTransport<Tokio1Executor>;

/// Mail transport backed by a pooled SMTP connection.
///
/// The underlying transport is built on first use and reused afterwards; it is
/// released when the mailer is dropped at shutdown. A failed build is not
/// remembered, so a later submission tries again.
pub struct SmtpMailer {
    settings: SmtpSettings,
    transport: OnceCell<SmtpTransport>,
}

impl SmtpMailer {
    pub fn new(settings: SmtpSettings) -> Self {
        Self {
            settings,
            transport: OnceCell::new(),
        }
    }

    async fn transport(&self) -> MailResult<&SmtpTransport> {
        self.transport
            .get_or_try_init(|| async {
                let transport = build_transport(&self.settings)?;
                info!(
                    host = self.settings.host.as_deref().unwrap_or_default(),
                    "SMTP transport initialized"
                );
                Ok::<_, MailError>(transport)
            })
            .await
    }
}

#[async_trait]
impl MailTransport for SmtpMailer {
    async fn send(&self, email: OutgoingEmail) -> MailResult<()> {
        let message = build_message(&email)?;
        let transport = self.transport().await?;

        let response = transport.send(message).await?;
        if !response.is_positive() {
            return Err(MailError::Rejected(response.code().to_string()));
        }

        debug!(to = %email.to, "Message accepted by relay");
        Ok(())
    }

    async fn health_check(&self) -> bool {
        let transport = match self.transport().await {
            Ok(transport) => transport,
            Err(e) => {
                warn!("SMTP transport unavailable: {}", e);
                return false;
            }
        };

        match transport.test_connection().await {
            Ok(connected) => connected,
            Err(e) => {
                warn!("SMTP connection test failed: {}", e);
                false
            }
        }
    }
}

/// Builds a transport from settings without connecting.
///
/// Credentials are required unless the connection is plaintext.
fn build_transport(settings: &SmtpSettings) -> MailResult<SmtpTransport> {
    let host = settings
        .host
        .as_deref()
        .ok_or(MailError::NotConfigured("SMTP_HOST"))?;
    let port = settings.port.ok_or(MailError::NotConfigured("SMTP_PORT"))?;

    let builder = match settings.security {
        SmtpSecurity::Implicit => SmtpTransport::relay(host)?,
        SmtpSecurity::StartTls => SmtpTransport::starttls_relay(host)?,
        SmtpSecurity::Plain => SmtpTransport::builder_dangerous(host),
    };
    let builder = builder.port(port);

    let credentials = match (&settings.user, &settings.password) {
        (Some(user), Some(password)) => Some(Credentials::new(user.clone(), password.clone())),
        (None, _) if settings.security != SmtpSecurity::Plain => {
            return Err(MailError::NotConfigured("SMTP_USER"));
        }
        (Some(_), None) if settings.security != SmtpSecurity::Plain => {
            return Err(MailError::NotConfigured("SMTP_PASS"));
        }
        _ => None,
    };

    let builder = match credentials {
        Some(credentials) => builder.credentials(credentials),
        None => builder,
    };

    Ok(builder.build())
}

/// Converts an [`OutgoingEmail`] into a plain-text MIME message.
fn build_message(email: &OutgoingEmail) -> MailResult<Message> {
    let message = Message::builder()
        .from(parse_mailbox(&email.from)?)
        .to(parse_mailbox(&email.to)?)
        .subject(email.subject.as_str())
        .header(ContentType::TEXT_PLAIN)
        .body(email.body.clone())?;

    Ok(message)
}

fn parse_mailbox(address: &str) -> MailResult<Mailbox> {
    address.parse().map_err(|source| MailError::Address {
        address: address.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email(from: &str, to: &str) -> OutgoingEmail {
        OutgoingEmail {
            from: from.to_string(),
            to: to.to_string(),
            subject: "New Contact Form Submission from Ana".to_string(),
            body: "Name: Ana".to_string(),
        }
    }

    fn relay_settings() -> SmtpSettings {
        SmtpSettings {
            host: Some("smtp.example.com".to_string()),
            port: Some(587),
            security: SmtpSecurity::StartTls,
            user: Some("me@example.com".to_string()),
            password: Some("secret".to_string()),
        }
    }

    #[test]
    fn test_build_message_headers() {
        let message = build_message(&email("ana@example.com", "owner@example.com")).unwrap();

        let formatted = String::from_utf8(message.formatted()).unwrap();

        assert!(formatted.contains("From: ana@example.com"));
        assert!(formatted.contains("To: owner@example.com"));
        assert!(formatted.contains("Subject: New Contact Form Submission from Ana"));
        assert!(formatted.contains("text/plain"));
    }

    #[test]
    fn test_build_message_rejects_malformed_sender() {
        let result = build_message(&email("not an address", "owner@example.com"));

        match result {
            Err(MailError::Address { address, .. }) => assert_eq!(address, "not an address"),
            other => panic!("expected address error, got {:?}", other),
        }
    }

    #[test]
    fn test_build_message_rejects_malformed_recipient() {
        let result = build_message(&email("ana@example.com", ""));

        assert!(matches!(result, Err(MailError::Address { .. })));
    }

    #[test]
    fn test_build_transport_requires_host_and_port() {
        let mut settings = relay_settings();
        settings.host = None;
        assert!(matches!(
            build_transport(&settings),
            Err(MailError::NotConfigured("SMTP_HOST"))
        ));

        let mut settings = relay_settings();
        settings.port = None;
        assert!(matches!(
            build_transport(&settings),
            Err(MailError::NotConfigured("SMTP_PORT"))
        ));
    }

    #[test]
    fn test_build_transport_requires_credentials_over_tls() {
        let mut settings = relay_settings();
        settings.user = None;
        assert!(matches!(
            build_transport(&settings),
            Err(MailError::NotConfigured("SMTP_USER"))
        ));

        let mut settings = relay_settings();
        settings.password = None;
        assert!(matches!(
            build_transport(&settings),
            Err(MailError::NotConfigured("SMTP_PASS"))
        ));
    }

    // Building a pooled transport spawns the pool task, so it needs a runtime.
    #[tokio::test]
    async fn test_build_transport_plaintext_without_credentials() {
        let settings = SmtpSettings {
            host: Some("localhost".to_string()),
            port: Some(1025),
            security: SmtpSecurity::Plain,
            user: None,
            password: None,
        };

        assert!(build_transport(&settings).is_ok());
    }

    #[tokio::test]
    async fn test_unconfigured_mailer_fails_at_dispatch() {
        let mailer = SmtpMailer::new(SmtpSettings::default());

        let result = mailer
            .send(email("ana@example.com", "owner@example.com"))
            .await;

        assert!(matches!(result, Err(MailError::NotConfigured("SMTP_HOST"))));
        assert!(!mailer.health_check().await);
    }
}
