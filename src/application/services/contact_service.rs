//! Contact submission relay service.

use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info};

use crate::domain::email::{MessageKind, OutgoingEmail};
use crate::domain::submission::{FieldErrors, Submission};
use crate::infrastructure::mail::{MailError, MailTransport};

/// Addresses and wording used when deriving messages from a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSettings {
    /// Owner inbox (`RECEIVER_EMAIL`).
    pub receiver: Option<String>,
    /// Sender of the acknowledgement (`SMTP_FROM` or `SMTP_USER`).
    pub sender: Option<String>,
    pub signature: String,
}

/// Why a submission was not relayed.
///
/// Only [`ContactError::Invalid`] is meant for the caller; every other
/// variant is reported to clients as one generic failure.
#[derive(Debug, Error)]
pub enum ContactError {
    #[error("submission failed validation")]
    Invalid(FieldErrors),

    #[error("failed to render {kind} message")]
    Render {
        kind: MessageKind,
        #[source]
        source: askama::Error,
    },

    #[error("owner notification failed")]
    OwnerNotification(#[source] MailError),

    #[error("acknowledgement failed")]
    Acknowledgement(#[source] MailError),
}

impl ContactError {
    /// The message the failure belongs to, if it happened after validation.
    pub fn step(&self) -> Option<MessageKind> {
        match self {
            ContactError::Invalid(_) => None,
            ContactError::Render { kind, .. } => Some(*kind),
            ContactError::OwnerNotification(_) => Some(MessageKind::OwnerNotification),
            ContactError::Acknowledgement(_) => Some(MessageKind::Acknowledgement),
        }
    }
}

/// Service that turns a submission into two dispatched messages.
///
/// # Pipeline
///
/// 1. Validate the submission with the same rules as the form controller
/// 2. Render the owner notification and the acknowledgement
/// 3. Send the owner notification
/// 4. Send the acknowledgement, only if step 3 succeeded
///
/// Nothing is retried or queued; the first failure ends the request.
pub struct ContactService {
    transport: Arc<dyn MailTransport>,
    settings: ContactSettings,
}

impl ContactService {
    /// Creates a new contact service.
    pub fn new(transport: Arc<dyn MailTransport>, settings: ContactSettings) -> Self {
        Self {
            transport,
            settings,
        }
    }

    /// Validates and relays a submission.
    ///
    /// # Errors
    ///
    /// Returns [`ContactError::Invalid`] without sending anything if a field
    /// is invalid. Returns [`ContactError::OwnerNotification`] or
    /// [`ContactError::Acknowledgement`] for the step whose dispatch failed;
    /// missing mail configuration is reported the same way.
    pub async fn submit(&self, submission: Submission) -> Result<(), ContactError> {
        submission.check().map_err(ContactError::Invalid)?;

        let result = self.relay(&submission).await;

        if let Err(ref e) = result {
            let step = e.step().map(|kind| kind.to_string()).unwrap_or_default();
            error!(
                step = %step,
                error = %e,
                cause = ?std::error::Error::source(e),
                "Failed to relay contact submission"
            );
        }

        result
    }

    async fn relay(&self, submission: &Submission) -> Result<(), ContactError> {
        let notification = self.owner_notification(submission)?;
        let acknowledgement = self.acknowledgement(submission)?;

        self.transport
            .send(notification)
            .await
            .map_err(ContactError::OwnerNotification)?;
        debug!("Owner notification sent");

        self.transport
            .send(acknowledgement)
            .await
            .map_err(ContactError::Acknowledgement)?;

        info!(sender = %submission.email, "Contact submission relayed");
        Ok(())
    }

    fn owner_notification(&self, submission: &Submission) -> Result<OutgoingEmail, ContactError> {
        let receiver = self.settings.receiver.as_deref().ok_or_else(|| {
            ContactError::OwnerNotification(MailError::NotConfigured("RECEIVER_EMAIL"))
        })?;

        OutgoingEmail::owner_notification(submission, receiver).map_err(|source| {
            ContactError::Render {
                kind: MessageKind::OwnerNotification,
                source,
            }
        })
    }

    fn acknowledgement(&self, submission: &Submission) -> Result<OutgoingEmail, ContactError> {
        let sender = self.settings.sender.as_deref().ok_or_else(|| {
            ContactError::Acknowledgement(MailError::NotConfigured("SMTP_FROM"))
        })?;

        OutgoingEmail::acknowledgement(submission, sender, &self.settings.signature).map_err(
            |source| ContactError::Render {
                kind: MessageKind::Acknowledgement,
                source,
            },
        )
    }

    /// Checks whether the mail transport is reachable.
    pub async fn is_transport_healthy(&self) -> bool {
        self.transport.health_check().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::submission::Field;
    use crate::infrastructure::mail::MockMailTransport;
    use mockall::Sequence;

    fn settings() -> ContactSettings {
        ContactSettings {
            receiver: Some("owner@example.com".to_string()),
            sender: Some("site@example.com".to_string()),
            signature: "Jane Doe".to_string(),
        }
    }

    fn valid_submission() -> Submission {
        Submission::new("Ana", "ana@example.com", "Hi")
    }

    #[tokio::test]
    async fn test_submit_sends_notification_then_acknowledgement() {
        let mut mock_transport = MockMailTransport::new();
        let mut sequence = Sequence::new();

        mock_transport
            .expect_send()
            .withf(|email| {
                email.to == "owner@example.com"
                    && email.from == "ana@example.com"
                    && email.subject == "New Contact Form Submission from Ana"
            })
            .times(1)
            .in_sequence(&mut sequence)
            .returning(|_| Ok(()));

        mock_transport
            .expect_send()
            .withf(|email| email.to == "ana@example.com" && email.from == "site@example.com")
            .times(1)
            .in_sequence(&mut sequence)
            .returning(|_| Ok(()));

        let service = ContactService::new(Arc::new(mock_transport), settings());

        let result = service.submit(valid_submission()).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_submit_invalid_sends_nothing() {
        let mut mock_transport = MockMailTransport::new();
        mock_transport.expect_send().times(0);

        let service = ContactService::new(Arc::new(mock_transport), settings());

        let result = service
            .submit(Submission::new("", "not-an-email", "Hi"))
            .await;

        match result {
            Err(ContactError::Invalid(errors)) => {
                assert_eq!(errors.len(), 2);
                assert!(errors.get(Field::Name).is_some());
                assert!(errors.get(Field::Email).is_some());
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_owner_notification_failure_skips_acknowledgement() {
        let mut mock_transport = MockMailTransport::new();

        mock_transport
            .expect_send()
            .withf(|email| email.to == "owner@example.com")
            .times(1)
            .returning(|_| Err(MailError::Rejected("550".to_string())));

        mock_transport
            .expect_send()
            .withf(|email| email.to == "ana@example.com")
            .times(0);

        let service = ContactService::new(Arc::new(mock_transport), settings());

        let result = service.submit(valid_submission()).await;

        let err = result.unwrap_err();
        assert!(matches!(err, ContactError::OwnerNotification(_)));
        assert_eq!(err.step(), Some(MessageKind::OwnerNotification));
    }

    #[tokio::test]
    async fn test_acknowledgement_failure_is_reported() {
        let mut mock_transport = MockMailTransport::new();
        let mut sequence = Sequence::new();

        mock_transport
            .expect_send()
            .times(1)
            .in_sequence(&mut sequence)
            .returning(|_| Ok(()));

        mock_transport
            .expect_send()
            .times(1)
            .in_sequence(&mut sequence)
            .returning(|_| Err(MailError::Rejected("554".to_string())));

        let service = ContactService::new(Arc::new(mock_transport), settings());

        let result = service.submit(valid_submission()).await;

        assert!(matches!(result, Err(ContactError::Acknowledgement(_))));
    }

    #[tokio::test]
    async fn test_missing_receiver_fails_before_dispatch() {
        let mut mock_transport = MockMailTransport::new();
        mock_transport.expect_send().times(0);

        let service = ContactService::new(
            Arc::new(mock_transport),
            ContactSettings {
                receiver: None,
                ..settings()
            },
        );

        let result = service.submit(valid_submission()).await;

        assert!(matches!(
            result,
            Err(ContactError::OwnerNotification(MailError::NotConfigured(
                "RECEIVER_EMAIL"
            )))
        ));
    }

    #[tokio::test]
    async fn test_missing_sender_fails_before_dispatch() {
        let mut mock_transport = MockMailTransport::new();
        mock_transport.expect_send().times(0);

        let service = ContactService::new(
            Arc::new(mock_transport),
            ContactSettings {
                sender: None,
                ..settings()
            },
        );

        let result = service.submit(valid_submission()).await;

        assert!(matches!(result, Err(ContactError::Acknowledgement(_))));
    }

    #[tokio::test]
    async fn test_notification_body_carries_submission_verbatim() {
        let submission = Submission::new(
            "Zoë & <Co>",
            "zoe@example.com",
            "Multi\nline\n\n\"quoted\" text",
        );
        let expected = submission.clone();

        let mut mock_transport = MockMailTransport::new();
        mock_transport
            .expect_send()
            .withf(move |email| {
                email.to != "owner@example.com"
                    || (email.body.contains(&expected.name)
                        && email.body.contains(&expected.email)
                        && email.body.contains(&expected.message))
            })
            .times(2)
            .returning(|_| Ok(()));

        let service = ContactService::new(Arc::new(mock_transport), settings());

        assert!(service.submit(submission).await.is_ok());
    }

    #[tokio::test]
    async fn test_transport_health_is_forwarded() {
        let mut mock_transport = MockMailTransport::new();
        mock_transport
            .expect_health_check()
            .times(1)
            .returning(|| false);

        let service = ContactService::new(Arc::new(mock_transport), settings());

        assert!(!service.is_transport_healthy().await);
    }
}
