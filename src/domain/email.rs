//! Outgoing email messages derived from a submission.
//!
//! Both messages are built from `templates/*.txt`. Plain-text templates are
//! rendered without escaping, so submitted values appear verbatim.

use askama::Template;
use std::fmt;

use crate::domain::submission::Submission;

/// A fully rendered plain-text message, ready for a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Which of the two per-submission messages a value or failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    OwnerNotification,
    Acknowledgement,
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MessageKind::OwnerNotification => "owner_notification",
            MessageKind::Acknowledgement => "acknowledgement",
        })
    }
}

#[derive(Template)]
#[template(path = "owner_notification.txt")]
struct OwnerNotificationBody<'a> {
    name: &'a str,
    email: &'a str,
    message: &'a str,
}

#[derive(Template)]
#[template(path = "acknowledgement.txt")]
struct AcknowledgementBody<'a> {
    name: &'a str,
    signature: &'a str,
}

impl OutgoingEmail {
    /// Notification to the site owner: sent from the submitter's address to
    /// `receiver`, carrying all three fields.
    pub fn owner_notification(
        submission: &Submission,
        receiver: &str,
    ) -> Result<Self, askama::Error> {
        let body = OwnerNotificationBody {
            name: &submission.name,
            email: &submission.email,
            message: &submission.message,
        }
        .render()?;

        Ok(Self {
            from: submission.email.clone(),
            to: receiver.to_string(),
            subject: format!("New Contact Form Submission from {}", submission.name),
            body,
        })
    }

    /// Automated reply to the submitter, sent from the site's own address.
    pub fn acknowledgement(
        submission: &Submission,
        sender: &str,
        signature: &str,
    ) -> Result<Self, askama::Error> {
        let body = AcknowledgementBody {
            name: &submission.name,
            signature,
        }
        .render()?;

        Ok(Self {
            from: sender.to_string(),
            to: submission.email.clone(),
            subject: format!("Thank you for contacting us, {}!", submission.name),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_notification_addresses_and_subject() {
        let submission = Submission::new("Ana", "ana@example.com", "Hi");

        let email = OutgoingEmail::owner_notification(&submission, "owner@example.com").unwrap();

        assert_eq!(email.from, "ana@example.com");
        assert_eq!(email.to, "owner@example.com");
        assert_eq!(email.subject, "New Contact Form Submission from Ana");
    }

    #[test]
    fn test_owner_notification_body_layout() {
        let submission = Submission::new("Ana", "ana@example.com", "Hi");

        let email = OutgoingEmail::owner_notification(&submission, "owner@example.com").unwrap();

        assert_eq!(
            email.body.trim_end(),
            "You have received a new message from your portfolio contact form.\n\n\
             Name: Ana\n\
             Email: ana@example.com\n\n\
             Message:\n\
             Hi"
        );
    }

    #[test]
    fn test_owner_notification_keeps_values_verbatim() {
        let submission = Submission::new(
            "<b>O'Brien & Sons</b>",
            "ob@example.com",
            "Line one\nLine two with \"quotes\" & <tags>\n\n  indented",
        );

        let email = OutgoingEmail::owner_notification(&submission, "owner@example.com").unwrap();

        assert!(email.body.contains(&submission.name));
        assert!(email.body.contains(&submission.email));
        assert!(email.body.contains(&submission.message));
    }

    #[test]
    fn test_acknowledgement() {
        let submission = Submission::new("Ana", "ana@example.com", "Quote for a new project");

        let email =
            OutgoingEmail::acknowledgement(&submission, "site@example.com", "Jane Doe").unwrap();

        assert_eq!(email.from, "site@example.com");
        assert_eq!(email.to, "ana@example.com");
        assert_eq!(email.subject, "Thank you for contacting us, Ana!");
        assert!(email.body.starts_with("Hi Ana,\n\n"));
        assert!(email.body.trim_end().ends_with("Best regards,\nJane Doe"));
        assert!(!email.body.contains(&submission.message));
    }

    #[test]
    fn test_message_kind_display() {
        assert_eq!(
            MessageKind::OwnerNotification.to_string(),
            "owner_notification"
        );
        assert_eq!(MessageKind::Acknowledgement.to_string(), "acknowledgement");
    }
}
