//! Contact form controller.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::client::http::{SubmissionClient, SubmitOutcome};
use crate::domain::submission::{Field, FieldErrors, Submission};

/// Status line shown under the form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormStatus {
    #[default]
    Idle,
    Sending,
    Sent,
    /// The endpoint answered with a failure.
    Failed,
    /// The endpoint could not be reached.
    Errored,
}

impl FormStatus {
    pub fn message(&self) -> &'static str {
        match self {
            FormStatus::Idle => "",
            FormStatus::Sending => "Sending...",
            FormStatus::Sent => "Message sent successfully!",
            FormStatus::Failed => "Failed to send message.",
            FormStatus::Errored => "An error occurred.",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, FormStatus::Sent)
    }
}

impl fmt::Display for FormStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Form state: field values, per-field errors and the status line.
///
/// The state is plain data; front ends render it and feed user input back
/// through [`ContactForm::on_field_change`] and [`ContactForm::submit`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    pub values: Submission,
    pub errors: FieldErrors,
    pub status: FormStatus,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field and clears its error annotation.
    pub fn on_field_change(&mut self, field: Field, value: impl Into<String>) {
        self.values.set_field(field, value.into());
        self.errors.clear(field);
    }

    /// Checks every field and records all failures at once.
    ///
    /// Returns `true` when no field failed. Calling it again on unchanged
    /// values yields the same result and error set.
    pub fn validate(&mut self) -> bool {
        self.errors = self.values.check().err().unwrap_or_default();
        self.errors.is_empty()
    }

    /// First half of [`ContactForm::submit`].
    ///
    /// Returns the submission to send and moves the status to `Sending`, or
    /// `None` when validation failed. A failed validation clears the status
    /// line and leaves the field errors in place.
    pub fn begin_submit(&mut self) -> Option<Submission> {
        if !self.validate() {
            self.status = FormStatus::Idle;
            return None;
        }

        self.status = FormStatus::Sending;
        Some(self.values.clone())
    }

    /// Second half of [`ContactForm::submit`]: maps the outcome to a status.
    ///
    /// On acceptance all fields are reset. Field errors reported by the
    /// endpoint are shown next to their fields.
    pub fn finish_submit(&mut self, outcome: SubmitOutcome) {
        self.status = match outcome {
            SubmitOutcome::Accepted => {
                self.values = Submission::default();
                self.errors = FieldErrors::default();
                FormStatus::Sent
            }
            SubmitOutcome::Rejected { body, .. } => {
                if let Some(fields) = body.and_then(|body| body.fields) {
                    for (field, message) in fields.fields() {
                        self.errors.set(field, message);
                    }
                }
                FormStatus::Failed
            }
            SubmitOutcome::Unreachable(_) => FormStatus::Errored,
        };
    }

    /// Validates and, if valid, sends exactly one request through `client`.
    ///
    /// Returns the resulting status; it replaces whatever was shown before.
    pub async fn submit<C>(&mut self, client: &C) -> FormStatus
    where
        C: SubmissionClient + ?Sized,
    {
        if let Some(submission) = self.begin_submit() {
            let outcome = client.send(submission).await;
            self.finish_submit(outcome);
        }

        self.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::dto::contact::ContactResponse;
    use crate::client::http::MockSubmissionClient;
    use crate::domain::submission::{EMAIL_INVALID, MESSAGE_REQUIRED, NAME_REQUIRED};

    fn filled(name: &str, email: &str, message: &str) -> ContactForm {
        let mut form = ContactForm::new();
        form.on_field_change(Field::Name, name);
        form.on_field_change(Field::Email, email);
        form.on_field_change(Field::Message, message);
        form
    }

    #[test]
    fn test_validate_accepts_complete_form() {
        let mut form = filled("Ana", "ana@example.com", "Hi");

        assert!(form.validate());
        assert!(form.errors.is_empty());
    }

    #[test]
    fn test_validate_records_every_error() {
        let mut form = filled("  ", "nope", "");

        assert!(!form.validate());
        assert_eq!(form.errors.get(Field::Name), Some(NAME_REQUIRED));
        assert_eq!(form.errors.get(Field::Email), Some(EMAIL_INVALID));
        assert_eq!(form.errors.get(Field::Message), Some(MESSAGE_REQUIRED));
    }

    #[test]
    fn test_validate_is_idempotent() {
        let mut form = filled("Ana", "not-an-email", "Hi");

        let first = (form.validate(), form.errors.clone());
        let second = (form.validate(), form.errors.clone());

        assert_eq!(first, second);
        assert_eq!(form.errors.len(), 1);
    }

    #[test]
    fn test_field_change_clears_only_that_error() {
        let mut form = filled("", "bad", "Hi");
        form.validate();

        form.on_field_change(Field::Name, "Ana");

        assert!(form.errors.get(Field::Name).is_none());
        assert_eq!(form.errors.get(Field::Email), Some(EMAIL_INVALID));
    }

    #[tokio::test]
    async fn test_submit_success_resets_fields() {
        let mut client = MockSubmissionClient::new();
        client
            .expect_send()
            .withf(|s| s.name == "Ana" && s.email == "ana@example.com" && s.message == "Hi")
            .times(1)
            .returning(|_| SubmitOutcome::Accepted);

        let mut form = filled("Ana", "ana@example.com", "Hi");

        let status = form.submit(&client).await;

        assert_eq!(status, FormStatus::Sent);
        assert_eq!(status.message(), "Message sent successfully!");
        assert_eq!(form.values, Submission::default());
    }

    #[tokio::test]
    async fn test_submit_missing_name_sends_nothing() {
        let mut client = MockSubmissionClient::new();
        client.expect_send().times(0);

        let mut form = filled("", "ana@example.com", "Hi");

        let status = form.submit(&client).await;

        assert_eq!(status, FormStatus::Idle);
        assert_eq!(form.errors.get(Field::Name), Some(NAME_REQUIRED));
        assert_eq!(form.errors.len(), 1);
    }

    #[tokio::test]
    async fn test_submit_invalid_email_sends_nothing() {
        let mut client = MockSubmissionClient::new();
        client.expect_send().times(0);

        let mut form = filled("Ana", "not-an-email", "Hi");

        form.submit(&client).await;

        assert_eq!(form.errors.get(Field::Email), Some(EMAIL_INVALID));
        assert_eq!(form.values.email, "not-an-email");
    }

    #[tokio::test]
    async fn test_submit_server_failure_keeps_fields() {
        let mut client = MockSubmissionClient::new();
        client.expect_send().times(1).returning(|_| SubmitOutcome::Rejected {
            status: 500,
            body: Some(ContactResponse::failed("Failed to send email")),
        });

        let mut form = filled("Ana", "ana@example.com", "Hi");

        let status = form.submit(&client).await;

        assert_eq!(status.message(), "Failed to send message.");
        assert_eq!(form.values.name, "Ana");
        assert!(form.errors.is_empty());
    }

    #[tokio::test]
    async fn test_submit_unreachable_reports_error() {
        let mut client = MockSubmissionClient::new();
        client
            .expect_send()
            .times(1)
            .returning(|_| SubmitOutcome::Unreachable("connection refused".to_string()));

        let mut form = filled("Ana", "ana@example.com", "Hi");

        let status = form.submit(&client).await;

        assert_eq!(status.message(), "An error occurred.");
    }

    #[test]
    fn test_rejection_shows_server_field_errors() {
        let mut fields = FieldErrors::default();
        fields.set(Field::Message, MESSAGE_REQUIRED);

        let mut form = filled("Ana", "ana@example.com", "Hi");
        form.begin_submit();
        form.finish_submit(SubmitOutcome::Rejected {
            status: 400,
            body: Some(ContactResponse::invalid(fields)),
        });

        assert_eq!(form.status, FormStatus::Failed);
        assert_eq!(form.errors.get(Field::Message), Some(MESSAGE_REQUIRED));
    }

    #[test]
    fn test_status_overwritten_by_each_attempt() {
        let mut form = filled("Ana", "ana@example.com", "Hi");
        form.begin_submit();
        assert_eq!(form.status.message(), "Sending...");
        form.finish_submit(SubmitOutcome::Unreachable("timeout".to_string()));
        assert_eq!(form.status, FormStatus::Errored);

        form.begin_submit();
        form.finish_submit(SubmitOutcome::Accepted);

        assert_eq!(form.status, FormStatus::Sent);
        assert_eq!(form.status.to_string(), "Message sent successfully!");
    }
}
