//! Contact form submission and the rules it is validated against.
//!
//! The same [`Submission::check`] runs in the form controller before anything
//! is sent and in the HTTP handler before any mail is dispatched, so a client
//! that skips its own validation gets exactly the same verdict from the server.

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use validator::{Validate, ValidationErrors};

/// Accepted address shape: `local@domain.tld` with a 2-4 character final label.
///
/// Character classes are ASCII-only: `\w` in `regex` also matches non-ASCII
/// letters.
pub static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_.-]+@([A-Za-z0-9_-]+\.)+[A-Za-z0-9_-]{2,4}$").unwrap()
});

/// Matches text containing at least one non-whitespace character.
static NOT_BLANK_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\S").unwrap());

pub const NAME_REQUIRED: &str = "Name is required";
pub const EMAIL_INVALID: &str = "Invalid email format";
pub const MESSAGE_REQUIRED: &str = "Message is required";

/// A `{name, email, message}` triple entered into the contact form.
///
/// Never persisted; lives for the duration of a single request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Submission {
    #[validate(regex(path = *NOT_BLANK_REGEX, code = "required", message = "Name is required"))]
    pub name: String,

    #[validate(regex(path = *EMAIL_REGEX, code = "email_format", message = "Invalid email format"))]
    pub email: String,

    #[validate(regex(path = *NOT_BLANK_REGEX, code = "required", message = "Message is required"))]
    pub message: String,
}

impl Submission {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    /// Checks every field and reports all failures at once.
    ///
    /// # Errors
    ///
    /// Returns the per-field error map when at least one field is invalid.
    pub fn check(&self) -> Result<(), FieldErrors> {
        self.validate().map_err(FieldErrors::from)
    }

    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Message => &self.message,
        }
    }

    pub fn set_field(&mut self, field: Field, value: String) {
        match field {
            Field::Name => self.name = value,
            Field::Email => self.email = value,
            Field::Message => self.message = value,
        }
    }
}

/// One of the three form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Email,
    Message,
}

impl Field {
    /// All fields in validation order.
    pub const ALL: [Field; 3] = [Field::Name, Field::Email, Field::Message];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Message => "message",
        }
    }

    /// Human-readable label used by prompts.
    pub fn label(&self) -> &'static str {
        match self {
            Field::Name => "Your Name",
            Field::Email => "Your Email",
            Field::Message => "Your Message",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Field::Name),
            "email" => Ok(Field::Email),
            "message" => Ok(Field::Message),
            other => Err(format!("unknown form field '{other}'")),
        }
    }
}

/// Per-field validation messages. A field is present only when it failed.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldErrors {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

impl FieldErrors {
    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::Name => self.name.as_deref(),
            Field::Email => self.email.as_deref(),
            Field::Message => self.message.as_deref(),
        }
    }

    pub fn set(&mut self, field: Field, message: impl Into<String>) {
        *self.slot_mut(field) = Some(message.into());
    }

    pub fn clear(&mut self, field: Field) {
        *self.slot_mut(field) = None;
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of fields carrying an error.
    pub fn len(&self) -> usize {
        Field::ALL
            .iter()
            .filter(|field| self.get(**field).is_some())
            .count()
    }

    /// Fields carrying an error, in validation order.
    pub fn fields(&self) -> impl Iterator<Item = (Field, &str)> {
        Field::ALL
            .into_iter()
            .filter_map(|field| self.get(field).map(|message| (field, message)))
    }

    fn slot_mut(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Message => &mut self.message,
        }
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut result = FieldErrors::default();

        for (field, field_errors) in errors.field_errors() {
            let field: &str = field.as_ref();
            let Ok(field) = field.parse::<Field>() else {
                continue;
            };

            if let Some(error) = field_errors.first() {
                let message = error
                    .message
                    .as_ref()
                    .map_or_else(|| error.code.to_string(), |m| m.to_string());
                result.set(field, message);
            }
        }

        result
    }
}
