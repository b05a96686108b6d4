//! DTOs for the contact submission endpoint.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use serde_with::skip_serializing_none;

use crate::domain::submission::{FieldErrors, Submission};

/// Generic failure text returned when a message could not be relayed.
pub const SEND_FAILED: &str = "Failed to send email";
/// Returned when the submission fails server-side validation.
pub const INVALID_SUBMISSION: &str = "Invalid submission";
/// Returned when the body is not a JSON object.
pub const INVALID_BODY: &str = "Invalid request body";

/// Body of `POST /api/contact`.
///
/// Missing fields decode as empty strings and are then rejected by
/// validation, so a partial body reports every missing field at once.
/// `null` and nested values also decode as empty; numbers and booleans
/// keep their JSON text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactRequest {
    #[serde(deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(deserialize_with = "lenient_text")]
    pub email: String,
    #[serde(deserialize_with = "lenient_text")]
    pub message: String,
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => text,
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    })
}

impl From<ContactRequest> for Submission {
    fn from(request: ContactRequest) -> Self {
        Submission::new(request.name, request.email, request.message)
    }
}

impl From<&Submission> for ContactRequest {
    fn from(submission: &Submission) -> Self {
        Self {
            name: submission.name.clone(),
            email: submission.email.clone(),
            message: submission.message.clone(),
        }
    }
}

/// Outcome envelope of `POST /api/contact`.
///
/// ```json
/// { "success": true }
/// { "success": false, "error": "Failed to send email" }
/// { "success": false, "error": "Invalid submission", "fields": { "email": "Invalid email format" } }
/// ```
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactResponse {
    pub success: bool,
    pub error: Option<String>,
    pub fields: Option<FieldErrors>,
}

impl ContactResponse {
    pub fn sent() -> Self {
        Self {
            success: true,
            error: None,
            fields: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            fields: None,
        }
    }

    pub fn invalid(fields: FieldErrors) -> Self {
        Self {
            success: false,
            error: Some(INVALID_SUBMISSION.to_string()),
            fields: Some(fields),
        }
    }
}
