//! Handler for the contact form submission endpoint.

use axum::{Json, body::Bytes, extract::State, http::StatusCode};
use tracing::warn;

use crate::api::dto::contact::{ContactRequest, ContactResponse, INVALID_BODY, SEND_FAILED};
use crate::application::services::ContactError;
use crate::state::AppState;

/// Relays a contact submission as two emails.
///
/// # Endpoint
///
/// `POST /api/contact`
///
/// # Request Body
///
/// ```json
/// { "name": "Ana", "email": "ana@example.com", "message": "Hi" }
/// ```
///
/// # Response Codes
///
/// - **200 OK**: Owner notification and acknowledgement both sent
/// - **400 Bad Request**: Body is not a JSON object, or a field is invalid
/// - **500 Internal Server Error**: Either message failed to send
///
/// The body is parsed as JSON whatever its `Content-Type`. The 500 body never
/// says which message failed or why; the cause is logged.
pub async fn contact_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> (StatusCode, Json<ContactResponse>) {
    let request: ContactRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            warn!(error = %e, "Rejected contact request body");
            return (
                StatusCode::BAD_REQUEST,
                Json(ContactResponse::failed(INVALID_BODY)),
            );
        }
    };

    match state.contact_service.submit(request.into()).await {
        Ok(()) => (StatusCode::OK, Json(ContactResponse::sent())),
        Err(ContactError::Invalid(fields)) => {
            (StatusCode::BAD_REQUEST, Json(ContactResponse::invalid(fields)))
        }
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ContactResponse::failed(SEND_FAILED)),
        ),
    }
}
