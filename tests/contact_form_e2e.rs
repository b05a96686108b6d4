mod common;

use axum::ServiceExt;
use axum::extract::Request;
use portfolio_contact::client::{ContactForm, FormStatus, HttpSubmissionClient};
use portfolio_contact::domain::submission::{Field, Submission};
use portfolio_contact::routes::app_router;
use portfolio_contact::state::AppState;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use url::Url;

async fn serve(state: AppState) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(
            listener,
            ServiceExt::<Request>::into_make_service(app_router(state)),
        )
        .await
        .unwrap();
    });

    addr
}

fn client_for(addr: SocketAddr) -> HttpSubmissionClient {
    // Trailing slash exercises path normalization.
    let endpoint = Url::parse(&format!("http://{addr}/api/contact/")).unwrap();
    HttpSubmissionClient::new(endpoint).unwrap()
}

fn filled_form() -> ContactForm {
    let mut form = ContactForm::new();
    form.on_field_change(Field::Name, "Ana");
    form.on_field_change(Field::Email, "ana@example.com");
    form.on_field_change(Field::Message, "Hi");
    form
}

#[tokio::test]
async fn test_valid_submission_is_delivered_and_form_reset() {
    let transport = common::RecordingTransport::new();
    let addr = serve(common::contact_state(transport.clone())).await;

    let mut form = filled_form();
    let status = form.submit(&client_for(addr)).await;

    assert_eq!(status, FormStatus::Sent);
    assert_eq!(form.status.message(), "Message sent successfully!");
    assert_eq!(form.values, Submission::default());

    let sent = transport.sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].to, common::RECEIVER);
    assert_eq!(sent[1].to, "ana@example.com");
}

#[tokio::test]
async fn test_transport_failure_shows_failed_status() {
    let transport = common::RecordingTransport::failing_at(0);
    let addr = serve(common::contact_state(transport.clone())).await;

    let mut form = filled_form();
    let status = form.submit(&client_for(addr)).await;

    assert_eq!(status.message(), "Failed to send message.");
    assert_eq!(form.values.name, "Ana");
    assert!(transport.sent().is_empty());
}

#[tokio::test]
async fn test_unreachable_endpoint_shows_error_status() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut form = filled_form();
    let status = form.submit(&client_for(addr)).await;

    assert_eq!(status, FormStatus::Errored);
    assert_eq!(status.message(), "An error occurred.");
    assert_eq!(form.values.email, "ana@example.com");
}

#[tokio::test]
async fn test_invalid_form_never_reaches_server() {
    let transport = common::RecordingTransport::new();
    let addr = serve(common::contact_state(transport.clone())).await;

    let mut form = filled_form();
    form.on_field_change(Field::Email, "not-an-email");
    let status = form.submit(&client_for(addr)).await;

    assert_eq!(status, FormStatus::Idle);
    assert_eq!(form.errors.get(Field::Email), Some("Invalid email format"));
    assert!(transport.sent().is_empty());
}
