//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};
use tokio::join;

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy or disabled
/// - **503 Service Unavailable**: One or more components failing
///
/// # Components Checked
///
/// 1. **Mail**: SMTP connection test (always ok in dry-run mode)
/// 2. **CMS**: Trivial content query, `disabled` when no CMS is configured
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "mail": { "status": "ok", "message": "Mail transport reachable" },
///     "cms": { "status": "disabled", "message": "CMS not configured" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let (mail_check, cms_check) = join!(check_mail(&state), check_cms(&state));

    let all_healthy = mail_check.is_healthy() && cms_check.is_healthy();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            mail: mail_check,
            cms: cms_check,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

async fn check_mail(state: &AppState) -> CheckStatus {
    if state.contact_service.is_transport_healthy().await {
        CheckStatus::ok("Mail transport reachable")
    } else {
        CheckStatus::error("Mail transport unreachable or not configured")
    }
}

async fn check_cms(state: &AppState) -> CheckStatus {
    if !state.portfolio_service.is_enabled() {
        return CheckStatus::disabled("CMS not configured");
    }

    if state.portfolio_service.health_check().await {
        CheckStatus::ok("Content store reachable")
    } else {
        CheckStatus::error("Content store query failed")
    }
}
