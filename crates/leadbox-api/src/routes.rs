//! Route handlers and response mapping.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use serde::Serialize;

use leadbox_core::{ContactForm, SubmissionHandler, SubmitOutcome, ValidationErrors};

const MSG_ACCEPTED: &str = "Thanks! Your message has been received. We'll be in touch shortly.";
const MSG_INVALID: &str = "Please correct the highlighted fields.";
const MSG_DUPLICATE: &str = "A submission with this email address already exists.";
const MSG_FAILED: &str = "Something went wrong. Please try again later.";

/// Shared state for the router.
#[derive(Clone)]
pub struct AppState {
    /// The submission fallback chain.
    pub handler: Arc<SubmissionHandler>,
}

/// Wire response for the form endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ContactResponse {
    /// Whether the submission was accepted.
    pub success: bool,
    /// Human-readable summary for the form UI.
    pub message: String,
    /// Per-field validation messages, present only on validation failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<ValidationErrors>,
}

impl ContactResponse {
    fn accepted() -> Self {
        Self {
            success: true,
            message: MSG_ACCEPTED.to_string(),
            errors: None,
        }
    }

    fn invalid(errors: ValidationErrors) -> Self {
        Self {
            success: false,
            message: MSG_INVALID.to_string(),
            errors: Some(errors),
        }
    }

    fn duplicate() -> Self {
        Self {
            success: false,
            message: MSG_DUPLICATE.to_string(),
            errors: None,
        }
    }

    fn failed() -> Self {
        Self {
            success: false,
            message: MSG_FAILED.to_string(),
            errors: None,
        }
    }
}

/// Builds the service router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/contact", post(submit_contact))
        .route("/healthz", get(healthz))
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn submit_contact(
    State(state): State<AppState>,
    Form(form): Form<ContactForm>,
) -> (StatusCode, Json<ContactResponse>) {
    match state.handler.submit(&form).await {
        Ok(SubmitOutcome::Accepted { delivery }) => {
            tracing::debug!(?delivery, "submission accepted");
            (StatusCode::OK, Json(ContactResponse::accepted()))
        }
        Ok(SubmitOutcome::Invalid { errors }) => {
            (StatusCode::BAD_REQUEST, Json(ContactResponse::invalid(errors)))
        }
        Ok(SubmitOutcome::Duplicate) => {
            (StatusCode::CONFLICT, Json(ContactResponse::duplicate()))
        }
        Ok(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ContactResponse::failed()),
        ),
        Err(err) => {
            // The cause stays in the operational log; the caller only sees
            // the generic message.
            tracing::error!(error = %err, "submission failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ContactResponse::failed()),
            )
        }
    }
}
