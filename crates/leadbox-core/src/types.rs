//! Core record shapes for the lead-capture flow.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::validate::ValidationErrors;

/// Raw contact-form input as posted by the embedded UI.
///
/// Field names follow the wire convention of the form endpoint
/// (`firstName`, `lastName`, ...). All fields default to empty/absent so a
/// partially filled form deserializes and fails validation with proper
/// per-field messages instead of a deserialization rejection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactForm {
    /// Submitter's first name.
    pub first_name: String,
    /// Submitter's last name.
    pub last_name: String,
    /// Submitter's email address, the natural dedup key.
    pub email: String,
    /// Optional dialing country code, e.g. `+31`.
    pub country_code: Option<String>,
    /// Optional phone number.
    pub phone_number: Option<String>,
    /// Free-text description of what the submitter needs.
    pub questions: String,
}

impl ContactForm {
    /// The dialing code and number joined into one phone string, or `None`
    /// when no number was supplied.
    pub fn phone(&self) -> Option<String> {
        let number = self.phone_number.as_deref()?.trim();
        if number.is_empty() {
            return None;
        }
        match self.country_code.as_deref().map(str::trim) {
            Some(code) if !code.is_empty() => Some(format!("{code} {number}")),
            _ => Some(number.to_string()),
        }
    }
}

/// A durable contact submission row, created exactly once per successful
/// fallback path. Never updated or deleted by this system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    /// Row id assigned by the store.
    pub id: i64,
    /// Submitter's first name.
    pub first_name: String,
    /// Submitter's last name.
    pub last_name: String,
    /// Normalized (trimmed, lower-cased) email address.
    pub email: String,
    /// Joined phone string, when supplied.
    pub phone: Option<String>,
    /// Free-text questions from the form.
    pub questions: String,
    /// When the row was inserted.
    pub created_at: DateTime<Utc>,
    /// Same as `created_at`; rows are write-once.
    pub updated_at: DateTime<Utc>,
}

/// Field values for a submission row about to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubmission {
    /// Submitter's first name.
    pub first_name: String,
    /// Submitter's last name.
    pub last_name: String,
    /// Normalized email address.
    pub email: String,
    /// Joined phone string, when supplied.
    pub phone: Option<String>,
    /// Free-text questions from the form.
    pub questions: String,
}

impl NewSubmission {
    /// Builds the row values from a validated form, normalizing the email
    /// and joining the phone parts.
    pub fn from_form(form: &ContactForm) -> Self {
        Self {
            first_name: form.first_name.trim().to_string(),
            last_name: form.last_name.trim().to_string(),
            email: crate::validate::normalize_email(&form.email),
            phone: form.phone(),
            questions: form.questions.trim().to_string(),
        }
    }
}

/// Platform session record, bound to a shop.
///
/// Created and mutated by the embedding host's authentication handshake;
/// the lead-capture flow never touches it. Leadbox only provides the
/// storage operations (see `leadbox-store`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopSession {
    /// Opaque session id issued by the platform.
    pub id: String,
    /// Shop domain the session is bound to.
    pub shop: String,
    /// OAuth state parameter, when mid-handshake.
    pub state: Option<String>,
    /// Whether this is an online (per-user) session.
    pub is_online: bool,
    /// Granted scopes, comma separated.
    pub scope: Option<String>,
    /// Expiry for online sessions.
    pub expires: Option<DateTime<Utc>>,
    /// Access token for the platform Admin API.
    pub access_token: Option<String>,
    /// Profile: first name.
    pub first_name: Option<String>,
    /// Profile: last name.
    pub last_name: Option<String>,
    /// Profile: email address.
    pub email: Option<String>,
    /// Profile: locale tag.
    pub locale: Option<String>,
}

/// Which sink accepted a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Delivery {
    /// The external CRM accepted the contact; nothing was persisted locally.
    Crm,
    /// The local fallback path persisted a row and sent the notification.
    LocalFallback,
}

/// Terminal outcome of one submission attempt.
///
/// Hard failures (database or mail errors on the fallback path) are not an
/// outcome; they propagate as [`crate::Error`] and the caller surfaces a
/// generic message.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SubmitOutcome {
    /// The submission was accepted by one of the two sinks.
    Accepted {
        /// Which sink took it.
        delivery: Delivery,
    },
    /// One or more fields failed validation; no side effects occurred.
    Invalid {
        /// Field name mapped to a human-readable message.
        errors: ValidationErrors,
    },
    /// A submission with the same normalized email already exists; the
    /// existing row was left untouched.
    Duplicate,
}

impl SubmitOutcome {
    /// Returns `true` if the submission was accepted.
    pub fn is_accepted(&self) -> bool {
        matches!(self, SubmitOutcome::Accepted { .. })
    }

    /// Returns `true` if the submission failed field validation.
    pub fn is_invalid(&self) -> bool {
        matches!(self, SubmitOutcome::Invalid { .. })
    }

    /// Returns `true` if the submission was rejected as a duplicate.
    pub fn is_duplicate(&self) -> bool {
        matches!(self, SubmitOutcome::Duplicate)
    }
}
