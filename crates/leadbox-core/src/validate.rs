//! Field validators for the contact form.
//!
//! Pure functions over raw strings. The same rules run on both sides of
//! the boundary (the embedded UI re-implements them for inline feedback),
//! so messages here are written for end users, not operators. Failures are
//! aggregated; the caller receives every failing field at once rather than
//! the first one found.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::types::ContactForm;

/// Field name mapped to a human-readable validation message.
///
/// Keys are the wire field names (`firstName`, `email`, ...). A `BTreeMap`
/// keeps the aggregation order deterministic.
pub type ValidationErrors = BTreeMap<String, String>;

/// Basic `local@domain.tld` shape. Deliberately loose; the email is only a
/// dedup key, not a deliverability guarantee.
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex compiles")
});

const NAME_MIN: usize = 2;
const NAME_MAX: usize = 50;
const EMAIL_MAX: usize = 254;
const PHONE_MIN_DIGITS: usize = 7;
const PHONE_MAX_DIGITS: usize = 12;
const QUESTIONS_MIN: usize = 10;
const QUESTIONS_MAX: usize = 1000;

/// Trims and lower-cases an email for use as the dedup key.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Validates a name field (first or last). `label` is interpolated into
/// the message, e.g. "First name".
pub fn validate_name(label: &str, raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(format!("{label} is required"));
    }
    let len = trimmed.chars().count();
    if !(NAME_MIN..=NAME_MAX).contains(&len) {
        return Some(format!(
            "{label} must be between {NAME_MIN} and {NAME_MAX} characters"
        ));
    }
    let ok = trimmed
        .chars()
        .all(|c| c.is_alphabetic() || c == ' ' || c == '-' || c == '\'');
    if !ok {
        return Some(format!(
            "{label} may only contain letters, spaces, hyphens, and apostrophes"
        ));
    }
    None
}

/// Validates the email field.
pub fn validate_email(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some("Email is required".to_string());
    }
    if trimmed.chars().count() > EMAIL_MAX || !EMAIL_RE.is_match(trimmed) {
        return Some("Invalid email".to_string());
    }
    None
}

/// Validates an optional phone number: if present, the digit count after
/// stripping everything else must be 7-12.
pub fn validate_phone(raw: Option<&str>) -> Option<String> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    let digits = raw.chars().filter(char::is_ascii_digit).count();
    if !(PHONE_MIN_DIGITS..=PHONE_MAX_DIGITS).contains(&digits) {
        return Some("Invalid phone number".to_string());
    }
    None
}

/// Validates the free-text questions field.
pub fn validate_questions(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some("Questions are required".to_string());
    }
    let len = trimmed.chars().count();
    if !(QUESTIONS_MIN..=QUESTIONS_MAX).contains(&len) {
        return Some(format!(
            "Questions must be between {QUESTIONS_MIN} and {QUESTIONS_MAX} characters"
        ));
    }
    None
}

/// Runs every validator over a form and aggregates the failures, keyed by
/// wire field name. An empty map means the form passed.
pub fn validate_form(form: &ContactForm) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    if let Some(msg) = validate_name("First name", &form.first_name) {
        errors.insert("firstName".to_string(), msg);
    }
    if let Some(msg) = validate_name("Last name", &form.last_name) {
        errors.insert("lastName".to_string(), msg);
    }
    if let Some(msg) = validate_email(&form.email) {
        errors.insert("email".to_string(), msg);
    }
    if let Some(msg) = validate_phone(form.phone_number.as_deref()) {
        errors.insert("phoneNumber".to_string(), msg);
    }
    if let Some(msg) = validate_questions(&form.questions) {
        errors.insert("questions".to_string(), msg);
    }
    errors
}
