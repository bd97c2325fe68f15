#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Leadbox core library.
//!
//! Types, field validators, provider seams, and the submission fallback
//! chain for the embedded "contact us" lead-capture flow.

pub mod config;
pub mod crm;
pub mod error;
pub mod mail;
pub mod store;
pub mod submit;
pub mod types;
pub mod validate;

// Re-exports for convenience
pub use config::SubmitConfig;
pub use crm::{CrmClient, MockCrm};
pub use error::{Error, Result};
pub use mail::{MockMailer, Mailer};
pub use store::{MemoryStore, SubmissionStore};
pub use submit::SubmissionHandler;
pub use types::{ContactForm, Delivery, NewSubmission, ShopSession, Submission, SubmitOutcome};
pub use validate::{ValidationErrors, normalize_email, validate_form};
