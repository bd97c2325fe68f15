//! The submission fallback chain.
//!
//! Exactly three stages:
//!
//! ```text
//! ValidateInput -> {Reject}
//! ValidateInput -> AttemptExternalCRM -> {Succeed, FallbackLocal}
//! FallbackLocal  -> {PersistAndNotify, RejectDuplicate, RejectTransportError}
//! ```
//!
//! The CRM is the system of record when its path succeeds; nothing is
//! persisted locally in that case. The fallback path is the local store
//! plus one notification email.

use std::sync::Arc;

use crate::crm::CrmClient;
use crate::error::Result;
use crate::mail::Mailer;
use crate::store::SubmissionStore;
use crate::types::{ContactForm, Delivery, NewSubmission, SubmitOutcome};
use crate::validate::{normalize_email, validate_form};

/// Orchestrates one contact-form submission end to end.
///
/// Holds its collaborators behind trait objects; the CRM client is
/// optional and its absence selects the fallback-only control flow. The
/// handler is a pure function of its inputs plus these collaborators — it
/// never reads process environment.
pub struct SubmissionHandler {
    crm: Option<Arc<dyn CrmClient>>,
    store: Arc<dyn SubmissionStore>,
    mailer: Arc<dyn Mailer>,
}

impl SubmissionHandler {
    /// Creates a handler. Pass `None` for `crm` when no CRM credential is
    /// configured.
    pub fn new(
        crm: Option<Arc<dyn CrmClient>>,
        store: Arc<dyn SubmissionStore>,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        Self { crm, store, mailer }
    }

    /// Handles one submission.
    ///
    /// Returns `Ok` with one of the three terminal outcomes, or `Err` when
    /// the fallback path hit a database or mail failure. Validation
    /// failures and duplicates perform zero side effects.
    pub async fn submit(&self, form: &ContactForm) -> Result<SubmitOutcome> {
        let errors = validate_form(form);
        if !errors.is_empty() {
            return Ok(SubmitOutcome::Invalid { errors });
        }

        if let Some(crm) = &self.crm {
            match crm.create_contact(form).await {
                Ok(()) => {
                    tracing::info!(email = %normalize_email(&form.email), "contact created in CRM");
                    return Ok(SubmitOutcome::Accepted {
                        delivery: Delivery::Crm,
                    });
                }
                Err(err) => {
                    // Single attempt; every failure mode falls back the same way.
                    tracing::warn!(error = %err, "CRM contact creation failed, using local fallback");
                }
            }
        }

        self.fallback(form).await
    }

    /// The local fallback: duplicate check, insert, notify.
    ///
    /// The check and the insert are two independent statements with no
    /// transaction spanning them.
    async fn fallback(&self, form: &ContactForm) -> Result<SubmitOutcome> {
        let email = normalize_email(&form.email);
        if self.store.find_by_email(&email).await?.is_some() {
            tracing::info!(%email, "duplicate submission rejected");
            return Ok(SubmitOutcome::Duplicate);
        }

        let submission = self.store.insert(NewSubmission::from_form(form)).await?;
        self.mailer.send_lead_notification(&submission).await?;
        tracing::info!(%email, id = submission.id, "submission persisted and notified");

        Ok(SubmitOutcome::Accepted {
            delivery: Delivery::LocalFallback,
        })
    }
}
