//! CRM provider seam.
//!
//! The submission handler talks to the CRM through [`CrmClient`]; the
//! HTTP implementation lives in `leadbox-crm`. [`MockCrm`] is exported for
//! tests in dependent crates.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::types::ContactForm;

/// A client that can create one contact record in an external CRM.
///
/// Exactly one attempt per submission: implementations must not retry or
/// back off. Any failure of any kind is treated identically by the caller.
#[async_trait]
pub trait CrmClient: Send + Sync {
    /// Create a contact from the validated form fields.
    async fn create_contact(&self, form: &ContactForm) -> Result<()>;
}

/// In-memory CRM double that records call counts (for testing).
#[derive(Debug, Default)]
pub struct MockCrm {
    fail: bool,
    calls: AtomicUsize,
}

impl MockCrm {
    /// A mock whose `create_contact` always succeeds.
    pub fn succeeding() -> Self {
        Self {
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    /// A mock whose `create_contact` always fails.
    pub fn failing() -> Self {
        Self {
            fail: true,
            calls: AtomicUsize::new(0),
        }
    }

    /// How many times `create_contact` was invoked.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CrmClient for MockCrm {
    async fn create_contact(&self, _form: &ContactForm) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(Error::crm("mock CRM configured to fail"));
        }
        Ok(())
    }
}
