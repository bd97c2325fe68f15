//! Submission persistence seam.
//!
//! The SQLite implementation lives in `leadbox-store`; [`MemoryStore`] is
//! a faithful in-memory double for handler and API tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;

use crate::error::Result;
use crate::types::{NewSubmission, Submission};

/// Storage for contact submission rows.
///
/// `find_by_email` and `insert` are two independent operations; nothing
/// spans them transactionally. Two concurrent submissions with the same
/// email can both pass the check and both insert.
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Look up a submission by normalized (trimmed, lower-cased) email.
    async fn find_by_email(&self, normalized_email: &str) -> Result<Option<Submission>>;

    /// Insert a new submission row and return it with id and timestamps.
    async fn insert(&self, new: NewSubmission) -> Result<Submission>;
}

/// In-memory submission store (for testing).
#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: Mutex<Vec<Submission>>,
    next_id: AtomicI64,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every row inserted so far, in insertion order.
    pub fn rows(&self) -> Vec<Submission> {
        self.rows.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl SubmissionStore for MemoryStore {
    async fn find_by_email(&self, normalized_email: &str) -> Result<Option<Submission>> {
        let rows = self.rows.lock().unwrap_or_else(|e| e.into_inner());
        Ok(rows.iter().find(|r| r.email == normalized_email).cloned())
    }

    async fn insert(&self, new: NewSubmission) -> Result<Submission> {
        let now = Utc::now();
        let submission = Submission {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            first_name: new.first_name,
            last_name: new.last_name,
            email: new.email,
            phone: new.phone,
            questions: new.questions,
            created_at: now,
            updated_at: now,
        };
        self.rows
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(submission.clone());
        Ok(submission)
    }
}
