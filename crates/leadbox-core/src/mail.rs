//! Transactional mail seam.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::types::Submission;

/// Sends the internal notification email for one persisted submission.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send one notification for the given submission. One attempt only.
    async fn send_lead_notification(&self, submission: &Submission) -> Result<()>;
}

/// In-memory mailer double that records the submissions it was asked to
/// notify about (for testing).
#[derive(Debug, Default)]
pub struct MockMailer {
    fail: bool,
    sent: Mutex<Vec<Submission>>,
}

impl MockMailer {
    /// A mock whose sends always succeed.
    pub fn succeeding() -> Self {
        Self::default()
    }

    /// A mock whose sends always fail.
    pub fn failing() -> Self {
        Self {
            fail: true,
            sent: Mutex::new(Vec::new()),
        }
    }

    /// The submissions passed to `send_lead_notification`, in order.
    pub fn sent(&self) -> Vec<Submission> {
        self.sent.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl Mailer for MockMailer {
    async fn send_lead_notification(&self, submission: &Submission) -> Result<()> {
        if self.fail {
            return Err(Error::mail("mock mailer configured to fail"));
        }
        self.sent
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(submission.clone());
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn submission() -> Submission {
        Submission {
            id: 1,
            first_name: "Jo".to_string(),
            last_name: "Lee".to_string(),
            email: "jo@acme.com".to_string(),
            phone: None,
            questions: "We need integration help with billing sync".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_mock_records_sends() {
        let mailer = MockMailer::succeeding();
        mailer.send_lead_notification(&submission()).await.unwrap();
        let sent = mailer.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].email, "jo@acme.com");
    }

    #[tokio::test]
    async fn test_mock_failure_records_nothing() {
        let mailer = MockMailer::failing();
        let result = mailer.send_lead_notification(&submission()).await;
        assert!(matches!(result, Err(Error::Mail { .. })));
        assert!(mailer.sent().is_empty());
    }
}
