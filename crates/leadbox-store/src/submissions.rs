//! Submission row queries.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use leadbox_core::{NewSubmission, Result, Submission, SubmissionStore};

use crate::Store;

fn row_to_submission(row: &SqliteRow) -> std::result::Result<Submission, sqlx::Error> {
    Ok(Submission {
        id: row.try_get("id")?,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        email: row.try_get("email")?,
        phone: row.try_get("phone")?,
        questions: row.try_get("questions")?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
        updated_at: row.try_get::<DateTime<Utc>, _>("updated_at")?,
    })
}

#[async_trait]
impl SubmissionStore for Store {
    async fn find_by_email(&self, normalized_email: &str) -> Result<Option<Submission>> {
        let row = sqlx::query(
            "SELECT id, first_name, last_name, email, phone, questions, created_at, updated_at
             FROM contact_submissions WHERE email = ?1 LIMIT 1",
        )
        .bind(normalized_email)
        .fetch_optional(self.pool())
        .await?;

        row.as_ref().map(row_to_submission).transpose().map_err(Into::into)
    }

    async fn insert(&self, new: NewSubmission) -> Result<Submission> {
        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO contact_submissions
                 (first_name, last_name, email, phone, questions, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )
        .bind(&new.first_name)
        .bind(&new.last_name)
        .bind(&new.email)
        .bind(&new.phone)
        .bind(&new.questions)
        .bind(now)
        .bind(now)
        .execute(self.pool())
        .await?;

        Ok(Submission {
            id: result.last_insert_rowid(),
            first_name: new.first_name,
            last_name: new.last_name,
            email: new.email,
            phone: new.phone,
            questions: new.questions,
            created_at: now,
            updated_at: now,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    async fn store() -> Store {
        Store::connect("sqlite::memory:").await.unwrap()
    }

    fn new_submission(email: &str) -> NewSubmission {
        NewSubmission {
            first_name: "Jo".to_string(),
            last_name: "Lee".to_string(),
            email: email.to_string(),
            phone: Some("+31 612345678".to_string()),
            questions: "We need integration help with billing sync".to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_returns_row_with_id() {
        let store = store().await;
        let inserted = store.insert(new_submission("jo@acme.com")).await.unwrap();
        assert_eq!(inserted.id, 1);
        assert_eq!(inserted.phone.as_deref(), Some("+31 612345678"));
        assert_eq!(inserted.created_at, inserted.updated_at);
    }

    #[tokio::test]
    async fn test_find_by_email_roundtrip() {
        let store = store().await;
        let inserted = store.insert(new_submission("jo@acme.com")).await.unwrap();

        let found = store.find_by_email("jo@acme.com").await.unwrap().unwrap();
        assert_eq!(found.id, inserted.id);
        assert_eq!(found.email, "jo@acme.com");
        assert_eq!(found.questions, inserted.questions);
        assert_eq!(found.created_at, inserted.created_at);

        assert!(store.find_by_email("none@acme.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_no_uniqueness_constraint_on_email() {
        // The dedup invariant is enforced by the handler's read, not the
        // schema; a direct double insert succeeds.
        let store = store().await;
        store.insert(new_submission("jo@acme.com")).await.unwrap();
        let second = store.insert(new_submission("jo@acme.com")).await.unwrap();
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn test_null_phone_roundtrip() {
        let store = store().await;
        let mut new = new_submission("jo@acme.com");
        new.phone = None;
        store.insert(new).await.unwrap();
        let found = store.find_by_email("jo@acme.com").await.unwrap().unwrap();
        assert_eq!(found.phone, None);
    }
}
