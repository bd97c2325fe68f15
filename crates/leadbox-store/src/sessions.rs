//! Platform session record CRUD.
//!
//! Sessions are created and mutated by the embedding host's auth
//! handshake; the lead-capture flow never touches them. The store only
//! provides upsert, load, and delete by id.

use chrono::{DateTime, Utc};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use leadbox_core::{Result, ShopSession};

use crate::Store;

fn row_to_session(row: &SqliteRow) -> std::result::Result<ShopSession, sqlx::Error> {
    Ok(ShopSession {
        id: row.try_get("id")?,
        shop: row.try_get("shop")?,
        state: row.try_get("state")?,
        is_online: row.try_get("is_online")?,
        scope: row.try_get("scope")?,
        expires: row.try_get::<Option<DateTime<Utc>>, _>("expires")?,
        access_token: row.try_get("access_token")?,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        email: row.try_get("email")?,
        locale: row.try_get("locale")?,
    })
}

impl Store {
    /// Inserts or replaces a session record by id.
    pub async fn store_session(&self, session: &ShopSession) -> Result<()> {
        sqlx::query(
            "INSERT INTO sessions
                 (id, shop, state, is_online, scope, expires, access_token,
                  first_name, last_name, email, locale)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
             ON CONFLICT(id) DO UPDATE SET
                 shop = excluded.shop,
                 state = excluded.state,
                 is_online = excluded.is_online,
                 scope = excluded.scope,
                 expires = excluded.expires,
                 access_token = excluded.access_token,
                 first_name = excluded.first_name,
                 last_name = excluded.last_name,
                 email = excluded.email,
                 locale = excluded.locale",
        )
        .bind(&session.id)
        .bind(&session.shop)
        .bind(&session.state)
        .bind(session.is_online)
        .bind(&session.scope)
        .bind(session.expires)
        .bind(&session.access_token)
        .bind(&session.first_name)
        .bind(&session.last_name)
        .bind(&session.email)
        .bind(&session.locale)
        .execute(self.pool())
        .await?;
        Ok(())
    }

    /// Loads a session by id.
    pub async fn load_session(&self, id: &str) -> Result<Option<ShopSession>> {
        let row = sqlx::query(
            "SELECT id, shop, state, is_online, scope, expires, access_token,
                    first_name, last_name, email, locale
             FROM sessions WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?;

        row.as_ref().map(row_to_session).transpose().map_err(Into::into)
    }

    /// Deletes a session by id. Returns whether a row was removed.
    pub async fn delete_session(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM sessions WHERE id = ?1")
            .bind(id)
            .execute(self.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn session(id: &str) -> ShopSession {
        ShopSession {
            id: id.to_string(),
            shop: "acme.myshopify.com".to_string(),
            state: None,
            is_online: false,
            scope: Some("read_products,write_customers".to_string()),
            expires: None,
            access_token: Some("shpat_test".to_string()),
            first_name: Some("Jo".to_string()),
            last_name: Some("Lee".to_string()),
            email: Some("jo@acme.com".to_string()),
            locale: Some("en".to_string()),
        }
    }

    #[tokio::test]
    async fn test_session_roundtrip() {
        let store = Store::connect("sqlite::memory:").await.unwrap();
        let original = session("offline_acme.myshopify.com");
        store.store_session(&original).await.unwrap();

        let loaded = store
            .load_session("offline_acme.myshopify.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(loaded, original);
    }

    #[tokio::test]
    async fn test_store_session_upserts() {
        let store = Store::connect("sqlite::memory:").await.unwrap();
        let mut s = session("sess-1");
        store.store_session(&s).await.unwrap();

        s.access_token = Some("shpat_rotated".to_string());
        s.expires = Some(Utc::now());
        store.store_session(&s).await.unwrap();

        let loaded = store.load_session("sess-1").await.unwrap().unwrap();
        assert_eq!(loaded.access_token.as_deref(), Some("shpat_rotated"));
        assert!(loaded.expires.is_some());
    }

    #[tokio::test]
    async fn test_delete_session() {
        let store = Store::connect("sqlite::memory:").await.unwrap();
        store.store_session(&session("sess-1")).await.unwrap();
        assert!(store.delete_session("sess-1").await.unwrap());
        assert!(!store.delete_session("sess-1").await.unwrap());
        assert!(store.load_session("sess-1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_load_missing_session() {
        let store = Store::connect("sqlite::memory:").await.unwrap();
        assert!(store.load_session("nope").await.unwrap().is_none());
    }
}
