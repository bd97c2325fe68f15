#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! HubSpot CRM adapter.
//!
//! Implements [`leadbox_core::CrmClient`] against the HubSpot contacts
//! API: one `POST /crm/v3/objects/contacts` per submission, bearer auth,
//! fixed property mapping. No retry, no backoff; every failure mode is
//! reported as [`leadbox_core::Error::Crm`] and the submission handler
//! treats them all alike.

use async_trait::async_trait;
use serde::Serialize;

use leadbox_core::{ContactForm, CrmClient, Error, Result};

/// Production HubSpot API base.
const HUBSPOT_API_BASE: &str = "https://api.hubapi.com";

/// Request body for contact creation.
///
/// The free-text questions land in the single `message` property; HubSpot
/// schema negotiation is out of scope.
#[derive(Debug, Serialize)]
struct CreateContactRequest<'a> {
    properties: ContactProperties<'a>,
}

#[derive(Debug, Serialize)]
struct ContactProperties<'a> {
    firstname: &'a str,
    lastname: &'a str,
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    phone: Option<String>,
    message: &'a str,
}

/// HubSpot contact-creation client.
pub struct HubSpotClient {
    http: reqwest::Client,
    token: String,
    base_url: String,
}

impl HubSpotClient {
    /// Creates a client against the production HubSpot API.
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_base_url(token, HUBSPOT_API_BASE)
    }

    /// Creates a client against a custom base URL (for testing).
    pub fn with_base_url(token: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            token: token.into(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl CrmClient for HubSpotClient {
    async fn create_contact(&self, form: &ContactForm) -> Result<()> {
        let body = CreateContactRequest {
            properties: ContactProperties {
                firstname: form.first_name.trim(),
                lastname: form.last_name.trim(),
                email: form.email.trim(),
                phone: form.phone(),
                message: form.questions.trim(),
            },
        };

        let url = format!("{}/crm/v3/objects/contacts", self.base_url);
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::crm_with_source("contact creation request failed", e))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            tracing::debug!(%status, %detail, "HubSpot rejected contact creation");
            return Err(Error::crm(format!(
                "HubSpot rejected contact creation (HTTP {status})"
            )));
        }

        Ok(())
    }
}
