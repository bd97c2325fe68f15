#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! SendGrid notification mailer.
//!
//! Implements [`leadbox_core::Mailer`]: one `POST /v3/mail/send` per
//! persisted submission, addressed to a fixed internal recipient with a
//! fixed HTML template. Submitted fields are interpolated into the HTML
//! as-is, matching the upstream template (no escaping layer exists; the
//! recipient is internal).

use async_trait::async_trait;
use serde::Serialize;

use leadbox_core::{Error, Mailer, Result, Submission};

/// Production SendGrid API base.
const SENDGRID_API_BASE: &str = "https://api.sendgrid.com";

/// Internal inbox that receives every fallback notification.
const LEAD_RECIPIENT: &str = "leads@leadbox.app";

/// From-address registered with the mail service.
const LEAD_SENDER: &str = "no-reply@leadbox.app";

const SUBJECT: &str = "New contact form submission";

#[derive(Debug, Serialize)]
struct SendRequest {
    personalizations: Vec<Personalization>,
    from: Address,
    subject: &'static str,
    content: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Personalization {
    to: Vec<Address>,
}

#[derive(Debug, Serialize)]
struct Address {
    email: &'static str,
}

#[derive(Debug, Serialize)]
struct Content {
    #[serde(rename = "type")]
    content_type: &'static str,
    value: String,
}

/// Renders the fixed notification template for one submission.
fn notification_html(submission: &Submission) -> String {
    format!(
        "<h2>{SUBJECT}</h2>\
         <p><strong>Name:</strong> {} {}</p>\
         <p><strong>Email:</strong> {}</p>\
         <p><strong>Phone:</strong> {}</p>\
         <p><strong>Questions:</strong></p>\
         <p>{}</p>",
        submission.first_name,
        submission.last_name,
        submission.email,
        submission.phone.as_deref().unwrap_or("-"),
        submission.questions,
    )
}

/// SendGrid transactional mail client.
pub struct SendGridMailer {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl SendGridMailer {
    /// Creates a mailer against the production SendGrid API.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, SENDGRID_API_BASE)
    }

    /// Creates a mailer against a custom base URL (for testing).
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl Mailer for SendGridMailer {
    async fn send_lead_notification(&self, submission: &Submission) -> Result<()> {
        let body = SendRequest {
            personalizations: vec![Personalization {
                to: vec![Address {
                    email: LEAD_RECIPIENT,
                }],
            }],
            from: Address { email: LEAD_SENDER },
            subject: SUBJECT,
            content: vec![Content {
                content_type: "text/html",
                value: notification_html(submission),
            }],
        };

        let url = format!("{}/v3/mail/send", self.base_url);
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::mail_with_source("notification send failed", e))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            tracing::debug!(%status, %detail, "SendGrid rejected notification");
            return Err(Error::mail(format!(
                "SendGrid rejected notification (HTTP {status})"
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use wiremock::matchers::{bearer_token, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn submission() -> Submission {
        Submission {
            id: 7,
            first_name: "Jo".to_string(),
            last_name: "Lee".to_string(),
            email: "jo@acme.com".to_string(),
            phone: Some("+31 612345678".to_string()),
            questions: "We need integration help with billing sync".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_send_posts_once_to_fixed_recipient() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v3/mail/send"))
            .and(bearer_token("sg-test"))
            .respond_with(ResponseTemplate::new(202))
            .expect(1)
            .mount(&server)
            .await;

        let mailer = SendGridMailer::with_base_url("sg-test", server.uri());
        mailer.send_lead_notification(&submission()).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert_eq!(
            body["personalizations"][0]["to"][0]["email"],
            LEAD_RECIPIENT
        );
        assert_eq!(body["subject"], SUBJECT);
        let html = body["content"][0]["value"].as_str().unwrap();
        assert!(html.contains("Jo Lee"));
        assert!(html.contains("jo@acme.com"));
        assert!(html.contains("+31 612345678"));
    }

    #[tokio::test]
    async fn test_rejection_is_mail_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v3/mail/send"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let mailer = SendGridMailer::with_base_url("bad-key", server.uri());
        let err = mailer.send_lead_notification(&submission()).await.unwrap_err();
        assert!(matches!(err, Error::Mail { .. }));
    }

    #[test]
    fn test_template_interpolates_fields_verbatim() {
        let mut s = submission();
        s.phone = None;
        // No escaping layer: markup in user input passes through.
        s.questions = "need <b>help</b>".to_string();
        let html = notification_html(&s);
        assert!(html.contains("<strong>Phone:</strong> -"));
        assert!(html.contains("need <b>help</b>"));
    }
}
