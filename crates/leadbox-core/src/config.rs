//! Service configuration.
//!
//! The handler itself never reads the environment; credentials are read
//! once at the edge (the binary, or an embedding host) and passed in as
//! plain values. Presence of the CRM credential is a capability: without
//! it the handler skips the CRM attempt and goes straight to the local
//! fallback path.

/// Credentials for the two outbound services.
#[derive(Clone, Debug, Default)]
pub struct SubmitConfig {
    /// CRM API token. `None` disables the CRM path entirely.
    pub crm_api_key: Option<String>,
    /// Transactional email API key. Required whenever the fallback path
    /// executes; without it every fallback send fails.
    pub mail_api_key: Option<String>,
}

impl SubmitConfig {
    /// Reads credentials from `HUBSPOT_ACCESS_TOKEN` and
    /// `SENDGRID_API_KEY`. Empty values count as unset.
    pub fn from_env() -> Self {
        Self {
            crm_api_key: read_env("HUBSPOT_ACCESS_TOKEN"),
            mail_api_key: read_env("SENDGRID_API_KEY"),
        }
    }

    /// Whether the CRM path is enabled.
    pub fn crm_enabled(&self) -> bool {
        self.crm_api_key.is_some()
    }
}

fn read_env(name: &str) -> Option<String> {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => Some(v),
        _ => None,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_no_capabilities() {
        let config = SubmitConfig::default();
        assert!(!config.crm_enabled());
        assert!(config.mail_api_key.is_none());
    }

    #[test]
    fn test_crm_enabled_with_key() {
        let config = SubmitConfig {
            crm_api_key: Some("pat-123".to_string()),
            mail_api_key: None,
        };
        assert!(config.crm_enabled());
    }
}
