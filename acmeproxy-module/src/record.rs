use acmeproxy_provider::log_sanitizer::mask_secret;
use acmeproxy_provider::{AcmeproxyProvider, Credentials, ProviderError};
use serde::{Deserialize, Serialize};

use crate::replacer::Substitution;

/// Flat configuration of the acmeproxy module.
///
/// Fields are plain strings until [`to_provider`](Self::to_provider) validates
/// them, so placeholders survive until provisioning resolves them.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigRecord {
    /// acmeproxy server URL.
    #[serde(default)]
    pub endpoint: String,
    /// Basic-auth username.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub username: String,
    /// Basic-auth password.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub password: String,
}

impl ConfigRecord {
    /// Resolve placeholders in every field.
    pub fn substitute(&mut self, substitution: &dyn Substitution) {
        self.username = substitution.substitute(&self.username);
        self.password = substitution.substitute(&self.password);
        self.endpoint = substitution.substitute(&self.endpoint);
    }

    /// Validate the record into a provider value.
    pub fn to_provider(&self) -> Result<AcmeproxyProvider, ProviderError> {
        AcmeproxyProvider::new(
            &self.endpoint,
            Credentials::new(self.username.clone(), self.password.clone()),
        )
    }
}

impl std::fmt::Debug for ConfigRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigRecord")
            .field("endpoint", &self.endpoint)
            .field("username", &self.username)
            .field("password", &mask_secret(&self.password))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_decodes_all_fields() {
        let record: ConfigRecord = serde_json::from_str(
            r#"{"endpoint":"https://example.com:9000","username":"user","password":"pass"}"#,
        )
        .unwrap();
        assert_eq!(record.endpoint, "https://example.com:9000");
        assert_eq!(record.username, "user");
        assert_eq!(record.password, "pass");
    }

    #[test]
    fn json_rejects_unknown_fields() {
        let res = serde_json::from_str::<ConfigRecord>(r#"{"endpoint":"x","token":"y"}"#);
        assert!(res.is_err());
    }

    #[test]
    fn json_omits_empty_credentials() {
        let record = ConfigRecord {
            endpoint: "https://example.com".to_string(),
            ..ConfigRecord::default()
        };
        assert_eq!(
            serde_json::to_string(&record).unwrap(),
            r#"{"endpoint":"https://example.com"}"#
        );
    }

    #[test]
    fn substitute_touches_every_field() {
        let mut record = ConfigRecord {
            endpoint: "e".to_string(),
            username: "u".to_string(),
            password: "p".to_string(),
        };
        record.substitute(&|s: &str| s.to_uppercase());
        assert_eq!(record.endpoint, "E");
        assert_eq!(record.username, "U");
        assert_eq!(record.password, "P");
    }

    #[test]
    fn to_provider_validates_endpoint() {
        let record = ConfigRecord {
            endpoint: "not a url".to_string(),
            ..ConfigRecord::default()
        };
        assert!(matches!(
            record.to_provider(),
            Err(ProviderError::InvalidEndpoint { .. })
        ));
    }

    #[test]
    fn debug_masks_password() {
        let record = ConfigRecord {
            endpoint: "https://example.com".to_string(),
            username: "user".to_string(),
            password: "correct-horse-battery".to_string(),
        };
        assert!(!format!("{record:?}").contains("correct-horse-battery"));
    }
}
