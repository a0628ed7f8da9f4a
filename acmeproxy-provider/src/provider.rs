//! The acmeproxy provider value object.

use std::collections::HashMap;

use log::debug;
use serde::Serialize;
use url::Url;

use crate::error::{ProviderError, Result};
use crate::types::{
    CredentialValidationError, Credentials, FieldType, PROVIDER_NAME, ProviderCredentialField,
    ProviderMetadata, get_required_field,
};
use crate::utils::log_sanitizer::truncate_for_log;

/// URL schemes an acmeproxy server can be reached over.
const SUPPORTED_SCHEMES: [&str; 2] = ["http", "https"];

/// An acmeproxy DNS provider.
///
/// acmeproxy forwards DNS-01 challenge records to a remote proxy which owns
/// the real DNS credentials. The provider therefore only needs the proxy
/// endpoint and, optionally, basic-auth credentials.
///
/// # Construction
///
/// ```rust
/// use acmeproxy_provider::{AcmeproxyProvider, Credentials};
///
/// let provider = AcmeproxyProvider::new(
///     "https://example.com:9000",
///     Credentials::new("user", "pass"),
/// )
/// .unwrap();
/// assert!(provider.has_credentials());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AcmeproxyProvider {
    endpoint: Url,
    #[serde(flatten)]
    credentials: Credentials,
}

impl AcmeproxyProvider {
    /// Creates a provider, validating that `endpoint` is an absolute http(s) URL.
    pub fn new(endpoint: &str, credentials: Credentials) -> Result<Self> {
        let endpoint = parse_endpoint(endpoint)?;
        debug!(
            "[{PROVIDER_NAME}] Provider created for endpoint {}",
            truncate_for_log(endpoint.as_str())
        );
        Ok(Self {
            endpoint,
            credentials,
        })
    }

    /// Build a provider from a flat key-value map.
    ///
    /// `endpoint` is required and must be non-blank; `username` and
    /// `password` default to empty.
    pub fn from_map(map: &HashMap<String, String>) -> Result<Self> {
        let endpoint = get_required_field(map, "endpoint", "Endpoint").map_err(|error| {
            ProviderError::CredentialValidation {
                provider: PROVIDER_NAME.to_string(),
                error,
            }
        })?;
        Self::new(&endpoint, Credentials::from_map(map))
    }

    /// The acmeproxy server URL.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Basic-auth credentials for the acmeproxy server.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Whether requests to the proxy carry basic-auth credentials.
    pub fn has_credentials(&self) -> bool {
        self.credentials.is_set()
    }

    /// Static metadata describing the fields this provider accepts.
    pub fn metadata() -> ProviderMetadata {
        ProviderMetadata {
            id: PROVIDER_NAME.to_string(),
            name: "acmeproxy".to_string(),
            description: "Delegates DNS-01 challenges to a remote acmeproxy server".to_string(),
            fields: vec![
                ProviderCredentialField {
                    key: "endpoint".to_string(),
                    label: "Endpoint".to_string(),
                    field_type: FieldType::Text,
                    required: true,
                    placeholder: Some("https://acmeproxy.example.com:9000".to_string()),
                    help_text: Some("Base URL of the acmeproxy server".to_string()),
                },
                ProviderCredentialField {
                    key: "username".to_string(),
                    label: "Username".to_string(),
                    field_type: FieldType::Text,
                    required: false,
                    placeholder: None,
                    help_text: None,
                },
                ProviderCredentialField {
                    key: "password".to_string(),
                    label: "Password".to_string(),
                    field_type: FieldType::Password,
                    required: false,
                    placeholder: None,
                    help_text: None,
                },
            ],
        }
    }
}

fn parse_endpoint(endpoint: &str) -> Result<Url> {
    let invalid = |detail: String| ProviderError::InvalidEndpoint {
        provider: PROVIDER_NAME.to_string(),
        endpoint: endpoint.to_string(),
        detail,
    };

    if endpoint.trim().is_empty() {
        return Err(ProviderError::CredentialValidation {
            provider: PROVIDER_NAME.to_string(),
            error: CredentialValidationError::EmptyField {
                field: "endpoint".to_string(),
                label: "Endpoint".to_string(),
            },
        });
    }

    let url = Url::parse(endpoint).map_err(|e| invalid(e.to_string()))?;
    if !SUPPORTED_SCHEMES.contains(&url.scheme()) {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    Ok(url)
}
