use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::utils::log_sanitizer::mask_secret;

/// Provider identifier used in errors and metadata.
pub const PROVIDER_NAME: &str = "acmeproxy";

// ============ Credential Types ============

/// HTTP basic-auth credentials sent to the acmeproxy server.
///
/// Both fields are optional: an empty `username` means the proxy is
/// contacted without authentication.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Basic-auth username.
    #[serde(default)]
    pub username: String,
    /// Basic-auth password.
    #[serde(default)]
    pub password: String,
}

impl Credentials {
    /// Creates credentials from a username/password pair.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Whether a username has been configured.
    pub fn is_set(&self) -> bool {
        !self.username.is_empty()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &mask_secret(&self.password))
            .finish()
    }
}

// ============ Provider Metadata Types ============

/// The input type of a credential field (affects UI rendering).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Plain text input.
    Text,
    /// Masked/password input.
    Password,
}

/// Definition of a single configuration field accepted by the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderCredentialField {
    /// Machine-readable field key (e.g., `"endpoint"`).
    pub key: String,
    /// Human-readable label (e.g., `"Endpoint"`).
    pub label: String,
    /// Input type for UI rendering.
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Whether the field must be supplied.
    pub required: bool,
    /// Optional placeholder text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Optional help/description text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
}

/// Static metadata describing the acmeproxy provider.
///
/// Obtain via [`AcmeproxyProvider::metadata()`](crate::AcmeproxyProvider::metadata).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderMetadata {
    /// Provider identifier.
    pub id: String,
    /// Human-readable provider name.
    pub name: String,
    /// Short description of the provider.
    pub description: String,
    /// Fields accepted by this provider.
    pub fields: Vec<ProviderCredentialField>,
}

impl ProviderMetadata {
    /// Fields that must be present for a valid configuration.
    pub fn required_fields(&self) -> impl Iterator<Item = &ProviderCredentialField> {
        self.fields.iter().filter(|f| f.required)
    }
}

// ============ Validation ============

/// Validation error for provider configuration fields.
///
/// Returned when fields are missing, empty, or have an invalid format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CredentialValidationError {
    /// A required field is missing entirely.
    MissingField {
        /// Machine-readable field key.
        field: String,
        /// Human-readable field label.
        label: String,
    },
    /// A field is present but empty/whitespace-only.
    EmptyField {
        /// Machine-readable field key.
        field: String,
        /// Human-readable field label.
        label: String,
    },
    /// A field has an invalid format.
    InvalidFormat {
        /// Machine-readable field key.
        field: String,
        /// Human-readable field label.
        label: String,
        /// Description of what's wrong with the format.
        reason: String,
    },
}

impl std::fmt::Display for CredentialValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField { label, .. } => write!(f, "Missing required field: {label}"),
            Self::EmptyField { label, .. } => write!(f, "Field must not be empty: {label}"),
            Self::InvalidFormat { label, reason, .. } => write!(f, "{label}: {reason}"),
        }
    }
}

impl std::error::Error for CredentialValidationError {}

/// Obtain a required field from the map and verify that it is not blank.
pub(crate) fn get_required_field(
    map: &HashMap<String, String>,
    key: &str,
    label: &str,
) -> Result<String, CredentialValidationError> {
    match map.get(key) {
        None => Err(CredentialValidationError::MissingField {
            field: key.to_string(),
            label: label.to_string(),
        }),
        Some(v) if v.trim().is_empty() => Err(CredentialValidationError::EmptyField {
            field: key.to_string(),
            label: label.to_string(),
        }),
        Some(v) => Ok(v.clone()),
    }
}

impl Credentials {
    /// Build credentials from a flat key-value map. Missing keys become empty strings.
    pub fn from_map(map: &HashMap<String, String>) -> Self {
        Self {
            username: map.get("username").cloned().unwrap_or_default(),
            password: map.get("password").cloned().unwrap_or_default(),
        }
    }

    /// Convert credentials to a `HashMap` for flat key-value storage.
    pub fn to_map(&self) -> HashMap<String, String> {
        [
            ("username".to_string(), self.username.clone()),
            ("password".to_string(), self.password.clone()),
        ]
        .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_map_roundtrip() {
        let map: HashMap<String, String> = [
            ("username".to_string(), "user".to_string()),
            ("password".to_string(), "pass".to_string()),
        ]
        .into();
        let cred = Credentials::from_map(&map);
        assert_eq!(cred, Credentials::new("user", "pass"));
        assert_eq!(cred.to_map(), map);
    }

    #[test]
    fn credentials_missing_keys_are_empty() {
        let cred = Credentials::from_map(&HashMap::new());
        assert!(!cred.is_set());
        assert!(cred.password.is_empty());
    }

    #[test]
    fn credentials_debug_masks_password() {
        let cred = Credentials::new("user", "hunter2-secret");
        let debug = format!("{cred:?}");
        assert!(debug.contains("user"));
        assert!(!debug.contains("hunter2-secret"));
    }

    #[test]
    fn required_field_missing() {
        let res = get_required_field(&HashMap::new(), "endpoint", "Endpoint");
        assert!(
            matches!(&res, Err(CredentialValidationError::MissingField { .. })),
            "unexpected result: {res:?}"
        );
    }

    #[test]
    fn required_field_blank() {
        let map: HashMap<String, String> = [("endpoint".to_string(), "  ".to_string())].into();
        let res = get_required_field(&map, "endpoint", "Endpoint");
        assert!(
            matches!(&res, Err(CredentialValidationError::EmptyField { .. })),
            "unexpected result: {res:?}"
        );
    }

    #[test]
    fn validation_error_display() {
        let e = CredentialValidationError::InvalidFormat {
            field: "endpoint".to_string(),
            label: "Endpoint".to_string(),
            reason: "unsupported scheme 'ftp'".to_string(),
        };
        assert_eq!(e.to_string(), "Endpoint: unsupported scheme 'ftp'");
    }

    #[test]
    fn credentials_deserialize_defaults() {
        let cred: Credentials = serde_json::from_str(r#"{"username":"u"}"#).unwrap();
        assert_eq!(cred, Credentials::new("u", ""));
    }
}
