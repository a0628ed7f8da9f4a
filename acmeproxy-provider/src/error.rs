use serde::Serialize;

use crate::types::CredentialValidationError;

/// Error type for building an acmeproxy provider.
///
/// Each variant includes a `provider` field identifying the provider that
/// produced the error, plus variant-specific context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "code")]
pub enum ProviderError {
    /// The configured endpoint is not a usable acmeproxy URL.
    InvalidEndpoint {
        /// Provider that produced the error.
        provider: String,
        /// The rejected endpoint value.
        endpoint: String,
        /// Why the endpoint was rejected.
        detail: String,
    },

    /// A configuration field failed validation.
    CredentialValidation {
        /// Provider that produced the error.
        provider: String,
        /// The underlying field error.
        error: CredentialValidationError,
    },
}

impl ProviderError {
    /// Whether this is expected behavior (bad user input), used for log level selection.
    ///
    /// Returns `true` when `warn` is appropriate and `false` for `error`.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::InvalidEndpoint { .. } | Self::CredentialValidation { .. }
        )
    }
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidEndpoint {
                provider,
                endpoint,
                detail,
            } => {
                write!(f, "[{provider}] Invalid endpoint '{endpoint}': {detail}")
            }
            Self::CredentialValidation { provider, error } => {
                write!(f, "[{provider}] {error}")
            }
        }
    }
}

impl std::error::Error for ProviderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::CredentialValidation { error, .. } => Some(error),
            Self::InvalidEndpoint { .. } => None,
        }
    }
}

/// Convenience type alias for `Result<T, ProviderError>`.
pub type Result<T> = std::result::Result<T, ProviderError>;
