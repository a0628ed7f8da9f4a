//! # acmeproxy-provider
//!
//! The provider value object behind the `dns.providers.acmeproxy` module.
//!
//! An acmeproxy server accepts DNS-01 challenge records over HTTP and
//! publishes them with its own DNS credentials. Clients only need the
//! proxy's endpoint and, optionally, basic-auth credentials.
//!
//! ## Usage
//!
//! ```rust
//! use acmeproxy_provider::{AcmeproxyProvider, Credentials};
//!
//! let provider = AcmeproxyProvider::new(
//!     "https://acmeproxy.example.com:9000",
//!     Credentials::new("user", "pass"),
//! )?;
//! assert_eq!(provider.endpoint().port(), Some(9000));
//! # Ok::<(), acmeproxy_provider::ProviderError>(())
//! ```
//!
//! ## Error Handling
//!
//! Construction returns [`Result<T, ProviderError>`](ProviderError):
//!
//! - [`ProviderError::InvalidEndpoint`] — the endpoint is not an absolute http(s) URL
//! - [`ProviderError::CredentialValidation`] — a required field is missing or blank

mod error;
mod provider;
mod types;
mod utils;

pub use error::{ProviderError, Result};

pub use provider::AcmeproxyProvider;

pub use types::{
    CredentialValidationError, Credentials, FieldType, PROVIDER_NAME, ProviderCredentialField,
    ProviderMetadata,
};

pub use utils::log_sanitizer;
