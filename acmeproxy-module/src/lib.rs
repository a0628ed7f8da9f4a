//! # acmeproxy-module
//!
//! The `dns.providers.acmeproxy` module for a Caddy-style host: registration,
//! directive-block parsing, JSON decoding and placeholder provisioning.
//!
//! ## Configuration
//!
//! ```text
//! acmeproxy [<endpoint>] {
//!     endpoint [<endpoint>]
//!     username <username>
//!     password <password>
//! }
//! ```
//!
//! The endpoint is required and may be given on the head line or in the
//! block, but not both. `username` and `password` are optional.
//!
//! ## Usage
//!
//! ```rust
//! use acmeproxy_module::{
//!     register_modules, Dispenser, ModuleRegistry, ProvisionContext, Replacer, MODULE_ID,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // 1. The host registers modules explicitly at start-up
//! let mut registry = ModuleRegistry::new();
//! register_modules(&mut registry)?;
//!
//! // 2. Construct and configure an instance from a directive block
//! let mut module = registry.new_instance(MODULE_ID)?;
//! let mut tokens = Dispenser::new("Caddyfile", "acmeproxy https://example.com:9000 {\n\tusername {env.ACME_USER}\n}")?;
//! if let Some(unmarshaler) = module.as_unmarshaler() {
//!     unmarshaler.unmarshal_caddyfile(&mut tokens)?;
//! }
//!
//! // 3. Resolve placeholders
//! let replacer = Replacer::new();
//! if let Some(provisioner) = module.as_provisioner() {
//!     provisioner.provision(&ProvisionContext::new(&replacer))?;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Parse failures are [`ParseError`]s carrying a [`ParseErrorKind`] and the
//! [`Location`] of the offending token. [`ModuleError`] unifies them with
//! tokenizer, registry, JSON and provider errors.

mod acmeproxy;
mod dispenser;
mod error;
mod module;
mod parser;
mod record;
mod registry;
mod replacer;

pub use acmeproxy::{AcmeproxyModule, MODULE_ID, register_modules};

pub use dispenser::{Dispenser, Location, TEST_FILE, Token, TokenStream, tokenize};

pub use error::{
    LexError, ModuleError, ModuleResult, ParseError, ParseErrorKind, ProviderError, RegistryError,
};

pub use module::{Module, ModuleId, ModuleInfo, ProvisionContext, Provisioner, Unmarshaler};

pub use parser::{Directive, parse};

pub use record::ConfigRecord;

pub use registry::ModuleRegistry;

pub use replacer::{Replacer, Substitution};
