//! Module traits shared between the host and the modules it loads.

use std::any::Any;

use serde::Serialize;

use crate::dispenser::TokenStream;
use crate::error::{ModuleResult, ParseError};
use crate::replacer::Substitution;

/// Dotted module identifier such as `dns.providers.acmeproxy`.
///
/// The last label is the module's name; everything before it is the
/// namespace the host looks modules up in.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ModuleId(String);

impl ModuleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Everything before the last dot, or `""` for a single label.
    pub fn namespace(&self) -> &str {
        self.0.rsplit_once('.').map_or("", |(ns, _)| ns)
    }

    /// The last label.
    pub fn name(&self) -> &str {
        self.0.rsplit_once('.').map_or(self.0.as_str(), |(_, name)| name)
    }
}

impl std::fmt::Display for ModuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ModuleId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Registration record for a module.
#[derive(Debug, Clone)]
pub struct ModuleInfo {
    pub id: ModuleId,
    /// Constructs a new, unconfigured instance.
    pub new: fn() -> Box<dyn Module>,
}

/// A host-loadable module.
pub trait Module: Any + Send + Sync + std::fmt::Debug {
    /// Registration info for this module type.
    fn module_info(&self) -> ModuleInfo;

    /// Configure the module from its JSON form.
    fn unmarshal_json(&mut self, raw: &serde_json::Value) -> ModuleResult<()>;

    /// Caddyfile support, when the module has it.
    fn as_unmarshaler(&mut self) -> Option<&mut dyn Unmarshaler> {
        None
    }

    /// Provisioning support, when the module has it.
    fn as_provisioner(&mut self) -> Option<&mut dyn Provisioner> {
        None
    }

    fn as_any(&self) -> &dyn Any;
}

/// Modules configurable from a directive block.
pub trait Unmarshaler {
    fn unmarshal_caddyfile(&mut self, stream: &mut dyn TokenStream) -> Result<(), ParseError>;
}

/// Modules that finish setting themselves up after configuration is loaded.
pub trait Provisioner {
    fn provision(&mut self, ctx: &ProvisionContext<'_>) -> ModuleResult<()>;
}

/// What the host hands a module during provisioning.
pub struct ProvisionContext<'a> {
    substitution: &'a dyn Substitution,
}

impl<'a> ProvisionContext<'a> {
    pub fn new(substitution: &'a dyn Substitution) -> Self {
        Self { substitution }
    }

    /// Resolve placeholders in `input`.
    pub fn substitute(&self, input: &str) -> String {
        self.substitution.substitute(input)
    }

    pub fn substitution(&self) -> &'a dyn Substitution {
        self.substitution
    }
}

impl std::fmt::Debug for ProvisionContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProvisionContext").finish_non_exhaustive()
    }
}
