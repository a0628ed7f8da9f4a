//! The `dns.providers.acmeproxy` module.

use std::any::Any;

use acmeproxy_provider::log_sanitizer::{mask_secret, truncate_for_log};
use acmeproxy_provider::{AcmeproxyProvider, ProviderError};
use log::{debug, warn};

use crate::dispenser::TokenStream;
use crate::error::{ModuleResult, ParseError, RegistryError};
use crate::module::{Module, ModuleId, ModuleInfo, ProvisionContext, Provisioner, Unmarshaler};
use crate::parser;
use crate::record::ConfigRecord;
use crate::registry::ModuleRegistry;

/// Full ID the module registers under.
pub const MODULE_ID: &str = "dns.providers.acmeproxy";

/// acmeproxy DNS provider as a host module.
///
/// Configured from a directive block or JSON, then provisioned to resolve
/// placeholders, then converted into an [`AcmeproxyProvider`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AcmeproxyModule {
    record: ConfigRecord,
}

impl AcmeproxyModule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Module wrapping an already built record.
    pub fn from_record(record: ConfigRecord) -> Self {
        Self { record }
    }

    /// Registration info: the module ID and its constructor.
    pub fn info() -> ModuleInfo {
        ModuleInfo {
            id: ModuleId::from(MODULE_ID),
            new: new_module,
        }
    }

    pub fn record(&self) -> &ConfigRecord {
        &self.record
    }

    pub fn into_record(self) -> ConfigRecord {
        self.record
    }

    /// Build the provider this module configures.
    pub fn to_provider(&self) -> Result<AcmeproxyProvider, ProviderError> {
        self.record.to_provider()
    }
}

fn new_module() -> Box<dyn Module> {
    Box::new(AcmeproxyModule::new())
}

impl Module for AcmeproxyModule {
    fn module_info(&self) -> ModuleInfo {
        Self::info()
    }

    fn unmarshal_json(&mut self, raw: &serde_json::Value) -> ModuleResult<()> {
        self.record = serde_json::from_value(raw.clone())?;
        Ok(())
    }

    fn as_unmarshaler(&mut self) -> Option<&mut dyn Unmarshaler> {
        Some(self)
    }

    fn as_provisioner(&mut self) -> Option<&mut dyn Provisioner> {
        Some(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Unmarshaler for AcmeproxyModule {
    /// Syntax:
    ///
    /// ```text
    /// acmeproxy [<endpoint>] {
    ///     endpoint [<endpoint>]
    ///     username <username>
    ///     password <password>
    /// }
    /// ```
    fn unmarshal_caddyfile(&mut self, stream: &mut dyn TokenStream) -> Result<(), ParseError> {
        self.record = parser::parse(stream)?;
        Ok(())
    }
}

impl Provisioner for AcmeproxyModule {
    fn provision(&mut self, ctx: &ProvisionContext<'_>) -> ModuleResult<()> {
        self.record.substitute(ctx.substitution());
        debug!(
            "Provisioned acmeproxy with endpoint {} (username {}, password {})",
            truncate_for_log(&self.record.endpoint),
            truncate_for_log(&self.record.username),
            mask_secret(&self.record.password),
        );
        if self.record.endpoint.is_empty() {
            warn!("acmeproxy endpoint resolved to an empty string");
        }
        Ok(())
    }
}

/// Register every module this crate provides.
pub fn register_modules(registry: &mut ModuleRegistry) -> Result<(), RegistryError> {
    registry.register(AcmeproxyModule::info())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispenser::Dispenser;
    use crate::replacer::Replacer;

    #[test]
    fn info_constructs_empty_module() {
        let info = AcmeproxyModule::info();
        assert_eq!(info.id.as_str(), MODULE_ID);
        assert_eq!(info.id.namespace(), "dns.providers");
        let module = (info.new)();
        let module = module.as_any().downcast_ref::<AcmeproxyModule>().unwrap();
        assert_eq!(module, &AcmeproxyModule::new());
    }

    #[test]
    fn unmarshal_replaces_previous_record() {
        let mut module = AcmeproxyModule::from_record(ConfigRecord {
            endpoint: "old".to_string(),
            username: "old".to_string(),
            password: "old".to_string(),
        });
        let mut d = Dispenser::new_test("acmeproxy https://new.example").unwrap();
        module.unmarshal_caddyfile(&mut d).unwrap();
        assert_eq!(module.record().endpoint, "https://new.example");
        assert!(module.record().username.is_empty());
    }

    #[test]
    fn failed_unmarshal_keeps_previous_record() {
        let mut module = AcmeproxyModule::new();
        let mut d = Dispenser::new_test("acmeproxy {\n username user\n}").unwrap();
        assert!(module.unmarshal_caddyfile(&mut d).is_err());
        assert_eq!(module.record(), &ConfigRecord::default());
    }

    #[test]
    fn provision_substitutes_all_fields() {
        let mut replacer = Replacer::new();
        replacer.set("host", "proxy.local");
        replacer.set("user", "alice");
        replacer.set("pass", "wonderland");
        let mut module = AcmeproxyModule::from_record(ConfigRecord {
            endpoint: "https://{host}:9000".to_string(),
            username: "{user}".to_string(),
            password: "{pass}".to_string(),
        });
        module.provision(&ProvisionContext::new(&replacer)).unwrap();
        assert_eq!(module.record().endpoint, "https://proxy.local:9000");
        assert_eq!(module.record().username, "alice");
        assert_eq!(module.record().password, "wonderland");
    }

    #[test]
    fn json_config() {
        let mut module = AcmeproxyModule::new();
        module
            .unmarshal_json(&serde_json::json!({
                "endpoint": "https://example.com:9000",
                "username": "user",
            }))
            .unwrap();
        assert_eq!(module.record().username, "user");
        assert!(module.record().password.is_empty());
        let provider = module.to_provider().unwrap();
        assert!(provider.has_credentials());
    }

    #[test]
    fn register_twice_fails() {
        let mut registry = ModuleRegistry::new();
        register_modules(&mut registry).unwrap();
        assert_eq!(
            register_modules(&mut registry),
            Err(RegistryError::Duplicate(MODULE_ID.to_string()))
        );
    }
}
