//! Host lifecycle tests: register, construct, configure, provision, build.

mod common;

use acmeproxy_module::{
    AcmeproxyModule, Dispenser, LexError, MODULE_ID, Module, ModuleError, ModuleRegistry,
    ProvisionContext, ProviderError, Replacer, register_modules,
};

fn registry() -> ModuleRegistry {
    let mut registry = ModuleRegistry::new();
    assert!(register_modules(&mut registry).is_ok());
    registry
}

fn downcast(module: &dyn Module) -> &AcmeproxyModule {
    module
        .as_any()
        .downcast_ref::<AcmeproxyModule>()
        .unwrap_or_else(|| panic!("unexpected module type: {module:?}"))
}

#[test]
fn test_registry_exposes_module() {
    let registry = registry();
    let info = require_ok!(registry.get(MODULE_ID).ok_or("not registered"));
    assert_eq!(info.id.name(), "acmeproxy");
    let providers: Vec<_> = registry.namespace("dns.providers").collect();
    assert_eq!(providers.len(), 1);
}

#[test]
fn test_caddyfile_lifecycle() {
    let registry = registry();
    let mut module = require_ok!(registry.new_instance(MODULE_ID));

    let mut tokens = require_ok!(Dispenser::new(
        "Caddyfile",
        "acmeproxy {
            endpoint https://{acme.host}:9000
            username {acme.user}
            password {acme.pass}
        }",
    ));
    let Some(unmarshaler) = module.as_unmarshaler() else {
        panic!("{MODULE_ID} should support directive blocks");
    };
    require_ok!(unmarshaler.unmarshal_caddyfile(&mut tokens));

    let mut replacer = Replacer::new();
    replacer.set("acme.host", "proxy.example.com");
    replacer.set("acme.user", "user");
    replacer.set("acme.pass", "pass");
    let Some(provisioner) = module.as_provisioner() else {
        panic!("{MODULE_ID} should support provisioning");
    };
    require_ok!(provisioner.provision(&ProvisionContext::new(&replacer)));

    let module = downcast(&*module);
    assert_eq!(
        module.record(),
        &common::record("https://proxy.example.com:9000", "user", "pass")
    );
    let provider = require_ok!(module.to_provider());
    assert_eq!(provider.endpoint().host_str(), Some("proxy.example.com"));
    assert_eq!(provider.credentials().password, "pass");
}

#[test]
fn test_json_lifecycle() {
    let registry = registry();
    let mut module = require_ok!(registry.new_instance(MODULE_ID));
    require_ok!(module.unmarshal_json(&serde_json::json!({
        "endpoint": "http://127.0.0.1:9000",
        "password": "{acme.pass}",
    })));

    let subst = |s: &str| s.replace("{acme.pass}", "pass");
    let Some(provisioner) = module.as_provisioner() else {
        panic!("{MODULE_ID} should support provisioning");
    };
    require_ok!(provisioner.provision(&ProvisionContext::new(&subst)));

    let module = downcast(&*module);
    assert_eq!(module.record().password, "pass");
    let provider = require_ok!(module.to_provider());
    assert!(!provider.has_credentials());
}

#[test]
fn test_json_unknown_field_rejected() {
    let mut module = AcmeproxyModule::new();
    let err = require_err!(module.unmarshal_json(&serde_json::json!({
        "endpoint": "http://127.0.0.1:9000",
        "api_token": "x",
    })));
    assert!(matches!(err, ModuleError::Json(_)));
    assert!(err.is_expected());
}

#[test]
fn test_unresolved_endpoint_fails_at_build() {
    let mut module = AcmeproxyModule::new();
    let mut tokens = require_ok!(Dispenser::new_test(
        "acmeproxy {env.ACMEPROXY_TEST_UNSET_ENDPOINT}"
    ));
    require_ok!(acmeproxy_module::Unmarshaler::unmarshal_caddyfile(
        &mut module,
        &mut tokens
    ));
    require_ok!(acmeproxy_module::Provisioner::provision(
        &mut module,
        &ProvisionContext::new(&Replacer::new())
    ));
    assert!(module.record().endpoint.is_empty());
    let err = require_err!(module.to_provider());
    assert!(matches!(err, ProviderError::CredentialValidation { .. }));
}

#[test]
fn test_lex_errors_surface_as_module_errors() {
    let err = require_err!(Dispenser::new_test("acmeproxy {\n username \"user\n}"));
    assert!(matches!(err, LexError::UnterminatedQuote { .. }));
    let err: ModuleError = err.into();
    assert!(err.to_string().contains("unterminated quoted token"));
}

#[test]
fn test_unknown_module_id() {
    let registry = registry();
    let err = require_err!(registry.new_instance("dns.providers.cloudflare"));
    assert!(matches!(err, ModuleError::UnknownModule(_)));
}
