//! Explicit module registry.
//!
//! The host owns a [`ModuleRegistry`] and calls each module crate's
//! registration routine during start-up; nothing registers itself.

use std::collections::BTreeMap;

use log::debug;

use crate::error::{ModuleError, ModuleResult, RegistryError};
use crate::module::{Module, ModuleInfo};

/// IDs the host keeps for itself.
const RESERVED_IDS: [&str; 2] = ["caddy", "admin"];

/// Registered modules keyed by full ID.
#[derive(Debug, Clone, Default)]
pub struct ModuleRegistry {
    modules: BTreeMap<String, ModuleInfo>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a module; fails on an empty, reserved or already registered ID.
    pub fn register(&mut self, info: ModuleInfo) -> Result<(), RegistryError> {
        let id = info.id.as_str();
        if id.is_empty() {
            return Err(RegistryError::EmptyId);
        }
        if RESERVED_IDS.contains(&id) {
            return Err(RegistryError::ReservedId(id.to_string()));
        }
        if self.modules.contains_key(id) {
            return Err(RegistryError::Duplicate(id.to_string()));
        }
        debug!("Registered module {id}");
        self.modules.insert(id.to_string(), info);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&ModuleInfo> {
        self.modules.get(id)
    }

    /// Construct a fresh instance of a registered module.
    pub fn new_instance(&self, id: &str) -> ModuleResult<Box<dyn Module>> {
        self.get(id)
            .map(|info| (info.new)())
            .ok_or_else(|| ModuleError::UnknownModule(id.to_string()))
    }

    /// Modules whose namespace is exactly `namespace`, ordered by ID.
    pub fn namespace<'a>(&'a self, namespace: &'a str) -> impl Iterator<Item = &'a ModuleInfo> {
        self.modules
            .values()
            .filter(move |info| info.id.namespace() == namespace)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModuleInfo> {
        self.modules.values()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}
