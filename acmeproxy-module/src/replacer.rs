//! Placeholder substitution used during provisioning.
//!
//! A placeholder is `{key}` where `key` contains no whitespace, braces or
//! backslashes. `\{` and `\}` produce literal braces. Keys resolve, in order,
//! against values set on the [`Replacer`], then the global providers:
//!
//! | Key | Value |
//! |-----|-------|
//! | `env.NAME` | environment variable `NAME` (empty if unset) |
//! | `file.PATH` | contents of `PATH`, minus one trailing newline |
//! | `system.os` / `system.arch` | target OS / architecture |
//! | `system.slash` | path separator |
//! | `system.wd` | current working directory |

use std::collections::HashMap;
use std::sync::LazyLock;

use log::warn;
use regex::{Captures, Regex};

/// Matches an escaped brace or a `{key}` placeholder.
static PLACEHOLDER: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\\[{}]|\{([^{}\s\\]+)\}").ok());

/// A pure `substitute(input) -> output` function injected by the host.
pub trait Substitution {
    fn substitute(&self, input: &str) -> String;
}

impl<F> Substitution for F
where
    F: Fn(&str) -> String,
{
    fn substitute(&self, input: &str) -> String {
        self(input)
    }
}

/// Placeholder replacer with static values layered over global providers.
#[derive(Debug, Clone, Default)]
pub struct Replacer {
    values: HashMap<String, String>,
}

impl Replacer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a static value; static values shadow global providers.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Remove a static value.
    pub fn delete(&mut self, key: &str) {
        self.values.remove(key);
    }

    /// Resolve a single key.
    pub fn get(&self, key: &str) -> Option<String> {
        if let Some(value) = self.values.get(key) {
            return Some(value.clone());
        }
        global_value(key)
    }

    /// Replace every placeholder in `input`; unknown keys become `empty`.
    pub fn replace_all(&self, input: &str, empty: &str) -> String {
        let Some(re) = PLACEHOLDER.as_ref() else {
            return input.to_string();
        };
        if !input.contains(['{', '\\']) {
            return input.to_string();
        }
        re.replace_all(input, |caps: &Captures<'_>| match caps.get(1) {
            Some(key) => self
                .get(key.as_str())
                .unwrap_or_else(|| empty.to_string()),
            // Escaped brace: drop the backslash.
            None => caps[0][1..].to_string(),
        })
        .into_owned()
    }
}

impl Substitution for Replacer {
    fn substitute(&self, input: &str) -> String {
        self.replace_all(input, "")
    }
}

fn global_value(key: &str) -> Option<String> {
    if let Some(name) = key.strip_prefix("env.") {
        return Some(std::env::var(name).unwrap_or_default());
    }
    if let Some(path) = key.strip_prefix("file.") {
        return match std::fs::read_to_string(path) {
            Ok(contents) => Some(trim_trailing_newline(contents)),
            Err(e) => {
                warn!("Unable to read placeholder file {path}: {e}");
                None
            }
        };
    }
    match key {
        "system.os" => Some(std::env::consts::OS.to_string()),
        "system.arch" => Some(std::env::consts::ARCH.to_string()),
        "system.slash" => Some(std::path::MAIN_SEPARATOR.to_string()),
        "system.wd" => std::env::current_dir()
            .ok()
            .map(|p| p.display().to_string()),
        _ => None,
    }
}

fn trim_trailing_newline(mut s: String) -> String {
    if s.ends_with('\n') {
        s.pop();
        if s.ends_with('\r') {
            s.pop();
        }
    }
    s
}
