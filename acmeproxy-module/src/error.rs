//! Error types for lexing, parsing, registration and provisioning.

use serde::Serialize;
use thiserror::Error;

pub use acmeproxy_provider::ProviderError;

use crate::dispenser::Location;

/// What went wrong while reading a directive block.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ParseErrorKind {
    /// Too many arguments on a head line or directive line.
    #[error("wrong argument count or unexpected line ending after '{after}'")]
    ArgumentCount { after: String },

    /// A directive with no argument following it.
    #[error("missing value for '{directive}'")]
    MissingValue { directive: String },

    /// A field supplied from two sources.
    #[error("{field} already set")]
    DuplicateValue { field: String },

    /// A directive name the block does not understand.
    #[error("unrecognized subdirective '{name}'")]
    UnknownDirective { name: String },

    /// A required field supplied by neither the head line nor the block.
    #[error("{field} must be specified")]
    MissingRequiredField { field: String },
}

/// A parse failure anchored at the offending token.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("{location} - Error during parsing: {kind}")]
pub struct ParseError {
    /// Position of the token being examined when parsing stopped.
    pub location: Location,
    /// The failure itself.
    pub kind: ParseErrorKind,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, location: Location) -> Self {
        Self { location, kind }
    }
}

/// Tokenizer failures.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum LexError {
    #[error("{location} - unterminated quoted token")]
    UnterminatedQuote { location: Location },

    #[error("{location} - unexpected '}}'")]
    UnexpectedClosingBrace { location: Location },

    #[error("{location} - unclosed '{{'")]
    UnclosedBrace { location: Location },
}

/// Module registration failures.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum RegistryError {
    #[error("module ID missing")]
    EmptyId,

    #[error("module ID '{0}' is reserved")]
    ReservedId(String),

    #[error("module already registered: {0}")]
    Duplicate(String),
}

/// Top-level error for everything a host can ask of a module.
#[derive(Error, Debug)]
pub enum ModuleError {
    #[error("{0}")]
    Lex(#[from] LexError),

    #[error("{0}")]
    Parse(#[from] ParseError),

    #[error("{0}")]
    Registry(#[from] RegistryError),

    /// No module registered under the requested ID.
    #[error("unknown module: {0}")]
    UnknownModule(String),

    /// The JSON configuration did not match the module's fields.
    #[error("decoding module config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Provider(#[from] ProviderError),
}

impl ModuleError {
    /// Whether this is caused by user configuration, used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::Lex(_) | Self::Parse(_) | Self::Json(_) | Self::UnknownModule(_) => true,
            Self::Provider(e) => e.is_expected(),
            Self::Registry(_) => false,
        }
    }
}

/// Module layer Result type alias
pub type ModuleResult<T> = std::result::Result<T, ModuleError>;
