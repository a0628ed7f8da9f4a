//! Directive block parser for the acmeproxy module.
//!
//! ```text
//! acmeproxy [<endpoint>] {
//!     endpoint <endpoint>
//!     username <username>
//!     password <password>
//! }
//! ```
//!
//! The endpoint comes from the head line or from the block, never both.

use crate::dispenser::TokenStream;
use crate::error::{ParseError, ParseErrorKind};
use crate::record::ConfigRecord;

/// A directive recognized inside the block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    Endpoint,
    Username,
    Password,
}

impl Directive {
    /// Every recognized directive.
    pub const ALL: [Self; 3] = [Self::Endpoint, Self::Username, Self::Password];

    /// Look up a directive by its name in the config.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.name() == name)
    }

    /// Name as written in the config.
    pub fn name(self) -> &'static str {
        match self {
            Self::Endpoint => "endpoint",
            Self::Username => "username",
            Self::Password => "password",
        }
    }
}

/// Parse an acmeproxy block from `stream`.
///
/// Every segment the stream yields is read in order. The first error aborts
/// parsing and no partial record is returned.
pub fn parse<S>(stream: &mut S) -> Result<ConfigRecord, ParseError>
where
    S: TokenStream + ?Sized,
{
    let mut record = ConfigRecord::default();

    while stream.next() {
        if stream.next_arg() {
            record.endpoint = stream.val().to_string();
            if stream.next_arg() {
                return Err(stream.arg_err());
            }
        }

        let nesting = stream.nesting();
        while stream.next_block(nesting) {
            let Some(directive) = Directive::from_name(stream.val()) else {
                return Err(stream.unknown_directive());
            };

            if !stream.next_arg() {
                return Err(stream.error(ParseErrorKind::MissingValue {
                    directive: directive.name().to_string(),
                }));
            }
            let value = stream.val().to_string();

            let field = match directive {
                Directive::Endpoint => {
                    if !record.endpoint.is_empty() {
                        return Err(stream.error(ParseErrorKind::DuplicateValue {
                            field: directive.name().to_string(),
                        }));
                    }
                    &mut record.endpoint
                }
                Directive::Username => &mut record.username,
                Directive::Password => &mut record.password,
            };
            *field = value;

            if stream.next_arg() {
                return Err(stream.arg_err());
            }
        }
    }

    if record.endpoint.is_empty() {
        return Err(stream.error(ParseErrorKind::MissingRequiredField {
            field: Directive::Endpoint.name().to_string(),
        }));
    }
    Ok(record)
}
