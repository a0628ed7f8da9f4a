//! Shared test helpers.

#![allow(dead_code)]

use acmeproxy_module::{ConfigRecord, Dispenser, ParseError, parse};

/// Assert a `Result` is `Ok` and unwrap its value (fails the test otherwise).
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// Assert a `Result` is `Err` and unwrap the error (fails the test otherwise).
#[macro_export]
macro_rules! require_err {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_err(), "expected Err(..), got {res:?}");
        let Err(err) = res else {
            return;
        };
        err
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_err(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Err(err) = res else {
            return;
        };
        err
    }};
}

/// Tokenize and parse a directive block attributed to the test file.
pub fn parse_block(input: &str) -> Result<ConfigRecord, ParseError> {
    let mut d = Dispenser::new_test(input).unwrap_or_else(|e| panic!("tokenize failed: {e}"));
    parse(&mut d)
}

/// Record with all three fields set.
pub fn record(endpoint: &str, username: &str, password: &str) -> ConfigRecord {
    ConfigRecord {
        endpoint: endpoint.to_string(),
        username: username.to_string(),
        password: password.to_string(),
    }
}
