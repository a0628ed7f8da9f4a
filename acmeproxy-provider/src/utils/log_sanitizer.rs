//! Log sanitization utilities
//!
//! Prevents secrets (passwords, tokens) and oversized values from being
//! fully exposed in debug/error logs.

/// Maximum number of characters to include in truncated log output.
const TRUNCATE_LIMIT: usize = 256;

/// Number of leading characters of a secret left visible by [`mask_secret`].
const VISIBLE_PREFIX: usize = 2;

/// MSRV-compatible replacement for `str::floor_char_boundary` (stable since 1.91.0).
fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        s.len()
    } else {
        let mut i = index;
        while i > 0 && !s.is_char_boundary(i) {
            i -= 1;
        }
        i
    }
}

/// Truncate a string for safe logging.
///
/// Returns the original string if it's within the limit,
/// otherwise returns the first `TRUNCATE_LIMIT` bytes with a suffix
/// indicating the total length.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        s.to_string()
    } else {
        format!(
            "{}... [truncated, total {} bytes]",
            &s[..floor_char_boundary(s, TRUNCATE_LIMIT)],
            s.len()
        )
    }
}

/// Mask a secret for logging.
///
/// Empty secrets render as `<empty>`. Short secrets are fully hidden; longer
/// ones keep a two character prefix so operators can tell values apart.
pub fn mask_secret(s: &str) -> String {
    let chars = s.chars().count();
    if chars == 0 {
        "<empty>".to_string()
    } else if chars <= VISIBLE_PREFIX * 4 {
        "****".to_string()
    } else {
        let prefix: String = s.chars().take(VISIBLE_PREFIX).collect();
        format!("{prefix}****")
    }
}
