//! Email address validation.
//!
//! ```
//! use nexamart_core::is_valid_email;
//!
//! assert!(is_valid_email("user.name+tag@domain.co.in"));
//! assert!(!is_valid_email("user@localhost"));
//! ```

use std::sync::LazyLock;

use regex::Regex;

/// The storefront's email shape check: something, `@`, something, `.`, something,
/// with no whitespace and no second `@`.
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid regex"));

/// Returns `true` if `email` has the `local@domain.tld` shape the storefront
/// accepts.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}
