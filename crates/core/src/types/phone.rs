//! Indian mobile number helpers.
//!
//! Three separate concerns live here:
//! - [`format_phone_input`] is the as-you-type mask applied to the `#phone` field
//! - [`format_phone_number`] renders a stored number for display
//! - [`is_valid_phone`] checks the `+91` + ten digits shape

use std::sync::LazyLock;

use regex::Regex;

/// Country calling code every stored number starts with.
pub const COUNTRY_PREFIX: &str = "91";

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+91\s?\d{10}$").expect("Invalid regex"));

/// Re-mask the phone field after a keystroke.
///
/// Strips every non-digit, prepends `91` when the digits don't already start
/// with it, and renders anything longer than the prefix as `+91 <rest>`.
///
/// The transform runs on every keystroke over the whole value, so a digit
/// typed in the middle of the field is re-prefixed along with everything else,
/// and clearing the field leaves a bare `91`.
///
/// ```rust
/// use nexamart_core::format_phone_input;
///
/// assert_eq!(format_phone_input("9876543210"), "+91 9876543210");
/// assert_eq!(format_phone_input("919876543210"), "+91 9876543210");
/// assert_eq!(format_phone_input("+91 98765"), "+91 98765");
/// ```
#[must_use]
pub fn format_phone_input(raw: &str) -> String {
    let mut digits: String = raw.chars().filter(char::is_ascii_digit).collect();

    if !digits.starts_with(COUNTRY_PREFIX) {
        digits.insert_str(0, COUNTRY_PREFIX);
    }

    if digits.len() > COUNTRY_PREFIX.len() {
        let (prefix, rest) = digits.split_at(COUNTRY_PREFIX.len());
        format!("+{prefix} {rest}")
    } else {
        digits
    }
}

/// Format a stored phone number for display as `+91 XXXXX XXXXX`.
///
/// Only a 12-digit number starting with `91` is reformatted; anything else is
/// returned unchanged. An empty input yields an empty string.
#[must_use]
pub fn format_phone_number(phone: &str) -> String {
    if phone.is_empty() {
        return String::new();
    }

    let cleaned: String = phone.chars().filter(char::is_ascii_digit).collect();
    if cleaned.len() == 12 && cleaned.starts_with(COUNTRY_PREFIX) {
        let (prefix, rest) = cleaned.split_at(2);
        let (first, second) = rest.split_at(5);
        return format!("+{prefix} {first} {second}");
    }

    phone.to_string()
}

/// Returns `true` for `+91` followed by exactly ten digits.
///
/// Whitespace anywhere in the input is ignored.
#[must_use]
pub fn is_valid_phone(phone: &str) -> bool {
    let compact: String = phone.chars().filter(|c| !c.is_whitespace()).collect();
    PHONE_RE.is_match(&compact)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_mask_adds_prefix() {
        assert_eq!(format_phone_input("9876543210"), "+91 9876543210");
    }

    #[test]
    fn test_input_mask_no_double_prefix() {
        assert_eq!(format_phone_input("919876543210"), "+91 9876543210");
        assert_eq!(format_phone_input("+91 9876543210"), "+91 9876543210");
    }

    #[test]
    fn test_input_mask_is_stable_while_typing() {
        let mut value = String::new();
        for digit in "9876543210".chars() {
            value.push(digit);
            value = format_phone_input(&value);
        }
        assert_eq!(value, "+91 9876543210");
    }

    #[test]
    fn test_input_mask_interior_edit_is_reprefixed() {
        // "1" typed in front of the country code breaks the prefix match
        assert_eq!(format_phone_input("1+91 98765"), "+91 19198765");
    }

    #[test]
    fn test_input_mask_cleared_field() {
        assert_eq!(format_phone_input(""), "91");
        assert_eq!(format_phone_input("abc"), "91");
    }

    #[test]
    fn test_display_format() {
        assert_eq!(format_phone_number("919876543210"), "+91 98765 43210");
        assert_eq!(format_phone_number("+91 98765-43210"), "+91 98765 43210");
    }

    #[test]
    fn test_display_format_passthrough() {
        assert_eq!(format_phone_number(""), "");
        assert_eq!(format_phone_number("9876543210"), "9876543210");
        assert_eq!(format_phone_number("449876543210"), "449876543210");
    }

    #[test]
    fn test_is_valid_phone() {
        assert!(is_valid_phone("+919876543210"));
        assert!(is_valid_phone("+91 98765 43210"));
        assert!(!is_valid_phone("9876543210"));
        assert!(!is_valid_phone("+91987654321"));
        assert!(!is_valid_phone("+44 9876543210"));
    }
}
