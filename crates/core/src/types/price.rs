//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are rendered the way the storefront shows money everywhere: currency
//! glyph, locale digit grouping, exactly two decimal places.
//!
//! ```rust
//! use nexamart_core::Price;
//! use rust_decimal::Decimal;
//!
//! assert_eq!(Price::inr(Decimal::from(1100)).display(), "₹1,100.00");
//! assert_eq!(Price::inr(Decimal::from(100_000)).display(), "₹1,00,000.00");
//! ```

use core::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., rupees, not paise).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a price in Indian rupees.
    #[must_use]
    pub const fn inr(amount: Decimal) -> Self {
        Self::new(amount, CurrencyCode::INR)
    }

    /// Format for display, e.g. `₹1,00,000.00`.
    ///
    /// The glyph is always the first character, so a negative amount renders
    /// as `₹-50.00`.
    #[must_use]
    pub fn display(&self) -> String {
        let rounded = self
            .amount
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        let text = format!("{:.2}", rounded.abs());
        let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));

        format!(
            "{}{sign}{}.{fraction}",
            self.currency_code.symbol(),
            self.currency_code.group_digits(whole)
        )
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// ISO 4217 currency codes the storefront can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    INR,
    USD,
}

impl CurrencyCode {
    /// Currency glyph placed before the amount.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::INR => "₹",
            Self::USD => "$",
        }
    }

    /// ISO 4217 code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::INR => "INR",
            Self::USD => "USD",
        }
    }

    /// Insert group separators into a run of integer digits.
    ///
    /// `INR` uses the Indian system (last three digits, then pairs);
    /// `USD` groups by three throughout.
    #[must_use]
    pub fn group_digits(&self, digits: &str) -> String {
        match self {
            Self::INR => group(digits, 3, 2),
            Self::USD => group(digits, 3, 3),
        }
    }
}

/// Split `digits` into comma-separated groups counted from the right.
fn group(digits: &str, first: usize, rest: usize) -> String {
    let chars: Vec<char> = digits.chars().collect();
    let mut groups = Vec::new();
    let mut end = chars.len();
    let mut size = first;

    while end > 0 {
        let start = end.saturating_sub(size);
        let chunk: String = chars
            .get(start..end)
            .map(|slice| slice.iter().collect())
            .unwrap_or_default();
        groups.push(chunk);
        end = start;
        size = rest;
    }

    groups.reverse();
    groups.join(",")
}
