//! Cart pricing: line totals, shipping, tax and grand total.
//!
//! Everything here is a pure function of the quantities and unit prices
//! currently on the page. Nothing is accumulated between calls, so the
//! displayed totals can never drift from the inputs they were computed from.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::price::{CurrencyCode, Price};

/// Shipping and tax policy of the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingRules {
    /// Subtotal at or above which shipping is free.
    pub free_shipping_threshold: Decimal,
    /// Shipping charged below the threshold.
    pub flat_shipping: Decimal,
    /// Tax charged on every order, regardless of subtotal.
    pub flat_tax: Decimal,
    /// Currency the cart is displayed in.
    pub currency: CurrencyCode,
}

impl Default for PricingRules {
    fn default() -> Self {
        Self {
            free_shipping_threshold: Decimal::from(999),
            flat_shipping: Decimal::from(50),
            flat_tax: Decimal::from(300),
            currency: CurrencyCode::INR,
        }
    }
}

impl PricingRules {
    /// Whether `subtotal` qualifies for free shipping.
    #[must_use]
    pub fn ships_free(&self, subtotal: Decimal) -> bool {
        subtotal >= self.free_shipping_threshold
    }

    /// Shipping charge for `subtotal`.
    #[must_use]
    pub fn shipping(&self, subtotal: Decimal) -> Decimal {
        if self.ships_free(subtotal) {
            Decimal::ZERO
        } else {
            self.flat_shipping
        }
    }

    /// Tax charge. Independent of the subtotal.
    #[must_use]
    pub const fn tax(&self) -> Decimal {
        self.flat_tax
    }

    /// Subtotal plus shipping plus tax, saturating at `Decimal::MAX`.
    #[must_use]
    pub fn grand_total(&self, subtotal: Decimal) -> Decimal {
        subtotal
            .saturating_add(self.shipping(subtotal))
            .saturating_add(self.tax())
    }

    /// Wrap an amount in the cart's currency.
    #[must_use]
    pub const fn price(&self, amount: Decimal) -> Price {
        Price::new(amount, self.currency)
    }
}

/// One cart line as read from the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartLine {
    pub quantity: u32,
    pub unit_price: Decimal,
}

impl CartLine {
    #[must_use]
    pub const fn new(quantity: u32, unit_price: Decimal) -> Self {
        Self {
            quantity,
            unit_price,
        }
    }

    /// Build a line from the raw quantity input value and `data-price`
    /// attribute, using the storefront's lenient parsing.
    #[must_use]
    pub fn from_raw(quantity: &str, unit_price: &str) -> Self {
        Self::new(parse_quantity(quantity), parse_unit_price(unit_price))
    }

    /// Unit price times quantity.
    ///
    /// Both come straight from the page, so the product saturates at
    /// `Decimal::MAX` instead of overflowing.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price
            .checked_mul(Decimal::from(self.quantity))
            .unwrap_or(Decimal::MAX)
    }
}

/// Derived cart totals.
///
/// Field names match the `totals` object the server returns from
/// `/update_cart/<id>`, so the same type decodes those replies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartSummary {
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub tax: Decimal,
    pub grand_total: Decimal,
}

impl CartSummary {
    /// Compute the summary for `lines` under `rules`.
    #[must_use]
    pub fn compute<'a>(lines: impl IntoIterator<Item = &'a CartLine>, rules: &PricingRules) -> Self {
        let subtotal = lines
            .into_iter()
            .map(CartLine::line_total)
            .fold(Decimal::ZERO, Decimal::saturating_add);
        Self::from_subtotal(subtotal, rules)
    }

    /// Compute the summary for a known subtotal.
    #[must_use]
    pub fn from_subtotal(subtotal: Decimal, rules: &PricingRules) -> Self {
        Self {
            subtotal,
            shipping: rules.shipping(subtotal),
            tax: rules.tax(),
            grand_total: rules.grand_total(subtotal),
        }
    }

    /// What the free-shipping banner should say for this summary.
    #[must_use]
    pub fn shipping_banner(&self, rules: &PricingRules) -> ShippingBanner {
        if rules.ships_free(self.subtotal) {
            ShippingBanner::FreeShipping
        } else {
            // Only reached below the threshold, so the difference is positive.
            ShippingBanner::AmountNeeded(rules.price(rules.free_shipping_threshold - self.subtotal))
        }
    }
}

/// State of the free-shipping incentive banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShippingBanner {
    /// The cart already qualifies.
    FreeShipping,
    /// The cart needs this much more to qualify.
    AmountNeeded(Price),
}

/// JSON reply from the cart mutation endpoints.
///
/// Every field except `success` is optional; older endpoints reply with a bare
/// redirect or an empty body and callers only rely on the HTTP status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartMutationResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub cart_count: Option<u32>,
    #[serde(default)]
    pub totals: Option<CartSummary>,
}

/// Parse a quantity input the way the page reads it.
///
/// Takes the leading integer after optional whitespace (`"3 pcs"` is 3).
/// Empty, non-numeric and negative inputs read as 0; oversized values saturate.
#[must_use]
pub fn parse_quantity(raw: &str) -> u32 {
    let trimmed = raw.trim_start();
    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let digits: String = unsigned.chars().take_while(char::is_ascii_digit).collect();
    if negative || digits.is_empty() {
        return 0;
    }

    digits.parse::<u32>().unwrap_or(u32::MAX)
}

/// Parse a `data-price` attribute the way the page reads it.
///
/// Takes the leading decimal number after optional whitespace (`"499.00 INR"`
/// is 499). Empty, non-numeric and negative inputs read as 0.
#[must_use]
pub fn parse_unit_price(raw: &str) -> Decimal {
    let trimmed = raw.trim_start();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    if unsigned.starts_with('-') {
        return Decimal::ZERO;
    }

    let mut seen_dot = false;
    let number: String = unsigned
        .chars()
        .take_while(|c| {
            if *c == '.' && !seen_dot {
                seen_dot = true;
                return true;
            }
            c.is_ascii_digit()
        })
        .collect();

    let number = number.trim_end_matches('.');
    let number = if number.starts_with('.') {
        format!("0{number}")
    } else {
        number.to_string()
    };

    Decimal::from_str(&number).unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(value: i64) -> Decimal {
        Decimal::from(value)
    }

    #[test]
    fn test_shipping_threshold() {
        let rules = PricingRules::default();
        assert_eq!(rules.shipping(d(0)), d(50));
        assert_eq!(rules.shipping(d(998)), d(50));
        assert_eq!(rules.shipping(Decimal::new(99_899, 2)), d(50));
        assert_eq!(rules.shipping(d(999)), d(0));
        assert_eq!(rules.shipping(d(5000)), d(0));
    }

    #[test]
    fn test_tax_and_grand_total_for_any_subtotal() {
        let rules = PricingRules::default();
        for subtotal in [0, 1, 400, 998, 999, 1000, 1100, 25_000] {
            let s = d(subtotal);
            assert_eq!(rules.tax(), d(300));
            assert_eq!(rules.grand_total(s), s + rules.shipping(s) + d(300));
        }
    }

    #[test]
    fn test_two_items_qualify_for_free_shipping() {
        let rules = PricingRules::default();
        let lines = [CartLine::new(1, d(500)), CartLine::new(2, d(300))];
        let summary = CartSummary::compute(&lines, &rules);

        assert_eq!(summary.subtotal, d(1100));
        assert_eq!(summary.shipping, d(0));
        assert_eq!(summary.tax, d(300));
        assert_eq!(summary.grand_total, d(1400));
        assert_eq!(summary.shipping_banner(&rules), ShippingBanner::FreeShipping);
    }

    #[test]
    fn test_single_item_needs_more() {
        let rules = PricingRules::default();
        let summary = CartSummary::compute(&[CartLine::new(1, d(400))], &rules);

        assert_eq!(summary.subtotal, d(400));
        assert_eq!(summary.shipping, d(50));
        assert_eq!(summary.grand_total, d(750));
        match summary.shipping_banner(&rules) {
            ShippingBanner::AmountNeeded(price) => assert_eq!(price.display(), "₹599.00"),
            ShippingBanner::FreeShipping => panic!("400 should not ship free"),
        }
    }

    #[test]
    fn test_empty_cart() {
        let rules = PricingRules::default();
        let summary = CartSummary::compute(&[], &rules);
        assert_eq!(summary.subtotal, d(0));
        assert_eq!(summary.grand_total, d(350));
    }

    #[test]
    fn test_parse_quantity_leniency() {
        assert_eq!(parse_quantity("3"), 3);
        assert_eq!(parse_quantity("  12"), 12);
        assert_eq!(parse_quantity("3 pcs"), 3);
        assert_eq!(parse_quantity("+4"), 4);
        assert_eq!(parse_quantity(""), 0);
        assert_eq!(parse_quantity("abc"), 0);
        assert_eq!(parse_quantity("-2"), 0);
        assert_eq!(parse_quantity("99999999999"), u32::MAX);
    }

    #[test]
    fn test_huge_lines_saturate() {
        let rules = PricingRules::default();

        let line = CartLine::from_raw("99999999999", "99999999999999999999");
        assert_eq!(line.line_total(), Decimal::MAX);
        let summary = CartSummary::compute(&[line], &rules);
        assert_eq!(summary.subtotal, Decimal::MAX);
        assert_eq!(summary.grand_total, Decimal::MAX);

        let line = CartLine::from_raw("4000000000", "10000000000000000000");
        let summary = CartSummary::compute(&[line, line, line], &rules);
        assert_eq!(summary.subtotal, Decimal::MAX);
        assert_eq!(summary.shipping, d(0));
        assert_eq!(summary.shipping_banner(&rules), ShippingBanner::FreeShipping);
    }

    #[test]
    fn test_parse_unit_price_leniency() {
        assert_eq!(parse_unit_price("499"), d(499));
        assert_eq!(parse_unit_price("499.50"), Decimal::new(49_950, 2));
        assert_eq!(parse_unit_price(".5"), Decimal::new(5, 1));
        assert_eq!(parse_unit_price("12. rupees"), d(12));
        assert_eq!(parse_unit_price("1.2.3"), Decimal::new(12, 1));
        assert_eq!(parse_unit_price(""), d(0));
        assert_eq!(parse_unit_price("free"), d(0));
        assert_eq!(parse_unit_price("-10"), d(0));
    }

    #[test]
    fn test_mutation_response_decodes_server_totals() {
        let body = r#"{
            "success": true,
            "message": "Item removed from cart",
            "cart_count": 2,
            "totals": {"subtotal": 1100.0, "shipping": 0, "tax": 300, "grand_total": 1400.0}
        }"#;
        let response: CartMutationResponse = serde_json::from_str(body).unwrap_or_else(|e| {
            panic!("decode failed: {e}");
        });
        assert_eq!(response.cart_count, Some(2));
        assert_eq!(response.totals.map(|t| t.grand_total), Some(d(1400)));
    }

    #[test]
    fn test_mutation_response_tolerates_missing_fields() {
        let response: CartMutationResponse =
            serde_json::from_str("{}").unwrap_or_else(|e| panic!("decode failed: {e}"));
        assert!(!response.success);
        assert_eq!(response.cart_count, None);
    }
}
