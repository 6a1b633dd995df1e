//! Core types for NexaMart.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod email;
pub mod id;
pub mod otp;
pub mod phone;
pub mod price;

pub use cart::{
    CartLine, CartMutationResponse, CartSummary, PricingRules, ShippingBanner, parse_quantity,
    parse_unit_price,
};
pub use email::is_valid_email;
pub use id::*;
pub use otp::{OtpPurpose, OtpRequest, OtpResponse};
pub use phone::{COUNTRY_PREFIX, format_phone_input, format_phone_number, is_valid_phone};
pub use price::{CurrencyCode, Price};
