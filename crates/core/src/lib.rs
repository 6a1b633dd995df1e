//! NexaMart Core - Shared types library.
//!
//! This crate provides the domain types used by the storefront page behaviors:
//! - type-safe product and cart-line IDs
//! - prices with currency-aware display formatting
//! - email and phone validation and formatting
//! - OTP request/response wire types
//! - cart pricing rules and summary computation
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no DOM
//! access, no HTTP clients. This keeps it usable from native tests and from
//! the `wasm32` browser build alike.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers and the cart/OTP models

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
