//! NexaMart storefront page behaviors.
//!
//! Client-side glue for the server-rendered storefront: password toggles,
//! flash dismissal, phone masking, OTP requests, cart quantity updates with
//! live totals, and a handful of helpers the templates call inline.
//!
//! The behaviors are generic over a [`Platform`]: a [`Page`] (the DOM and
//! window), an [`HttpClient`] and a [`Runtime`]. The `wasm32` build wires them
//! to the browser in `web`; tests use the in-memory implementations in
//! `testing` (feature `testing`).

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod behaviors;
pub mod config;
pub mod context;
pub mod controller;
pub mod debounce;
pub mod error;
pub mod http;
pub mod page;
pub mod runtime;

#[cfg(all(any(test, feature = "testing"), not(target_arch = "wasm32")))]
pub mod testing;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use api::StorefrontApi;
pub use config::UiConfig;
pub use context::{PageContext, Platform};
pub use controller::{Features, PageController};
pub use error::{Result, UiError};
pub use http::{HttpClient, HttpResponse, ReqwestClient};
pub use page::Page;
pub use runtime::Runtime;
