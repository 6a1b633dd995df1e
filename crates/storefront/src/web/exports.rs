//! Functions the templates call from inline handlers, under their historical
//! JavaScript names.

use std::time::Duration;

use nexamart_core::{CartId, ProductId, format_phone_number, is_valid_email, is_valid_phone};
use wasm_bindgen::prelude::*;
use web_sys::Element;

use super::{BrowserRuntime, context};
use crate::behaviors::notify::{self, NotificationKind};
use crate::behaviors::cart_actions;
use crate::debounce::Debouncer;
use crate::runtime::Runtime;

#[wasm_bindgen(js_name = addToCart)]
pub fn add_to_cart(product_id: i32) {
    let Some(ctx) = context() else { return };
    let task_ctx = ctx.clone();
    ctx.runtime().spawn(async move {
        cart_actions::add_to_cart(&task_ctx, ProductId::new(product_id)).await;
    });
}

/// Resolves to `{ ok, status, body }`, rejects on transport failure.
#[wasm_bindgen(js_name = updateCartQuantity)]
pub fn update_cart_quantity(cart_id: i32, quantity: u32) -> js_sys::Promise {
    let ctx = context();
    wasm_bindgen_futures::future_to_promise(async move {
        let ctx = ctx.ok_or_else(|| JsValue::from_str("page behaviors unavailable"))?;
        let response = cart_actions::update_cart_quantity(&ctx, CartId::new(cart_id), quantity)
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let result = js_sys::Object::new();
        js_sys::Reflect::set(&result, &"ok".into(), &response.is_ok().into())?;
        js_sys::Reflect::set(&result, &"status".into(), &response.status.into())?;
        js_sys::Reflect::set(&result, &"body".into(), &response.body.into())?;
        Ok(result.into())
    })
}

#[wasm_bindgen(js_name = removeCartItem)]
pub fn remove_cart_item(cart_id: i32) {
    let Some(ctx) = context() else { return };
    let task_ctx = ctx.clone();
    ctx.runtime().spawn(async move {
        cart_actions::remove_cart_item(&task_ctx, CartId::new(cart_id)).await;
    });
}

#[wasm_bindgen(js_name = moveToWishlist)]
pub fn move_to_wishlist(cart_id: i32, product_id: i32) {
    let Some(ctx) = context() else { return };
    let task_ctx = ctx.clone();
    ctx.runtime().spawn(async move {
        cart_actions::move_to_wishlist(&task_ctx, CartId::new(cart_id), ProductId::new(product_id))
            .await;
    });
}

#[wasm_bindgen(js_name = updateCartCount)]
pub fn update_cart_count(count: i32) {
    if let Some(ctx) = context() {
        notify::update_cart_count(ctx.page(), u32::try_from(count).unwrap_or(0));
    }
}

/// `kind` is one of `success` (default), `info`, `warning`, `danger`.
#[wasm_bindgen(js_name = showNotification)]
pub fn show_notification(message: &str, kind: Option<String>) {
    let Some(ctx) = context() else { return };
    let kind = kind
        .as_deref()
        .map(str::parse::<NotificationKind>)
        .transpose()
        .unwrap_or_else(|e| {
            tracing::warn!("{}, using success", e);
            None
        })
        .unwrap_or_default();
    notify::show_notification(&ctx, message, kind);
}

/// Returns the markup to hand back to `hideLoading`.
#[wasm_bindgen(js_name = showLoading)]
pub fn show_loading(element: &Element) -> String {
    context().map_or_else(String::new, |ctx| notify::show_loading(ctx.page(), element))
}

#[wasm_bindgen(js_name = hideLoading)]
pub fn hide_loading(element: &Element, original: &str) {
    if let Some(ctx) = context() {
        notify::hide_loading(ctx.page(), element, original);
    }
}

#[wasm_bindgen(js_name = formatPhoneNumber)]
pub fn format_phone(phone: &str) -> String {
    format_phone_number(phone)
}

#[wasm_bindgen(js_name = isValidEmail)]
pub fn valid_email(email: &str) -> bool {
    is_valid_email(email)
}

#[wasm_bindgen(js_name = isValidPhone)]
pub fn valid_phone(phone: &str) -> bool {
    is_valid_phone(phone)
}

/// A debounced JavaScript callback, returned by `debounce`.
#[wasm_bindgen]
pub struct Debounced {
    inner: Debouncer<BrowserRuntime, JsValue>,
}

#[wasm_bindgen]
impl Debounced {
    /// Schedule the callback with `arg`, superseding any pending call.
    pub fn call(&self, arg: JsValue) {
        self.inner.call(arg);
    }
}

#[wasm_bindgen]
pub fn debounce(callback: js_sys::Function, wait_ms: u32) -> Debounced {
    let inner = Debouncer::new(
        BrowserRuntime,
        Duration::from_millis(wait_ms.into()),
        move |arg: JsValue| {
            if let Err(e) = callback.call1(&JsValue::NULL, &arg) {
                tracing::error!("Debounced callback threw: {:?}", e);
            }
        },
    );
    Debounced { inner }
}
