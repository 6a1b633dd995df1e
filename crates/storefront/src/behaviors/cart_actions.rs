//! Cart operations invoked from inline template handlers.
//!
//! These are the functions product and cart templates call directly
//! (`onclick="addToCart(12)"` and friends), not listeners bound at
//! initialization.

use nexamart_core::{CartId, ProductId};
use tracing::instrument;

use crate::api::cart_mutation;
use crate::context::{PageContext, Platform};
use crate::error::{MOVE_FAILED_MESSAGE, REMOVE_FAILED_MESSAGE, Result};
use crate::http::HttpResponse;
use crate::page::Page;

use super::notify::update_cart_count;

/// Confirmation asked before removing a cart line.
pub const REMOVE_CONFIRMATION: &str = "Are you sure you want to remove this item from your cart?";

/// Add a product with the quantity from its `#quantity-<id>` input (1 when
/// the input is missing or empty). Reloads on success.
///
/// A non-2xx reply is ignored and a transport failure is only logged.
#[instrument(skip(ctx))]
pub async fn add_to_cart<E: Platform>(ctx: &PageContext<E>, product_id: ProductId) {
    let page = ctx.page();
    let quantity = page
        .element_by_id(&format!("quantity-{product_id}"))
        .map(|input| page.value(&input))
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| "1".to_string());

    match ctx.api().add_to_cart(product_id, &quantity).await {
        Ok(response) if response.is_ok() => page.reload(),
        Ok(response) => tracing::warn!("Add to cart returned status {}", response.status),
        Err(e) => tracing::error!("Failed to add to cart: {}", e),
    }
}

/// Set a cart line's quantity and hand the raw response back.
///
/// # Errors
///
/// Returns an error on transport failure.
pub async fn update_cart_quantity<E: Platform>(
    ctx: &PageContext<E>,
    cart_id: CartId,
    quantity: u32,
) -> Result<HttpResponse> {
    ctx.api().update_cart_quantity(cart_id, quantity).await
}

/// Remove a cart line after the user confirms.
///
/// Returns `false` without any request if the user declines.
#[instrument(skip(ctx))]
pub async fn remove_cart_item<E: Platform>(ctx: &PageContext<E>, cart_id: CartId) -> bool {
    if !ctx.page().confirm(REMOVE_CONFIRMATION) {
        return false;
    }

    let outcome = ctx.api().remove_cart_item(cart_id).await;
    finish_mutation(ctx, outcome, REMOVE_FAILED_MESSAGE);
    true
}

/// Move a cart line to the wishlist.
#[instrument(skip(ctx))]
pub async fn move_to_wishlist<E: Platform>(
    ctx: &PageContext<E>,
    cart_id: CartId,
    product_id: ProductId,
) {
    let outcome = ctx.api().move_to_wishlist(cart_id, product_id).await;
    finish_mutation(ctx, outcome, MOVE_FAILED_MESSAGE);
}

/// Refresh the badge and reload after a successful mutation, or alert
/// `failure` otherwise.
fn finish_mutation<E: Platform>(
    ctx: &PageContext<E>,
    outcome: Result<HttpResponse>,
    failure: &str,
) {
    let page = ctx.page();
    match outcome.and_then(HttpResponse::error_for_status) {
        Ok(response) => {
            if let Some(count) = cart_mutation(&response).and_then(|reply| reply.cart_count) {
                update_cart_count(page, count);
            }
            page.reload();
        }
        Err(e) => {
            tracing::error!("Cart update failed: {}", e);
            page.alert(failure);
        }
    }
}
