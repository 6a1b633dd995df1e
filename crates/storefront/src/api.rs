//! Typed calls to the storefront backend.
//!
//! | Endpoint | Body |
//! |---|---|
//! | `/send_register_otp`, `/send_reset_otp` | JSON `{email, phone}` |
//! | `/add_to_cart/<product_id>` | multipart `{product_id, quantity}` |
//! | `/update_cart/<cart_id>` | multipart `{action, quantity?, product_id?}` |
//! | quantity form action | the form's own fields |

use nexamart_core::{CartId, CartMutationResponse, OtpPurpose, OtpRequest, OtpResponse, ProductId};
use tracing::instrument;

use crate::error::Result;
use crate::http::{HttpClient, HttpResponse};

/// `action` values accepted by `/update_cart/<id>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartAction {
    Update,
    Remove,
    MoveToWishlist,
}

impl CartAction {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Update => "update",
            Self::Remove => "remove",
            Self::MoveToWishlist => "move_to_wishlist",
        }
    }
}

/// Storefront endpoints over an [`HttpClient`].
#[derive(Debug, Clone)]
pub struct StorefrontApi<H> {
    http: H,
}

impl<H: HttpClient> StorefrontApi<H> {
    pub const fn new(http: H) -> Self {
        Self { http }
    }

    /// The underlying HTTP client.
    pub const fn http(&self) -> &H {
        &self.http
    }

    /// Request an OTP for `purpose`.
    ///
    /// The reply is decoded whatever the status, since the OTP endpoints
    /// report failures in the body.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or an undecodable body.
    #[instrument(skip(self, request), fields(endpoint = purpose.endpoint()))]
    pub async fn send_otp(&self, purpose: OtpPurpose, request: &OtpRequest) -> Result<OtpResponse> {
        let body = serde_json::to_value(request)?;
        let response = self.http.post_json(purpose.endpoint(), &body).await?;
        response.json()
    }

    /// Add `quantity` of a product to the cart.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure. Non-2xx statuses are returned
    /// as a response for the caller to inspect.
    #[instrument(skip(self))]
    pub async fn add_to_cart(&self, product_id: ProductId, quantity: &str) -> Result<HttpResponse> {
        let fields = [
            ("product_id".to_string(), product_id.to_string()),
            ("quantity".to_string(), quantity.to_string()),
        ];
        self.http
            .post_multipart(&format!("/add_to_cart/{product_id}"), &fields)
            .await
    }

    /// Set the quantity of a cart line.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure.
    #[instrument(skip(self))]
    pub async fn update_cart_quantity(
        &self,
        cart_id: CartId,
        quantity: u32,
    ) -> Result<HttpResponse> {
        self.update_cart(
            cart_id,
            CartAction::Update,
            &[("quantity", quantity.to_string())],
        )
        .await
    }

    /// Remove a cart line.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure.
    #[instrument(skip(self))]
    pub async fn remove_cart_item(&self, cart_id: CartId) -> Result<HttpResponse> {
        self.update_cart(cart_id, CartAction::Remove, &[]).await
    }

    /// Move a cart line to the wishlist.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure.
    #[instrument(skip(self))]
    pub async fn move_to_wishlist(
        &self,
        cart_id: CartId,
        product_id: ProductId,
    ) -> Result<HttpResponse> {
        self.update_cart(
            cart_id,
            CartAction::MoveToWishlist,
            &[("product_id", product_id.to_string())],
        )
        .await
    }

    /// Submit a form's fields to its action.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure.
    #[instrument(skip(self, fields))]
    pub async fn submit_form(&self, action: &str, fields: &[(String, String)]) -> Result<HttpResponse> {
        self.http.post_multipart(action, fields).await
    }

    async fn update_cart(
        &self,
        cart_id: CartId,
        action: CartAction,
        extra: &[(&str, String)],
    ) -> Result<HttpResponse> {
        let mut fields = vec![("action".to_string(), action.as_str().to_string())];
        fields.extend(
            extra
                .iter()
                .map(|(name, value)| ((*name).to_string(), value.clone())),
        );
        self.http
            .post_multipart(&format!("/update_cart/{cart_id}"), &fields)
            .await
    }
}

/// Decode the optional JSON body of a cart mutation reply.
///
/// Replies that are not JSON (a redirect target, an empty body) yield `None`.
#[must_use]
pub fn cart_mutation(response: &HttpResponse) -> Option<CartMutationResponse> {
    response.json().ok()
}
