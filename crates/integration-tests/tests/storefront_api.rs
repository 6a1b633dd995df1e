//! Integration tests for the storefront HTTP client.
//!
//! These tests drive `ReqwestClient` and `StorefrontApi` against the local
//! stand-in backend, so the JSON and multipart bodies go over a real socket.

#![allow(clippy::unwrap_used)]

use nexamart_core::{CartId, OtpPurpose, OtpRequest, ProductId};
use nexamart_integration_tests::{MISSING_CART_ID, Received, StandInBackend, UNKNOWN_EMAIL};
use nexamart_storefront::api::cart_mutation;
use nexamart_storefront::{HttpClient, ReqwestClient, StorefrontApi, UiError};

fn api(backend: &StandInBackend) -> StorefrontApi<ReqwestClient> {
    StorefrontApi::new(ReqwestClient::new(backend.base_url()))
}

fn multipart(path: &str, fields: &[(&str, &str)]) -> Received {
    Received::Multipart {
        path: path.to_string(),
        fields: fields
            .iter()
            .map(|(name, value)| ((*name).to_string(), (*value).to_string()))
            .collect(),
    }
}

// =============================================================================
// OTP Tests
// =============================================================================

#[tokio::test]
async fn test_register_otp_posts_json() {
    let backend = StandInBackend::start().await;
    let request = OtpRequest {
        email: "asha@example.com".to_string(),
        phone: "+91 98765 43210".to_string(),
    };

    let response = api(&backend)
        .send_otp(OtpPurpose::Register, &request)
        .await
        .unwrap();

    assert!(response.success);
    assert_eq!(response.message.as_deref(), Some("OTP sent successfully!"));
    assert_eq!(
        backend.received(),
        vec![Received::Json {
            path: "/send_register_otp".to_string(),
            body: request,
        }]
    );
}

#[tokio::test]
async fn test_reset_otp_failure_body_is_decoded() {
    let backend = StandInBackend::start().await;
    let request = OtpRequest {
        email: UNKNOWN_EMAIL.to_string(),
        phone: String::new(),
    };

    // 404 with a JSON body is a reply, not an error
    let response = api(&backend)
        .send_otp(OtpPurpose::Reset, &request)
        .await
        .unwrap();

    assert!(!response.success);
    assert_eq!(response.message.as_deref(), Some("Email not found!"));
    assert_eq!(backend.received()[0].path(), "/send_reset_otp");
}

// =============================================================================
// Cart Tests
// =============================================================================

#[tokio::test]
async fn test_add_to_cart_posts_multipart() {
    let backend = StandInBackend::start().await;

    let response = api(&backend)
        .add_to_cart(ProductId::new(7), "3")
        .await
        .unwrap();

    assert!(response.is_ok());
    assert_eq!(cart_mutation(&response).unwrap().cart_count, Some(1));
    assert_eq!(
        backend.received(),
        vec![multipart("/add_to_cart/7", &[("product_id", "7"), ("quantity", "3")])]
    );
}

#[tokio::test]
async fn test_update_cart_variants() {
    let backend = StandInBackend::start().await;
    let api = api(&backend);

    let updated = api.update_cart_quantity(CartId::new(3), 5).await.unwrap();
    let removed = api.remove_cart_item(CartId::new(3)).await.unwrap();
    let moved = api
        .move_to_wishlist(CartId::new(3), ProductId::new(11))
        .await
        .unwrap();

    let totals = cart_mutation(&updated).unwrap().totals.unwrap();
    assert_eq!(totals.grand_total.to_string(), "1400");
    assert_eq!(cart_mutation(&removed).unwrap().cart_count, Some(0));
    assert!(cart_mutation(&moved).unwrap().success);

    assert_eq!(
        backend.received(),
        vec![
            multipart("/update_cart/3", &[("action", "update"), ("quantity", "5")]),
            multipart("/update_cart/3", &[("action", "remove")]),
            multipart(
                "/update_cart/3",
                &[("action", "move_to_wishlist"), ("product_id", "11")]
            ),
        ]
    );
}

#[tokio::test]
async fn test_missing_cart_line_is_a_status_error() {
    let backend = StandInBackend::start().await;

    let response = api(&backend)
        .remove_cart_item(CartId::new(MISSING_CART_ID))
        .await
        .unwrap();

    assert_eq!(response.status, 404);
    assert!(matches!(
        response.error_for_status(),
        Err(UiError::Status { status: 404 })
    ));
}

#[tokio::test]
async fn test_form_action_can_be_absolute() {
    let backend = StandInBackend::start().await;
    let action = backend.base_url().join("/update_cart/8").unwrap();
    let fields = vec![
        ("action".to_string(), "update".to_string()),
        ("quantity".to_string(), "2".to_string()),
    ];

    api(&backend)
        .submit_form(action.as_str(), &fields)
        .await
        .unwrap();

    assert_eq!(
        backend.received(),
        vec![multipart("/update_cart/8", &[("action", "update"), ("quantity", "2")])]
    );
}

// =============================================================================
// Transport Tests
// =============================================================================

#[tokio::test]
async fn test_unreachable_backend_is_transport_error() {
    // A port that was just free and has nothing listening on it.
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let base_url = url::Url::parse(&format!("http://127.0.0.1:{port}")).unwrap();

    let client = ReqwestClient::new(base_url);
    let err = client
        .post_json("/send_register_otp", &serde_json::json!({}))
        .await;

    assert!(err.is_err_and(|e| e.is_transport()));
}

#[tokio::test]
async fn test_unknown_route_is_plain_status() {
    let backend = StandInBackend::start().await;
    let client = ReqwestClient::new(backend.base_url());

    let response = client.post_multipart("/nowhere", &[]).await.unwrap();

    assert_eq!(response.status, 404);
    assert!(!response.is_ok());
    assert!(backend.received().is_empty());
}
