//! Integration tests for NexaMart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p nexamart-integration-tests
//! ```
//!
//! No external services are needed. [`StandInBackend`] serves the storefront
//! endpoints the page behaviors call on a random local port and records what
//! it receives.
//!
//! # Test Categories
//!
//! - `storefront_api` - HTTP client and endpoint wire format
//! - `page_lifecycle` - whole pages driven through the page controller

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use nexamart_core::OtpRequest;
use serde_json::json;
use tokio::task::JoinHandle;
use url::Url;

/// Email the stand-in treats as unregistered.
pub const UNKNOWN_EMAIL: &str = "ghost@example.com";

/// Cart id the stand-in treats as nonexistent.
pub const MISSING_CART_ID: i32 = 404;

/// A request as the stand-in decoded it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Received {
    Json {
        path: String,
        body: OtpRequest,
    },
    Multipart {
        path: String,
        fields: Vec<(String, String)>,
    },
}

impl Received {
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::Json { path, .. } | Self::Multipart { path, .. } => path,
        }
    }
}

type Log = Arc<Mutex<Vec<Received>>>;

/// Local stand-in for the storefront backend.
pub struct StandInBackend {
    addr: SocketAddr,
    log: Log,
    handle: JoinHandle<()>,
}

impl StandInBackend {
    /// Bind to `127.0.0.1:0` and start serving.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    pub async fn start() -> Self {
        let log = Log::default();
        let app = Router::new()
            .route("/send_register_otp", post(send_register_otp))
            .route("/send_reset_otp", post(send_reset_otp))
            .route("/add_to_cart/{product_id}", post(add_to_cart))
            .route("/update_cart/{cart_id}", post(update_cart))
            .with_state(Arc::clone(&log));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind stand-in backend");
        let addr = listener.local_addr().expect("Bound listener has an address");
        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self { addr, log, handle }
    }

    /// Origin to resolve endpoints against.
    ///
    /// # Panics
    ///
    /// Never in practice; the address always forms a valid URL.
    #[must_use]
    pub fn base_url(&self) -> Url {
        Url::parse(&format!("http://{}", self.addr)).expect("Socket address is a valid URL")
    }

    /// Everything received so far, in arrival order.
    ///
    /// # Panics
    ///
    /// Panics if a handler panicked while holding the log.
    #[must_use]
    pub fn received(&self) -> Vec<Received> {
        self.log.lock().expect("Request log poisoned").clone()
    }
}

impl Drop for StandInBackend {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Poll `condition` until it holds, for up to two seconds of real time.
pub async fn eventually(mut condition: impl FnMut() -> bool) -> bool {
    for _ in 0..200 {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    condition()
}

// =============================================================================
// Handlers
// =============================================================================

fn record(log: &Log, received: Received) {
    if let Ok(mut entries) = log.lock() {
        entries.push(received);
    }
}

async fn fields(mut multipart: Multipart) -> Vec<(String, String)> {
    let mut fields = Vec::new();
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        let value = field.text().await.unwrap_or_default();
        fields.push((name, value));
    }
    fields
}

async fn send_register_otp(State(log): State<Log>, Json(body): Json<OtpRequest>) -> impl IntoResponse {
    record(
        &log,
        Received::Json {
            path: "/send_register_otp".to_string(),
            body,
        },
    );
    Json(json!({"success": true, "message": "OTP sent successfully!"}))
}

async fn send_reset_otp(State(log): State<Log>, Json(body): Json<OtpRequest>) -> impl IntoResponse {
    let known = body.email != UNKNOWN_EMAIL;
    record(
        &log,
        Received::Json {
            path: "/send_reset_otp".to_string(),
            body,
        },
    );
    if known {
        (StatusCode::OK, Json(json!({"success": true, "message": "OTP sent successfully!"})))
    } else {
        (StatusCode::NOT_FOUND, Json(json!({"success": false, "message": "Email not found!"})))
    }
}

async fn add_to_cart(
    State(log): State<Log>,
    Path(product_id): Path<i32>,
    multipart: Multipart,
) -> impl IntoResponse {
    let fields = fields(multipart).await;
    record(
        &log,
        Received::Multipart {
            path: format!("/add_to_cart/{product_id}"),
            fields,
        },
    );
    Json(json!({"success": true, "message": "Item added to cart!", "cart_count": 1}))
}

async fn update_cart(
    State(log): State<Log>,
    Path(cart_id): Path<i32>,
    multipart: Multipart,
) -> impl IntoResponse {
    let fields = fields(multipart).await;
    let action = fields
        .iter()
        .find(|(name, _)| name == "action")
        .map(|(_, value)| value.clone())
        .unwrap_or_default();
    record(
        &log,
        Received::Multipart {
            path: format!("/update_cart/{cart_id}"),
            fields,
        },
    );

    if cart_id == MISSING_CART_ID {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({"success": false, "message": "Cart item not found!"})),
        );
    }

    let reply = match action.as_str() {
        "remove" => json!({"success": true, "message": "Item removed", "cart_count": 0}),
        "move_to_wishlist" => json!({"success": true, "message": "Moved to wishlist", "cart_count": 0}),
        _ => json!({
            "success": true,
            "cart_count": 2,
            "totals": {"subtotal": "1100", "shipping": "0", "tax": "300", "grand_total": "1400"}
        }),
    };
    (StatusCode::OK, Json(reply))
}
