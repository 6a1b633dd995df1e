//! [`Runtime`] on the browser event loop.

use std::future::Future;
use std::time::Duration;

use wasm_bindgen_futures::JsFuture;

use crate::runtime::Runtime;

/// Spawns onto the microtask queue and sleeps with `setTimeout`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserRuntime;

impl Runtime for BrowserRuntime {
    fn spawn(&self, task: impl Future<Output = ()> + 'static) {
        wasm_bindgen_futures::spawn_local(task);
    }

    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + 'static {
        let millis = i32::try_from(duration.as_millis()).unwrap_or(i32::MAX);
        // The timer starts now, not when the future is first polled.
        let promise = js_sys::Promise::new(&mut |resolve, _reject| {
            let Some(window) = web_sys::window() else {
                return;
            };
            if let Err(e) = window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, millis) {
                tracing::error!("Failed to schedule timer: {:?}", e);
            }
        });
        async move {
            let _ = JsFuture::from(promise).await;
        }
    }
}
