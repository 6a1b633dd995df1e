//! Browser binding.
//!
//! The module's `start` function runs when the wasm module loads. It
//! installs logging, initializes the page once the DOM is ready, and again
//! on every `turbo:load`. The controller lives in a thread local so the
//! functions in `exports` can reach the same context.

mod console;
mod exports;
mod page;
mod runtime;

use std::cell::RefCell;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::EventTarget;

use crate::config::UiConfig;
use crate::context::{PageContext, Platform};
use crate::controller::PageController;
use crate::http::ReqwestClient;

pub use page::{BrowserListener, BrowserPage};
pub use runtime::BrowserRuntime;

/// The live document, `reqwest`'s fetch backend, and the browser event loop.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserPlatform;

impl Platform for BrowserPlatform {
    type Page = BrowserPage;
    type Http = ReqwestClient;
    type Runtime = BrowserRuntime;
}

thread_local! {
    static CONTROLLER: RefCell<Option<PageController<BrowserPlatform>>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console::init();

    let page = BrowserPage::from_window()?;
    let document = page.document();

    if document.ready_state() == "loading" {
        on_document_event(document, "DOMContentLoaded", initialize)?;
    } else {
        initialize();
    }
    on_document_event(document, "turbo:load", initialize)?;

    Ok(())
}

/// Register a listener for the lifetime of the page.
fn on_document_event(target: &EventTarget, event: &str, callback: fn()) -> Result<(), JsValue> {
    let closure = Closure::<dyn FnMut()>::new(callback);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn create_context() -> Result<PageContext<BrowserPlatform>, JsValue> {
    let page = BrowserPage::from_window()?;
    let origin = page.origin()?;
    let base_url = url::Url::parse(&origin).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let config = UiConfig::with_base_url(base_url);
    let http = ReqwestClient::new(config.base_url.clone());
    Ok(PageContext::new(page, http, BrowserRuntime, config))
}

/// Run `f` against the page controller, creating it on first use.
fn with_controller<T>(f: impl FnOnce(&mut PageController<BrowserPlatform>) -> T) -> Option<T> {
    CONTROLLER.with(|slot| {
        let mut slot = slot.borrow_mut();
        if slot.is_none() {
            match create_context() {
                Ok(ctx) => *slot = Some(PageController::new(ctx)),
                Err(e) => {
                    tracing::error!("Failed to set up page behaviors: {:?}", e);
                    return None;
                }
            }
        }
        slot.as_mut().map(f)
    })
}

/// Context of the current page, for the inline template functions.
fn context() -> Option<PageContext<BrowserPlatform>> {
    with_controller(|controller| controller.context().clone())
}

fn initialize() {
    with_controller(PageController::initialize);
}
