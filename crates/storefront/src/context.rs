//! Shared state handed to every behavior.

use std::rc::Rc;

use crate::api::StorefrontApi;
use crate::config::UiConfig;
use crate::http::HttpClient;
use crate::page::Page;
use crate::runtime::Runtime;

/// The three seams a page controller is generic over.
pub trait Platform: 'static {
    type Page: Page;
    type Http: HttpClient;
    type Runtime: Runtime;
}

/// Element handle type of a platform's page.
pub type ElementOf<E> = <<E as Platform>::Page as Page>::Element;

/// Listener handle type of a platform's page.
pub type ListenerOf<E> = <<E as Platform>::Page as Page>::Listener;

/// Page, API, runtime and configuration of one page load.
///
/// This struct is cheaply cloneable via `Rc`, so event handlers and spawned
/// tasks each hold their own handle.
pub struct PageContext<E: Platform> {
    inner: Rc<PageContextInner<E>>,
}

struct PageContextInner<E: Platform> {
    page: E::Page,
    api: StorefrontApi<E::Http>,
    runtime: E::Runtime,
    config: UiConfig,
}

impl<E: Platform> PageContext<E> {
    pub fn new(page: E::Page, http: E::Http, runtime: E::Runtime, config: UiConfig) -> Self {
        Self {
            inner: Rc::new(PageContextInner {
                page,
                api: StorefrontApi::new(http),
                runtime,
                config,
            }),
        }
    }

    #[must_use]
    pub fn page(&self) -> &E::Page {
        &self.inner.page
    }

    #[must_use]
    pub fn api(&self) -> &StorefrontApi<E::Http> {
        &self.inner.api
    }

    #[must_use]
    pub fn runtime(&self) -> &E::Runtime {
        &self.inner.runtime
    }

    #[must_use]
    pub fn config(&self) -> &UiConfig {
        &self.inner.config
    }
}

impl<E: Platform> Clone for PageContext<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}
