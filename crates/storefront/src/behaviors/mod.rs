//! Page behaviors.
//!
//! Each behavior looks for its elements once per initialization and binds
//! listeners only to what it finds, so a page without, say, a cart simply
//! gets no cart listeners. Listeners are collected in [`Bindings`] so the
//! controller can remove all of them on teardown.
//!
//! | Module | Behavior |
//! |---|---|
//! | [`password`] | show/hide password inputs |
//! | [`flash`] | fade and remove flash messages |
//! | [`phone`] | `+91` phone input mask |
//! | [`otp`] | registration and reset OTP requests |
//! | [`quantity_form`] | submit the quantity form on change |
//! | [`cart_totals`] | live line totals, summary and shipping banner |
//! | [`cart_actions`] | add, update, remove, move to wishlist |
//! | [`notify`] | cart badge, toasts, loading state |
//! | [`navigation`] | print receipt, smooth in-page scrolling |

pub mod cart_actions;
pub mod cart_totals;
pub mod flash;
pub mod navigation;
pub mod notify;
pub mod otp;
pub mod password;
pub mod phone;
pub mod quantity_form;

use std::rc::Rc;

use crate::context::{ElementOf, ListenerOf, PageContext, Platform};
use crate::page::{EventKind, EventResponse, Page};

/// Listeners registered during one initialization.
pub struct Bindings<E: Platform> {
    listeners: Vec<ListenerOf<E>>,
}

impl<E: Platform> Default for Bindings<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Platform> Bindings<E> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    /// Listen for `event` on `element`. The handler gets its own clone of
    /// the context.
    pub fn on(
        &mut self,
        ctx: &PageContext<E>,
        element: &ElementOf<E>,
        event: EventKind,
        handler: impl Fn(&PageContext<E>, &ElementOf<E>) -> EventResponse + 'static,
    ) {
        let handler_ctx = ctx.clone();
        let listener = ctx.page().listen(
            element,
            event,
            Rc::new(move |target: &ElementOf<E>| handler(&handler_ctx, target)),
        );
        self.listeners.push(listener);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Remove every listener from the page.
    pub fn release(self, page: &E::Page) {
        for listener in self.listeners {
            page.unlisten(listener);
        }
    }
}
