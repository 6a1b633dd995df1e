//! The page surface every behavior operates on.
//!
//! Behaviors never call a browser API directly. They go through [`Page`],
//! which the `wasm32` build implements over `web-sys` and tests implement with
//! an in-memory document. Element handles are opaque to the behaviors.

use std::rc::Rc;

/// Selectors of the storefront templates' DOM contract.
pub mod selectors {
    pub const PASSWORD_TOGGLE: &str = ".password-toggle[data-target]";
    pub const ALERT: &str = ".alert";
    pub const PHONE_ID: &str = "phone";
    pub const OTP_TRIGGER: &str = ".send-otp-btn";
    pub const EMAIL_FIELD: &str = "#email";
    pub const PHONE_FIELD: &str = "#phone";
    pub const OTP_FIELD: &str = "#otp";
    pub const FORM: &str = "form";
    pub const SUBMIT_BUTTON: &str = "button[type=\"submit\"]";
    pub const QUANTITY_INPUT: &str = ".quantity-input";
    pub const QUANTITY_FORM: &str = ".quantity-form";
    pub const CART_ITEM: &str = ".cart-item";
    pub const ITEM_PRICE: &str = ".item-price";
    pub const ITEM_TOTAL: &str = ".item-total";
    pub const SUBTOTAL_ID: &str = "subtotal";
    pub const SHIPPING_ID: &str = "shipping";
    pub const TAX_ID: &str = "tax";
    pub const GRAND_TOTAL_ID: &str = "grand-total";
    pub const PRINT_RECEIPT: &str = ".print-receipt";
    pub const CART_BADGE: &str = ".navbar .badge";
    pub const FRAGMENT_LINK: &str = "a[href^=\"#\"]";
    pub const ICON: &str = "i";
}

/// Spinner markup swapped into buttons while a request is in flight.
pub const SPINNER_HTML: &str = r#"<i class="fas fa-spinner fa-spin"></i>"#;

/// DOM events behaviors listen for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    Input,
    Change,
}

impl EventKind {
    /// DOM event type name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::Input => "input",
            Self::Change => "change",
        }
    }
}

/// What a handler asks the page to do with the event afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventResponse {
    #[default]
    Continue,
    PreventDefault,
}

/// Event callback. Receives the element the listener was registered on.
pub type Handler<E> = Rc<dyn Fn(&E) -> EventResponse>;

/// Description of an element to create and append to `<body>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewElement<'a> {
    pub tag: &'a str,
    pub class_name: &'a str,
    pub style: &'a str,
    pub html: &'a str,
}

/// The document and window operations behaviors rely on.
///
/// Mutations on an element that has already left the document must be
/// harmless no-ops, never errors.
pub trait Page: 'static {
    /// Handle to an element.
    type Element: Clone + 'static;
    /// Handle returned by [`Page::listen`], consumed by [`Page::unlisten`].
    type Listener: 'static;

    // -- Queries -----------------------------------------------------------

    /// All elements matching `selector`, in document order.
    fn query_all(&self, selector: &str) -> Vec<Self::Element>;

    /// First element matching `selector`.
    fn query(&self, selector: &str) -> Option<Self::Element> {
        self.query_all(selector).into_iter().next()
    }

    fn element_by_id(&self, id: &str) -> Option<Self::Element>;

    /// First descendant of `scope` matching `selector`.
    fn query_within(&self, scope: &Self::Element, selector: &str) -> Option<Self::Element>;

    /// Nearest inclusive ancestor of `element` matching `selector`.
    fn closest(&self, element: &Self::Element, selector: &str) -> Option<Self::Element>;

    fn is_connected(&self, element: &Self::Element) -> bool;

    // -- Reads and writes --------------------------------------------------

    fn attribute(&self, element: &Self::Element, name: &str) -> Option<String>;
    fn set_attribute(&self, element: &Self::Element, name: &str, value: &str);

    /// Current value of a form control. Empty for anything else.
    fn value(&self, element: &Self::Element) -> String;
    fn set_value(&self, element: &Self::Element, value: &str);

    fn inner_html(&self, element: &Self::Element) -> String;
    fn set_inner_html(&self, element: &Self::Element, html: &str);
    fn set_text(&self, element: &Self::Element, text: &str);

    fn set_class_name(&self, element: &Self::Element, class_name: &str);
    fn add_class(&self, element: &Self::Element, class: &str);
    fn remove_class(&self, element: &Self::Element, class: &str);

    fn set_style(&self, element: &Self::Element, property: &str, value: &str);
    fn set_disabled(&self, element: &Self::Element, disabled: bool);
    fn focus(&self, element: &Self::Element);
    fn scroll_into_view(&self, element: &Self::Element);

    /// Detach `element` from the document. No-op if already detached.
    fn remove(&self, element: &Self::Element);

    /// Create an element and append it to `<body>`.
    fn append_to_body(&self, element: NewElement<'_>) -> Option<Self::Element>;

    // -- Forms -------------------------------------------------------------

    /// Where the form submits to, as the browser resolves it.
    fn form_action(&self, form: &Self::Element) -> Option<String>;

    /// Successful controls of the form as name/value pairs.
    fn form_fields(&self, form: &Self::Element) -> Vec<(String, String)>;

    // -- Events ------------------------------------------------------------

    fn listen(
        &self,
        element: &Self::Element,
        event: EventKind,
        handler: Handler<Self::Element>,
    ) -> Self::Listener;

    fn unlisten(&self, listener: Self::Listener);

    // -- Window ------------------------------------------------------------

    fn alert(&self, message: &str);
    fn confirm(&self, message: &str) -> bool;
    fn reload(&self);
    fn print(&self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        assert_eq!(EventKind::Click.as_str(), "click");
        assert_eq!(EventKind::Input.as_str(), "input");
        assert_eq!(EventKind::Change.as_str(), "change");
    }

    #[test]
    fn test_default_response_continues() {
        assert_eq!(EventResponse::default(), EventResponse::Continue);
    }
}
