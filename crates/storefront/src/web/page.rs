//! [`Page`] over the live browser document.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, Event, FormData, HtmlElement, HtmlFormElement, HtmlInputElement,
    HtmlSelectElement, HtmlTextAreaElement, ScrollBehavior, ScrollIntoViewOptions, Window,
};

use crate::page::{EventKind, EventResponse, Handler, NewElement, Page};

/// The current window and its document.
#[derive(Debug, Clone)]
pub struct BrowserPage {
    window: Window,
    document: Document,
}

/// A registered DOM listener. Dropping it without [`Page::unlisten`] leaves
/// the browser calling a freed closure, so the controller always unlistens.
pub struct BrowserListener {
    target: Element,
    event: EventKind,
    closure: Closure<dyn FnMut(Event)>,
}

impl BrowserPage {
    /// Attach to the global window.
    ///
    /// # Errors
    ///
    /// Fails outside a browsing context (no `window` or no `document`).
    pub fn from_window() -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("window has no document"))?;
        Ok(Self { window, document })
    }

    #[must_use]
    pub const fn document(&self) -> &Document {
        &self.document
    }

    /// Origin of the page, e.g. `https://shop.example.in`.
    ///
    /// # Errors
    ///
    /// Fails if the location cannot be read.
    pub fn origin(&self) -> Result<String, JsValue> {
        self.window.location().origin()
    }
}

fn report(result: Result<(), JsValue>, action: &str) {
    if let Err(e) = result {
        tracing::debug!("DOM {} failed: {:?}", action, e);
    }
}

impl Page for BrowserPage {
    type Element = Element;
    type Listener = BrowserListener;

    fn query_all(&self, selector: &str) -> Vec<Element> {
        let Ok(nodes) = self.document.query_selector_all(selector) else {
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn query(&self, selector: &str) -> Option<Element> {
        self.document.query_selector(selector).ok().flatten()
    }

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn query_within(&self, scope: &Element, selector: &str) -> Option<Element> {
        scope.query_selector(selector).ok().flatten()
    }

    fn closest(&self, element: &Element, selector: &str) -> Option<Element> {
        element.closest(selector).ok().flatten()
    }

    fn is_connected(&self, element: &Element) -> bool {
        element.is_connected()
    }

    fn attribute(&self, element: &Element, name: &str) -> Option<String> {
        element.get_attribute(name)
    }

    fn set_attribute(&self, element: &Element, name: &str, value: &str) {
        report(element.set_attribute(name, value), "set_attribute");
    }

    fn value(&self, element: &Element) -> String {
        if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
            select.value()
        } else if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
            area.value()
        } else {
            String::new()
        }
    }

    fn set_value(&self, element: &Element, value: &str) {
        if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            input.set_value(value);
        } else if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
            select.set_value(value);
        } else if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
            area.set_value(value);
        }
    }

    fn inner_html(&self, element: &Element) -> String {
        element.inner_html()
    }

    fn set_inner_html(&self, element: &Element, html: &str) {
        element.set_inner_html(html);
    }

    fn set_text(&self, element: &Element, text: &str) {
        element.set_text_content(Some(text));
    }

    fn set_class_name(&self, element: &Element, class_name: &str) {
        element.set_class_name(class_name);
    }

    fn add_class(&self, element: &Element, class: &str) {
        report(element.class_list().add_1(class), "classList.add");
    }

    fn remove_class(&self, element: &Element, class: &str) {
        report(element.class_list().remove_1(class), "classList.remove");
    }

    fn set_style(&self, element: &Element, property: &str, value: &str) {
        if let Some(html) = element.dyn_ref::<HtmlElement>() {
            report(html.style().set_property(property, value), "style");
        }
    }

    fn set_disabled(&self, element: &Element, disabled: bool) {
        // `disabled` is a reflected attribute on every form control.
        if disabled {
            report(element.set_attribute("disabled", ""), "disable");
        } else {
            report(element.remove_attribute("disabled"), "enable");
        }
    }

    fn focus(&self, element: &Element) {
        if let Some(html) = element.dyn_ref::<HtmlElement>() {
            report(html.focus(), "focus");
        }
    }

    fn scroll_into_view(&self, element: &Element) {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        element.scroll_into_view_with_scroll_into_view_options(&options);
    }

    fn remove(&self, element: &Element) {
        element.remove();
    }

    fn append_to_body(&self, new: NewElement<'_>) -> Option<Element> {
        let element = self.document.create_element(new.tag).ok()?;
        element.set_class_name(new.class_name);
        report(element.set_attribute("style", new.style), "style");
        element.set_inner_html(new.html);
        self.document.body()?.append_child(&element).ok()?;
        Some(element)
    }

    fn form_action(&self, form: &Element) -> Option<String> {
        form.dyn_ref::<HtmlFormElement>().map(HtmlFormElement::action)
    }

    fn form_fields(&self, form: &Element) -> Vec<(String, String)> {
        let Some(form) = form.dyn_ref::<HtmlFormElement>() else {
            return Vec::new();
        };
        let Ok(data) = FormData::new_with_form(form) else {
            return Vec::new();
        };
        let Ok(Some(entries)) = js_sys::try_iter(&data) else {
            return Vec::new();
        };

        // File inputs have no string value and are skipped.
        entries
            .filter_map(Result::ok)
            .filter_map(|entry| {
                let pair = js_sys::Array::from(&entry);
                Some((pair.get(0).as_string()?, pair.get(1).as_string()?))
            })
            .collect()
    }

    fn listen(&self, element: &Element, event: EventKind, handler: Handler<Element>) -> BrowserListener {
        let target = element.clone();
        let closure = Closure::<dyn FnMut(Event)>::new(move |dom_event: Event| {
            if handler(&target) == EventResponse::PreventDefault {
                dom_event.prevent_default();
            }
        });
        report(
            element.add_event_listener_with_callback(event.as_str(), closure.as_ref().unchecked_ref()),
            "addEventListener",
        );
        BrowserListener {
            target: element.clone(),
            event,
            closure,
        }
    }

    fn unlisten(&self, listener: BrowserListener) {
        report(
            listener.target.remove_event_listener_with_callback(
                listener.event.as_str(),
                listener.closure.as_ref().unchecked_ref(),
            ),
            "removeEventListener",
        );
    }

    fn alert(&self, message: &str) {
        report(self.window.alert_with_message(message), "alert");
    }

    fn confirm(&self, message: &str) -> bool {
        self.window.confirm_with_message(message).unwrap_or(false)
    }

    fn reload(&self) {
        report(self.window.location().reload(), "reload");
    }

    fn print(&self) {
        report(self.window.print(), "print");
    }
}
