//! Small feedback helpers: the navbar cart badge, toast notifications and
//! button loading state.

use std::fmt;
use std::str::FromStr;

use crate::context::{ElementOf, PageContext, Platform};
use crate::page::{NewElement, Page, SPINNER_HTML, selectors};
use crate::runtime::Runtime;

const NOTIFICATION_STYLE: &str =
    "position: fixed; top: 20px; right: 20px; z-index: 1060; min-width: 300px;";
const DISMISS_BUTTON_HTML: &str =
    r#"<button type="button" class="btn-close" data-bs-dismiss="alert"></button>"#;

// =============================================================================
// Cart Badge
// =============================================================================

/// The navbar cart count badge, when the page has one.
pub struct CartBadge<P: Page> {
    element: P::Element,
}

impl<P: Page> CartBadge<P> {
    #[must_use]
    pub fn find(page: &P) -> Option<Self> {
        page.query(selectors::CART_BADGE)
            .map(|element| Self { element })
    }

    /// Show `count`, or hide the badge when the cart is empty.
    pub fn show(&self, page: &P, count: u32) {
        if count > 0 {
            page.set_text(&self.element, &count.to_string());
            page.set_style(&self.element, "display", "inline");
        } else {
            page.set_style(&self.element, "display", "none");
        }
    }
}

/// Update the navbar badge if there is one.
pub fn update_cart_count<P: Page>(page: &P, count: u32) {
    if let Some(badge) = CartBadge::find(page) {
        badge.show(page, count);
    }
}

// =============================================================================
// Notifications
// =============================================================================

/// Bootstrap alert flavor of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotificationKind {
    #[default]
    Success,
    Info,
    Warning,
    Danger,
}

impl NotificationKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Danger => "danger",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for an unrecognized notification kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown notification kind: {0}")]
pub struct UnknownKind(pub String);

impl FromStr for NotificationKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "success" => Ok(Self::Success),
            "info" => Ok(Self::Info),
            "warning" => Ok(Self::Warning),
            "danger" => Ok(Self::Danger),
            other => Err(UnknownKind(other.to_string())),
        }
    }
}

/// Show a dismissible toast in the top right corner.
///
/// The message is inserted as text. The toast removes itself after the
/// configured lifetime unless it was already dismissed.
pub fn show_notification<E: Platform>(
    ctx: &PageContext<E>,
    message: &str,
    kind: NotificationKind,
) -> Option<ElementOf<E>> {
    let class_name = format!("alert alert-{kind} alert-dismissible fade show");
    let html = format!("{} {DISMISS_BUTTON_HTML}", escape_html(message));

    let toast = ctx.page().append_to_body(NewElement {
        tag: "div",
        class_name: &class_name,
        style: NOTIFICATION_STYLE,
        html: &html,
    })?;

    let lifetime = ctx.config().notification_lifetime;
    let task_ctx = ctx.clone();
    let task_toast = toast.clone();
    ctx.runtime().spawn(async move {
        task_ctx.runtime().sleep(lifetime).await;
        if task_ctx.page().is_connected(&task_toast) {
            task_ctx.page().remove(&task_toast);
        }
    });

    Some(toast)
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

// =============================================================================
// Loading State
// =============================================================================

/// Swap in the spinner and disable `element`. Returns the previous markup
/// for [`hide_loading`].
pub fn show_loading<P: Page>(page: &P, element: &P::Element) -> String {
    let original = page.inner_html(element);
    page.set_inner_html(element, SPINNER_HTML);
    page.set_disabled(element, true);
    original
}

/// Restore markup saved by [`show_loading`] and re-enable `element`.
pub fn hide_loading<P: Page>(page: &P, element: &P::Element, original: &str) {
    page.set_inner_html(element, original);
    page.set_disabled(element, false);
}
