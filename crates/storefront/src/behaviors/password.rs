//! Password visibility toggle.

use crate::context::{PageContext, Platform};
use crate::page::{EventKind, EventResponse, Page, selectors};

use super::Bindings;

const ICON_SHOWN: &str = "fa-eye";
const ICON_HIDDEN: &str = "fa-eye-slash";

/// Whether a password input shows its contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Masked,
    Revealed,
}

impl Visibility {
    fn input_type(self) -> &'static str {
        match self {
            Self::Masked => "password",
            Self::Revealed => "text",
        }
    }

    fn icon(self) -> (&'static str, &'static str) {
        // (removed, added)
        match self {
            Self::Masked => (ICON_HIDDEN, ICON_SHOWN),
            Self::Revealed => (ICON_SHOWN, ICON_HIDDEN),
        }
    }
}

/// Bind every toggle on the page. Returns the number bound.
pub fn bind<E: Platform>(ctx: &PageContext<E>, bindings: &mut Bindings<E>) -> usize {
    let triggers = ctx.page().query_all(selectors::PASSWORD_TOGGLE);
    for trigger in &triggers {
        bindings.on(ctx, trigger, EventKind::Click, |ctx, trigger| {
            toggle(ctx.page(), trigger);
            EventResponse::Continue
        });
    }
    triggers.len()
}

/// Flip the input named by the trigger's `data-target` and swap its icon.
///
/// Returns the new visibility, or `None` when the target input is missing.
/// A missing icon only skips the icon swap.
pub fn toggle<P: Page>(page: &P, trigger: &P::Element) -> Option<Visibility> {
    let target = page.attribute(trigger, "data-target")?;
    let Some(input) = page.element_by_id(&target) else {
        tracing::warn!("Password toggle target #{} not found", target);
        return None;
    };

    let next = if page.attribute(&input, "type").as_deref() == Some("password") {
        Visibility::Revealed
    } else {
        Visibility::Masked
    };

    page.set_attribute(&input, "type", next.input_type());
    if let Some(icon) = page.query_within(trigger, selectors::ICON) {
        let (removed, added) = next.icon();
        page.remove_class(&icon, removed);
        page.add_class(&icon, added);
    }
    Some(next)
}
