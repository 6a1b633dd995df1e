//! `+91` phone input mask.

use nexamart_core::format_phone_input;

use crate::context::{ElementOf, PageContext, Platform};
use crate::page::{EventKind, EventResponse, Page, selectors};

use super::Bindings;

/// The `#phone` input, when the page has one.
pub struct PhoneField<E: Platform> {
    input: ElementOf<E>,
}

impl<E: Platform> PhoneField<E> {
    #[must_use]
    pub fn find(page: &E::Page) -> Option<Self> {
        page.element_by_id(selectors::PHONE_ID)
            .map(|input| Self { input })
    }

    /// Reformat the field on every keystroke.
    pub fn bind(&self, ctx: &PageContext<E>, bindings: &mut Bindings<E>) {
        bindings.on(ctx, &self.input, EventKind::Input, |ctx, input| {
            let page = ctx.page();
            page.set_value(input, &format_phone_input(&page.value(input)));
            EventResponse::Continue
        });
    }

    #[must_use]
    pub const fn element(&self) -> &ElementOf<E> {
        &self.input
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{El, FakeHttp, FakePage, TestPlatform, test_context};

    #[test]
    fn test_absent_field() {
        let page = FakePage::new();
        assert!(PhoneField::<TestPlatform>::find(&page).is_none());
    }

    #[test]
    fn test_masks_on_input() {
        let page = FakePage::new();
        let input = page.append(page.body(), El::new("input").id("phone"));
        let ctx = test_context(&page, &FakeHttp::new());
        let mut bindings = Bindings::new();
        let field = PhoneField::find(ctx.page()).expect("phone field");
        field.bind(&ctx, &mut bindings);

        page.type_into(input, "9876543210");
        assert_eq!(page.value(&input), "+91 9876543210");

        page.type_into(input, "919876543210");
        assert_eq!(page.value(&input), "+91 9876543210");

        page.type_into(input, "");
        assert_eq!(page.value(&input), "91");
    }
}
