//! Print buttons and smooth in-page scrolling.

use crate::context::{PageContext, Platform};
use crate::page::{EventKind, EventResponse, Page, selectors};

use super::Bindings;

/// Open the print dialog from every `.print-receipt`. Returns the number
/// bound.
pub fn bind_print<E: Platform>(ctx: &PageContext<E>, bindings: &mut Bindings<E>) -> usize {
    let buttons = ctx.page().query_all(selectors::PRINT_RECEIPT);
    for button in &buttons {
        bindings.on(ctx, button, EventKind::Click, |ctx, _| {
            ctx.page().print();
            EventResponse::Continue
        });
    }
    buttons.len()
}

/// Scroll to the target of every `#fragment` link instead of jumping.
/// Returns the number bound.
pub fn bind_smooth_scroll<E: Platform>(ctx: &PageContext<E>, bindings: &mut Bindings<E>) -> usize {
    let links = ctx.page().query_all(selectors::FRAGMENT_LINK);
    for link in &links {
        bindings.on(ctx, link, EventKind::Click, |ctx, link| {
            let page = ctx.page();
            let target = page
                .attribute(link, "href")
                .and_then(|href| page.query(&href));
            match target {
                Some(target) => page.scroll_into_view(&target),
                None => tracing::debug!("Fragment link has no target"),
            }
            EventResponse::PreventDefault
        });
    }
    links.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{El, FakeHttp, FakePage, test_context};

    #[test]
    fn test_print_receipt() {
        let page = FakePage::new();
        let button = page.append(page.body(), El::new("button").class("btn print-receipt"));
        let ctx = test_context(&page, &FakeHttp::new());
        let mut bindings = Bindings::new();

        assert_eq!(bind_print(&ctx, &mut bindings), 1);
        page.click(button);
        page.click(button);
        assert_eq!(page.prints(), 2);
    }

    #[test]
    fn test_fragment_link_scrolls_to_target() {
        let page = FakePage::new();
        let link = page.append(page.body(), El::new("a").attr("href", "#reviews"));
        let external = page.append(page.body(), El::new("a").attr("href", "/products"));
        let section = page.append(page.body(), El::new("section").id("reviews"));
        let ctx = test_context(&page, &FakeHttp::new());
        let mut bindings = Bindings::new();

        assert_eq!(bind_smooth_scroll(&ctx, &mut bindings), 1);
        assert_eq!(page.click(link), EventResponse::PreventDefault);
        assert_eq!(page.scrolled(), vec![section]);
        assert_eq!(page.click(external), EventResponse::Continue);
    }

    #[test]
    fn test_missing_target_is_skipped() {
        let page = FakePage::new();
        let top = page.append(page.body(), El::new("a").attr("href", "#"));
        let gone = page.append(page.body(), El::new("a").attr("href", "#gone"));
        let ctx = test_context(&page, &FakeHttp::new());
        let mut bindings = Bindings::new();
        bind_smooth_scroll(&ctx, &mut bindings);

        assert_eq!(page.click(top), EventResponse::PreventDefault);
        assert_eq!(page.click(gone), EventResponse::PreventDefault);
        assert!(page.scrolled().is_empty());
    }
}
