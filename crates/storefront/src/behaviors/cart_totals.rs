//! Live cart totals.
//!
//! On the cart page every quantity edit recomputes the line totals, the order
//! summary and the free-shipping banner from what is currently in the inputs.
//! A committed edit is also saved in the background; if saving fails the
//! display is recomputed from the inputs again (the input itself is left as
//! the user typed it).
//!
//! The arithmetic lives in [`CartDisplay::compute`] and only touches the page
//! through [`CartViewState`], so it can be exercised without a document.

use nexamart_core::{CartLine, CartSummary, Price, PricingRules, ShippingBanner};

use crate::context::{ElementOf, PageContext, Platform};
use crate::http::HttpResponse;
use crate::page::{EventKind, EventResponse, Page, selectors};
use crate::runtime::Runtime;

use super::Bindings;

const FREE_SHIPPING_CLASS: &str = "alert alert-success";
const FREE_SHIPPING_HTML: &str =
    r#"<i class="fas fa-shipping-fast me-2"></i>You qualify for free shipping!"#;
const AMOUNT_NEEDED_CLASS: &str = "alert alert-info";

/// Everything the cart page shows, formatted for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartDisplay {
    /// One entry per line, in the order the lines were read.
    pub line_totals: Vec<Price>,
    pub subtotal: Price,
    pub shipping: Price,
    pub tax: Price,
    pub grand_total: Price,
    pub banner: ShippingBanner,
}

impl CartDisplay {
    #[must_use]
    pub fn compute(lines: &[CartLine], rules: &PricingRules) -> Self {
        let summary = CartSummary::compute(lines, rules);
        Self {
            line_totals: lines
                .iter()
                .map(|line| rules.price(line.line_total()))
                .collect(),
            subtotal: rules.price(summary.subtotal),
            shipping: rules.price(summary.shipping),
            tax: rules.price(summary.tax),
            grand_total: rules.price(summary.grand_total),
            banner: summary.shipping_banner(rules),
        }
    }
}

/// Markup of the shipping banner: `(class name, inner HTML)`.
#[must_use]
pub fn banner_markup(banner: &ShippingBanner) -> (&'static str, String) {
    match banner {
        ShippingBanner::FreeShipping => (FREE_SHIPPING_CLASS, FREE_SHIPPING_HTML.to_string()),
        ShippingBanner::AmountNeeded(amount) => (
            AMOUNT_NEEDED_CLASS,
            format!("<small>Add {} more for free shipping!</small>", amount.display()),
        ),
    }
}

/// Where cart lines are read from and totals are written to.
pub trait CartViewState {
    /// Complete lines currently shown, in display order.
    fn lines(&self) -> Vec<CartLine>;

    /// Show `display`. Line totals are in the order `lines` returned them.
    fn render(&self, display: &CartDisplay);
}

/// Read the view, compute, and render. Returns what was rendered.
pub fn recompute(view: &impl CartViewState, rules: &PricingRules) -> CartDisplay {
    let display = CartDisplay::compute(&view.lines(), rules);
    view.render(&display);
    display
}

// =============================================================================
// DOM View
// =============================================================================

/// [`CartViewState`] over the cart page markup.
///
/// A `.cart-item` counts as a line only if it has a `.quantity-input`, an
/// `.item-price` and an `.item-total`. Summary cells and the banner are each
/// optional.
pub struct DomCartView<'a, P: Page> {
    page: &'a P,
}

struct Row<P: Page> {
    quantity: P::Element,
    price: P::Element,
    total: P::Element,
}

impl<'a, P: Page> DomCartView<'a, P> {
    pub const fn new(page: &'a P) -> Self {
        Self { page }
    }

    fn rows(&self) -> Vec<Row<P>> {
        self.page
            .query_all(selectors::CART_ITEM)
            .iter()
            .filter_map(|item| {
                Some(Row {
                    quantity: self.page.query_within(item, selectors::QUANTITY_INPUT)?,
                    price: self.page.query_within(item, selectors::ITEM_PRICE)?,
                    total: self.page.query_within(item, selectors::ITEM_TOTAL)?,
                })
            })
            .collect()
    }

    fn set_text_by_id(&self, id: &str, price: &Price) {
        if let Some(el) = self.page.element_by_id(id) {
            self.page.set_text(&el, &price.display());
        }
    }
}

impl<P: Page> CartViewState for DomCartView<'_, P> {
    fn lines(&self) -> Vec<CartLine> {
        self.rows()
            .iter()
            .map(|row| {
                let quantity = self.page.value(&row.quantity);
                let price = self.page.attribute(&row.price, "data-price").unwrap_or_default();
                CartLine::from_raw(&quantity, &price)
            })
            .collect()
    }

    fn render(&self, display: &CartDisplay) {
        for (row, total) in self.rows().iter().zip(&display.line_totals) {
            self.page.set_text(&row.total, &total.display());
        }

        self.set_text_by_id(selectors::SUBTOTAL_ID, &display.subtotal);
        self.set_text_by_id(selectors::SHIPPING_ID, &display.shipping);
        self.set_text_by_id(selectors::TAX_ID, &display.tax);
        self.set_text_by_id(selectors::GRAND_TOTAL_ID, &display.grand_total);

        // The banner is the first alert on the page.
        if let Some(banner) = self.page.query(selectors::ALERT) {
            let (class_name, html) = banner_markup(&display.banner);
            self.page.set_class_name(&banner, class_name);
            self.page.set_inner_html(&banner, &html);
        }
    }
}

// =============================================================================
// Binding
// =============================================================================

/// The cart page's quantity inputs, present when at least one `.cart-item`
/// exists.
pub struct CartSheet<E: Platform> {
    inputs: Vec<ElementOf<E>>,
}

impl<E: Platform> CartSheet<E> {
    #[must_use]
    pub fn find(page: &E::Page) -> Option<Self> {
        page.query(selectors::CART_ITEM)?;
        Some(Self {
            inputs: page.query_all(selectors::QUANTITY_INPUT),
        })
    }

    /// Recompute on every edit, save committed edits, and render the initial
    /// totals.
    pub fn bind(&self, ctx: &PageContext<E>, bindings: &mut Bindings<E>) {
        for input in &self.inputs {
            bindings.on(ctx, input, EventKind::Input, |ctx, _| {
                refresh(ctx);
                EventResponse::Continue
            });
            bindings.on(ctx, input, EventKind::Change, |ctx, input| {
                refresh(ctx);
                save(ctx, input);
                EventResponse::Continue
            });
        }
        refresh(ctx);
    }

    #[must_use]
    pub fn input_count(&self) -> usize {
        self.inputs.len()
    }
}

/// Recompute the cart page from its current inputs.
pub fn refresh<E: Platform>(ctx: &PageContext<E>) -> CartDisplay {
    recompute(&DomCartView::new(ctx.page()), &ctx.config().pricing)
}

fn save<E: Platform>(ctx: &PageContext<E>, input: &ElementOf<E>) {
    let page = ctx.page();
    let Some(form) = page.closest(input, selectors::QUANTITY_FORM) else {
        return;
    };
    let action = page.form_action(&form).unwrap_or_default();
    let fields = page.form_fields(&form);

    let task_ctx = ctx.clone();
    ctx.runtime().spawn(async move {
        let outcome = task_ctx
            .api()
            .submit_form(&action, &fields)
            .await
            .and_then(HttpResponse::error_for_status);

        match outcome {
            Ok(_) => tracing::debug!("Cart updated"),
            Err(e) => {
                tracing::error!("Failed to save cart quantity: {}", e);
                refresh(&task_ctx);
            }
        }
    });
}
