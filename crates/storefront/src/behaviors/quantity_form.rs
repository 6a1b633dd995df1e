//! Submit a cart quantity form as soon as its quantity changes.
//!
//! The submit button shows a spinner while the request is in flight. A 2xx
//! reply reloads the page so the server-rendered cart takes over; anything
//! else restores the button and alerts.

use crate::context::{ElementOf, PageContext, Platform};
use crate::error::QUANTITY_FAILED_MESSAGE;
use crate::http::HttpResponse;
use crate::page::{EventKind, EventResponse, Page, selectors};
use crate::runtime::Runtime;

use super::Bindings;
use super::notify::{hide_loading, show_loading};

/// Bind every `.quantity-input`. Returns the number bound.
pub fn bind<E: Platform>(ctx: &PageContext<E>, bindings: &mut Bindings<E>) -> usize {
    let inputs = ctx.page().query_all(selectors::QUANTITY_INPUT);
    for input in &inputs {
        bindings.on(ctx, input, EventKind::Change, |ctx, input| {
            submit_quantity(ctx, input);
            EventResponse::Continue
        });
    }
    inputs.len()
}

/// Post the form enclosing `input`. Inputs outside a form are ignored.
pub fn submit_quantity<E: Platform>(ctx: &PageContext<E>, input: &ElementOf<E>) {
    let page = ctx.page();
    let Some(form) = page.closest(input, selectors::FORM) else {
        return;
    };

    let button = page.query_within(&form, selectors::SUBMIT_BUTTON);
    let original = button
        .as_ref()
        .map(|button| show_loading(page, button))
        .unwrap_or_default();

    let action = page.form_action(&form).unwrap_or_default();
    let fields = page.form_fields(&form);

    let task_ctx = ctx.clone();
    ctx.runtime().spawn(async move {
        let page = task_ctx.page();
        let outcome = task_ctx
            .api()
            .submit_form(&action, &fields)
            .await
            .and_then(HttpResponse::error_for_status);

        match outcome {
            Ok(_) => page.reload(),
            Err(e) => {
                tracing::error!("Failed to update quantity: {}", e);
                if let Some(button) = &button {
                    hide_loading(page, button, &original);
                }
                page.alert(QUANTITY_FAILED_MESSAGE);
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use tokio::task::LocalSet;

    use super::*;
    use crate::page::SPINNER_HTML;
    use crate::testing::{El, FakeHttp, FakePage, NodeId, RequestBody, settle, test_context};

    fn cart_form(page: &FakePage) -> (NodeId, NodeId) {
        let form = page.append(page.body(), El::new("form").attr("action", "/update_cart/7"));
        page.append(form, El::new("input").attr("type", "hidden").attr("name", "action").value("update"));
        let input = page.append(
            form,
            El::new("input").class("quantity-input").attr("name", "quantity").value("1"),
        );
        let button = page.append(form, El::new("button").attr("type", "submit").html("Update"));
        (input, button)
    }

    #[tokio::test]
    async fn test_posts_form_fields_with_spinner() {
        LocalSet::new()
            .run_until(async {
                let page = FakePage::new();
                let http = FakeHttp::new();
                let (input, button) = cart_form(&page);
                let ctx = test_context(&page, &http);
                let mut bindings = Bindings::new();
                bind(&ctx, &mut bindings);

                http.hang();
                page.commit_value(input, "3");
                settle().await;

                assert_eq!(page.html(button), SPINNER_HTML);
                assert!(page.is_disabled(button));
                assert_eq!(page.reloads(), 0);

                let sent = http.requests();
                assert_eq!(sent[0].url, "/update_cart/7");
                assert_eq!(
                    sent[0].body,
                    RequestBody::Multipart(vec![
                        ("action".to_string(), "update".to_string()),
                        ("quantity".to_string(), "3".to_string()),
                    ])
                );
            })
            .await;
    }

    #[tokio::test]
    async fn test_success_reloads_page() {
        LocalSet::new()
            .run_until(async {
                let page = FakePage::new();
                let http = FakeHttp::new();
                let (input, _) = cart_form(&page);
                let ctx = test_context(&page, &http);
                let mut bindings = Bindings::new();
                bind(&ctx, &mut bindings);

                http.respond(200, "");
                page.commit_value(input, "2");
                settle().await;

                assert_eq!(page.reloads(), 1);
                assert!(page.alerts().is_empty());
            })
            .await;
    }

    #[tokio::test]
    async fn test_failure_restores_button_and_alerts() {
        LocalSet::new()
            .run_until(async {
                let page = FakePage::new();
                let http = FakeHttp::new();
                let (input, button) = cart_form(&page);
                let ctx = test_context(&page, &http);
                let mut bindings = Bindings::new();
                bind(&ctx, &mut bindings);

                http.respond(500, "");
                page.commit_value(input, "2");
                settle().await;

                assert_eq!(page.reloads(), 0);
                assert_eq!(page.html(button), "Update");
                assert!(!page.is_disabled(button));
                assert_eq!(page.alerts(), vec![QUANTITY_FAILED_MESSAGE]);

                http.fail("offline");
                page.commit_value(input, "3");
                settle().await;
                assert_eq!(page.alerts().len(), 2);
            })
            .await;
    }

    #[test]
    fn test_input_outside_form_is_ignored() {
        let page = FakePage::new();
        let http = FakeHttp::new();
        let input = page.append(page.body(), El::new("input").class("quantity-input"));
        let ctx = test_context(&page, &http);

        submit_quantity(&ctx, &input);

        assert_eq!(http.request_count(), 0);
    }
}
