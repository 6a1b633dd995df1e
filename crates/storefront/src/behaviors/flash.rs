//! Flash message auto-dismiss.

use crate::context::{ElementOf, PageContext, Platform};
use crate::page::{Page, selectors};
use crate::runtime::Runtime;

/// Schedule the fade and removal of every `.alert` currently on the page.
/// Returns the number scheduled.
///
/// The timers are not cancellable. An alert that leaves the document before
/// they fire is skipped.
pub fn schedule<E: Platform>(ctx: &PageContext<E>) -> usize {
    let alerts = ctx.page().query_all(selectors::ALERT);
    for alert in &alerts {
        ctx.runtime().spawn(dismiss(ctx.clone(), alert.clone()));
    }
    alerts.len()
}

async fn dismiss<E: Platform>(ctx: PageContext<E>, alert: ElementOf<E>) {
    let timing = ctx.config().flash;

    ctx.runtime().sleep(timing.fade_after).await;
    if !ctx.page().is_connected(&alert) {
        return;
    }
    ctx.page().set_style(&alert, "opacity", "0");

    ctx.runtime().sleep(timing.remove_after_fade).await;
    ctx.page().remove(&alert);
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::task::LocalSet;

    use super::*;
    use crate::testing::{El, FakeHttp, FakePage, settle, test_context};

    #[tokio::test(start_paused = true)]
    async fn test_fades_then_removes() {
        LocalSet::new()
            .run_until(async {
                let page = FakePage::new();
                let alert = page.append(page.body(), El::new("div").class("alert alert-success"));
                let ctx = test_context(&page, &FakeHttp::new());

                assert_eq!(schedule(&ctx), 1);

                tokio::time::sleep(Duration::from_millis(4999)).await;
                settle().await;
                assert_eq!(page.style(alert, "opacity"), None);

                tokio::time::sleep(Duration::from_millis(1)).await;
                settle().await;
                assert_eq!(page.style(alert, "opacity").as_deref(), Some("0"));
                assert!(page.is_connected(&alert));

                tokio::time::sleep(Duration::from_millis(300)).await;
                settle().await;
                assert!(!page.is_connected(&alert));
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_already_removed_alert_is_tolerated() {
        LocalSet::new()
            .run_until(async {
                let page = FakePage::new();
                let alert = page.append(page.body(), El::new("div").class("alert"));
                let ctx = test_context(&page, &FakeHttp::new());

                schedule(&ctx);
                page.remove(&alert);

                tokio::time::sleep(Duration::from_millis(6000)).await;
                settle().await;
                assert_eq!(page.style(alert, "opacity"), None);
            })
            .await;
    }
}
