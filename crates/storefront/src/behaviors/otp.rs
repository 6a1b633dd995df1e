//! OTP request buttons on the registration and password reset forms.
//!
//! A `.send-otp-btn` reads `#email` and `#phone` from its enclosing form and
//! posts them to the endpoint chosen by its `data-purpose`. While the request
//! is in flight the button is disabled and shows a spinner; whatever the
//! outcome, it is re-armed with its idle label afterwards.

use nexamart_core::{OtpPurpose, OtpRequest, OtpResponse};

use crate::context::{ElementOf, PageContext, Platform};
use crate::error::{OTP_FAILED_MESSAGE, ValidationError};
use crate::page::{EventKind, EventResponse, Page, SPINNER_HTML, selectors};
use crate::runtime::Runtime;

use super::Bindings;

/// Alert shown once the server confirms the OTP was sent.
pub const OTP_SENT_MESSAGE: &str = "OTP sent successfully!";

/// Bind every OTP trigger. Returns the number bound.
pub fn bind<E: Platform>(ctx: &PageContext<E>, bindings: &mut Bindings<E>) -> usize {
    let triggers = ctx.page().query_all(selectors::OTP_TRIGGER);
    for trigger in &triggers {
        bindings.on(ctx, trigger, EventKind::Click, |ctx, trigger| {
            request_otp(ctx, trigger);
            EventResponse::Continue
        });
    }
    triggers.len()
}

/// Build the request, or the validation failure to alert.
///
/// # Errors
///
/// Returns `MissingEmail` for an empty email, and `MissingPhone` for an empty
/// phone when `purpose` requires one.
pub fn validate(
    purpose: OtpPurpose,
    email: String,
    phone: String,
) -> Result<OtpRequest, ValidationError> {
    if email.is_empty() {
        return Err(ValidationError::MissingEmail);
    }
    if purpose.requires_phone() && phone.is_empty() {
        return Err(ValidationError::MissingPhone);
    }
    Ok(OtpRequest { email, phone })
}

/// Handle a trigger click.
///
/// Validation failures alert and stop. Otherwise the trigger enters its
/// loading state and the request runs in the background.
pub fn request_otp<E: Platform>(ctx: &PageContext<E>, trigger: &ElementOf<E>) {
    let page = ctx.page();
    let Some(form) = page.closest(trigger, selectors::FORM) else {
        tracing::warn!("OTP trigger is not inside a form, ignoring click");
        return;
    };

    let purpose = OtpPurpose::from_attribute(page.attribute(trigger, "data-purpose").as_deref());
    let field = |selector| {
        page.query_within(&form, selector)
            .map(|el| page.value(&el))
            .unwrap_or_default()
    };

    let request = match validate(purpose, field(selectors::EMAIL_FIELD), field(selectors::PHONE_FIELD)) {
        Ok(request) => request,
        Err(e) => {
            page.alert(&e.to_string());
            return;
        }
    };

    page.set_disabled(trigger, true);
    page.set_inner_html(trigger, &format!("{SPINNER_HTML} Sending..."));

    ctx.runtime()
        .spawn(send(ctx.clone(), trigger.clone(), form, purpose, request));
}

async fn send<E: Platform>(
    ctx: PageContext<E>,
    trigger: ElementOf<E>,
    form: ElementOf<E>,
    purpose: OtpPurpose,
    request: OtpRequest,
) {
    let page = ctx.page();

    match ctx.api().send_otp(purpose, &request).await {
        Ok(OtpResponse { success: true, .. }) => {
            page.alert(OTP_SENT_MESSAGE);
            if let Some(otp) = page.query_within(&form, selectors::OTP_FIELD) {
                page.set_disabled(&otp, false);
                page.focus(&otp);
            }
        }
        Ok(OtpResponse { message, .. }) => {
            tracing::warn!("OTP request rejected: {:?}", message);
            page.alert(message.as_deref().unwrap_or(OTP_FAILED_MESSAGE));
        }
        Err(e) => {
            tracing::error!("Failed to send OTP: {}", e);
            page.alert(OTP_FAILED_MESSAGE);
        }
    }

    page.set_disabled(&trigger, false);
    page.set_inner_html(&trigger, purpose.idle_label());
}
