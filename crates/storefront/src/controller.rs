//! Page lifecycle.
//!
//! [`PageController::initialize`] runs every behavior against the current
//! document and records what it found; [`PageController::teardown`] removes
//! every listener it bound. Initializing again tears down first, so a page
//! that is re-rendered in place (Turbo navigation) never ends up with doubled
//! listeners.

use tracing::instrument;

use crate::behaviors::cart_totals::CartSheet;
use crate::behaviors::phone::PhoneField;
use crate::behaviors::{Bindings, flash, navigation, otp, password, quantity_form};
use crate::context::{PageContext, Platform};

/// What [`PageController::initialize`] found on the page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Features {
    pub password_toggles: usize,
    pub flash_messages: usize,
    pub phone_formatter: bool,
    pub otp_triggers: usize,
    pub quantity_inputs: usize,
    pub cart_calculation: bool,
    pub print_buttons: usize,
    pub fragment_links: usize,
}

/// Owns the listeners of the current page load.
pub struct PageController<E: Platform> {
    ctx: PageContext<E>,
    bindings: Option<Bindings<E>>,
}

impl<E: Platform> PageController<E> {
    pub const fn new(ctx: PageContext<E>) -> Self {
        Self {
            ctx,
            bindings: None,
        }
    }

    #[must_use]
    pub const fn context(&self) -> &PageContext<E> {
        &self.ctx
    }

    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.bindings.is_some()
    }

    /// Number of listeners currently bound.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.bindings.as_ref().map_or(0, Bindings::len)
    }

    /// Bind every behavior whose elements are present.
    #[instrument(skip(self))]
    pub fn initialize(&mut self) -> Features {
        self.teardown();

        let ctx = &self.ctx;
        let mut bindings = Bindings::new();

        let phone = PhoneField::find(ctx.page());
        if let Some(field) = &phone {
            field.bind(ctx, &mut bindings);
        }

        let cart = CartSheet::find(ctx.page());

        let features = Features {
            password_toggles: password::bind(ctx, &mut bindings),
            flash_messages: flash::schedule(ctx),
            phone_formatter: phone.is_some(),
            otp_triggers: otp::bind(ctx, &mut bindings),
            quantity_inputs: quantity_form::bind(ctx, &mut bindings),
            print_buttons: navigation::bind_print(ctx, &mut bindings),
            cart_calculation: cart.is_some(),
            fragment_links: navigation::bind_smooth_scroll(ctx, &mut bindings),
        };

        // Bound last so the initial totals render after every other
        // listener is in place.
        if let Some(sheet) = &cart {
            sheet.bind(ctx, &mut bindings);
        }

        tracing::info!(listeners = bindings.len(), ?features, "Page behaviors initialized");
        self.bindings = Some(bindings);
        features
    }

    /// Remove every listener bound by the last [`initialize`](Self::initialize).
    ///
    /// Timers already scheduled (flash dismissal, toasts) still fire.
    pub fn teardown(&mut self) {
        if let Some(bindings) = self.bindings.take() {
            tracing::debug!(listeners = bindings.len(), "Tearing down page behaviors");
            bindings.release(self.ctx.page());
        }
    }
}
