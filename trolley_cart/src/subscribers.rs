use std::sync::Arc;

use trolley_core::events::{BeforeCartSavedEvent, CartEventDispatcher, CartEventSubscriber};

use crate::cart_model::{Cart, MANUAL_SHIPPING_COSTS};

/// Carts holding at least one line item are always kept.
pub struct LineItemsBeforeCartSavedSubscriber;

impl CartEventSubscriber<Cart> for LineItemsBeforeCartSavedSubscriber {
    fn on_before_cart_saved(&self, event: &mut BeforeCartSavedEvent<Cart>) {
        if !event.cart().line_items.is_empty() {
            event.mark_needs_saving();
        }
    }
}

/// A customer comment is user input worth keeping even on an empty cart.
pub struct CustomerCommentBeforeCartSavedSubscriber;

impl CartEventSubscriber<Cart> for CustomerCommentBeforeCartSavedSubscriber {
    fn on_before_cart_saved(&self, event: &mut BeforeCartSavedEvent<Cart>) {
        if event.cart().customer_comment.is_some() {
            event.mark_needs_saving();
        }
    }
}

/// Manually overridden shipping costs must survive an otherwise empty cart.
pub struct ManualShippingCostsBeforeCartSavedSubscriber;

impl CartEventSubscriber<Cart> for ManualShippingCostsBeforeCartSavedSubscriber {
    fn on_before_cart_saved(&self, event: &mut BeforeCartSavedEvent<Cart>) {
        if event.cart().has_extension(MANUAL_SHIPPING_COSTS) {
            event.mark_needs_saving();
        }
    }
}

/// The dispatcher the storefront runs with: all built-in before-save
/// subscribers, in registration order.
pub fn default_cart_dispatcher() -> CartEventDispatcher<Cart> {
    let mut dispatcher = CartEventDispatcher::new();
    dispatcher.subscribe(Arc::new(LineItemsBeforeCartSavedSubscriber));
    dispatcher.subscribe(Arc::new(CustomerCommentBeforeCartSavedSubscriber));
    dispatcher.subscribe(Arc::new(ManualShippingCostsBeforeCartSavedSubscriber));

    dispatcher
}
