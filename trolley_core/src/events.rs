use std::sync::Arc;

use crate::model::{ChannelContext, Persistable};

/// Dispatched before the persist decision is made.
///
/// Subscribers may mutate the cart and mark it as worth keeping; a cart no
/// subscriber marks gets its stored row deleted instead of written.
pub struct BeforeCartSavedEvent<C: Persistable> {
    cart: C,
    needs_saving: bool,
}

impl<C: Persistable> BeforeCartSavedEvent<C> {
    pub fn new(cart: C) -> Self {
        Self {
            cart,
            needs_saving: false,
        }
    }

    pub fn cart(&self) -> &C {
        &self.cart
    }

    pub fn cart_mut(&mut self) -> &mut C {
        &mut self.cart
    }

    pub fn mark_needs_saving(&mut self) {
        self.needs_saving = true;
    }

    pub fn needs_saving(&self) -> bool {
        self.needs_saving
    }

    pub fn into_parts(self) -> (C, bool) {
        (self.cart, self.needs_saving)
    }
}

/// Dispatched after the cart row has been written.
pub struct CartSavedEvent<C: Persistable> {
    context: ChannelContext,
    cart: C,
}

impl<C: Persistable> CartSavedEvent<C> {
    pub fn new(context: ChannelContext, cart: C) -> Self {
        Self { context, cart }
    }

    pub fn context(&self) -> &ChannelContext {
        &self.context
    }

    pub fn cart(&self) -> &C {
        &self.cart
    }

    pub fn into_cart(self) -> C {
        self.cart
    }
}

/// Hooks into the cart save lifecycle. All hooks default to no-ops so
/// subscribers only implement the events they care about.
pub trait CartEventSubscriber<C: Persistable>: Send + Sync {
    fn on_before_cart_saved(&self, _event: &mut BeforeCartSavedEvent<C>) {}

    fn on_cart_saved(&self, _event: &CartSavedEvent<C>) {}
}

/// Fans events out to subscribers in registration order.
pub struct CartEventDispatcher<C: Persistable> {
    subscribers: Vec<Arc<dyn CartEventSubscriber<C>>>,
}

impl<C: Persistable> CartEventDispatcher<C> {
    pub fn new() -> Self {
        Self {
            subscribers: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, subscriber: Arc<dyn CartEventSubscriber<C>>) {
        self.subscribers.push(subscriber);
    }

    pub fn dispatch_before_cart_saved(&self, event: &mut BeforeCartSavedEvent<C>) {
        for subscriber in &self.subscribers {
            subscriber.on_before_cart_saved(event);
        }
    }

    pub fn dispatch_cart_saved(&self, event: &CartSavedEvent<C>) {
        for subscriber in &self.subscribers {
            subscriber.on_cart_saved(event);
        }
    }
}

impl<C: Persistable> Default for CartEventDispatcher<C> {
    fn default() -> Self {
        Self::new()
    }
}
