use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use crate::{
    error::CartError,
    events::{BeforeCartSavedEvent, CartEventDispatcher, CartSavedEvent},
    model::{ChannelContext, Persistable},
    storage::{CartRow, CartStorage},
};

/// Stores carts by token and runs the save lifecycle around the row writes.
pub struct CartPersister<C: Persistable> {
    storage: Arc<dyn CartStorage>,
    dispatcher: CartEventDispatcher<C>,
}

impl<C: Persistable> CartPersister<C> {
    pub fn new(storage: Arc<dyn CartStorage>, dispatcher: CartEventDispatcher<C>) -> Self {
        info!("Initializing new CartPersister");
        Self {
            storage,
            dispatcher,
        }
    }

    /// Restores the cart stored under the given token, applying the token
    /// and the stored rule ids to the deserialized payload.
    pub async fn load(&self, token: &str, _context: &ChannelContext) -> Result<C, CartError> {
        debug!("Loading cart for token: {}", token);

        let row = self
            .storage
            .fetch(token)
            .await
            .map_err(CartError::Storage)?;

        let Some(row) = row else {
            return Err(CartError::TokenNotFound {
                token: token.to_string(),
            });
        };

        let mut cart = C::from_json(&row.payload).map_err(|e| CartError::DeserializeFailed {
            reason: e.to_string(),
        })?;

        let rule_ids: Vec<String> = serde_json::from_str(&row.rule_ids).unwrap_or_default();
        cart.set_token(token);
        cart.set_rule_ids(rule_ids);

        debug!("Loaded cart {} with {} line items", token, cart.line_item_count());
        Ok(cart)
    }

    /// Runs the before-save chain, then either writes the cart row or drops
    /// a stale row when no subscriber marked the cart as worth keeping.
    ///
    /// The cart comes back to the caller with any subscriber mutations
    /// applied.
    pub async fn save(&self, cart: C, context: &ChannelContext) -> Result<C, CartError> {
        let mut event = BeforeCartSavedEvent::new(cart);
        self.dispatcher.dispatch_before_cart_saved(&mut event);
        let (cart, needs_saving) = event.into_parts();

        if !needs_saving {
            debug!(
                "Cart {} not marked for saving, removing stale row",
                cart.token()
            );
            self.storage
                .delete(cart.token())
                .await
                .map_err(CartError::Storage)?;
            return Ok(cart);
        }

        let payload = cart.as_json().map_err(|e| CartError::SerializeFailed {
            reason: e.to_string(),
        })?;
        let rule_ids =
            serde_json::to_string(&context.rule_ids).map_err(|e| CartError::SerializeFailed {
                reason: e.to_string(),
            })?;

        let row = CartRow {
            token: cart.token().to_string(),
            payload,
            rule_ids,
            price: cart.total_price(),
            line_item_count: cart.line_item_count() as i64,
            sales_channel_id: context.sales_channel_id.clone(),
            customer_id: context.customer_id.clone(),
            created_at: Utc::now(),
            updated_at: None,
        };

        self.storage.upsert(&row).await.map_err(CartError::Storage)?;
        info!(
            "Saved cart {} with {} line items",
            row.token, row.line_item_count
        );

        let event = CartSavedEvent::new(context.clone(), cart);
        self.dispatcher.dispatch_cart_saved(&event);

        Ok(event.into_cart())
    }

    pub async fn delete(&self, token: &str, _context: &ChannelContext) -> Result<(), CartError> {
        debug!("Deleting cart for token: {}", token);
        self.storage.delete(token).await.map_err(CartError::Storage)
    }

    /// Re-keys a stored cart to a new token, e.g. on session handover.
    pub async fn replace(
        &self,
        old_token: &str,
        new_token: &str,
        _context: &ChannelContext,
    ) -> Result<(), CartError> {
        debug!("Re-keying cart {} to {}", old_token, new_token);
        self.storage
            .replace_token(old_token, new_token)
            .await
            .map_err(CartError::Storage)
    }
}
