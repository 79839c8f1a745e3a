//! Cart reconciliation against the storefront API.
//!
//! [`CartReconciler`] is the only writer of cart entry state. Every change is
//! confirmed by the server first and then applied locally with
//! [`qkart_core::apply_quantity`].

use std::sync::Arc;

use qkart_client::{ClientError, StorefrontClient};
use qkart_core::{
    apply_quantity, generate_cart_items, is_in_cart, merge_server_lines, CartEntry, CartLine,
    DisplayCartItem, Product, Session,
};

use crate::notify::{self, Notifier};

/// Why a cart change was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartIntent {
    /// "Add to cart" from a product card; rejected if the product is already
    /// in the cart.
    Add,
    /// Quantity stepper in the cart panel; always allowed, zero removes.
    SetQuantity,
}

pub struct CartReconciler {
    client: Arc<StorefrontClient>,
    entries: Vec<CartEntry>,
}

impl CartReconciler {
    #[must_use]
    pub fn new(client: Arc<StorefrontClient>) -> Self {
        Self::with_entries(client, Vec::new())
    }

    #[must_use]
    pub fn with_entries(client: Arc<StorefrontClient>, entries: Vec<CartEntry>) -> Self {
        Self { client, entries }
    }

    #[must_use]
    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    #[must_use]
    pub fn contains(&self, product_id: &str) -> bool {
        is_in_cart(&self.entries, product_id)
    }

    /// Joins the held entries with `products` for rendering.
    #[must_use]
    pub fn items(&self, products: &[Product]) -> Vec<DisplayCartItem> {
        generate_cart_items(&self.entries, products)
    }

    /// Drops all local entries, e.g. on logout.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Fetches the server cart and merges it into the local entries.
    ///
    /// Returns `None` without any network call when `session` is anonymous,
    /// and `None` after notifying the user when the request fails.
    pub async fn fetch_cart(
        &mut self,
        session: &Session,
        notifier: &mut dyn Notifier,
    ) -> Option<Vec<CartLine>> {
        let token = session.token()?;

        match self.client.get_cart(token).await {
            Ok(lines) => {
                merge_server_lines(&mut self.entries, &lines);
                tracing::info!(lines = lines.len(), entries = self.entries.len(), "cart fetched");
                Some(lines)
            }
            Err(e) => {
                tracing::warn!(error = %e, "cart fetch failed");
                match (e.status(), e.server_message()) {
                    (Some(400), Some(message)) => notifier.error(message),
                    _ => notifier.error(notify::CART_UNREACHABLE),
                }
                None
            }
        }
    }

    /// Adds a product or changes its quantity.
    ///
    /// Rejected locally, with a warning and no network call, when the session
    /// is anonymous or when `intent` is [`CartIntent::Add`] for a product that
    /// is already in the cart. Otherwise the change is posted to the server
    /// and, once confirmed, applied to the local entries. Returns the cart as
    /// reported by the server, or `None` if the change did not go through.
    pub async fn add_or_update(
        &mut self,
        session: &Session,
        products: &[Product],
        product_id: &str,
        qty: i64,
        intent: CartIntent,
        notifier: &mut dyn Notifier,
    ) -> Option<Vec<CartLine>> {
        let Some(token) = session.token() else {
            notifier.warning(notify::LOGIN_REQUIRED);
            return None;
        };

        if intent == CartIntent::Add && self.contains(product_id) {
            notifier.warning(notify::ALREADY_IN_CART);
            return None;
        }

        match self.client.update_cart(token, product_id, qty).await {
            Ok(lines) => {
                let change = apply_quantity(&mut self.entries, products, product_id, qty);
                tracing::info!(product_id, qty, ?intent, ?change, "cart reconciled");
                Some(lines)
            }
            Err(e) => {
                Self::report_update_failure(&e, notifier);
                None
            }
        }
    }

    /// Server-reported messages (400, or 404 with a message) are shown
    /// verbatim; everything else gets the generic connectivity message.
    fn report_update_failure(err: &ClientError, notifier: &mut dyn Notifier) {
        tracing::warn!(error = %err, "cart update failed");
        match (err.status(), err.server_message()) {
            (Some(400 | 404), Some(message)) => notifier.error(message),
            _ => notifier.error(notify::CART_UNREACHABLE),
        }
    }
}
