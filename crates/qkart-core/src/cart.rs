//! Cart entries and the reconciliation rules that keep them consistent with
//! the server.
//!
//! Each product appears at most once in a cart. An entry is either absent or
//! present with a positive quantity; any quantity `<= 0` moves it to absent.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::products::{Product, ProductDetails};

/// One cart line on the wire: `{ "productId": "...", "qty": 3 }`.
///
/// Used both for `GET /cart` / `POST /cart` responses and for the `POST /cart`
/// request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(rename = "productId")]
    pub product_id: String,
    pub qty: i64,
}

/// A locally held cart entry.
#[derive(Debug, Clone, PartialEq)]
pub struct CartEntry {
    pub product_id: String,
    pub qty: u64,
    /// Product metadata copied in when the entry was synthesized locally.
    /// Entries seeded from the server carry `None` and are joined against the
    /// catalog at render time.
    pub details: Option<ProductDetails>,
}

impl CartEntry {
    #[must_use]
    pub fn new(product_id: impl Into<String>, qty: u64) -> Self {
        Self {
            product_id: product_id.into(),
            qty,
            details: None,
        }
    }

    /// Builds an entry from a catalog product, copying its metadata but not
    /// its identifier field.
    #[must_use]
    pub fn from_product(product: &Product, qty: u64) -> Self {
        Self {
            product_id: product.id.clone(),
            qty,
            details: Some(product.details.clone()),
        }
    }
}

/// A cart entry joined with its product, ready for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayCartItem {
    pub product_id: String,
    pub name: String,
    pub category: String,
    pub cost: Decimal,
    pub image: String,
    pub qty: u64,
}

/// What [`apply_quantity`] did to the entry set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciled {
    Updated,
    Inserted,
    Removed,
    Unchanged,
}

/// Returns `true` if an entry for `product_id` is present.
#[must_use]
pub fn is_in_cart(entries: &[CartEntry], product_id: &str) -> bool {
    entries.iter().any(|e| e.product_id == product_id)
}

/// Converts a wire quantity into an entry quantity. `None` means "remove".
fn positive_qty(qty: i64) -> Option<u64> {
    (qty > 0).then_some(qty.unsigned_abs())
}

/// Applies a server-confirmed quantity change for `product_id` to `entries`.
///
/// - `qty <= 0` removes the entry if present.
/// - An existing entry has its quantity overwritten.
/// - A new entry is synthesized from `products` when the product is known.
/// - A new entry for an unknown product leaves the set untouched.
pub fn apply_quantity(
    entries: &mut Vec<CartEntry>,
    products: &[Product],
    product_id: &str,
    qty: i64,
) -> Reconciled {
    let Some(qty) = positive_qty(qty) else {
        let before = entries.len();
        entries.retain(|e| e.product_id != product_id);
        return if entries.len() < before {
            Reconciled::Removed
        } else {
            Reconciled::Unchanged
        };
    };

    if let Some(entry) = entries.iter_mut().find(|e| e.product_id == product_id) {
        entry.qty = qty;
        return Reconciled::Updated;
    }

    match Product::find(products, product_id) {
        Some(product) => {
            entries.push(CartEntry::from_product(product, qty));
            Reconciled::Inserted
        }
        None => Reconciled::Unchanged,
    }
}

/// Merges the lines returned by `GET /cart` into `entries`, upserting by
/// product ID. Lines with a non-positive quantity drop the entry.
pub fn merge_server_lines(entries: &mut Vec<CartEntry>, lines: &[CartLine]) {
    for line in lines {
        match positive_qty(line.qty) {
            None => entries.retain(|e| e.product_id != line.product_id),
            Some(qty) => {
                if let Some(entry) = entries
                    .iter_mut()
                    .find(|e| e.product_id == line.product_id)
                {
                    entry.qty = qty;
                } else {
                    entries.push(CartEntry::new(line.product_id.clone(), qty));
                }
            }
        }
    }
}

/// Joins cart entries with product metadata for display.
///
/// The catalog wins over metadata copied into the entry. Entries with no
/// metadata from either source are skipped.
#[must_use]
pub fn generate_cart_items(entries: &[CartEntry], products: &[Product]) -> Vec<DisplayCartItem> {
    entries
        .iter()
        .filter_map(|entry| {
            let details = Product::find(products, &entry.product_id)
                .map(|p| &p.details)
                .or(entry.details.as_ref())?;
            Some(DisplayCartItem {
                product_id: entry.product_id.clone(),
                name: details.name.clone(),
                category: details.category.clone(),
                cost: details.cost,
                image: details.image.clone(),
                qty: entry.qty,
            })
        })
        .collect()
}

/// Total value of the cart: sum of `cost * qty`, saturating at the bounds of
/// [`Decimal`].
#[must_use]
pub fn cart_total(items: &[DisplayCartItem]) -> Decimal {
    items.iter().fold(Decimal::ZERO, |total, item| {
        total.saturating_add(item.cost.saturating_mul(Decimal::from(item.qty)))
    })
}

/// Total number of units across all lines, saturating at `u64::MAX`.
#[must_use]
pub fn total_quantity(items: &[DisplayCartItem]) -> u64 {
    items
        .iter()
        .fold(0u64, |total, item| total.saturating_add(item.qty))
}

#[cfg(test)]
#[path = "cart_test.rs"]
mod tests;
