use std::fmt::Write as _;

use qkart_core::{cart_total, total_quantity, DisplayCartItem};

/// The cart sidebar: one line per item with a quantity stepper, then totals.
#[must_use]
pub fn render_cart_panel(items: &[DisplayCartItem]) -> String {
    let mut out = String::from("Cart\n");
    if items.is_empty() {
        out.push_str("Cart is empty. Add more items to the cart to checkout.\n");
        return out;
    }

    for item in items {
        let _ = writeln!(
            out,
            "  {name}  ${cost}  [-] {qty} [+]  (qty {id} <n>)",
            name = item.name,
            cost = item.cost,
            qty = item.qty,
            id = item.product_id,
        );
    }
    let _ = writeln!(
        out,
        "Items: {}  Order total: ${}",
        total_quantity(items),
        cart_total(items)
    );
    out
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn item(id: &str, name: &str, cost: i64, qty: u64) -> DisplayCartItem {
        DisplayCartItem {
            product_id: id.to_owned(),
            name: name.to_owned(),
            category: "Sports".to_owned(),
            cost: Decimal::from(cost),
            image: String::new(),
            qty,
        }
    }

    #[test]
    fn empty_cart_placeholder() {
        assert!(render_cart_panel(&[]).contains("Cart is empty"));
    }

    #[test]
    fn panel_lists_items_and_total() {
        let out = render_cart_panel(&[item("p1", "Basketball", 100, 2), item("p2", "Bat", 20, 1)]);
        assert!(out.contains("Basketball"));
        assert!(out.contains("[-] 2 [+]"));
        assert!(out.contains("qty p2 <n>"));
        assert!(out.contains("Items: 3"));
        assert!(out.contains("Order total: $220"));
    }
}
