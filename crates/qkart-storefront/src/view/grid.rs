use std::fmt::Write as _;

use qkart_core::Product;

const MAX_RATING: u8 = 5;

/// Five-star rating bar, e.g. `★★★★☆` for 4.
#[must_use]
pub fn render_rating(rating: u8) -> String {
    let filled = rating.min(MAX_RATING);
    let mut out = "★".repeat(usize::from(filled));
    out.push_str(&"☆".repeat(usize::from(MAX_RATING - filled)));
    out
}

/// A single product card with its ADD TO CART action.
#[must_use]
pub fn render_product_card(product: &Product) -> String {
    let mut out = String::new();
    write_product_card(&mut out, product);
    out
}

fn write_product_card(out: &mut String, product: &Product) {
    let details = &product.details;
    let _ = writeln!(
        out,
        "+ {name}\n  ${cost}  {stars}\n  {image}\n  [ADD TO CART] add {id}",
        name = details.name,
        cost = details.cost,
        stars = render_rating(details.rating),
        image = details.image,
        id = product.id,
    );
}

/// The product grid, or the loading / empty placeholder.
#[must_use]
pub fn render_product_grid(products: &[Product], loading: bool) -> String {
    let mut out = String::from("India's FASTEST DELIVERY to your door step\n\n");
    if loading {
        out.push_str("Loading Products...\n");
        return out;
    }
    if products.is_empty() {
        out.push_str("No products found\n");
        return out;
    }
    for product in products {
        write_product_card(&mut out, product);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use qkart_core::ProductDetails;
    use rust_decimal::Decimal;

    use super::*;

    fn product() -> Product {
        Product {
            id: "upLK9JbQ4rMhTwt4".to_owned(),
            details: ProductDetails {
                name: "Basketball".to_owned(),
                category: "Sports".to_owned(),
                cost: Decimal::from(100),
                rating: 4,
                image: "https://i.imgur.com/lulqWzW.jpg".to_owned(),
            },
        }
    }

    #[test]
    fn rating_renders_filled_and_empty_stars() {
        assert_eq!(render_rating(4), "★★★★☆");
        assert_eq!(render_rating(0), "☆☆☆☆☆");
    }

    #[test]
    fn rating_is_capped_at_five() {
        assert_eq!(render_rating(9), "★★★★★");
    }

    #[test]
    fn card_shows_name_price_and_action() {
        let card = render_product_card(&product());
        assert!(card.contains("Basketball"));
        assert!(card.contains("$100"));
        assert!(card.contains("★★★★☆"));
        assert!(card.contains("add upLK9JbQ4rMhTwt4"));
    }

    #[test]
    fn grid_shows_loading_placeholder() {
        let out = render_product_grid(&[product()], true);
        assert!(out.contains("Loading Products..."));
        assert!(!out.contains("Basketball"));
    }

    #[test]
    fn grid_lists_cards_in_catalog_order() {
        let mut second = product();
        second.id = "bat-1".to_owned();
        second.details.name = "Bat".to_owned();
        let out = render_product_grid(&[product(), second.clone()], false);
        let first_at = out.find("+ Basketball").expect("first card");
        let second_at = out.find("+ Bat").expect("second card");
        assert!(first_at < second_at);
        assert!(out.contains(&render_product_card(&second)));
    }

    #[test]
    fn grid_shows_empty_placeholder() {
        assert!(render_product_grid(&[], false).contains("No products found"));
    }
}
