use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Descriptive product fields, everything except the catalog identifier.
///
/// Cart entries synthesized on the client carry a copy of these fields so the
/// cart panel can render a line before the catalog is reloaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDetails {
    pub name: String,
    pub category: String,
    /// Unit price; the API sends a bare JSON number.
    pub cost: Decimal,
    /// Aggregate rating, an integer out of five.
    pub rating: u8,
    /// URL of the product image.
    pub image: String,
}

/// A purchasable product as returned by `GET /products`.
///
/// ```json
/// { "name": "iPhone XR", "category": "Phones", "cost": 100, "rating": 4,
///   "image": "https://i.imgur.com/lulqWzW.jpg", "_id": "v4sLtEcMpzabRyfx" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(flatten)]
    pub details: ProductDetails,
}

impl Product {
    /// Looks up a product by identifier.
    #[must_use]
    pub fn find<'a>(products: &'a [Product], product_id: &str) -> Option<&'a Product> {
        products.iter().find(|p| p.id == product_id)
    }
}
