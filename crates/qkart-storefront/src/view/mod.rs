//! Text rendering of the storefront. Every function here is a pure function
//! of its arguments.

mod cart_panel;
mod grid;
mod header;

pub use cart_panel::render_cart_panel;
pub use grid::{render_product_card, render_product_grid, render_rating};
pub use header::{render_header, HeaderView};

use qkart_core::{DisplayCartItem, Product};

/// Everything the products page needs to draw itself.
pub struct PageView<'a> {
    pub header: HeaderView<'a>,
    pub products: &'a [Product],
    pub loading: bool,
    /// `None` hides the cart panel (anonymous session).
    pub cart: Option<&'a [DisplayCartItem]>,
}

/// Renders the header, the product grid and, when present, the cart panel.
#[must_use]
pub fn render_page(page: &PageView<'_>) -> String {
    let mut out = render_header(&page.header);
    out.push('\n');
    out.push_str(&render_product_grid(page.products, page.loading));
    if let Some(items) = page.cart {
        out.push('\n');
        out.push_str(&render_cart_panel(items));
    }
    out
}
