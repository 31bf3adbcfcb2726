//! Product lookup collaborator interface.
//!
//! The catalog is a black box to this crate: product data comes from
//! whatever backend the storefront queries. The cart store itself never
//! touches it - only the page-level actions do, to populate the
//! snapshot fields of a new cart line before handing it to the store.

use perch_core::{CartLine, Price, ProductId};

/// Product data needed to add it to the cart.
#[derive(Debug, Clone)]
pub struct ProductSummary {
    /// Catalog identifier.
    pub id: ProductId,
    /// Current display name.
    pub name: String,
    /// Current unit price.
    pub price: Price,
    /// Primary product image, if any.
    pub image_url: Option<String>,
    /// Units available for sale.
    pub stock: u32,
}

impl ProductSummary {
    /// Snapshot this product into a cart line for `quantity` units.
    #[must_use]
    pub fn to_line(&self, quantity: u32) -> CartLine {
        CartLine {
            product_id: self.id.clone(),
            name: self.name.clone(),
            unit_price: self.price,
            image_url: self.image_url.clone(),
            quantity,
        }
    }
}

/// Read-side product lookup.
pub trait ProductCatalog {
    /// Resolve a product by ID. `None` means not found (or no longer
    /// listed - the caller treats both the same way).
    fn find(&self, id: &ProductId) -> Option<ProductSummary>;
}
