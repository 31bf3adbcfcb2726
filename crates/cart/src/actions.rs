//! Page-level cart actions.
//!
//! The glue a product page or cart page runs in response to a click:
//! resolve the product, cap the requested quantity at what is actually in
//! stock, build the snapshot line, and hand it to the store. Stock
//! capping lives here and not in [`CartStore`] - the store trusts its
//! caller, and only the pages know about the catalog.

use perch_core::{Cart, ProductId};

use crate::catalog::ProductCatalog;
use crate::store::CartStore;

/// Outcome of an add-to-cart click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// Something was added; the new cart state for re-rendering.
    Added(Cart),
    /// The product has no purchasable stock left (possibly because the
    /// cart already holds all of it).
    OutOfStock,
    /// The product is not in the catalog (removed, or a stale link).
    NotFound,
}

/// Add `requested` units of a product to the cart, capped at the stock
/// remaining once units already in the cart are counted.
pub fn add_to_cart(
    catalog: &impl ProductCatalog,
    store: &mut CartStore,
    product_id: &ProductId,
    requested: u32,
) -> AddOutcome {
    let Some(product) = catalog.find(product_id) else {
        return AddOutcome::NotFound;
    };

    let in_cart = store
        .load()
        .line(product_id)
        .map_or(0, |line| line.quantity);
    let available = product.stock.saturating_sub(in_cart);
    if available == 0 {
        return AddOutcome::OutOfStock;
    }

    let quantity = requested.min(available);
    if quantity == 0 {
        // Requested zero units of an in-stock product; nothing to do.
        return AddOutcome::Added(store.load());
    }
    AddOutcome::Added(store.add(product.to_line(quantity)))
}

/// Adjust a line's quantity from the cart page's +/- controls.
///
/// Increases are capped at remaining stock; decreases (and removals via
/// a large negative delta) always go through. A product that has vanished
/// from the catalog can still be adjusted downward, just not added to.
pub fn change_quantity(
    catalog: &impl ProductCatalog,
    store: &mut CartStore,
    product_id: &ProductId,
    delta: i64,
) -> Cart {
    if delta <= 0 {
        return store.update_quantity(product_id, delta);
    }

    let Some(product) = catalog.find(product_id) else {
        return store.load();
    };
    let in_cart = store
        .load()
        .line(product_id)
        .map_or(0, |line| line.quantity);
    let room = i64::from(product.stock.saturating_sub(in_cart));
    let capped = delta.min(room);
    if capped == 0 {
        return store.load();
    }
    store.update_quantity(product_id, capped)
}
