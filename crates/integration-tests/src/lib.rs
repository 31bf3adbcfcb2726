//! Integration tests for Perch.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p perch-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_flow` - Full cart lifecycle over file-backed storage:
//!   rehydration across store instances, checkout, snapshot erasure
//! - `cart_resilience` - Malformed and legacy snapshots, storage loss
//!   mid-session, whole-snapshot write visibility between instances
//!
//! Everything runs against real files in per-test temp directories; no
//! external services are involved.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::Path;

use perch_cart::CartStore;
use perch_cart::notify::LogNotifier;
use perch_cart::storage::FileStorage;
use perch_core::{CartLine, Price, ProductId};

/// Standard toast duration used by test stores.
pub const TOAST: std::time::Duration = std::time::Duration::from_millis(3000);

/// Open a file-backed store over `dir/storage.json`, the way a page
/// mounts the cart on load.
///
/// # Panics
///
/// Panics if the storage directory cannot be created.
#[must_use]
pub fn open_store(dir: &Path) -> CartStore {
    let storage = FileStorage::open(dir.join("storage.json")).expect("create storage dir");
    CartStore::new(Box::new(storage), Box::new(LogNotifier), TOAST)
}

/// Build a cart line the way a product page would after resolving the
/// product.
///
/// # Panics
///
/// Panics if `price` is not a valid non-negative decimal.
#[must_use]
pub fn line(id: &str, name: &str, price: &str, quantity: u32) -> CartLine {
    CartLine {
        product_id: ProductId::from(id),
        name: name.to_owned(),
        unit_price: Price::new(price.parse().expect("decimal price")).expect("non-negative"),
        image_url: None,
        quantity,
    }
}
