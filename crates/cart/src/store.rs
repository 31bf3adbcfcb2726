//! The cart store service.
//!
//! `CartStore` owns the authoritative, durably-persisted shopping cart
//! and exposes a small transactional API over it. Every operation reads
//! the persisted snapshot, applies the pure mutation from
//! [`perch_core::Cart`], and rewrites the whole snapshot before
//! returning - the snapshot is the single source of truth across pages,
//! never a cached in-memory copy.
//!
//! No operation here returns an error and nothing panics: a failing
//! storage backend downgrades the store to an in-memory cart for the rest
//! of its lifetime (the shopper keeps shopping, the cart just won't
//! survive a reload), and a malformed snapshot reads as an empty cart
//! that the next persist overwrites.

use std::time::Duration;

use perch_core::{Cart, CartLine, Price, ProductId};

use crate::config::CartConfig;
use crate::notify::{CartObserver, LogNotifier, Notifier};
use crate::snapshot;
use crate::storage::{FileStorage, MemoryStorage, SnapshotStorage, StorageError};

/// Toast shown when checkout completes.
const CHECKOUT_TOAST: &str = "Order placed. Thank you!";

/// Totals captured at the moment checkout completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSummary {
    /// Exact order total.
    pub total: Price,
    /// Number of units across all lines.
    pub item_count: u32,
}

/// Result of a checkout attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutResult {
    /// The cart was cleared and the order is done from the client's point
    /// of view; the caller can navigate to the confirmation page.
    Completed(OrderSummary),
    /// There was nothing to check out. No side effects.
    EmptyCart,
}

/// The authoritative shopping cart, persisted as a whole snapshot after
/// every mutation.
pub struct CartStore {
    storage: Box<dyn SnapshotStorage>,
    notifier: Box<dyn Notifier>,
    observers: Vec<Box<dyn CartObserver>>,
    toast_duration: Duration,
    /// `Some` once a storage operation has failed. From then on the
    /// contained cart is authoritative and storage is never touched
    /// again by this instance.
    fallback: Option<Cart>,
}

impl CartStore {
    /// Create a store over the given backend and notifier.
    #[must_use]
    pub fn new(
        storage: Box<dyn SnapshotStorage>,
        notifier: Box<dyn Notifier>,
        toast_duration: Duration,
    ) -> Self {
        Self {
            storage,
            notifier,
            observers: Vec::new(),
            toast_duration,
            fallback: None,
        }
    }

    /// Create a file-backed store from configuration, with the default
    /// log notifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created.
    pub fn with_config(config: &CartConfig) -> Result<Self, StorageError> {
        let storage = FileStorage::open(config.storage_file())?;
        Ok(Self::new(
            Box::new(storage),
            Box::new(LogNotifier),
            config.toast_duration,
        ))
    }

    /// Create a store with no durability. Nothing survives the process.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(
            Box::new(MemoryStorage::new()),
            Box::new(LogNotifier),
            Duration::from_millis(3000),
        )
    }

    /// Register an observer for cart count changes.
    pub fn observe(&mut self, observer: Box<dyn CartObserver>) {
        self.observers.push(observer);
    }

    /// Whether this instance has lost its storage backend and is running
    /// on the in-memory cart only.
    #[must_use]
    pub const fn is_degraded(&self) -> bool {
        self.fallback.is_some()
    }

    /// Read the current cart from the persisted snapshot.
    ///
    /// Never fails: an absent snapshot is an empty cart, a malformed one
    /// is logged and read as empty, and an unreadable backend downgrades
    /// this instance to in-memory mode.
    pub fn load(&mut self) -> Cart {
        self.current()
    }

    /// Add a line to the cart and persist.
    ///
    /// Merges into an existing line for the same product (quantities
    /// accumulate, first-add display fields win). Emits a toast naming
    /// the product.
    pub fn add(&mut self, line: CartLine) -> Cart {
        if line.quantity == 0 {
            tracing::debug!(product = %line.product_id, "ignoring zero-quantity add");
            return self.current();
        }
        let name = line.name.clone();
        let mut cart = self.current();
        cart.add(line);
        let cart = self.persist(cart);
        self.notifier
            .toast(&format!("{name} added to your cart"), self.toast_duration);
        self.changed(&cart);
        cart
    }

    /// Adjust a line's quantity by `delta` and persist.
    ///
    /// A resulting quantity of zero or below removes the line; an unknown
    /// product is a no-op. Stock capping is the caller's job - the store
    /// trusts the page that invoked it.
    pub fn update_quantity(&mut self, product_id: &ProductId, delta: i64) -> Cart {
        let mut cart = self.current();
        cart.update_quantity(product_id, delta);
        let cart = self.persist(cart);
        self.changed(&cart);
        cart
    }

    /// Remove a product's line and persist. No-op for unknown products.
    pub fn remove(&mut self, product_id: &ProductId) -> Cart {
        let mut cart = self.current();
        cart.remove(product_id);
        let cart = self.persist(cart);
        self.changed(&cart);
        cart
    }

    /// Exact total of the current cart.
    pub fn total(&mut self) -> Price {
        self.current().total()
    }

    /// Unit count of the current cart (the badge number).
    pub fn count(&mut self) -> u32 {
        self.current().count()
    }

    /// Empty the cart and erase the persisted snapshot.
    ///
    /// Erasure removes the storage key entirely rather than writing an
    /// empty snapshot; either way a subsequent [`Self::load`] returns an
    /// empty cart.
    pub fn clear(&mut self) {
        if self.fallback.is_some() {
            self.fallback = Some(Cart::new());
        } else if let Err(e) = self.storage.remove(snapshot::KEY) {
            tracing::warn!(error = %e, "cart storage erase failed, continuing in memory");
            self.fallback = Some(Cart::new());
        }
        self.changed(&Cart::new());
    }

    /// Complete checkout: clear the cart, toast, and report completion.
    ///
    /// This is a client-local terminal transition - no order-creation
    /// backend is contacted. An empty cart checks out to
    /// [`CheckoutResult::EmptyCart`] with no side effects.
    pub fn checkout(&mut self) -> CheckoutResult {
        let cart = self.current();
        if cart.is_empty() {
            return CheckoutResult::EmptyCart;
        }
        let summary = OrderSummary {
            total: cart.total(),
            item_count: cart.count(),
        };
        self.clear();
        self.notifier.toast(CHECKOUT_TOAST, self.toast_duration);
        CheckoutResult::Completed(summary)
    }

    /// Rehydrate the cart: degraded-mode copy, or decoded snapshot.
    fn current(&mut self) -> Cart {
        if let Some(cart) = &self.fallback {
            return cart.clone();
        }
        match self.storage.get(snapshot::KEY) {
            Ok(Some(raw)) => match snapshot::decode(&raw) {
                Ok(cart) => cart,
                Err(e) => {
                    tracing::warn!(error = %e, "discarding malformed cart snapshot");
                    Cart::new()
                }
            },
            Ok(None) => Cart::new(),
            Err(e) => {
                tracing::warn!(error = %e, "cart storage unreadable, continuing in memory");
                self.fallback = Some(Cart::new());
                Cart::new()
            }
        }
    }

    /// Write the full snapshot, downgrading to in-memory mode on failure.
    fn persist(&mut self, cart: Cart) -> Cart {
        if self.fallback.is_some() {
            self.fallback = Some(cart.clone());
            return cart;
        }
        match snapshot::encode(&cart) {
            Ok(raw) => {
                if let Err(e) = self.storage.set(snapshot::KEY, &raw) {
                    tracing::warn!(error = %e, "cart storage write failed, continuing in memory");
                    self.fallback = Some(cart.clone());
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "cart snapshot could not be encoded");
                self.fallback = Some(cart.clone());
            }
        }
        cart
    }

    fn changed(&self, cart: &Cart) {
        let count = cart.count();
        for observer in &self.observers {
            observer.cart_changed(count);
        }
    }
}
