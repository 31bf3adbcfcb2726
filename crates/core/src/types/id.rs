//! Newtype ID for type-safe product references.
//!
//! Products come from the catalog service with opaque string identifiers.
//! Wrapping them prevents accidentally mixing product IDs with other
//! stringly-typed values (image URLs, display names) at call sites.

use serde::{Deserialize, Serialize};

/// Identifier of a product in the catalog.
///
/// Opaque to this subsystem: the cart only uses it as the unique key for
/// line items. Two lines never share a `ProductId`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Create a product ID from its string form.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the underlying string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<ProductId> for String {
    fn from(id: ProductId) -> Self {
        id.0
    }
}
