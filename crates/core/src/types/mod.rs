//! Core types for Perch.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod id;
pub mod price;

pub use cart::{Cart, CartLine};
pub use id::ProductId;
pub use price::Price;
