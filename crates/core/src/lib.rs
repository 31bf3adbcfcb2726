//! Perch Core - Shared types library.
//!
//! This crate provides common types used across all Perch components:
//! - `cart` - Cart store and checkout subsystem
//! - `integration-tests` - Cross-crate flow tests
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and prices, plus the
//!   cart aggregate and its pure operations

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
