//! Boutique Core - Shared domain library.
//!
//! This crate provides the domain logic used across all boutique components:
//! - `storefront` - Public marketplace site (cart, checkout, orders)
//! - `cli` - Command-line tools for migrations and catalog seeding
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! database access, no HTTP. This keeps it lightweight and allows it to be
//! used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, money and statuses
//! - [`cart`] - Typed session cart
//! - [`pricing`] - Shipping, tax and total computation
//! - [`order`] - Checkout snapshots and seller commission

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod order;
pub mod pricing;
pub mod types;

pub use cart::{Cart, CartError, CartLine, Quantity};
pub use order::{OrderDraft, OrderError, OrderItemDraft, SellerTotals};
pub use pricing::{PricingBreakdown, PricingError};
pub use types::*;
