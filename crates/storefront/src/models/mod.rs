//! Domain models for storefront.

pub mod order;
pub mod product;
pub mod session;

pub use order::{Order, OrderItem};
pub use product::Product;
pub use session::keys as session_keys;
