//! Session-related types.

/// Session keys for shopper state.
pub mod keys {
    /// Key for the shopper's typed cart.
    pub const CART: &str = "cart";

    /// Key for the IDs of orders placed from this session.
    pub const ORDER_HISTORY: &str = "order_history";
}
