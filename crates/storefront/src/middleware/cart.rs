//! Session cart extractor.
//!
//! The cart is stored in the session as a typed [`Cart`]. Deserialization
//! enforces the line schema, so a stored cart that no longer validates is
//! discarded rather than repaired.

use axum::{extract::FromRequestParts, http::request::Parts};
use tower_sessions::Session;

use boutique_core::{Cart, OrderId};

use crate::error::AppError;
use crate::models::session_keys;

/// Extractor giving handlers the shopper's cart and the session it lives in.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(mut current: CurrentCart) -> Result<impl IntoResponse, AppError> {
///     current.cart.clear();
///     current.save().await?;
///     Ok(StatusCode::NO_CONTENT)
/// }
/// ```
pub struct CurrentCart {
    pub session: Session,
    pub cart: Cart,
}

impl CurrentCart {
    /// Load the cart from a session, starting empty if none is stored.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Session` if the session store cannot be read.
    pub async fn load(session: Session) -> Result<Self, AppError> {
        let cart = load_cart(&session).await?;
        Ok(Self { session, cart })
    }

    /// Write the cart back to the session.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Session` if the session store cannot be written.
    pub async fn save(&self) -> Result<(), AppError> {
        save_cart(&self.session, &self.cart).await
    }
}

impl<S> FromRequestParts<S> for CurrentCart
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|(_, msg)| AppError::Internal(msg.to_string()))?;
        Self::load(session).await
    }
}

/// Read the cart stored in the session.
///
/// # Errors
///
/// Returns `AppError::Session` if the session store fails.
pub async fn load_cart(session: &Session) -> Result<Cart, AppError> {
    match session.get::<Cart>(session_keys::CART).await {
        Ok(cart) => Ok(cart.unwrap_or_default()),
        Err(tower_sessions::session::Error::SerdeJson(e)) => {
            tracing::warn!(error = %e, "Discarding stored cart that failed validation");
            session.remove_value(session_keys::CART).await?;
            Ok(Cart::new())
        }
        Err(e) => Err(e.into()),
    }
}

/// Store the cart in the session, or drop the key once the cart is empty.
///
/// # Errors
///
/// Returns `AppError::Session` if the session store fails.
pub async fn save_cart(session: &Session, cart: &Cart) -> Result<(), AppError> {
    if cart.is_empty() {
        session.remove_value(session_keys::CART).await?;
    } else {
        session.insert(session_keys::CART, cart).await?;
    }
    Ok(())
}

/// IDs of the orders placed from this session.
///
/// # Errors
///
/// Returns `AppError::Session` if the session store fails.
pub async fn order_history(session: &Session) -> Result<Vec<OrderId>, AppError> {
    Ok(session
        .get::<Vec<OrderId>>(session_keys::ORDER_HISTORY)
        .await?
        .unwrap_or_default())
}

/// Remember an order as placed by this session.
///
/// # Errors
///
/// Returns `AppError::Session` if the session store fails.
pub async fn record_order(session: &Session, order_id: OrderId) -> Result<(), AppError> {
    let mut history = order_history(session).await?;
    if !history.contains(&order_id) {
        history.push(order_id);
    }
    session
        .insert(session_keys::ORDER_HISTORY, history)
        .await?;
    Ok(())
}
