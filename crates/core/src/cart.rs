//! Typed shopping cart held in the shopper's session.
//!
//! Every line carries a single canonical [`Quantity`], validated when the
//! line is written. The whole [`Cart`] is (de)serialized with serde at the
//! session boundary, so a stored cart with a zero quantity or a negative
//! price fails to load instead of being patched up on read.

use serde::{Deserialize, Serialize};

use crate::types::{CartLineId, Money, ProductId, SellerId};

/// Errors produced by cart mutations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CartError {
    /// Quantity must be between one and [`Quantity::MAX`].
    #[error("quantity must be between 1 and {max} (got {0})", max = Quantity::MAX.get())]
    InvalidQuantity(u32),

    /// Unit price must not be negative.
    #[error("unit price cannot be negative (got {0})")]
    NegativePrice(Money),

    /// No line with this ID is in the cart.
    #[error("cart line not found: {0}")]
    LineNotFound(CartLineId),

    /// Merging quantities would exceed [`Quantity::MAX`].
    #[error("a cart line cannot hold more than {max} units", max = Quantity::MAX.get())]
    QuantityOverflow,
}

/// Number of units on a cart line, between one and [`Quantity::MAX`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Quantity(u32);

impl Quantity {
    /// A single unit.
    pub const ONE: Self = Self(1);

    /// Most units a single line may hold.
    pub const MAX: Self = Self(999);

    /// Create a quantity, rejecting zero and anything above [`Self::MAX`].
    ///
    /// # Errors
    ///
    /// Returns `CartError::InvalidQuantity` if `value` is out of range.
    pub const fn new(value: u32) -> Result<Self, CartError> {
        if value == 0 || value > Self::MAX.0 {
            return Err(CartError::InvalidQuantity(value));
        }
        Ok(Self(value))
    }

    /// Get the raw count.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    fn checked_add(self, other: Self) -> Result<Self, CartError> {
        self.0
            .checked_add(other.0)
            .filter(|&sum| sum <= Self::MAX.0)
            .map(Self)
            .ok_or(CartError::QuantityOverflow)
    }
}

impl TryFrom<u32> for Quantity {
    type Error = CartError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quantity> for u32 {
    fn from(quantity: Quantity) -> Self {
        quantity.0
    }
}

/// One product/size/quantity entry in a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: CartLineId,
    pub product_id: ProductId,
    pub seller_id: SellerId,
    /// Product name at the time it was added.
    pub name: String,
    pub size: Option<String>,
    #[serde(deserialize_with = "non_negative_price")]
    unit_price: Money,
    pub quantity: Quantity,
}

impl CartLine {
    /// Create a new line with a freshly generated ID.
    ///
    /// # Errors
    ///
    /// Returns `CartError::NegativePrice` if `unit_price` is below zero.
    pub fn new(
        product_id: ProductId,
        seller_id: SellerId,
        name: impl Into<String>,
        size: Option<String>,
        unit_price: Money,
        quantity: Quantity,
    ) -> Result<Self, CartError> {
        if unit_price.is_negative() {
            return Err(CartError::NegativePrice(unit_price));
        }
        Ok(Self {
            id: CartLineId::generate(),
            product_id,
            seller_id,
            name: name.into(),
            size: size.filter(|s| !s.trim().is_empty()),
            unit_price,
            quantity,
        })
    }

    /// Price of a single unit.
    #[must_use]
    pub const fn unit_price(&self) -> Money {
        self.unit_price
    }

    /// `unit_price * quantity`.
    #[must_use]
    pub fn line_total(&self) -> Money {
        self.unit_price * rust_decimal::Decimal::from(self.quantity.get())
    }

    fn same_item(&self, other: &Self) -> bool {
        self.product_id == other.product_id && self.size == other.size
    }
}

fn non_negative_price<'de, D>(deserializer: D) -> Result<Money, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let price = Money::deserialize(deserializer)?;
    if price.is_negative() {
        return Err(serde::de::Error::custom(CartError::NegativePrice(price)));
    }
    Ok(price)
}

/// A shopper's in-progress order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Add a line, merging into an existing line for the same product and size.
    ///
    /// Returns the ID of the line that now holds the item.
    ///
    /// # Errors
    ///
    /// Returns `CartError::QuantityOverflow` if the merged quantity overflows.
    pub fn add(&mut self, line: CartLine) -> Result<CartLineId, CartError> {
        if let Some(existing) = self.lines.iter_mut().find(|l| l.same_item(&line)) {
            existing.quantity = existing.quantity.checked_add(line.quantity)?;
            return Ok(existing.id);
        }
        let id = line.id;
        self.lines.push(line);
        Ok(id)
    }

    /// Set the quantity of a line. Zero removes the line.
    ///
    /// # Errors
    ///
    /// Returns `CartError::LineNotFound` if no line has this ID, or
    /// `CartError::InvalidQuantity` above [`Quantity::MAX`].
    pub fn set_quantity(&mut self, id: CartLineId, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 {
            return self.remove(id).map(|_| ());
        }
        let quantity = Quantity::new(quantity)?;
        let line = self
            .lines
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or(CartError::LineNotFound(id))?;
        line.quantity = quantity;
        Ok(())
    }

    /// Remove a line and return it.
    ///
    /// # Errors
    ///
    /// Returns `CartError::LineNotFound` if no line has this ID.
    pub fn remove(&mut self, id: CartLineId) -> Result<CartLine, CartError> {
        let index = self
            .lines
            .iter()
            .position(|l| l.id == id)
            .ok_or(CartError::LineNotFound(id))?;
        Ok(self.lines.remove(index))
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn get(&self, id: CartLineId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.id == id)
    }

    /// Sum of `unit_price * quantity` over all lines.
    #[must_use]
    pub fn subtotal(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0_u32, |acc, l| acc.saturating_add(l.quantity.get()))
    }
}
