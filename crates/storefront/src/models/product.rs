//! Catalog product model.

use serde::Serialize;

use boutique_core::{Money, ProductId, SellerId};

/// A product listed by a seller.
#[derive(Debug, Clone, Serialize)]
pub struct Product {
    pub id: ProductId,
    pub seller_id: SellerId,
    pub slug: String,
    pub name: String,
    pub price: Money,
    /// Available sizes. Empty means the product is one-size.
    pub sizes: Vec<String>,
    pub active: bool,
}

impl Product {
    /// Resolve the size a shopper picked against what the product offers.
    ///
    /// One-size products ignore the requested size. Sized products require
    /// one of their listed sizes.
    #[must_use]
    pub fn resolve_size(&self, requested: Option<&str>) -> Option<Option<String>> {
        if self.sizes.is_empty() {
            return Some(None);
        }
        let requested = requested.map(str::trim).filter(|s| !s.is_empty())?;
        self.sizes
            .iter()
            .find(|s| s.eq_ignore_ascii_case(requested))
            .map(|s| Some(s.clone()))
    }
}
