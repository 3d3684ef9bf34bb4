//! Catalog repository: sellers and products.

use rust_decimal::Decimal;
use sqlx::PgPool;

use boutique_core::{Money, ProductId, SellerId};

use super::RepositoryError;
use crate::models::Product;

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: i32,
    seller_id: i32,
    slug: String,
    name: String,
    price: Decimal,
    sizes: Vec<String>,
    active: bool,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: ProductId::new(row.id),
            seller_id: SellerId::new(row.seller_id),
            slug: row.slug,
            name: row.name,
            price: Money::new(row.price),
            sizes: row.sizes,
            active: row.active,
        }
    }
}

/// Fields for inserting or updating a product by slug.
#[derive(Debug, Clone)]
pub struct UpsertProduct<'a> {
    pub seller_id: SellerId,
    pub slug: &'a str,
    pub name: &'a str,
    pub price: Money,
    pub sizes: &'a [String],
    pub active: bool,
}

/// Repository for catalog database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a product by ID, active or not.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT id, seller_id, slug, name, price, sizes, active
            FROM storefront.product
            WHERE id = $1
            ",
        )
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Product::from))
    }

    /// List active products, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_active(&self, limit: i64) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT id, seller_id, slug, name, price, sizes, active
            FROM storefront.product
            WHERE active
            ORDER BY created_at DESC, id DESC
            LIMIT $1
            ",
        )
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Insert a seller or update its name, keyed by slug.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn upsert_seller(&self, slug: &str, name: &str) -> Result<SellerId, RepositoryError> {
        let (id,): (i32,) = sqlx::query_as(
            r"
            INSERT INTO storefront.seller (slug, name)
            VALUES ($1, $2)
            ON CONFLICT (slug) DO UPDATE SET name = EXCLUDED.name
            RETURNING id
            ",
        )
        .bind(slug)
        .bind(name)
        .fetch_one(self.pool)
        .await?;

        Ok(SellerId::new(id))
    }

    /// Insert a product or update it in place, keyed by slug.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::DataCorruption` for a negative price, or
    /// `RepositoryError::Database` if the query fails.
    pub async fn upsert_product(
        &self,
        product: &UpsertProduct<'_>,
    ) -> Result<ProductId, RepositoryError> {
        if product.price.is_negative() {
            return Err(RepositoryError::DataCorruption(format!(
                "negative price for product {}",
                product.slug
            )));
        }

        let (id,): (i32,) = sqlx::query_as(
            r"
            INSERT INTO storefront.product (seller_id, slug, name, price, sizes, active)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (slug) DO UPDATE SET
                seller_id = EXCLUDED.seller_id,
                name = EXCLUDED.name,
                price = EXCLUDED.price,
                sizes = EXCLUDED.sizes,
                active = EXCLUDED.active,
                updated_at = NOW()
            RETURNING id
            ",
        )
        .bind(product.seller_id.as_i32())
        .bind(product.slug)
        .bind(product.name)
        .bind(product.price.amount())
        .bind(product.sizes)
        .bind(product.active)
        .fetch_one(self.pool)
        .await?;

        Ok(ProductId::new(id))
    }
}
