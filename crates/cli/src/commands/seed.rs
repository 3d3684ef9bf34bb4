//! Seed the catalog with sellers and products from a YAML file.
//!
//! ```yaml
//! sellers:
//!   - slug: atelier-noir
//!     name: Atelier Noir
//!     products:
//!       - slug: linen-shirt
//!         name: Linen Shirt
//!         price: "1200"
//!         sizes: [S, M, L]
//! ```
//!
//! Sellers and products are upserted by slug, so re-running a seed file
//! updates prices and names in place.

use std::collections::HashSet;
use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{error, info};

use boutique_core::Money;
use boutique_storefront::db::{self, ProductRepository, products::UpsertProduct};

use super::migrate;

/// Catalog seed file.
#[derive(Debug, Deserialize)]
pub struct CatalogSeed {
    pub sellers: Vec<SellerSeed>,
}

/// One seller and the products they list.
#[derive(Debug, Deserialize)]
pub struct SellerSeed {
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub products: Vec<ProductSeed>,
}

/// One product listing.
#[derive(Debug, Deserialize)]
pub struct ProductSeed {
    pub slug: String,
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default = "default_active")]
    pub active: bool,
}

const fn default_active() -> bool {
    true
}

/// Outcome of a seeding run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedResult {
    pub sellers: usize,
    pub products: usize,
}

/// Check a catalog before touching the database.
///
/// Returns every problem found rather than stopping at the first.
#[must_use]
pub fn validate_catalog(catalog: &CatalogSeed) -> Vec<String> {
    let mut errors = Vec::new();
    let mut seller_slugs = HashSet::new();
    let mut product_slugs = HashSet::new();

    for seller in &catalog.sellers {
        if seller.slug.trim().is_empty() {
            errors.push(format!("seller '{}' has an empty slug", seller.name));
        }
        if seller.name.trim().is_empty() {
            errors.push(format!("seller '{}' has an empty name", seller.slug));
        }
        if !seller_slugs.insert(seller.slug.as_str()) {
            errors.push(format!("duplicate seller slug '{}'", seller.slug));
        }

        for product in &seller.products {
            if product.slug.trim().is_empty() {
                errors.push(format!("product '{}' has an empty slug", product.name));
            }
            if product.name.trim().is_empty() {
                errors.push(format!("product '{}' has an empty name", product.slug));
            }
            if product.price.is_sign_negative() && !product.price.is_zero() {
                errors.push(format!(
                    "product '{}' has a negative price ({})",
                    product.slug, product.price
                ));
            }
            if product.sizes.iter().any(|s| s.trim().is_empty()) {
                errors.push(format!("product '{}' has an empty size", product.slug));
            }
            if !product_slugs.insert(product.slug.as_str()) {
                errors.push(format!("duplicate product slug '{}'", product.slug));
            }
        }
    }

    errors
}

/// Parse a catalog from YAML text.
///
/// # Errors
///
/// Returns an error if the YAML does not match the catalog shape.
pub fn parse_catalog(content: &str) -> Result<CatalogSeed, serde_yaml::Error> {
    serde_yaml::from_str(content)
}

/// Seed sellers and products from a YAML file.
///
/// # Errors
///
/// Returns an error if the database URL is missing, the file cannot be read
/// or fails validation, or a database operation fails.
pub async fn catalog(file_path: &str) -> Result<SeedResult, Box<dyn std::error::Error>> {
    let database_url = migrate::database_url()?;

    let path = Path::new(file_path);
    if !path.exists() {
        return Err(format!("File not found: {file_path}").into());
    }

    info!(path = %file_path, "Loading catalog from file");

    // Read and validate YAML before connecting to database
    let content = tokio::fs::read_to_string(path).await?;
    let catalog = parse_catalog(&content)?;

    let errors = validate_catalog(&catalog);
    if !errors.is_empty() {
        error!("Catalog validation failed:");
        for err in &errors {
            error!("  - {err}");
        }
        return Err(format!("{} validation errors found", errors.len()).into());
    }

    let pool = db::create_pool(&database_url).await?;
    info!("Connected to database");

    let repo = ProductRepository::new(&pool);
    let mut result = SeedResult::default();

    for seller in &catalog.sellers {
        let seller_id = repo.upsert_seller(&seller.slug, &seller.name).await?;
        result.sellers += 1;

        for product in &seller.products {
            repo.upsert_product(&UpsertProduct {
                seller_id,
                slug: &product.slug,
                name: &product.name,
                price: Money::new(product.price),
                sizes: &product.sizes,
                active: product.active,
            })
            .await?;
            result.products += 1;
        }
        info!(seller = %seller.slug, products = seller.products.len(), "Seeded seller");
    }

    info!(
        sellers = result.sellers,
        products = result.products,
        "Seeding complete!"
    );
    Ok(result)
}
