//! Integration tests for the Boutique marketplace.
//!
//! # Running Tests
//!
//! ```bash
//! # Pure cart -> pricing -> order tests
//! cargo test -p boutique-integration-tests
//!
//! # Live storefront flow (needs a migrated, seeded database and a running server)
//! bq-cli migrate
//! bq-cli seed catalog crates/cli/fixtures/catalog.yaml
//! cargo run -p boutique-storefront &
//! cargo test -p boutique-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `checkout_flow` - Cart, pricing and order drafts through the core crate's public API
//! - `storefront_http` - Cart and checkout against a running storefront
