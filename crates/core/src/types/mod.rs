//! Core types for the boutique marketplace.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod money;
pub mod status;

pub use id::*;
pub use money::{Money, round_for_display};
pub use status::*;
