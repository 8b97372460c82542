//! Player Catalog - Read-only snapshot of selectable players
//!
//! The remote fantasy service owns every player record. This crate holds the
//! snapshot the client works from while building a squad: lookup by id, live
//! prices for budget sums, and position grouping for display.

pub mod catalog;
pub mod error;
pub mod types;

pub use catalog::PlayerCatalog;
pub use error::CatalogError;
pub use types::{Player, PlayerId, Position};

/// Re-exported so downstream crates price players with the same decimal type
pub use rust_decimal::Decimal;
