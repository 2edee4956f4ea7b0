//! Shared types and models for the Warehouse Stock Management system
//!
//! This crate contains the domain model, the stock-ledger delta core, and
//! validation helpers used by the backend server and its tests.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
