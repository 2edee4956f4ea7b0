//! Database models for the Warehouse Stock Management server
//!
//! Re-exports models from the shared crate

pub use shared::models::*;
