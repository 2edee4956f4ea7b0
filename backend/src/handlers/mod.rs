//! HTTP handlers for the Warehouse Stock Management API

pub mod catalog;
pub mod health;
pub mod import;
pub mod income;
pub mod material;
pub mod stock;
pub mod transfer;
pub mod user;
pub mod writeoff;

pub use catalog::*;
pub use health::*;
pub use import::*;
pub use income::*;
pub use material::*;
pub use stock::*;
pub use transfer::*;
pub use user::*;
pub use writeoff::*;
