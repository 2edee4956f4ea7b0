//! Domain models for the Warehouse Stock Management system

mod catalog;
mod import;
mod income;
mod material;
mod stock;
mod transfer;
mod user;
mod writeoff;

pub use catalog::*;
pub use import::*;
pub use income::*;
pub use material::*;
pub use stock::*;
pub use transfer::*;
pub use user::*;
pub use writeoff::*;
