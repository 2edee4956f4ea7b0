//! Business logic services for the Warehouse Stock Management system

pub mod catalog;
pub mod import;
pub mod income;
pub mod ledger;
pub mod material;
pub mod stock;
pub mod transfer;
pub mod user;
pub mod writeoff;

pub use catalog::CatalogService;
pub use import::ImportService;
pub use income::IncomeService;
pub use ledger::LedgerService;
pub use material::MaterialService;
pub use stock::StockService;
pub use transfer::TransferService;
pub use user::UserService;
pub use writeoff::WriteOffService;
