pub mod health;
pub mod inventory;

pub use health::HealthPolicy;
pub use inventory::{InventoryAccount, InventoryError, InventoryService, StockLedger};
