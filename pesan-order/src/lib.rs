pub mod models;
pub mod orchestrator;
pub mod shipping;

pub use models::{OrderReceipt, OrderRequest, OrderStage};
pub use orchestrator::{OrderError, OrderOrchestrator};
pub use shipping::{ShippingDispatcher, ShippingService};
