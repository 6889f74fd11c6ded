use std::sync::Arc;

use pesan_catalog::{HealthPolicy, InventoryAccount};
use pesan_core::PaymentAccount;
use pesan_order::{OrderOrchestrator, OrderRequest, ShippingDispatcher};
use pesan_store::app_config::{Config, DemoOrder};

/// The wired services, kept so callers can inspect state after ordering
pub struct App {
    pub inventory: Arc<InventoryAccount>,
    pub payment: Arc<PaymentAccount>,
    pub orchestrator: OrderOrchestrator,
}

pub fn app(config: &Config) -> App {
    let inventory = Arc::new(
        InventoryAccount::new(config.inventory.initial_stock)
            .with_health_policy(HealthPolicy::prefix(config.business_rules.healthy_prefix.clone())),
    );
    let payment = Arc::new(PaymentAccount::new(config.payment.initial_balance));
    let shipping = Arc::new(ShippingDispatcher::new());

    let orchestrator = OrderOrchestrator::new(inventory.clone(), payment.clone(), shipping)
        .with_validation(config.business_rules.validate_requests);

    App {
        inventory,
        payment,
        orchestrator,
    }
}

pub fn demo_request(order: &DemoOrder) -> OrderRequest {
    OrderRequest::new(
        order.product_id.clone(),
        order.quantity,
        order.account_number.clone(),
        order.amount,
        order.shipping_address.clone(),
    )
}
