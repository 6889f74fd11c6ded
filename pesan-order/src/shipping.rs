/// Hands a paid order over for delivery
pub trait ShippingService: Send + Sync {
    fn arrange_shipping(&self, product_id: &str, shipping_address: &str);
}

/// Stateless dispatcher; the arrangement is only logged
#[derive(Debug, Default, Clone, Copy)]
pub struct ShippingDispatcher;

impl ShippingDispatcher {
    pub fn new() -> Self {
        Self
    }
}

impl ShippingService for ShippingDispatcher {
    fn arrange_shipping(&self, product_id: &str, shipping_address: &str) {
        tracing::info!(
            product_id,
            shipping_address,
            "Arranging shipping for product {} to address {}",
            product_id,
            shipping_address
        );
    }
}
