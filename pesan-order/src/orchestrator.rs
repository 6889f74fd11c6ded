use std::sync::Arc;

use pesan_catalog::InventoryService;
use pesan_core::{CoreError, PaymentService};

use crate::models::{OrderReceipt, OrderRequest, OrderStage};
use crate::shipping::ShippingService;

/// Façade running the order pipeline over the injected services
pub struct OrderOrchestrator {
    inventory: Arc<dyn InventoryService>,
    payment: Arc<dyn PaymentService>,
    shipping: Arc<dyn ShippingService>,
    validate_requests: bool,
}

impl OrderOrchestrator {
    pub fn new(
        inventory: Arc<dyn InventoryService>,
        payment: Arc<dyn PaymentService>,
        shipping: Arc<dyn ShippingService>,
    ) -> Self {
        Self {
            inventory,
            payment,
            shipping,
            validate_requests: false,
        }
    }

    /// Reject malformed requests before any service is called
    pub fn with_validation(mut self, enabled: bool) -> Self {
        self.validate_requests = enabled;
        self
    }

    /// Place an order, returning whether it went through
    pub fn place_order(
        &self,
        product_id: &str,
        quantity: i64,
        account_number: &str,
        amount: i64,
        shipping_address: &str,
    ) -> bool {
        let request =
            OrderRequest::new(product_id, quantity, account_number, amount, shipping_address);
        self.try_place_order(&request).is_ok()
    }

    /// Run the pipeline: stock, health and payment gate the order; stock
    /// update and shipping only happen once all three pass.
    pub fn try_place_order(&self, request: &OrderRequest) -> Result<OrderReceipt, OrderError> {
        if self.validate_requests {
            if let Err(err) = request.validate() {
                tracing::warn!(error = %err, "Invalid order request. Order not placed.");
                return Err(OrderError::InvalidRequest(err));
            }
        }

        let mut stage = Some(OrderStage::StockCheck);
        while let Some(current) = stage {
            match current {
                OrderStage::StockCheck => {
                    if !self.inventory.check_stock(&request.product_id, request.quantity) {
                        tracing::warn!("Product out of stock. Order not placed.");
                        return Err(OrderError::OutOfStock {
                            product_id: request.product_id.clone(),
                            quantity: request.quantity,
                        });
                    }
                }
                OrderStage::HealthCheck => {
                    if !self.inventory.check_product_health(&request.product_id) {
                        tracing::warn!("Product is not in good condition. Order not placed.");
                        return Err(OrderError::UnhealthyProduct(request.product_id.clone()));
                    }
                }
                OrderStage::Payment => {
                    if !self.payment.process_payment(&request.account_number, request.amount) {
                        tracing::warn!("Payment failed. Order not placed.");
                        return Err(OrderError::PaymentInsufficientFunds {
                            account_number: request.account_number.clone(),
                            amount: request.amount,
                        });
                    }
                }
                OrderStage::StockUpdate => {
                    self.inventory.update_stock(&request.product_id, request.quantity);
                }
                OrderStage::Shipping => {
                    self.shipping.arrange_shipping(&request.product_id, &request.shipping_address);
                }
                OrderStage::Done => {}
            }
            stage = current.next();
        }

        let receipt = OrderReceipt::for_request(request);
        tracing::info!(order_id = %receipt.order_id, "Order placed successfully!");
        Ok(receipt)
    }
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum OrderError {
    #[error("Product {product_id} out of stock for quantity {quantity}")]
    OutOfStock { product_id: String, quantity: i64 },

    #[error("Product {0} is not in good condition")]
    UnhealthyProduct(String),

    #[error("Insufficient funds on account {account_number} for amount {amount}")]
    PaymentInsufficientFunds { account_number: String, amount: i64 },

    #[error("Invalid order request: {0}")]
    InvalidRequest(#[source] CoreError),
}

impl OrderError {
    /// Pipeline stage that rejected the order, if any
    pub fn stage(&self) -> Option<OrderStage> {
        match self {
            Self::OutOfStock { .. } => Some(OrderStage::StockCheck),
            Self::UnhealthyProduct(_) => Some(OrderStage::HealthCheck),
            Self::PaymentInsufficientFunds { .. } => Some(OrderStage::Payment),
            Self::InvalidRequest(_) => None,
        }
    }
}
