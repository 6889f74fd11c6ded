use chrono::{DateTime, Utc};
use pesan_core::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Everything needed to place one order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub product_id: String,
    pub quantity: i64,
    pub account_number: String,
    pub amount: i64,
    pub shipping_address: String,
}

impl OrderRequest {
    pub fn new(
        product_id: impl Into<String>,
        quantity: i64,
        account_number: impl Into<String>,
        amount: i64,
        shipping_address: impl Into<String>,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
            account_number: account_number.into(),
            amount,
            shipping_address: shipping_address.into(),
        }
    }

    /// Strict checks, applied only when the orchestrator is told to validate
    pub fn validate(&self) -> CoreResult<()> {
        if self.quantity <= 0 {
            return Err(CoreError::ValidationError(format!(
                "quantity must be positive, got {}",
                self.quantity
            )));
        }
        if self.amount < 0 {
            return Err(CoreError::ValidationError(format!(
                "amount must not be negative, got {}",
                self.amount
            )));
        }

        let required = [
            ("product_id", &self.product_id),
            ("account_number", &self.account_number),
            ("shipping_address", &self.shipping_address),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(CoreError::ValidationError(format!("{} is required", field)));
            }
        }

        Ok(())
    }
}

/// Steps of the order pipeline, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderStage {
    StockCheck,
    HealthCheck,
    Payment,
    StockUpdate,
    Shipping,
    Done,
}

impl OrderStage {
    pub fn next(self) -> Option<OrderStage> {
        match self {
            Self::StockCheck => Some(Self::HealthCheck),
            Self::HealthCheck => Some(Self::Payment),
            Self::Payment => Some(Self::StockUpdate),
            Self::StockUpdate => Some(Self::Shipping),
            Self::Shipping => Some(Self::Done),
            Self::Done => None,
        }
    }

    /// Gate stages; failing one leaves stock and balance untouched
    pub fn is_check(self) -> bool {
        matches!(self, Self::StockCheck | Self::HealthCheck | Self::Payment)
    }
}

/// Proof of a placed order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderReceipt {
    pub order_id: Uuid,
    pub product_id: String,
    pub quantity: i64,
    pub account_number: String,
    pub amount: i64,
    pub shipping_address: String,
    pub placed_at: DateTime<Utc>,
}

impl OrderReceipt {
    pub fn for_request(request: &OrderRequest) -> Self {
        Self {
            order_id: Uuid::new_v4(),
            product_id: request.product_id.clone(),
            quantity: request.quantity,
            account_number: request.account_number.clone(),
            amount: request.amount,
            shipping_address: request.shipping_address.clone(),
            placed_at: Utc::now(),
        }
    }
}
