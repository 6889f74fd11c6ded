use std::collections::HashMap;
use std::sync::{Mutex, PoisonError, RwLock};

use crate::health::HealthPolicy;

/// Stock and product-health queries used while placing an order
pub trait InventoryService: Send + Sync {
    /// True iff at least `quantity` units are available
    fn check_stock(&self, product_id: &str, quantity: i64) -> bool;

    /// Remove `quantity` units. Never refuses; stock may go negative.
    fn update_stock(&self, product_id: &str, quantity: i64);

    fn check_product_health(&self, product_id: &str) -> bool;
}

/// One stock counter standing in for the whole catalog
pub struct InventoryAccount {
    stock: Mutex<i64>,
    health: HealthPolicy,
}

impl InventoryAccount {
    pub fn new(initial_stock: i64) -> Self {
        Self {
            stock: Mutex::new(initial_stock),
            health: HealthPolicy::default(),
        }
    }

    pub fn with_health_policy(mut self, health: HealthPolicy) -> Self {
        self.health = health;
        self
    }

    /// Current stock level
    pub fn stock(&self) -> i64 {
        *self.stock.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl InventoryService for InventoryAccount {
    fn check_stock(&self, product_id: &str, quantity: i64) -> bool {
        tracing::info!(product_id, quantity, "Checking stock for product {}", product_id);
        self.stock() >= quantity
    }

    fn update_stock(&self, product_id: &str, quantity: i64) {
        tracing::info!(
            product_id,
            quantity,
            "Updating stock for product {} by {}",
            product_id,
            quantity
        );
        let mut stock = self.stock.lock().unwrap_or_else(PoisonError::into_inner);
        *stock = stock.saturating_sub(quantity);
    }

    fn check_product_health(&self, product_id: &str) -> bool {
        tracing::info!(product_id, "Checking health for product {}", product_id);
        self.health.is_healthy(product_id)
    }
}

/// Stock counters keyed by product id, each behind its own lock
#[derive(Default)]
pub struct StockLedger {
    levels: RwLock<HashMap<String, Mutex<i64>>>,
    health: HealthPolicy,
}

impl StockLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_health_policy(mut self, health: HealthPolicy) -> Self {
        self.health = health;
        self
    }

    /// Register a product (or reset its level)
    pub fn register(&self, product_id: impl Into<String>, quantity: i64) {
        self.levels
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(product_id.into(), Mutex::new(quantity));
    }

    pub fn level(&self, product_id: &str) -> Option<i64> {
        let levels = self.levels.read().unwrap_or_else(PoisonError::into_inner);
        levels
            .get(product_id)
            .map(|level| *level.lock().unwrap_or_else(PoisonError::into_inner))
    }

    /// Apply a signed delta to a registered product, returning the new level
    pub fn adjust(&self, product_id: &str, delta: i64) -> Result<i64, InventoryError> {
        self.update_level(product_id, |level| level.saturating_add(delta))
    }

    fn update_level(
        &self,
        product_id: &str,
        f: impl FnOnce(i64) -> i64,
    ) -> Result<i64, InventoryError> {
        let levels = self.levels.read().unwrap_or_else(PoisonError::into_inner);
        let mut level = levels
            .get(product_id)
            .ok_or_else(|| InventoryError::NotFound(product_id.to_string()))?
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        *level = f(*level);
        Ok(*level)
    }
}

impl InventoryService for StockLedger {
    fn check_stock(&self, product_id: &str, quantity: i64) -> bool {
        tracing::info!(product_id, quantity, "Checking stock for product {}", product_id);
        // Unregistered products have nothing on hand
        self.level(product_id).is_some_and(|level| level >= quantity)
    }

    fn update_stock(&self, product_id: &str, quantity: i64) {
        tracing::info!(
            product_id,
            quantity,
            "Updating stock for product {} by {}",
            product_id,
            quantity
        );
        if let Err(err) = self.update_level(product_id, |level| level.saturating_sub(quantity)) {
            tracing::warn!(product_id, error = %err, "Stock update skipped");
        }
    }

    fn check_product_health(&self, product_id: &str) -> bool {
        tracing::info!(product_id, "Checking health for product {}", product_id);
        self.health.is_healthy(product_id)
    }
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum InventoryError {
    #[error("Inventory not found: {0}")]
    NotFound(String),
}
