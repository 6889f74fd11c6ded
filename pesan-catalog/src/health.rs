/// Prefix every healthy product identifier starts with
pub const DEFAULT_HEALTHY_PREFIX: &str = "BY";

/// Placeholder product-quality gate keyed on the identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthPolicy {
    prefix: String,
}

impl HealthPolicy {
    pub fn prefix(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into() }
    }

    /// Healthy iff the literal product id begins with the prefix (case-sensitive)
    pub fn is_healthy(&self, product_id: &str) -> bool {
        product_id.starts_with(self.prefix.as_str())
    }
}

impl Default for HealthPolicy {
    fn default() -> Self {
        Self::prefix(DEFAULT_HEALTHY_PREFIX)
    }
}
