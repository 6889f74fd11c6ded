use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub inventory: InventoryConfig,
    pub payment: PaymentConfig,
    pub business_rules: BusinessRules,
    pub demo_order: DemoOrder,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct InventoryConfig {
    pub initial_stock: i64,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self { initial_stock: 10 }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct PaymentConfig {
    pub initial_balance: i64,
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self { initial_balance: 450_000 }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct BusinessRules {
    /// Product ids starting with this pass the health check
    pub healthy_prefix: String,
    /// Reject non-positive quantities, negative amounts and blank fields
    pub validate_requests: bool,
}

impl Default for BusinessRules {
    fn default() -> Self {
        Self {
            healthy_prefix: "BY".to_string(),
            validate_requests: false,
        }
    }
}

/// The order issued by the `pesan` binary
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct DemoOrder {
    pub product_id: String,
    pub quantity: i64,
    pub account_number: String,
    pub amount: i64,
    pub shipping_address: String,
}

impl Default for DemoOrder {
    fn default() -> Self {
        Self {
            product_id: "BY0N3".to_string(),
            quantity: 4,
            account_number: "ACC123".to_string(),
            amount: 300_000,
            shipping_address: "Indonesia, Surabaya, Sukolilo, Jl. Bumi Marina Perunggu No. 99"
                .to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        Self::builder(&run_mode).build()?.try_deserialize()
    }

    /// Layered sources; every file is optional, built-in defaults fill the gaps
    fn builder(run_mode: &str) -> config::ConfigBuilder<config::builder::DefaultState> {
        config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(
                config::File::with_name(&format!("config/{}", run_mode)).required(false),
            )
            // Not checked in
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(Self::environment())
    }

    /// Eg. `PESAN__INVENTORY__INITIAL_STOCK=3`
    fn environment() -> config::Environment {
        config::Environment::with_prefix("PESAN").separator("__")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_demo_scenario() {
        let config = Config::default();

        assert_eq!(config.inventory.initial_stock, 10);
        assert_eq!(config.payment.initial_balance, 450_000);
        assert_eq!(config.business_rules.healthy_prefix, "BY");
        assert!(!config.business_rules.validate_requests);
        assert_eq!(config.demo_order.product_id, "BY0N3");
        assert_eq!(config.demo_order.amount, 300_000);
    }

    #[test]
    fn test_partial_source_keeps_defaults() {
        let config: Config = config::Config::builder()
            .add_source(config::File::from_str(
                "[inventory]\ninitial_stock = 3\n\n[business_rules]\nvalidate_requests = true\n",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.inventory.initial_stock, 3);
        assert!(config.business_rules.validate_requests);
        assert_eq!(config.business_rules.healthy_prefix, "BY");
        assert_eq!(config.payment.initial_balance, 450_000);
        assert_eq!(config.demo_order, DemoOrder::default());
    }

    #[test]
    fn test_missing_files_fall_back_to_defaults() {
        let config: Config = Config::builder("no-such-mode")
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.demo_order.quantity, 4);
        assert_eq!(config.demo_order.account_number, "ACC123");
    }

    #[test]
    fn test_checked_in_defaults_file_matches_builtin_defaults() {
        let config: Config = config::Config::builder()
            .add_source(config::File::with_name(concat!(
                env!("CARGO_MANIFEST_DIR"),
                "/../config/default"
            )))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_environment_overrides_files() {
        let vars: config::Map<String, String> = [
            ("PESAN__INVENTORY__INITIAL_STOCK", "3"),
            ("PESAN__BUSINESS_RULES__VALIDATE_REQUESTS", "true"),
            ("PESAN__DEMO_ORDER__PRODUCT_ID", "QA-7"),
            ("OTHER__INVENTORY__INITIAL_STOCK", "99"),
        ]
        .into_iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();

        let config: Config = config::Config::builder()
            .add_source(config::File::with_name(concat!(
                env!("CARGO_MANIFEST_DIR"),
                "/../config/default"
            )))
            .add_source(Config::environment().source(Some(vars)))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.inventory.initial_stock, 3);
        assert!(config.business_rules.validate_requests);
        assert_eq!(config.demo_order.product_id, "QA-7");
        assert_eq!(config.business_rules.healthy_prefix, "BY");
        assert_eq!(config.payment.initial_balance, 450_000);
    }
}
