use anyhow::Context;
use pesan_app::{app, demo_request};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "pesan=info,pesan_app=info,pesan_order=info,pesan_catalog=info,pesan_core=info"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = pesan_store::Config::load().context("Failed to load config")?;
    tracing::debug!(?config, "Configuration loaded");

    let app = app(&config);
    let request = demo_request(&config.demo_order);

    // The outcome is reported through the log only; exit status stays 0
    match app.orchestrator.try_place_order(&request) {
        Ok(receipt) => {
            let receipt = serde_json::to_string(&receipt).context("Failed to encode receipt")?;
            tracing::debug!(%receipt, "Order receipt");
        }
        Err(err) => tracing::debug!(error = %err, "Order rejected"),
    }

    tracing::info!(
        stock = app.inventory.stock(),
        balance = app.payment.balance(),
        "Final account state"
    );
    Ok(())
}
