use argus_runner::{PollerBootstrap, PollingService, load_config, load_default_config};
use env_logger::Env;
use log::{error, info};
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            info!("Loading config from {}", path);
            load_config(&path)?
        }
        None => {
            info!("Loading default config");
            load_default_config()?
        }
    };
    config.validate()?;

    let bootstrap = PollerBootstrap::from_config(&config)?;
    let service = PollingService::new(&bootstrap, &config)?;

    let cancel = CancellationToken::new();
    let shutdown = cancel.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Shutdown requested, finishing current cycles"),
            Err(e) => error!("Failed to listen for shutdown signal: {}", e),
        }
        shutdown.cancel();
    });

    let summary = service.run(cancel).await;
    info!(
        "Argus stopped after {} ticker and {} orderbook cycles",
        summary.ticker_cycles, summary.orderbook_cycles
    );

    Ok(())
}
