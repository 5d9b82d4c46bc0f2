// Minimal displacement sampling pipeline for BarVelocity.

use std::sync::atomic::AtomicU64;
use std::sync::Arc;

use tokio::sync::{broadcast, watch};
use tokio::time::Instant;
use tracing::{error, info};

use barvelocity_sampler::app::SamplerConfig;
use barvelocity_sampler::constants::EVENT_CHANNEL_CAP;
use barvelocity_sampler::display;
use barvelocity_sampler::sampling;
use velocity_core::model::OutputEvent;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = match SamplerConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!(%err, "invalid configuration");
            std::process::exit(2);
        }
    };
    info!(?config, "starting sampler");

    let (tx, _) = broadcast::channel::<OutputEvent>(EVENT_CHANNEL_CAP);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let sequence = Arc::new(AtomicU64::new(0));
    let start_instant = Instant::now();

    let display_rx = tx.subscribe();
    let display_format = config.output;
    let display_sequence = sequence.clone();
    tokio::spawn(async move {
        display::display_loop(display_rx, display_format, display_sequence, start_instant).await;
    });

    let supervisor_tx = tx.clone();
    let supervisor_shutdown = shutdown_rx.clone();
    let mut supervisor = tokio::spawn(async move {
        sampling::run_session_supervisor(config, supervisor_tx, supervisor_shutdown).await;
    });

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("shutdown requested");
            let _ = shutdown_tx.send(true);
            let _ = (&mut supervisor).await;
        }
        _ = &mut supervisor => {}
    }
    info!("sampler stopped");
}
