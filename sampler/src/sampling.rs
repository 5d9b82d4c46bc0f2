// Sampling loop and session supervision.
// Invariants: a tick applies fully or not at all; shutdown lands between
// ticks; a sensor failure discards the whole session state.

use std::time::Duration;

use tokio::sync::{broadcast, watch};
use tokio::time::{self, MissedTickBehavior};
use tracing::{error, info, warn};

use velocity_core::error::SensorUnavailable;
use velocity_core::model::OutputEvent;
use velocity_core::session::SamplingSession;

use crate::app::SamplerConfig;
use crate::constants::RECONNECT_DELAY_MS;
use crate::sensor::SensorSource;

pub async fn sampling_loop(
    mut source: SensorSource,
    mut session: SamplingSession,
    tx: broadcast::Sender<OutputEvent>,
    shutdown: &mut watch::Receiver<bool>,
) -> Result<(), SensorUnavailable> {
    let period = Duration::from_millis(session.config().sampling_period_ms);
    let mut ticks = time::interval(period);
    // An overrunning tick runs back-to-back with a full period after it;
    // ticks are never queued up or coalesced.
    ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticks.tick() => {}
            _ = shutdown.changed() => return Ok(()),
        }
        if *shutdown.borrow() {
            return Ok(());
        }

        // Read failures propagate immediately; reconnecting is the
        // supervisor's call, not this loop's.
        let raw = source.read().await?;
        let output = session.ingest(raw);

        let _ = tx.send(OutputEvent::DisplayUpdate(output.display));
        if let Some(rep) = output.rep {
            info!(
                peak_velocity_mps = rep.peak_velocity_mps,
                classification = ?rep.classification,
                "new rep detected"
            );
            let _ = tx.send(OutputEvent::RepCompleted(rep));
        }
    }
}

// One session per connection: fresh ring and rep state every time the
// sensor comes back, no continuity across disconnects.
pub async fn run_session_supervisor(
    config: SamplerConfig,
    tx: broadcast::Sender<OutputEvent>,
    mut shutdown: watch::Receiver<bool>,
) {
    loop {
        if *shutdown.borrow() {
            return;
        }

        let session = match SamplingSession::new(config.session) {
            Ok(session) => session,
            Err(err) => {
                error!(%err, "session config invalid");
                return;
            }
        };

        let source = match SensorSource::connect(&config.source, config.session.sampling_period_ms)
            .await
        {
            Ok(source) => source,
            Err(err) => {
                warn!(%err, "sensor connect failed");
                tokio::select! {
                    _ = time::sleep(Duration::from_millis(RECONNECT_DELAY_MS)) => continue,
                    _ = shutdown.changed() => return,
                }
            }
        };

        info!(source = ?config.source, "sampling session started");
        match sampling_loop(source, session, tx.clone(), &mut shutdown).await {
            Ok(()) => {
                info!("sampling session stopped");
                return;
            }
            Err(err) => {
                warn!(%err, "sampling session lost");
            }
        }

        tokio::select! {
            _ = time::sleep(Duration::from_millis(RECONNECT_DELAY_MS)) => {}
            _ = shutdown.changed() => return,
        }
    }
}
