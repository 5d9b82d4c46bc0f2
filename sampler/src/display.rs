// Presentation sink: renders pipeline events from the broadcast channel.
// Invariants: rendering never blocks the sampling loop; a lagged subscriber
// skips ahead instead of stalling the producer.

use std::sync::atomic::AtomicU64;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::broadcast;
use tokio::time::Instant;
use tracing::{info, warn};

use velocity_core::model::{OutputEvent, RepClass};

use crate::app::OutputFormat;
use crate::constants::SCHEMA_VERSION;
use crate::utils::{monotonic_ms, next_sequence, now_epoch_ms};

const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

#[derive(Serialize)]
pub struct EventMessage {
    pub schema_version: &'static str,
    pub timestamp_ms: u64,
    pub monotonic_ms: u64,
    pub sequence: u64,
    #[serde(flatten)]
    pub event: OutputEvent,
}

pub async fn display_loop(
    mut rx: broadcast::Receiver<OutputEvent>,
    format: OutputFormat,
    sequence: Arc<AtomicU64>,
    start: Instant,
) {
    info!("display sink started");
    loop {
        let event = match rx.recv().await {
            Ok(event) => event,
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                warn!(skipped, "display sink lagged, skipping ahead");
                continue;
            }
            Err(broadcast::error::RecvError::Closed) => break,
        };

        match format {
            OutputFormat::Text => println!("{}", render_text(&event)),
            OutputFormat::Json => {
                let message = EventMessage {
                    schema_version: SCHEMA_VERSION,
                    timestamp_ms: now_epoch_ms(),
                    monotonic_ms: monotonic_ms(start),
                    sequence: next_sequence(sequence.as_ref()),
                    event,
                };
                if let Ok(payload) = serde_json::to_string(&message) {
                    println!("{payload}");
                }
            }
        }
    }
    info!("display sink stopped");
}

pub fn render_text(event: &OutputEvent) -> String {
    match event {
        OutputEvent::DisplayUpdate(update) => format!(
            "displacement {} m  velocity {} m/s",
            render_reading(update.displacement_m),
            render_reading(update.velocity_mps),
        ),
        OutputEvent::RepCompleted(rep) => {
            let (color, label) = match rep.classification {
                RepClass::Fast => (GREEN, "fast"),
                RepClass::Slow => (RED, "slow"),
            };
            format!(
                "{color}rep completed: {:.3} m/s ({label}){RESET}",
                rep.peak_velocity_mps
            )
        }
    }
}

fn render_reading(value: Option<f32>) -> String {
    match value {
        Some(value) => format!("{value:.3}"),
        None => "--".to_string(),
    }
}
