// Application configuration resolved from the environment at startup.
// Invariants: everything here is immutable for the process lifetime.

use std::env;
use std::path::PathBuf;

use velocity_core::config::SessionConfig;
use velocity_core::error::ConfigError;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SourceKind {
    Synthetic,
    Replay(PathBuf),
}

#[derive(Clone, Debug)]
pub struct SamplerConfig {
    pub session: SessionConfig,
    pub source: SourceKind,
    pub output: OutputFormat,
}

impl SamplerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = SessionConfig::default();
        let session = SessionConfig {
            sampling_period_ms: env_u64(
                "BARVELOCITY_SAMPLING_PERIOD_MS",
                defaults.sampling_period_ms,
            ),
            history_duration_ms: env_u64(
                "BARVELOCITY_HISTORY_DURATION_MS",
                defaults.history_duration_ms,
            ),
            rep_start_velocity: env_f32(
                "BARVELOCITY_REP_START_VELOCITY",
                defaults.rep_start_velocity,
            ),
            rep_end_velocity: env_f32("BARVELOCITY_REP_END_VELOCITY", defaults.rep_end_velocity),
            rep_speed_cutoff: env_f32("BARVELOCITY_REP_SPEED_CUTOFF", defaults.rep_speed_cutoff),
            unit_scale: env_f32("BARVELOCITY_UNIT_SCALE", defaults.unit_scale),
        };
        session.validate()?;

        let source = match env::var("BARVELOCITY_REPLAY_FILE") {
            Ok(path) if !path.is_empty() => SourceKind::Replay(PathBuf::from(path)),
            _ => SourceKind::Synthetic,
        };

        let output = match env::var("BARVELOCITY_OUTPUT").as_deref() {
            Ok("json") => OutputFormat::Json,
            _ => OutputFormat::Text,
        };

        Ok(Self {
            session,
            source,
            output,
        })
    }
}

fn env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(default)
}

fn env_f32(name: &str, default: f32) -> f32 {
    env::var(name)
        .ok()
        .and_then(|value| value.parse::<f32>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_helpers_fall_back_on_missing_or_garbage() {
        assert_eq!(env_u64("BARVELOCITY_TEST_UNSET_U64", 250), 250);
        assert_eq!(env_f32("BARVELOCITY_TEST_UNSET_F32", 0.4), 0.4);

        env::set_var("BARVELOCITY_TEST_SET_U64", "125");
        assert_eq!(env_u64("BARVELOCITY_TEST_SET_U64", 250), 125);

        env::set_var("BARVELOCITY_TEST_BAD_F32", "not-a-number");
        assert_eq!(env_f32("BARVELOCITY_TEST_BAD_F32", 0.4), 0.4);
    }
}
