// Shared constants for event schema, channel sizing, and the demo waveform.

pub const SCHEMA_VERSION: &str = "1.0";
pub const EVENT_CHANNEL_CAP: usize = 256;
pub const RECONNECT_DELAY_MS: u64 = 1_000;

// Synthetic source: raised-cosine lift cycles separated by a rest at the
// bottom, with alternating amplitude so both rep classes occur.
pub const SYNTHETIC_LIFT_MS: u64 = 1_500;
pub const SYNTHETIC_REST_MS: u64 = 1_000;
pub const SYNTHETIC_AMPLITUDE_EVEN: f32 = 0.5;
pub const SYNTHETIC_AMPLITUDE_ODD: f32 = 0.9;
