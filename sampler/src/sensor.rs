// Displacement input sources behind one read seam.
// Invariants: a failed or exhausted source is session-fatal; retry policy
// belongs to the supervisor, not to the source.

use std::collections::VecDeque;
use std::f32::consts::PI;
use std::path::{Path, PathBuf};

use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader, Lines};

use velocity_core::error::SensorUnavailable;

use crate::app::SourceKind;
use crate::constants::{
    SYNTHETIC_AMPLITUDE_EVEN, SYNTHETIC_AMPLITUDE_ODD, SYNTHETIC_LIFT_MS, SYNTHETIC_REST_MS,
};

pub enum SensorSource {
    Synthetic(SyntheticWave),
    Replay(SampleReplay),
    Scripted(VecDeque<f32>),
}

impl SensorSource {
    pub async fn connect(kind: &SourceKind, period_ms: u64) -> Result<Self, SensorUnavailable> {
        match kind {
            SourceKind::Synthetic => Ok(SensorSource::Synthetic(SyntheticWave::new(period_ms))),
            SourceKind::Replay(path) => Ok(SensorSource::Replay(SampleReplay::open(path).await?)),
        }
    }

    pub fn scripted(samples: impl IntoIterator<Item = f32>) -> Self {
        SensorSource::Scripted(samples.into_iter().collect())
    }

    pub async fn read(&mut self) -> Result<f32, SensorUnavailable> {
        match self {
            SensorSource::Synthetic(wave) => Ok(wave.next_sample()),
            SensorSource::Replay(replay) => replay.next_sample().await,
            SensorSource::Scripted(samples) => samples
                .pop_front()
                .ok_or_else(|| SensorUnavailable::new("scripted samples exhausted")),
        }
    }
}

// Deterministic stand-in for the hardware ADC: raised-cosine lift cycles
// with a rest phase at the bottom. Time advances one sampling period per
// read, so playback speed follows the loop cadence, not the wall clock.
pub struct SyntheticWave {
    period_ms: u64,
    elapsed_ms: u64,
}

impl SyntheticWave {
    pub fn new(period_ms: u64) -> Self {
        Self {
            period_ms,
            elapsed_ms: 0,
        }
    }

    fn next_sample(&mut self) -> f32 {
        let cycle_ms = SYNTHETIC_LIFT_MS + SYNTHETIC_REST_MS;
        let cycle = self.elapsed_ms / cycle_ms;
        let phase_ms = self.elapsed_ms % cycle_ms;
        self.elapsed_ms += self.period_ms;

        if phase_ms >= SYNTHETIC_LIFT_MS {
            return 0.0;
        }
        let amplitude = if cycle % 2 == 0 {
            SYNTHETIC_AMPLITUDE_EVEN
        } else {
            SYNTHETIC_AMPLITUDE_ODD
        };
        let phase = phase_ms as f32 / SYNTHETIC_LIFT_MS as f32;
        amplitude * 0.5 * (1.0 - (2.0 * PI * phase).cos())
    }
}

// Plays a recorded displacement trace back from a text file: one raw sample
// per line, blank lines and # comments skipped. End of file reads as a
// disconnect.
pub struct SampleReplay {
    path: PathBuf,
    lines: Lines<BufReader<File>>,
}

impl SampleReplay {
    pub async fn open(path: &Path) -> Result<Self, SensorUnavailable> {
        let file = File::open(path).await?;
        Ok(Self {
            path: path.to_path_buf(),
            lines: BufReader::new(file).lines(),
        })
    }

    async fn next_sample(&mut self) -> Result<f32, SensorUnavailable> {
        loop {
            let Some(line) = self.lines.next_line().await? else {
                return Err(SensorUnavailable::new(format!(
                    "end of replay {}",
                    self.path.display()
                )));
            };
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            return line.parse::<f32>().map_err(|err| {
                SensorUnavailable::new(format!("bad replay sample {line:?}: {err}"))
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthetic_wave_starts_low_and_rests_low() {
        let mut wave = SyntheticWave::new(100);
        assert_eq!(wave.next_sample(), 0.0);

        let mut peak = 0.0f32;
        let mut samples = Vec::new();
        for _ in 0..24 {
            let sample = wave.next_sample();
            peak = peak.max(sample);
            samples.push(sample);
        }
        // Lift phase tops out near the even-cycle amplitude; the sampling
        // grid does not land exactly on the crest.
        assert!(
            (peak - SYNTHETIC_AMPLITUDE_EVEN).abs() < 0.02,
            "peak {peak}"
        );
        // ...and the rest phase after 1.5 s sits at the bottom.
        assert_eq!(samples[16], 0.0);
        assert_eq!(samples[20], 0.0);
    }

    #[test]
    fn synthetic_wave_alternates_amplitude_per_cycle() {
        let mut wave = SyntheticWave::new(100);
        let mut peaks = [0.0f32; 2];
        for cycle in 0..2 {
            for _ in 0..25 {
                peaks[cycle] = peaks[cycle].max(wave.next_sample());
            }
        }
        assert!((peaks[0] - SYNTHETIC_AMPLITUDE_EVEN).abs() < 0.02);
        assert!((peaks[1] - SYNTHETIC_AMPLITUDE_ODD).abs() < 0.02);
    }

    #[tokio::test]
    async fn scripted_source_drains_then_disconnects() {
        let mut source = SensorSource::scripted([0.1, 0.2]);
        assert_eq!(source.read().await.unwrap(), 0.1);
        assert_eq!(source.read().await.unwrap(), 0.2);
        let err = source.read().await.unwrap_err();
        assert!(err.reason.contains("exhausted"), "{err}");
    }

    #[tokio::test]
    async fn replay_skips_comments_and_ends_as_disconnect() {
        let path = std::env::temp_dir().join("barvelocity-replay-test.txt");
        tokio::fs::write(&path, "# trace\n0.25\n\n0.5\n").await.unwrap();

        let mut replay = SampleReplay::open(&path).await.unwrap();
        assert_eq!(replay.next_sample().await.unwrap(), 0.25);
        assert_eq!(replay.next_sample().await.unwrap(), 0.5);
        let err = replay.next_sample().await.unwrap_err();
        assert!(err.reason.contains("end of replay"), "{err}");

        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn garbage_replay_lines_are_a_read_failure() {
        let path = std::env::temp_dir().join("barvelocity-replay-garbage-test.txt");
        tokio::fs::write(&path, "0.25\nbottom\n").await.unwrap();

        let mut replay = SampleReplay::open(&path).await.unwrap();
        assert_eq!(replay.next_sample().await.unwrap(), 0.25);
        let err = replay.next_sample().await.unwrap_err();
        assert!(err.reason.contains("bad replay sample"), "{err}");

        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn missing_replay_file_is_a_connect_failure() {
        let kind = SourceKind::Replay(PathBuf::from("/nonexistent/barvelocity-trace.txt"));
        assert!(SensorSource::connect(&kind, 100).await.is_err());
    }
}
