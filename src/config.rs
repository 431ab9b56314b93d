//! Immutable runtime configuration.
//!
//! Collects every tunable named by the detection pipeline into one struct
//! built once at startup from CLI flags, instead of the module-level
//! `const`s the teacher codebase favors for its own DSP constants. Passed
//! down by reference from `main` through the scheduler to every component.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser};

/// Passive ICAO SELCAL tone-pair receiver.
#[derive(Debug, Parser)]
#[command(name = "selcald", version, about)]
pub struct Cli {
    /// Audio input device index (platform-default device if omitted).
    #[arg(long)]
    pub audio_device: Option<usize>,

    /// Path to the SELCAL16 tone table JSON file. Uses the built-in
    /// standard table if omitted.
    #[arg(long)]
    pub tone_table: Option<PathBuf>,

    /// Path to the tab-separated registry dictionary file.
    #[arg(long)]
    pub dictionary: Option<PathBuf>,

    /// Path to the append-at-head log file.
    #[arg(long, default_value = "selcal.log")]
    pub log_file: PathBuf,

    #[command(flatten)]
    pub tunables: Tunables,
}

/// Detection-pipeline tunables, all overridable from the command line.
#[derive(Debug, Clone, Copy, Args)]
pub struct Tunables {
    /// Analysis tick period, in seconds.
    #[arg(long, default_value_t = 0.2)]
    pub step_seconds: f64,

    /// Analysis window length, in seconds.
    #[arg(long, default_value_t = 1.0)]
    pub window_seconds: f64,

    /// Sample rate of the audio input, in Hz.
    #[arg(long, default_value_t = 8000)]
    pub sample_rate: u32,

    /// Window RMS below which a tick is skipped as silence.
    #[arg(long, default_value_t = 0.00015)]
    pub silence_rms_max: f64,

    /// Absolute power floor per tone.
    #[arg(long, default_value_t = 0.00018)]
    pub goertzel_min_power: f64,

    /// Minimum tone-to-noise power ratio.
    #[arg(long, default_value_t = 1.8)]
    pub goertzel_ratio: f64,

    /// Combined power floor (loose).
    #[arg(long, default_value_t = 0.003)]
    pub pair_power_sum: f64,

    /// Combined power floor (strict).
    #[arg(long, default_value_t = 0.15)]
    pub pair_power_min: f64,

    /// Maximum power ratio between the two tones of a pair.
    #[arg(long, default_value_t = 4.0)]
    pub pair_imbalance_max: f64,

    /// Spectral flatness ceiling; above this the window is rejected as broadband.
    #[arg(long, default_value_t = 0.8)]
    pub flatness_max: f64,

    /// Third-tone rivalry ratio; a too-strong third tone rejects the window.
    #[arg(long, default_value_t = 0.85)]
    pub third_tone_rivalry: f64,

    /// Minimum inter-burst gap, in seconds.
    #[arg(long, default_value_t = 0.45)]
    pub pair_gap_min: f64,

    /// Maximum inter-burst gap, in seconds.
    #[arg(long, default_value_t = 0.9)]
    pub pair_gap_max: f64,

    /// Minimum time before the same code may be re-emitted, in seconds.
    #[arg(long, default_value_t = 4.0)]
    pub full_code_lockout: f64,

    /// Defensive idle timeout for a stale `AwaitingSecond` tracker state, in
    /// seconds. Disabled (`None`) by default to preserve parity with the
    /// original design — see the open-question resolution in DESIGN.md.
    #[arg(long)]
    pub tracker_idle_timeout_secs: Option<f64>,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            step_seconds: 0.2,
            window_seconds: 1.0,
            sample_rate: 8000,
            silence_rms_max: 0.00015,
            goertzel_min_power: 0.00018,
            goertzel_ratio: 1.8,
            pair_power_sum: 0.003,
            pair_power_min: 0.15,
            pair_imbalance_max: 4.0,
            flatness_max: 0.8,
            third_tone_rivalry: 0.85,
            pair_gap_min: 0.45,
            pair_gap_max: 0.9,
            full_code_lockout: 4.0,
            tracker_idle_timeout_secs: None,
        }
    }
}

impl Tunables {
    pub fn pair_gap_min(&self) -> Duration {
        Duration::from_secs_f64(self.pair_gap_min)
    }

    pub fn pair_gap_max(&self) -> Duration {
        Duration::from_secs_f64(self.pair_gap_max)
    }

    pub fn full_code_lockout(&self) -> Duration {
        Duration::from_secs_f64(self.full_code_lockout)
    }

    pub fn tracker_idle_timeout(&self) -> Option<Duration> {
        self.tracker_idle_timeout_secs.map(Duration::from_secs_f64)
    }

    pub fn step_duration(&self) -> Duration {
        Duration::from_secs_f64(self.step_seconds)
    }

    pub fn window_len_samples(&self) -> usize {
        (self.sample_rate as f64 * self.window_seconds).round() as usize
    }
}
