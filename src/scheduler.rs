//! Main Loop / Scheduler: wakes on a fixed tick, snapshots the latest
//! window, and runs the detection pipeline synchronously.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use log::info;

use crate::config::Tunables;
use crate::dictionary::Dictionary;
use crate::dsp::pair_tracker::TrackerTiming;
use crate::dsp::{detect_pair, utils::frame_rms, PairTracker};
use crate::emitter::Emitter;
use crate::ring_buffer::SampleRing;
use crate::tone_table::ToneTable;

/// Everything the main loop owns and mutates across ticks, collected into
/// one object rather than scattered module-level state (see DESIGN.md's
/// resolution of the "global mutable state" design note).
pub struct Runner {
    ring: Arc<SampleRing>,
    table: ToneTable,
    tunables: Tunables,
    tracker: PairTracker,
    emitter: Emitter,
    dictionary: Dictionary,
}

impl Runner {
    pub fn new(
        ring: Arc<SampleRing>,
        table: ToneTable,
        tunables: Tunables,
        dictionary: Dictionary,
        log_path: std::path::PathBuf,
    ) -> Self {
        let timing = TrackerTiming {
            gap_min: tunables.pair_gap_min(),
            gap_max: tunables.pair_gap_max(),
            idle_timeout: tunables.tracker_idle_timeout(),
        };
        Self {
            ring,
            table,
            tunables,
            tracker: PairTracker::new(timing),
            emitter: Emitter::new(log_path, tunables.full_code_lockout()),
            dictionary,
        }
    }

    /// Run one tick of the pipeline against the current window. Returns
    /// the formatted line if a code was emitted this tick.
    pub fn tick(&mut self, now: Instant) -> Option<String> {
        let raw = self.ring.snapshot();
        let window: Vec<f64> = raw.iter().map(|&s| s as f64).collect();

        if window.len() < self.tunables.window_len_samples() {
            // Not enough audio buffered yet.
            return None;
        }

        let rms = frame_rms(&window);
        if rms < self.tunables.silence_rms_max {
            return None;
        }

        let sample_rate_hz = self.tunables.sample_rate as f64;
        let pair = detect_pair(&window, &self.table, sample_rate_hz, &self.tunables)?;

        // `PairTracker::update` only returns `Some` for an already-validated
        // `Code` (it calls `validate` internally on pairing two bursts),
        // which covers step 6 of the main loop ("Validate; on success, run
        // Emitter").
        let code = self.tracker.update(pair, now)?;

        self.emitter.emit(code, now, &self.dictionary)
    }

    /// Run the scheduler loop until `interrupted` is set, sleeping
    /// `step` between ticks.
    pub fn run(&mut self, step: std::time::Duration, interrupted: Arc<AtomicBool>) {
        info!("listening for SELCAL on the configured input device");
        while !interrupted.load(Ordering::Relaxed) {
            let tick_start = Instant::now();
            self.tick(tick_start);
            let elapsed = tick_start.elapsed();
            if elapsed < step {
                std::thread::sleep(step - elapsed);
            }
        }
    }
}
