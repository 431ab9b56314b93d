//! Pair Tracker: the burst-pair state machine that combines two accepted
//! pairs, spaced correctly in time, into a four-letter code.

use std::time::{Duration, Instant};

use crate::dsp::pair_detector::Pair;
use crate::validator::{validate, Code};

#[derive(Debug, Clone, Copy)]
enum State {
    Idle,
    AwaitingSecond { first: Pair, first_time: Instant },
}

/// Inter-burst gap bounds and the optional defensive idle timeout.
#[derive(Debug, Clone, Copy)]
pub struct TrackerTiming {
    pub gap_min: Duration,
    pub gap_max: Duration,
    /// Disabled (`None`) by default to preserve parity with the original
    /// design. See the open-question resolution in DESIGN.md.
    pub idle_timeout: Option<Duration>,
}

pub struct PairTracker {
    state: State,
    timing: TrackerTiming,
}

impl PairTracker {
    pub fn new(timing: TrackerTiming) -> Self {
        Self {
            state: State::Idle,
            timing,
        }
    }

    /// Feed one accepted pair at time `now`. Returns `Some(Code)` only when
    /// this pair completes a valid, correctly-timed burst pair.
    pub fn update(&mut self, pair: Pair, now: Instant) -> Option<Code> {
        if let Some(timeout) = self.timing.idle_timeout {
            if let State::AwaitingSecond { first_time, .. } = self.state {
                if now.duration_since(first_time) > timeout {
                    self.state = State::Idle;
                }
            }
        }

        match self.state {
            State::Idle => {
                self.state = State::AwaitingSecond {
                    first: pair,
                    first_time: now,
                };
                None
            }
            State::AwaitingSecond { first, first_time } => {
                if pair == first {
                    // Same burst still sounding; do not advance first_time.
                    return None;
                }

                let gap = now.duration_since(first_time);
                self.state = State::Idle;

                if gap < self.timing.gap_min || gap > self.timing.gap_max {
                    return None;
                }

                validate(first, pair)
            }
        }
    }

    /// Reset to `Idle` unconditionally (external reset).
    pub fn reset(&mut self) {
        self.state = State::Idle;
    }
}
