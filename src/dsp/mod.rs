//! Detection pipeline: narrow-band filter bank, pair detector, and the
//! burst-pair tracking state machine.

pub mod goertzel;
pub mod pair_detector;
pub mod pair_tracker;
pub mod utils;

pub use goertzel::{goertzel, FilterBank, GoertzelResult};
pub use pair_detector::{detect_pair, Pair};
pub use pair_tracker::{PairTracker, TrackerTiming};
