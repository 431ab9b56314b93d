//! Passive ICAO SELCAL tone-pair receiver.
//!
//! See `SPEC_FULL.md` for the full component breakdown. The short version:
//! a capture callback feeds a lock-light ring buffer; a fixed-tick
//! scheduler snapshots the latest window and runs it through a silence
//! gate, a Goertzel filter bank, a pair detector with a strict acceptance
//! gate set, and a two-burst tracking state machine, emitting a validated
//! four-letter code to stdout and an append-at-head log file.

pub mod capture;
pub mod config;
pub mod dictionary;
pub mod dsp;
pub mod emitter;
pub mod error;
pub mod ring_buffer;
pub mod scheduler;
pub mod tone_table;
pub mod validator;

pub use config::{Cli, Tunables};
pub use dictionary::Dictionary;
pub use error::SelcalError;
pub use ring_buffer::SampleRing;
pub use scheduler::Runner;
pub use tone_table::ToneTable;
pub use validator::Code;
