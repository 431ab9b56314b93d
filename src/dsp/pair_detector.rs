//! Pair Detector: turns one analysis window into an accepted letter pair,
//! or rejects it as speech, noise, or an inconclusive partial match.

use crate::config::Tunables;
use crate::dsp::goertzel::FilterBank;
use crate::dsp::utils::{mean_square, spectral_flatness};
use crate::tone_table::ToneTable;

/// Two letters from one burst, always stored in canonical (ascending
/// tone-table index) order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pair {
    pub first: char,
    pub second: char,
}

impl Pair {
    /// Build the canonical ordering of two letters by tone-table index.
    /// Returns `None` if the letters are equal.
    fn canonical(table: &ToneTable, a: char, b: char) -> Option<Self> {
        if a == b {
            return None;
        }
        let ia = table.index_of(a)?;
        let ib = table.index_of(b)?;
        if ia < ib {
            Some(Self {
                first: a,
                second: b,
            })
        } else {
            Some(Self {
                first: b,
                second: a,
            })
        }
    }
}

/// Detect an accepted letter pair in `window`, or `None` if any gate fails.
///
/// `window` must be sampled at the rate `table`'s frequencies were validated
/// against.
pub fn detect_pair(window: &[f64], table: &ToneTable, sample_rate_hz: f64, tun: &Tunables) -> Option<Pair> {
    let bank = FilterBank::new(sample_rate_hz, table.frequencies());
    let mags = bank.magnitudes(window);

    // Rank by magnitude descending, keeping the original (table) index.
    let mut ranked: Vec<(usize, f64)> = mags.iter().copied().enumerate().collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).expect("magnitude is never NaN"));

    let (i1, m1) = ranked[0];
    let (i2, m2) = ranked[1];
    let (_i3, m3) = ranked[2];

    // Third-tone rivalry gate: a strong third tone means this is not a
    // clean two-tone burst (speech or more than two significant tones).
    if m3 > tun.third_tone_rivalry * m2 {
        return None;
    }

    if i1 == i2 {
        // Cannot happen with distinct magnitudes but defensive, per spec.
        return None;
    }

    let letters = table.letters();
    let pair = Pair::canonical(table, letters[i1], letters[i2])?;

    let idx_a = table.index_of(pair.first)?;
    let idx_b = table.index_of(pair.second)?;
    let p1 = bank.power(window, idx_a);
    let p2 = bank.power(window, idx_b);

    let noise = mean_square(window) + f64::EPSILON;

    if p1 < tun.goertzel_min_power || p2 < tun.goertzel_min_power {
        return None;
    }
    if p1.min(p2) < noise * tun.goertzel_ratio {
        return None;
    }
    if p1 + p2 < tun.pair_power_sum {
        return None;
    }
    if p1 + p2 < tun.pair_power_min {
        return None;
    }
    let imbalance = p1.max(p2) / p1.min(p2).max(f64::EPSILON);
    if imbalance > tun.pair_imbalance_max {
        return None;
    }
    if spectral_flatness(&mags) > tun.flatness_max {
        return None;
    }

    Some(pair)
}
