//! Shared scalar helpers for the detection pipeline.

/// RMS of a sample block. Used by the main loop's silence gate.
pub fn frame_rms(x: &[f64]) -> f64 {
    let mut s = 0.0f64;
    for &v in x {
        s += v * v;
    }
    (s / (x.len().max(1) as f64)).sqrt()
}

/// Mean of `x^2`, used as the noise proxy in the pair detector's SNR gate.
pub fn mean_square(x: &[f64]) -> f64 {
    let mut s = 0.0f64;
    for &v in x {
        s += v * v;
    }
    s / (x.len().max(1) as f64)
}

/// Spectral flatness (geometric mean / arithmetic mean) of a magnitude
/// vector. Near 1.0 for noise, near 0.0 for a handful of dominant bins.
pub fn spectral_flatness(mags: &[f64]) -> f64 {
    if mags.is_empty() {
        return 1.0;
    }
    let mut log_sum = 0.0f64;
    let mut sum = 0.0f64;
    for &m in mags {
        let m = m.max(f64::MIN_POSITIVE);
        log_sum += m.ln();
        sum += m;
    }
    let n = mags.len() as f64;
    let geo_mean = (log_sum / n).exp();
    let arith_mean = sum / n;
    geo_mean / arith_mean.max(f64::MIN_POSITIVE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flatness_of_constant_vector_is_one() {
        let mags = vec![2.0; 16];
        assert!((spectral_flatness(&mags) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn flatness_of_single_spike_is_near_zero() {
        let mut mags = vec![1e-6; 16];
        mags[3] = 10.0;
        assert!(spectral_flatness(&mags) < 0.2);
    }

    #[test]
    fn rms_of_silence_is_zero() {
        assert_eq!(frame_rms(&[0.0; 100]), 0.0);
    }
}
