//! End-to-end scenarios: drive the full pipeline through `Runner::tick`
//! with synthesized windows and synthetic clock values, the way the
//! scheduler would see them in a real run but without real time or audio
//! hardware.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use selcald::{Dictionary, Runner, SampleRing, ToneTable, Tunables};

static COUNTER: AtomicU64 = AtomicU64::new(0);

fn temp_log_path() -> PathBuf {
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!("selcald_e2e_{}_{n}.log", std::process::id()))
}

fn two_tone_window(freq_a: f64, freq_b: f64, amplitude: f64, sample_rate: f64, n: usize) -> Vec<f32> {
    (0..n)
        .map(|i| {
            let t = i as f64 / sample_rate;
            let sample = amplitude
                * 0.5
                * ((2.0 * std::f64::consts::PI * freq_a * t).sin()
                    + (2.0 * std::f64::consts::PI * freq_b * t).sin());
            sample as f32
        })
        .collect()
}

fn silence_window(n: usize) -> Vec<f32> {
    vec![0.0f32; n]
}

fn runner_and_ring(tun: Tunables) -> (Runner, Arc<SampleRing>) {
    let ring = Arc::new(SampleRing::new(tun.window_len_samples()));
    let table = ToneTable::standard();
    let dictionary = Dictionary::empty();
    let runner = Runner::new(ring.clone(), table, tun, dictionary, temp_log_path());
    (runner, ring)
}

fn freqs(letters: [char; 4]) -> [f64; 4] {
    let table = ToneTable::standard();
    [
        table.frequency_of(letters[0]).unwrap(),
        table.frequency_of(letters[1]).unwrap(),
        table.frequency_of(letters[2]).unwrap(),
        table.frequency_of(letters[3]).unwrap(),
    ]
}

#[test]
fn two_correctly_spaced_bursts_emit_a_validated_code() {
    let tun = Tunables::default();
    let (mut runner, ring) = runner_and_ring(tun);
    let sr = tun.sample_rate as f64;
    let n = tun.window_len_samples();
    let [fa, fb, fc, fd] = freqs(['A', 'B', 'C', 'D']);

    let t0 = Instant::now();
    ring.write(&two_tone_window(fa, fb, 0.5, sr, n));
    assert_eq!(runner.tick(t0), None, "first burst only starts the tracker");

    let t1 = t0 + Duration::from_secs_f64(0.7);
    ring.write(&two_tone_window(fc, fd, 0.5, sr, n));
    let line = runner.tick(t1).expect("second burst should complete the code");
    assert!(line.contains("ABCD"), "unexpected emitted line: {line}");
}

#[test]
fn gap_shorter_than_minimum_yields_no_emission() {
    let tun = Tunables::default();
    let (mut runner, ring) = runner_and_ring(tun);
    let sr = tun.sample_rate as f64;
    let n = tun.window_len_samples();
    let [fa, fb, fc, fd] = freqs(['A', 'B', 'C', 'D']);

    let t0 = Instant::now();
    ring.write(&two_tone_window(fa, fb, 0.5, sr, n));
    assert_eq!(runner.tick(t0), None);

    // 0.44s gap: just under the 0.45s minimum boundary.
    let t1 = t0 + Duration::from_secs_f64(0.44);
    ring.write(&two_tone_window(fc, fd, 0.5, sr, n));
    assert_eq!(runner.tick(t1), None);
}

#[test]
fn gap_longer_than_maximum_yields_no_emission() {
    let tun = Tunables::default();
    let (mut runner, ring) = runner_and_ring(tun);
    let sr = tun.sample_rate as f64;
    let n = tun.window_len_samples();
    let [fa, fb, fc, fd] = freqs(['A', 'B', 'C', 'D']);

    let t0 = Instant::now();
    ring.write(&two_tone_window(fa, fb, 0.5, sr, n));
    assert_eq!(runner.tick(t0), None);

    // 0.91s gap: just over the 0.9s maximum boundary.
    let t1 = t0 + Duration::from_secs_f64(0.91);
    ring.write(&two_tone_window(fc, fd, 0.5, sr, n));
    assert_eq!(runner.tick(t1), None);
}

#[test]
fn silence_between_bursts_does_not_disturb_the_pending_first_pair() {
    let tun = Tunables::default();
    let (mut runner, ring) = runner_and_ring(tun);
    let sr = tun.sample_rate as f64;
    let n = tun.window_len_samples();
    let [fa, fb, fc, fd] = freqs(['A', 'B', 'C', 'D']);

    let t0 = Instant::now();
    ring.write(&two_tone_window(fa, fb, 0.5, sr, n));
    assert_eq!(runner.tick(t0), None);

    // An intervening silent tick should be gated out before it ever reaches
    // the tracker, leaving the pending first pair's clock untouched.
    let t_silent = t0 + Duration::from_secs_f64(0.3);
    ring.write(&silence_window(n));
    assert_eq!(runner.tick(t_silent), None);

    let t1 = t0 + Duration::from_secs_f64(0.7);
    ring.write(&two_tone_window(fc, fd, 0.5, sr, n));
    let line = runner.tick(t1).expect("second burst should still complete the code");
    assert!(line.contains("ABCD"));
}

#[test]
fn duplicate_code_within_lockout_is_not_re_emitted() {
    let tun = Tunables::default();
    let (mut runner, ring) = runner_and_ring(tun);
    let sr = tun.sample_rate as f64;
    let n = tun.window_len_samples();
    let [fa, fb, fc, fd] = freqs(['A', 'B', 'C', 'D']);

    let t0 = Instant::now();
    ring.write(&two_tone_window(fa, fb, 0.5, sr, n));
    runner.tick(t0);
    let t1 = t0 + Duration::from_secs_f64(0.7);
    ring.write(&two_tone_window(fc, fd, 0.5, sr, n));
    assert!(runner.tick(t1).is_some());

    // Same code, well within the default 4s lockout.
    let t2 = t1 + Duration::from_secs_f64(0.5);
    ring.write(&two_tone_window(fa, fb, 0.5, sr, n));
    assert_eq!(runner.tick(t2), None);
    let t3 = t2 + Duration::from_secs_f64(0.7);
    ring.write(&two_tone_window(fc, fd, 0.5, sr, n));
    assert_eq!(runner.tick(t3), None);
}

#[test]
fn partial_window_before_the_buffer_fills_yields_no_detection() {
    let tun = Tunables::default();
    let (mut runner, ring) = runner_and_ring(tun);
    let sr = tun.sample_rate as f64;
    let [fa, fb] = {
        let f = freqs(['A', 'B', 'A', 'B']);
        [f[0], f[1]]
    };

    // Only a tenth of a full window has been written; the ring has not
    // filled once yet, so the tick must bail out before attempting detection.
    let partial_n = tun.window_len_samples() / 10;
    ring.write(&two_tone_window(fa, fb, 0.5, sr, partial_n));
    assert_eq!(runner.tick(Instant::now()), None);
}
