//! Test-fixture synthesizer: writes a mono WAV file containing a SELCAL
//! burst pair for a given four-letter code, for exercising the receiver
//! against prerecorded or injected audio. Mirrors the teacher's own
//! `tools/dtln/validate.rs` bin-target idiom: a small standalone `clap` CLI
//! around a single focused job, `anyhow::Context` at the boundary.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;

use selcald::tone_table::ToneTable;

/// Synthesize a WAV fixture containing one ICAO SELCAL burst pair.
#[derive(Debug, Parser)]
#[command(name = "selcal_synth", version, about)]
struct Args {
    /// Four-letter SELCAL code to synthesize, e.g. "ABCD".
    code: String,

    /// Output WAV path.
    #[arg(long, default_value = "fixture.wav")]
    out: PathBuf,

    /// Sample rate, in Hz.
    #[arg(long, default_value_t = 8000)]
    sample_rate: u32,

    /// Duration of each tone burst, in seconds.
    #[arg(long, default_value_t = 1.0)]
    burst_seconds: f64,

    /// Silent gap between the two bursts, in seconds.
    #[arg(long, default_value_t = 0.7)]
    gap_seconds: f64,

    /// Leading and trailing silence, in seconds.
    #[arg(long, default_value_t = 0.5)]
    lead_seconds: f64,

    /// Peak amplitude of each tone, in `[0, 1]`.
    #[arg(long, default_value_t = 0.5)]
    amplitude: f64,

    /// Path to a custom tone table JSON file. Uses the built-in standard
    /// table if omitted.
    #[arg(long)]
    tone_table: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let letters: Vec<char> = args.code.chars().collect();
    if letters.len() != 4 {
        bail!("code must be exactly four letters, got '{}'", args.code);
    }

    let table = match &args.tone_table {
        Some(path) => ToneTable::load(path, args.sample_rate)
            .with_context(|| format!("failed to load tone table '{}'", path.display()))?,
        None => ToneTable::standard(),
    };

    let mut freqs = Vec::with_capacity(4);
    for &letter in &letters {
        let freq = table
            .frequency_of(letter)
            .with_context(|| format!("letter '{letter}' is not in the tone table"))?;
        freqs.push(freq);
    }

    let samples = synthesize(
        &freqs,
        args.sample_rate,
        args.burst_seconds,
        args.gap_seconds,
        args.lead_seconds,
        args.amplitude,
    );

    write_wav(&args.out, &samples, args.sample_rate)
        .with_context(|| format!("failed to write WAV file '{}'", args.out.display()))?;

    println!(
        "wrote {} samples ({:.2}s) to {}",
        samples.len(),
        samples.len() as f64 / args.sample_rate as f64,
        args.out.display()
    );
    Ok(())
}

/// Build the sample buffer: silence, burst(first two tones), silence,
/// burst(last two tones), silence.
fn synthesize(
    freqs: &[f64],
    sample_rate: u32,
    burst_seconds: f64,
    gap_seconds: f64,
    lead_seconds: f64,
    amplitude: f64,
) -> Vec<f32> {
    let sr = sample_rate as f64;
    let mut out = Vec::new();

    push_silence(&mut out, sr, lead_seconds);
    push_burst(&mut out, sr, burst_seconds, freqs[0], freqs[1], amplitude);
    push_silence(&mut out, sr, gap_seconds);
    push_burst(&mut out, sr, burst_seconds, freqs[2], freqs[3], amplitude);
    push_silence(&mut out, sr, lead_seconds);

    out
}

fn push_silence(out: &mut Vec<f32>, sample_rate_hz: f64, seconds: f64) {
    let n = (sample_rate_hz * seconds).round() as usize;
    out.extend(std::iter::repeat(0.0f32).take(n));
}

fn push_burst(
    out: &mut Vec<f32>,
    sample_rate_hz: f64,
    seconds: f64,
    freq_a: f64,
    freq_b: f64,
    amplitude: f64,
) {
    let n = (sample_rate_hz * seconds).round() as usize;
    for i in 0..n {
        let t = i as f64 / sample_rate_hz;
        let sample = amplitude
            * 0.5
            * ((2.0 * std::f64::consts::PI * freq_a * t).sin()
                + (2.0 * std::f64::consts::PI * freq_b * t).sin());
        out.push(sample as f32);
    }
}

fn write_wav(path: &std::path::Path, samples: &[f32], sample_rate: u32) -> Result<(), hound::Error> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    let mut writer = hound::WavWriter::create(path, spec)?;
    for &s in samples {
        writer.write_sample(s)?;
    }
    writer.finalize()
}
