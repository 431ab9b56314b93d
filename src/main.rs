use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use selcald::capture::start_capture;
use selcald::{Cli, Dictionary, Runner, SampleRing, ToneTable};

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let table = match &cli.tone_table {
        Some(path) => ToneTable::load(path, cli.tunables.sample_rate)
            .with_context(|| format!("failed to load tone table '{}'", path.display()))?,
        None => ToneTable::standard(),
    };

    let dictionary = match &cli.dictionary {
        Some(path) => Dictionary::load(path)
            .with_context(|| format!("failed to load dictionary '{}'", path.display()))?,
        None => Dictionary::empty(),
    };
    println!("loaded {} dictionary entries", dictionary.len());

    let ring = Arc::new(SampleRing::new(cli.tunables.window_len_samples()));
    let _capture = start_capture(cli.audio_device, cli.tunables.sample_rate, ring.clone())
        .context("failed to open audio input device")?;

    let interrupted = Arc::new(AtomicBool::new(false));
    {
        let interrupted = interrupted.clone();
        ctrlc::set_handler(move || {
            interrupted.store(true, Ordering::Relaxed);
        })
        .context("failed to install interrupt handler")?;
    }

    println!("listening for SELCAL on {:?}", cli.audio_device);
    info!(
        "window={:.1}s step={:.1}s sample_rate={}Hz",
        cli.tunables.window_seconds, cli.tunables.step_seconds, cli.tunables.sample_rate
    );

    let mut runner = Runner::new(ring, table, cli.tunables, dictionary, cli.log_file.clone());
    runner.run(cli.tunables.step_duration(), interrupted);

    info!("interrupted, shutting down cleanly");
    Ok(())
}
