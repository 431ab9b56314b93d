//! Audio capture: the concrete "audio device driver" collaborator named
//! only at its interface by the spec. Built on `cpal`, mirroring the
//! device-selection and `build_input_stream` pattern used elsewhere in the
//! audio-DSP corpus this crate is grounded on.
//!
//! The callback only copies samples into the [`SampleRing`] and advances
//! its write position — no allocation, no I/O, never blocks.

use std::sync::Arc;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, SizedSample, Stream};
use log::warn;

use crate::error::SelcalError;
use crate::ring_buffer::SampleRing;

/// An active, scoped audio input stream. Dropping this stops capture.
pub struct CaptureHandle {
    _stream: Stream,
}

/// Open the audio input device at `device_index` (or the host default) and
/// start streaming mono samples at `sample_rate_hz` into `ring`.
pub fn start_capture(
    device_index: Option<usize>,
    sample_rate_hz: u32,
    ring: Arc<SampleRing>,
) -> Result<CaptureHandle, SelcalError> {
    let host = cpal::default_host();

    let device = match device_index {
        Some(index) => host
            .input_devices()
            .ok()
            .and_then(|mut devices| devices.nth(index))
            .ok_or(SelcalError::AudioDeviceNotFound { index })?,
        None => host
            .default_input_device()
            .ok_or(SelcalError::AudioDeviceNotFound { index: 0 })?,
    };

    let default_config = device
        .default_input_config()
        .map_err(|source| SelcalError::AudioConfig { source })?;

    let mut stream_config: cpal::StreamConfig = default_config.clone().into();
    stream_config.channels = 1;
    stream_config.sample_rate = cpal::SampleRate(sample_rate_hz);

    let stream = match default_config.sample_format() {
        cpal::SampleFormat::F32 => build_stream::<f32>(&device, &stream_config, ring)?,
        cpal::SampleFormat::I16 => build_stream::<i16>(&device, &stream_config, ring)?,
        cpal::SampleFormat::U16 => build_stream::<u16>(&device, &stream_config, ring)?,
        other => {
            warn!("unsupported sample format {other:?}, falling back to f32");
            build_stream::<f32>(&device, &stream_config, ring)?
        }
    };

    stream
        .play()
        .map_err(|source| SelcalError::AudioStreamPlay { source })?;

    Ok(CaptureHandle { _stream: stream })
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    ring: Arc<SampleRing>,
) -> Result<Stream, SelcalError>
where
    T: SizedSample,
    f32: FromSample<T>,
{
    let channels = config.channels as usize;
    let err_fn = |err| warn!("audio input stream error (dropped frames): {err}");

    device
        .build_input_stream(
            config,
            move |data: &[T], _: &cpal::InputCallbackInfo| {
                write_mono(data, channels, &ring);
            },
            err_fn,
            None,
        )
        .map_err(|source| SelcalError::AudioStreamBuild { source })
}

/// Downmix an interleaved multi-channel block to mono and push it into the
/// ring. The capture callback's entire job: no allocation, no blocking.
fn write_mono<T>(input: &[T], channels: usize, ring: &SampleRing)
where
    T: SizedSample,
    f32: FromSample<T>,
{
    if channels <= 1 {
        let mut buf = [0.0f32; 256];
        for chunk in input.chunks(buf.len()) {
            for (dst, src) in buf.iter_mut().zip(chunk) {
                *dst = src.to_sample::<f32>();
            }
            ring.write(&buf[..chunk.len()]);
        }
        return;
    }

    let mut buf = [0.0f32; 256];
    let mut filled = 0usize;
    for frame in input.chunks(channels) {
        let mut sum = 0.0f32;
        for sample in frame {
            sum += sample.to_sample::<f32>();
        }
        buf[filled] = sum / channels as f32;
        filled += 1;
        if filled == buf.len() {
            ring.write(&buf[..filled]);
            filled = 0;
        }
    }
    if filled > 0 {
        ring.write(&buf[..filled]);
    }
}
