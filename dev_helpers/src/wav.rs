use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};

/// Reads a WAV file, returning its format and the samples scaled to [-1, 1].
/// Multichannel samples are interleaved.
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<(WavSpec, Vec<f32>), hound::Error> {
    let mut reader = WavReader::open(path)?;
    let spec = reader.spec();
    let samples = match spec.sample_format {
        SampleFormat::Float => reader.samples::<f32>().collect::<Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let scale = 1. / ((1_i64 << (spec.bits_per_sample - 1)) as f32);
            reader
                .samples::<i32>()
                .map(|sample| sample.map(|value| (value as f32) * scale))
                .collect::<Result<Vec<_>, _>>()?
        }
    };
    Ok((spec, samples))
}

/// Writes 16 bit samples, clamping to [-1, 1].
pub fn write_wav<P: AsRef<Path>>(
    path: P,
    sample_rate: u32,
    channel_count: u16,
    buffer: &[f32],
) -> Result<(), hound::Error> {
    let spec = WavSpec {
        channels: channel_count,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut writer = WavWriter::create(path, spec)?;
    let amplitude = i16::MAX as f32;
    for sample in buffer.iter() {
        let clamped_sample = sample.max(-1.0).min(1.0);
        writer.write_sample((clamped_sample * amplitude) as i16)?;
    }
    writer.finalize()
}

/// Averages interleaved channels into a single channel.
pub fn mix_to_mono(samples: &[f32], channel_count: u16) -> Vec<f32> {
    let channel_count = channel_count.max(1) as usize;
    samples
        .chunks(channel_count)
        .map(|frame| frame.iter().sum::<f32>() / (frame.len() as f32))
        .collect()
}
