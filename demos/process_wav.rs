use std::env;
use std::error::Error;

use dev_helpers::{frequency_to_string, mix_to_mono, read_wav, write_wav};

use micro_tune::{CorrectorConfig, PitchCorrector, ScaleMask};

fn main() -> Result<(), Box<dyn Error>> {
    let mut args = env::args().skip(1);
    let input_path = match args.next() {
        Some(path) => path,
        None => {
            println!("Usage: process_wav <input.wav> [output.wav]");
            return Ok(());
        }
    };
    let output_path = args.next().unwrap_or_else(|| "corrected.wav".to_string());

    let (spec, samples) = read_wav(&input_path)?;
    let samples = mix_to_mono(&samples, spec.channels);

    let config = CorrectorConfig {
        sample_rate: spec.sample_rate as f32,
        ..Default::default()
    };
    let block_size = config.block_size;
    let mut corrector = PitchCorrector::from_config(config)?;
    // C major
    corrector.set_scale_mask(ScaleMask::major(0));

    let amount = 0.8;
    let speed = 0.5;
    println!(
        "Correcting {} samples at {} Hz to {:?}, amount {}, speed {}",
        samples.len(),
        spec.sample_rate,
        corrector.scale_mask().enabled_names().collect::<Vec<_>>(),
        amount,
        speed
    );

    let start = std::time::Instant::now();
    let mut output = vec![0.0; samples.len()];
    for (block_index, (input_block, output_block)) in samples
        .chunks(block_size)
        .zip(output.chunks_mut(block_size))
        .enumerate()
    {
        corrector.process_frame(input_block, output_block, amount, speed);
        if corrector.detected_frequency() > 0.0 {
            println!(
                "{:6.2} s | {} -> {} | {:7.2} Hz -> {:7.2} Hz",
                (block_index * block_size) as f32 / (spec.sample_rate as f32),
                frequency_to_string(corrector.detected_frequency()),
                frequency_to_string(corrector.target_frequency()),
                corrector.detected_frequency(),
                corrector.target_frequency()
            );
        }
    }
    let time_us = start.elapsed().as_micros();
    println!("Processed in {} μs", time_us);

    write_wav(&output_path, spec.sample_rate, 1, &output)?;
    println!("Wrote {}", output_path);
    Ok(())
}
