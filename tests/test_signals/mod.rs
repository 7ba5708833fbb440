#![allow(dead_code)]

use std::path::Path;

use hound::{SampleFormat, WavSpec, WavWriter};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn tone(num_samples: usize, sample_rate: u32, freq_hz: f32, amplitude: f32) -> Vec<f32> {
    (0..num_samples)
        .map(|i| {
            let t = i as f32 / sample_rate as f32;
            amplitude * (2.0 * std::f32::consts::PI * freq_hz * t).sin()
        })
        .collect()
}

/// Write a mono 32-bit float WAV file
pub fn write_tone_wav(path: &Path, samples: &[f32], sample_rate: u32) {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };
    let mut writer = WavWriter::create(path, spec).unwrap();
    for &sample in samples {
        writer.write_sample(sample).unwrap();
    }
    writer.finalize().unwrap();
}
