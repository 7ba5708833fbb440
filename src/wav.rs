use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};

use crate::config::{SampleEncoding, WavFormat};
use crate::error::Result;
use crate::signal_processing::resample;

/// Mono audio samples with their sampling rate
#[derive(Debug, Clone, PartialEq)]
pub struct Audio {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

/// Load a WAV file at its native sample rate
///
/// Integer PCM is scaled to [-1, 1). Files with more than one channel are
/// down-mixed to mono by averaging the channels of each frame.
pub fn load_wav<P: AsRef<Path>>(path: P) -> Result<Audio> {
    let reader = WavReader::open(path.as_ref())?;
    let spec = reader.spec();
    let interleaved = read_samples(reader, &spec)?;

    let samples = if spec.channels > 1 {
        let channels = spec.channels as usize;
        interleaved
            .chunks_exact(channels)
            .map(|frame| frame.iter().sum::<f32>() / channels as f32)
            .collect()
    } else {
        interleaved
    };

    log::debug!(
        "Loaded {} ({} samples, {} Hz, {} ch)",
        path.as_ref().display(),
        samples.len(),
        spec.sample_rate,
        spec.channels
    );

    Ok(Audio {
        samples,
        sample_rate: spec.sample_rate,
    })
}

/// Load a WAV file, resampled to `sample_rate` when one is given
///
/// `None` behaves like [`load_wav`].
pub fn load_wav_at<P: AsRef<Path>>(path: P, sample_rate: Option<u32>) -> Result<Audio> {
    let audio = load_wav(path)?;
    match sample_rate {
        Some(rate) if rate != audio.sample_rate => Ok(Audio {
            samples: resample(&audio.samples, audio.sample_rate, rate)?,
            sample_rate: rate,
        }),
        _ => Ok(audio),
    }
}

fn read_samples(mut reader: WavReader<BufReader<File>>, spec: &WavSpec) -> Result<Vec<f32>> {
    let samples = match spec.sample_format {
        SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<std::result::Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let max_val = 2_i64.pow(spec.bits_per_sample as u32 - 1) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };
    Ok(samples)
}

/// Write mono samples to a WAV file
///
/// Integer formats clamp samples to the representable range. Unsupported
/// formats fail with [`Config`](crate::NoiseUtilsError::Config) before the file is created.
pub fn save_wav<P: AsRef<Path>>(
    path: P,
    samples: &[f32],
    sample_rate: u32,
    format: WavFormat,
) -> Result<()> {
    format.validate()?;

    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: format.bits_per_sample,
        sample_format: match format.encoding {
            SampleEncoding::Float => SampleFormat::Float,
            SampleEncoding::Int => SampleFormat::Int,
        },
    };

    let mut writer = WavWriter::create(path.as_ref(), spec)?;

    match format.encoding {
        SampleEncoding::Float => {
            for &sample in samples {
                writer.write_sample(sample)?;
            }
        }
        SampleEncoding::Int => {
            let max_val = 2_i64.pow(format.bits_per_sample as u32 - 1) as f64;
            let (lo, hi) = (-max_val, max_val - 1.0);
            for &sample in samples {
                let scaled = (sample as f64 * max_val).round().clamp(lo, hi);
                writer.write_sample(scaled as i32)?;
            }
        }
    }

    writer.finalize()?;
    log::debug!(
        "Wrote {} ({} samples, {} Hz, {})",
        path.as_ref().display(),
        samples.len(),
        sample_rate,
        format
    );
    Ok(())
}
