//! Band-limited sample rate conversion.

use rubato::{
    Resampler, SincFixedIn, SincInterpolationParameters, SincInterpolationType, WindowFunction,
};

use crate::constants::RESAMPLE_CHUNK_SIZE;
use crate::error::{NoiseUtilsError, Result};

/// Convert a mono signal from `from` Hz to `to` Hz
///
/// The output holds `ceil(len * to / from)` samples and is aligned with the
/// input: the sinc filter delay is removed. Equal rates and empty signals are
/// returned unchanged.
pub fn resample(samples: &[f32], from: u32, to: u32) -> Result<Vec<f32>> {
    if from == 0 || to == 0 {
        return Err(NoiseUtilsError::Config(format!(
            "cannot resample from {} Hz to {} Hz",
            from, to
        )));
    }
    if from == to || samples.is_empty() {
        return Ok(samples.to_vec());
    }

    let ratio = to as f64 / from as f64;
    let expected = (samples.len() as f64 * ratio).ceil() as usize;

    let mut resampler = SincFixedIn::<f32>::new(
        ratio,
        1.0,
        SincInterpolationParameters {
            sinc_len: 128,
            f_cutoff: 0.95,
            interpolation: SincInterpolationType::Linear,
            oversampling_factor: 256,
            window: WindowFunction::BlackmanHarris2,
        },
        RESAMPLE_CHUNK_SIZE,
        1,
    )?;

    let delay = resampler.output_delay();
    let mut output = Vec::with_capacity(expected + delay);

    let mut chunks = samples.chunks_exact(RESAMPLE_CHUNK_SIZE);
    for chunk in &mut chunks {
        let out = resampler.process(&[chunk], None)?;
        output.extend_from_slice(&out[0]);
    }

    let rest = chunks.remainder();
    if !rest.is_empty() {
        let out = resampler.process_partial(Some(&[rest]), None)?;
        output.extend_from_slice(&out[0]);
    }

    // flush the filter tail with silence
    while output.len() < expected + delay {
        let out = resampler.process_partial::<&[f32]>(None, None)?;
        if out[0].is_empty() {
            break;
        }
        output.extend_from_slice(&out[0]);
    }

    output.drain(..delay.min(output.len()));
    output.resize(expected, 0.0);

    log::debug!(
        "Resampled {} samples at {} Hz to {} samples at {} Hz",
        samples.len(),
        from,
        expected,
        to
    );
    Ok(output)
}
