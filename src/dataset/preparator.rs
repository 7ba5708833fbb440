use ndarray::{Array2, ErrorKind, ShapeError};
use rand::RngExt;
use rand_chacha::ChaCha8Rng;

use crate::config::{AudioConfig, DatasetConfig, NoiseUtilsConfig};
use crate::error::Result;
use crate::signal_processing::signal_range;
use crate::synthesis::{
    NoiseSource, NonlinearParams, SignalGenerator, WeaklyNonlinearParams, create_rng,
};

/// Parallel matrices of distorted and clean signals, one example per row
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub distorted: Array2<f32>,
    pub clean: Array2<f32>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.clean.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.clean.nrows() == 0
    }
}

/// Row-major accumulator for a dataset with fixed row length
struct DatasetBuilder {
    length: usize,
    rows: usize,
    distorted: Vec<f32>,
    clean: Vec<f32>,
}

impl DatasetBuilder {
    fn new(length: usize) -> Self {
        Self {
            length,
            rows: 0,
            distorted: Vec::new(),
            clean: Vec::new(),
        }
    }

    fn push(&mut self, distorted: &[f32], clean: &[f32]) -> Result<()> {
        if distorted.len() != self.length || clean.len() != self.length {
            return Err(ShapeError::from_kind(ErrorKind::IncompatibleShape).into());
        }
        self.distorted.extend_from_slice(distorted);
        self.clean.extend_from_slice(clean);
        self.rows += 1;
        Ok(())
    }

    fn finish(self) -> Result<Dataset> {
        let shape = (self.rows, self.length);
        Ok(Dataset {
            distorted: Array2::from_shape_vec(shape, self.distorted)?,
            clean: Array2::from_shape_vec(shape, self.clean)?,
        })
    }
}

/// Builds synthetic datasets and noisy audio
///
/// Owns the RNG used for parameter draws; noise draws belong to the
/// [`NoiseSource`] passed to each call.
pub struct DataPreparator {
    generator: SignalGenerator,
    rng: ChaCha8Rng,
    pub(super) dataset: DatasetConfig,
    pub(super) audio: AudioConfig,
}

impl DataPreparator {
    pub fn new(dataset: DatasetConfig, audio: AudioConfig) -> Result<Self> {
        dataset.validate()?;
        audio.validate()?;
        Ok(Self {
            generator: SignalGenerator::new(),
            rng: create_rng(dataset.seed),
            dataset,
            audio,
        })
    }

    pub fn from_config(config: &NoiseUtilsConfig) -> Result<Self> {
        Self::new(config.dataset.clone(), config.audio.clone())
    }

    pub fn generator(&self) -> &SignalGenerator {
        &self.generator
    }

    fn draw(&mut self, (low, high): (f32, f32)) -> f32 {
        self.rng.random_range(low..=high)
    }

    /// Linear signals with random slope and intercept
    ///
    /// Each signal's noise level is its full range `|max - min|`.
    pub fn generate_linear_dataset<S>(
        &mut self,
        size: usize,
        length: usize,
        source: &mut S,
    ) -> Result<Dataset>
    where
        S: NoiseSource + ?Sized,
    {
        let mut builder = DatasetBuilder::new(length);

        for _ in 0..size {
            let slope = self.draw(self.dataset.slope_range);
            let intercept = self.draw(self.dataset.intercept_range);
            let signal = self.generator.linear(length, slope, intercept);

            let delta = signal_range(&signal).abs();
            let noised = source.apply(&signal, Some(delta))?;
            builder.push(&noised.signal, &signal)?;
        }

        log::info!("Generated linear dataset: {} x {}", size, length);
        builder.finish()
    }

    /// Weakly nonlinear signals with random phase
    ///
    /// The source is called without a level. Only the noise of the final
    /// example is returned (empty when `size` is 0).
    pub fn generate_weakly_nonlinear_dataset<S>(
        &mut self,
        size: usize,
        length: usize,
        source: &mut S,
    ) -> Result<(Dataset, Vec<f32>)>
    where
        S: NoiseSource + ?Sized,
    {
        let mut builder = DatasetBuilder::new(length);
        let mut last_noise = Vec::new();

        for _ in 0..size {
            let phase = self.draw(self.dataset.phase_range);
            let params = WeaklyNonlinearParams::default().with_phase(phase);
            let signal = self.generator.weakly_nonlinear(length, &params);

            let noised = source.apply(&signal, None)?;
            builder.push(&noised.signal, &signal)?;
            last_noise = noised.noise;
        }

        log::info!("Generated weakly nonlinear dataset: {} x {}", size, length);
        Ok((builder.finish()?, last_noise))
    }

    /// Nonlinear signals with random phase
    ///
    /// Each signal's noise level is a fixed fraction of its range.
    pub fn generate_nonlinear_dataset<S>(
        &mut self,
        size: usize,
        length: usize,
        source: &mut S,
    ) -> Result<Dataset>
    where
        S: NoiseSource + ?Sized,
    {
        let mut builder = DatasetBuilder::new(length);

        for _ in 0..size {
            let params = NonlinearParams {
                frequency: self.dataset.nonlinear_frequency,
                amplitude: self.dataset.nonlinear_amplitude,
                phase: self.draw(self.dataset.phase_range),
            };
            let signal = self.generator.nonlinear(length, &params);

            let delta = signal_range(&signal) * self.dataset.nonlinear_delta_ratio;
            let noised = source.apply(&signal, Some(delta))?;
            builder.push(&noised.signal, &signal)?;
        }

        log::info!("Generated nonlinear dataset: {} x {}", size, length);
        builder.finish()
    }
}

impl Default for DataPreparator {
    fn default() -> Self {
        let dataset = DatasetConfig::default();
        Self {
            generator: SignalGenerator::new(),
            rng: create_rng(dataset.seed),
            dataset,
            audio: AudioConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NoiseUtilsError;
    use crate::synthesis::Noised;

    fn identity(signal: &[f32], _level: Option<f32>) -> Result<Noised> {
        Ok(Noised {
            signal: signal.to_vec(),
            noise: vec![0.0; signal.len()],
        })
    }

    fn seeded(seed: u64) -> DataPreparator {
        DataPreparator::new(DatasetConfig::default().with_seed(seed), AudioConfig::default())
            .unwrap()
    }

    #[test]
    fn test_linear_dataset_identity() {
        let mut preparator = seeded(1);
        let dataset = preparator
            .generate_linear_dataset(5, 10, &mut identity)
            .unwrap();

        assert_eq!(dataset.distorted.dim(), (5, 10));
        assert_eq!(dataset.clean.dim(), (5, 10));
        assert_eq!(dataset.distorted, dataset.clean);
        assert_eq!(dataset.len(), 5);
    }

    #[test]
    fn test_linear_dataset_rows_are_lines() {
        let mut preparator = seeded(2);
        let dataset = preparator
            .generate_linear_dataset(8, 6, &mut identity)
            .unwrap();

        for row in dataset.clean.rows() {
            let intercept = row[0];
            let slope = row[1] - row[0];
            assert!((-5.0..=5.0).contains(&intercept));
            assert!((-5.0 - 1e-5..=5.0 + 1e-5).contains(&slope));
            for (i, &x) in row.iter().enumerate() {
                assert!((x - (slope * i as f32 + intercept)).abs() < 1e-4);
            }
        }
    }

    #[test]
    fn test_linear_dataset_passes_range_as_level() {
        let mut levels = Vec::new();
        let mut clean_rows = Vec::new();
        let mut source = |signal: &[f32], level: Option<f32>| -> Result<Noised> {
            levels.push(level);
            clean_rows.push(signal.to_vec());
            identity(signal, level)
        };

        seeded(3)
            .generate_linear_dataset(4, 10, &mut source)
            .unwrap();

        assert_eq!(levels.len(), 4);
        for (level, row) in levels.iter().zip(&clean_rows) {
            let expected = (row[9] - row[0]).abs();
            assert!((level.unwrap() - expected).abs() < 1e-4);
        }
    }

    #[test]
    fn test_weakly_nonlinear_returns_last_noise() {
        let mut counter = 0.0f32;
        let mut source = |signal: &[f32], level: Option<f32>| -> Result<Noised> {
            assert!(level.is_none());
            counter += 1.0;
            Ok(Noised {
                signal: signal.iter().map(|s| s + counter).collect(),
                noise: vec![counter; signal.len()],
            })
        };

        let (dataset, last_noise) = seeded(4)
            .generate_weakly_nonlinear_dataset(3, 16, &mut source)
            .unwrap();

        assert_eq!(dataset.distorted.dim(), (3, 16));
        assert_eq!(last_noise, vec![3.0; 16]);
        for (r, (d, c)) in dataset
            .distorted
            .rows()
            .into_iter()
            .zip(dataset.clean.rows())
            .enumerate()
        {
            for (x, y) in d.iter().zip(c.iter()) {
                assert!((x - y - (r as f32 + 1.0)).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn test_weakly_nonlinear_empty() {
        let (dataset, last_noise) = seeded(5)
            .generate_weakly_nonlinear_dataset(0, 16, &mut identity)
            .unwrap();

        assert!(dataset.is_empty());
        assert_eq!(dataset.clean.dim(), (0, 16));
        assert!(last_noise.is_empty());
    }

    #[test]
    fn test_nonlinear_dataset_level_is_fraction_of_range() {
        let mut levels = Vec::new();
        let mut source = |signal: &[f32], level: Option<f32>| -> Result<Noised> {
            levels.push(level.unwrap());
            identity(signal, level)
        };

        let dataset = seeded(6)
            .generate_nonlinear_dataset(4, 200, &mut source)
            .unwrap();

        assert_eq!(dataset.clean.dim(), (4, 200));
        // a full period of 5 sin^2 spans almost exactly [0, 5]
        for level in levels {
            assert!((level - 1.5).abs() < 0.01, "level {}", level);
        }
        assert!(dataset.clean.iter().all(|&x| (-1e-5..=5.0 + 1e-4).contains(&x)));
    }

    #[test]
    fn test_seeded_datasets_repeat() {
        let a = seeded(7).generate_linear_dataset(3, 5, &mut identity).unwrap();
        let b = seeded(7).generate_linear_dataset(3, 5, &mut identity).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_source_errors_propagate() {
        let mut failing = |_: &[f32], _: Option<f32>| -> Result<Noised> {
            Err(NoiseUtilsError::NoiseParameter("boom".to_string()))
        };
        let result = seeded(8).generate_nonlinear_dataset(2, 10, &mut failing);
        assert!(matches!(result, Err(NoiseUtilsError::NoiseParameter(_))));
    }

    #[test]
    fn test_oversized_request_fails_through_source() {
        let mut failing = |_: &[f32], _: Option<f32>| -> Result<Noised> {
            Err(NoiseUtilsError::NoiseParameter("boom".to_string()))
        };
        let result = seeded(10).generate_linear_dataset(usize::MAX, 2, &mut failing);
        assert!(matches!(result, Err(NoiseUtilsError::NoiseParameter(_))));

        let result = seeded(11).generate_weakly_nonlinear_dataset(usize::MAX, 2, &mut failing);
        assert!(matches!(result, Err(NoiseUtilsError::NoiseParameter(_))));
    }

    #[test]
    fn test_wrong_length_from_source_is_shape_error() {
        let mut truncating = |signal: &[f32], _: Option<f32>| -> Result<Noised> {
            Ok(Noised {
                signal: signal[1..].to_vec(),
                noise: vec![0.0; signal.len() - 1],
            })
        };
        let result = seeded(9).generate_linear_dataset(2, 10, &mut truncating);
        assert!(matches!(result, Err(NoiseUtilsError::Shape(_))));
    }

    #[test]
    fn test_invalid_range_rejected() {
        let config = DatasetConfig {
            phase_range: (3.0, 1.0),
            ..DatasetConfig::default()
        };
        assert!(DataPreparator::new(config, AudioConfig::default()).is_err());
    }
}
