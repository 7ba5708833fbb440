use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

use super::perlin::PerlinField;
use crate::constants::{DEFAULT_PERLIN_NOISE_LEVEL, DEFAULT_RANDOM_NOISE_LEVEL};
use crate::error::{NoiseUtilsError, Result};
use crate::signal_processing::peak_normalize;

#[derive(Clone, Debug, serde::Deserialize)]
#[serde(default)]
pub struct NoiseConfig {
    pub seed: Option<u64>,
    /// Standard deviation used when a random-noise source gets no level
    pub random_noise_level: f32,
    /// Perlin scale used when a Perlin source gets no level
    pub perlin_noise_level: f32,
}

impl NoiseConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_random_noise_level(mut self, level: f32) -> Self {
        self.random_noise_level = level;
        self
    }

    pub fn with_perlin_noise_level(mut self, level: f32) -> Self {
        self.perlin_noise_level = level;
        self
    }
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            seed: None,
            random_noise_level: DEFAULT_RANDOM_NOISE_LEVEL,
            perlin_noise_level: DEFAULT_PERLIN_NOISE_LEVEL,
        }
    }
}

/// Noise injection strategy
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoiseKind {
    /// Zero-mean Gaussian noise followed by peak normalization
    Random,
    /// Perlin noise sampled at `i * signal[i]`, no normalization
    Perlin,
}

/// A distorted signal together with the noise that produced it
#[derive(Clone, Debug, PartialEq)]
pub struct Noised {
    pub signal: Vec<f32>,
    pub noise: Vec<f32>,
}

/// Anything that can distort a signal
///
/// `level` is the noise intensity chosen by the caller; `None` lets the
/// source fall back to its own default.
pub trait NoiseSource {
    fn apply(&mut self, signal: &[f32], level: Option<f32>) -> Result<Noised>;
}

impl<F> NoiseSource for F
where
    F: FnMut(&[f32], Option<f32>) -> Result<Noised>,
{
    fn apply(&mut self, signal: &[f32], level: Option<f32>) -> Result<Noised> {
        self(signal, level)
    }
}

pub(crate) fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => rand::make_rng(),
    }
}

pub struct Noisemaker {
    kind: NoiseKind,
    config: NoiseConfig,
    rng: ChaCha8Rng,
}

impl Noisemaker {
    pub fn new(kind: NoiseKind, config: NoiseConfig) -> Self {
        let rng = create_rng(config.seed);
        Self { kind, config, rng }
    }

    pub fn random(config: NoiseConfig) -> Self {
        Self::new(NoiseKind::Random, config)
    }

    pub fn perlin(config: NoiseConfig) -> Self {
        Self::new(NoiseKind::Perlin, config)
    }

    pub fn kind(&self) -> NoiseKind {
        self.kind
    }

    pub fn default_level(&self) -> f32 {
        match self.kind {
            NoiseKind::Random => self.config.random_noise_level,
            NoiseKind::Perlin => self.config.perlin_noise_level,
        }
    }

    /// Add Gaussian noise with standard deviation `noise_level`
    ///
    /// The noisy signal is peak-normalized when it leaves [-1, 1]; the
    /// returned noise is always the raw draw.
    pub fn add_random_noise(&mut self, signal: &[f32], noise_level: f32) -> Result<Noised> {
        let normal = Normal::new(0.0f32, noise_level).map_err(|e| {
            NoiseUtilsError::NoiseParameter(format!("noise level {}: {}", noise_level, e))
        })?;

        let noise: Vec<f32> = (0..signal.len())
            .map(|_| normal.sample(&mut self.rng))
            .collect();

        let mut noisy: Vec<f32> = signal.iter().zip(&noise).map(|(s, n)| s + n).collect();
        if let Some(peak) = peak_normalize(&mut noisy) {
            log::debug!("Random noise: normalized by peak {:.3}", peak);
        }

        Ok(Noised {
            signal: noisy,
            noise,
        })
    }

    /// Add Perlin noise scaled by `noise_level`
    ///
    /// Each call draws a fresh field. The result is not normalized.
    pub fn add_perlin_noise(&mut self, signal: &[f32], noise_level: f32) -> Noised {
        let field = PerlinField::new(&mut self.rng);

        let noise: Vec<f32> = signal
            .iter()
            .enumerate()
            .map(|(i, &s)| field.sample(i as f32 * s) * noise_level)
            .collect();

        let noisy = signal.iter().zip(&noise).map(|(s, n)| s + n).collect();

        Noised {
            signal: noisy,
            noise,
        }
    }
}

impl NoiseSource for Noisemaker {
    fn apply(&mut self, signal: &[f32], level: Option<f32>) -> Result<Noised> {
        let level = level.unwrap_or_else(|| self.default_level());
        match self.kind {
            NoiseKind::Random => self.add_random_noise(signal, level),
            NoiseKind::Perlin => Ok(self.add_perlin_noise(signal, level)),
        }
    }
}
