//! Configuration for dataset and noisy-audio generation.
//!
//! Every tunable that used to be a default argument lives here. All structs
//! deserialize with `#[serde(default)]`, so a TOML file only needs the keys it
//! wants to change:
//!
//! ```toml
//! [noise]
//! seed = 7
//! random_noise_level = 0.01
//!
//! [audio]
//! output_format = "pcm16"
//! sample_rate_policy = "require-uniform"
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::constants::{DEFAULT_AUDIO_NOISE_LEVEL, DEFAULT_WINDOW_SIZE, NONLINEAR_DELTA_RATIO};
use crate::error::{NoiseUtilsError, Result};
use crate::synthesis::NoiseConfig;

/// Top-level configuration
///
/// # Example
/// ```
/// use noise_utils::config::NoiseUtilsConfig;
///
/// let config = NoiseUtilsConfig::from_toml_str("[dataset]\nseed = 3\n").unwrap();
/// assert_eq!(config.dataset.seed, Some(3));
/// assert_eq!(config.audio.window_size, 1000);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NoiseUtilsConfig {
    /// Noise generation parameters
    pub noise: NoiseConfig,
    /// Synthetic dataset parameters
    pub dataset: DatasetConfig,
    /// Audio file processing parameters
    pub audio: AudioConfig,
}

impl NoiseUtilsConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.dataset.validate()?;
        config.audio.validate()?;
        Ok(config)
    }

    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }
}

/// Parameters for synthetic dataset generation
///
/// Ranges are inclusive `(low, high)` pairs for uniform draws.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// Seed for parameter draws; `None` seeds from the operating system
    pub seed: Option<u64>,
    /// Slope range for linear signals
    pub slope_range: (f32, f32),
    /// Intercept range for linear signals
    pub intercept_range: (f32, f32),
    /// Phase range for weakly nonlinear and nonlinear signals
    pub phase_range: (f32, f32),
    /// Frequency of nonlinear signals
    pub nonlinear_frequency: f32,
    /// Amplitude of nonlinear signals
    pub nonlinear_amplitude: f32,
    /// Fraction of a nonlinear signal's range passed on as its noise level
    pub nonlinear_delta_ratio: f32,
}

impl DatasetConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<()> {
        for (name, (low, high)) in [
            ("slope_range", self.slope_range),
            ("intercept_range", self.intercept_range),
            ("phase_range", self.phase_range),
        ] {
            if !low.is_finite() || !high.is_finite() || low > high {
                return Err(NoiseUtilsError::Config(format!(
                    "{} must be a finite (low, high) pair with low <= high, got ({}, {})",
                    name, low, high
                )));
            }
        }
        Ok(())
    }
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            seed: None,
            slope_range: (-5.0, 5.0),
            intercept_range: (-5.0, 5.0),
            phase_range: (0.0, 5.0),
            nonlinear_frequency: 1.0,
            nonlinear_amplitude: 5.0,
            nonlinear_delta_ratio: NONLINEAR_DELTA_RATIO,
        }
    }
}

/// How a directory of files with differing sample rates is handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SampleRatePolicy {
    /// Report the rate of the last file loaded
    #[default]
    LastWins,
    /// Fail as soon as a file disagrees with the first one
    RequireUniform,
}

/// Sample encoding used when writing WAV files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleEncoding {
    Int,
    Float,
}

/// WAV output format
///
/// # Parsing formats
/// - `f32` or `float32` - 32-bit IEEE float
/// - `i8`, `i16`, `i24`, `i32` or `pcm8` .. `pcm32` - integer PCM
///
/// # Example
/// ```
/// use noise_utils::config::{SampleEncoding, WavFormat};
///
/// let format: WavFormat = "pcm16".parse().unwrap();
/// assert_eq!(format.bits_per_sample, 16);
/// assert_eq!(format.encoding, SampleEncoding::Int);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct WavFormat {
    pub bits_per_sample: u16,
    pub encoding: SampleEncoding,
}

impl WavFormat {
    pub const FLOAT32: Self = Self {
        bits_per_sample: 32,
        encoding: SampleEncoding::Float,
    };

    pub const PCM16: Self = Self {
        bits_per_sample: 16,
        encoding: SampleEncoding::Int,
    };

    /// Check that the format can be written
    ///
    /// Struct literals bypass [`FromStr`], so writers call this before
    /// touching the output file.
    pub fn validate(&self) -> Result<()> {
        let supported = match self.encoding {
            SampleEncoding::Float => self.bits_per_sample == 32,
            SampleEncoding::Int => matches!(self.bits_per_sample, 8 | 16 | 24 | 32),
        };
        if !supported {
            return Err(NoiseUtilsError::Config(format!(
                "unsupported WAV format: {}",
                self
            )));
        }
        Ok(())
    }
}

impl Default for WavFormat {
    fn default() -> Self {
        Self::FLOAT32
    }
}

impl fmt::Display for WavFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.encoding {
            SampleEncoding::Float => write!(f, "f{}", self.bits_per_sample),
            SampleEncoding::Int => write!(f, "i{}", self.bits_per_sample),
        }
    }
}

impl FromStr for WavFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();

        if s == "f32" || s == "float32" {
            return Ok(Self::FLOAT32);
        }

        let bits = s
            .strip_prefix("pcm")
            .or_else(|| s.strip_prefix('i'))
            .ok_or_else(|| format!("invalid WAV format: {}", s))?;
        let bits_per_sample: u16 = bits
            .parse()
            .map_err(|_| format!("invalid WAV format: {}", s))?;

        match bits_per_sample {
            8 | 16 | 24 | 32 => Ok(Self {
                bits_per_sample,
                encoding: SampleEncoding::Int,
            }),
            _ => Err(format!("unsupported PCM bit depth: {}", bits_per_sample)),
        }
    }
}

impl TryFrom<String> for WavFormat {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

/// Audio file processing configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Noise level passed to the noise source for every file
    pub noise_level: f32,
    /// Window length used by `reshape_data`
    pub window_size: usize,
    /// Format of written WAV files
    pub output_format: WavFormat,
    /// Handling of directories whose files disagree on sample rate
    pub sample_rate_policy: SampleRatePolicy,
    /// Resample loaded files to this rate; `None` keeps each file's own rate
    pub load_sample_rate: Option<u32>,
}

impl AudioConfig {
    pub fn validate(&self) -> Result<()> {
        if self.window_size == 0 {
            return Err(NoiseUtilsError::Config(
                "window_size must be positive".to_string(),
            ));
        }
        if self.load_sample_rate == Some(0) {
            return Err(NoiseUtilsError::Config(
                "load_sample_rate must be positive".to_string(),
            ));
        }
        self.output_format.validate()
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            noise_level: DEFAULT_AUDIO_NOISE_LEVEL,
            window_size: DEFAULT_WINDOW_SIZE,
            output_format: WavFormat::default(),
            sample_rate_policy: SampleRatePolicy::default(),
            load_sample_rate: None,
        }
    }
}
