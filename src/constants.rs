//! Numeric constants shared by the generators and noise paths
//!
//! Defaults mirror the values the dataset tooling has always used, so
//! datasets generated with default configuration stay comparable.

/// Peak absolute value above which a noisy signal is rescaled.
pub const PEAK_LIMIT: f32 = 1.0;

/// Default standard deviation of additive Gaussian noise.
pub const DEFAULT_RANDOM_NOISE_LEVEL: f32 = 0.002;

/// Default scale applied to Perlin noise samples.
pub const DEFAULT_PERLIN_NOISE_LEVEL: f32 = 3.0;

/// Default noise level applied to audio files.
pub const DEFAULT_AUDIO_NOISE_LEVEL: f32 = 0.2;

/// Default window length used when cutting audio into training rows.
pub const DEFAULT_WINDOW_SIZE: usize = 1000;

/// Fraction of a nonlinear signal's range used as its noise level.
pub const NONLINEAR_DELTA_RATIO: f32 = 0.3;

/// Input block length fed to the sinc resampler.
pub const RESAMPLE_CHUNK_SIZE: usize = 1024;
