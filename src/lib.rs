//! Synthetic signal and noisy audio dataset generation for training and
//! evaluating noise-cancellation models.
//!
//! - [`synthesis`]: closed-form signal generators and noise sources
//! - [`dataset`]: batched dataset assembly, WAV batch noising, windowing
//! - [`wav`]: mono WAV load/save, with optional resampling on load

pub mod config;
pub mod constants;
pub mod dataset;
pub mod error;
pub mod signal_processing;
pub mod synthesis;
pub mod wav;

pub use config::NoiseUtilsConfig;
pub use dataset::{DataPreparator, Dataset, reshape_data};
pub use error::{NoiseUtilsError, Result};
pub use synthesis::{NoiseKind, NoiseSource, Noised, Noisemaker, SignalGenerator};
pub use wav::{Audio, load_wav, load_wav_at, save_wav};
