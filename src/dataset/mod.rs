//! Dataset assembly and noisy-audio batch processing.
//!
//! [`DataPreparator`] ties the signal generators and a [`NoiseSource`] together:
//! synthetic datasets come out as `(rows, length)` matrices of distorted and
//! clean signals, audio helpers load, distort and persist WAV files.
//!
//! [`NoiseSource`]: crate::synthesis::NoiseSource

mod audio;
mod preparator;
mod window;

pub use audio::{LoadedDirectory, NoisedAudios};
pub use preparator::{DataPreparator, Dataset};
pub use window::reshape_data;
