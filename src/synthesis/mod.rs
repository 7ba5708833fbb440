mod noise;
mod perlin;
mod signal;

pub use noise::{NoiseConfig, NoiseKind, NoiseSource, Noised, Noisemaker};
pub(crate) use noise::create_rng;
pub use perlin::PerlinField;
pub use signal::{NonlinearParams, SignalGenerator, WeaklyNonlinearParams};
