use thiserror::Error;

#[derive(Error, Debug)]
pub enum NoiseUtilsError {
    #[error("WAV codec error: {0}")]
    Wav(#[from] hound::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Array shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    #[error("Failed to create resampler: {0}")]
    ResamplerConstruction(#[from] rubato::ResamplerConstructionError),

    #[error("Resampling failed: {0}")]
    Resample(#[from] rubato::ResampleError),

    #[error("Invalid noise parameter: {0}")]
    NoiseParameter(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Mixed sample rates: {file} is {found} Hz, expected {expected} Hz")]
    MixedSampleRates {
        file: String,
        expected: u32,
        found: u32,
    },
}

pub type Result<T> = std::result::Result<T, NoiseUtilsError>;
