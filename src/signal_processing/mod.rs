pub mod math;
pub mod resample;

pub use math::{peak_abs, peak_normalize, signal_range};
pub use resample::resample;
