use ndarray::Array2;

use super::DataPreparator;
use crate::error::{NoiseUtilsError, Result};

/// Cut each item into non-overlapping windows of `window_size` samples
///
/// Windows start at offsets `0, w, 2w, ...` strictly below `len - w`, so the
/// trailing partial window is discarded and so is the last full window when
/// the length is an exact multiple of `w`. All windows are stacked into one
/// `(total_windows, window_size)` matrix.
pub fn reshape_data<T: AsRef<[f32]>>(data: &[T], window_size: usize) -> Result<Array2<f32>> {
    if window_size == 0 {
        return Err(NoiseUtilsError::Config(
            "window size must be positive".to_string(),
        ));
    }

    let mut flat = Vec::new();
    let mut rows = 0;

    for item in data {
        let item = item.as_ref();
        let end = item.len().saturating_sub(window_size);
        for offset in (0..end).step_by(window_size) {
            flat.extend_from_slice(&item[offset..offset + window_size]);
            rows += 1;
        }
    }

    log::debug!("Cut {} windows of {} samples", rows, window_size);
    Ok(Array2::from_shape_vec((rows, window_size), flat)?)
}

impl DataPreparator {
    /// [`reshape_data`] with the configured window size
    pub fn reshape_data<T: AsRef<[f32]>>(&self, data: &[T]) -> Result<Array2<f32>> {
        reshape_data(data, self.audio.window_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(n: usize) -> Vec<f32> {
        (0..n).map(|i| i as f32).collect()
    }

    #[test]
    fn test_partial_window_dropped() {
        let windows = reshape_data(&[ramp(2500)], 1000).unwrap();
        assert_eq!(windows.dim(), (2, 1000));
        assert_eq!(windows[[0, 0]], 0.0);
        assert_eq!(windows[[1, 0]], 1000.0);
        assert_eq!(windows[[1, 999]], 1999.0);
    }

    #[test]
    fn test_exact_multiple_drops_last_window() {
        let windows = reshape_data(&[ramp(2000)], 1000).unwrap();
        assert_eq!(windows.dim(), (1, 1000));

        let windows = reshape_data(&[ramp(1000)], 1000).unwrap();
        assert_eq!(windows.dim(), (0, 1000));
    }

    #[test]
    fn test_windows_from_all_items_are_concatenated() {
        let data = vec![ramp(35), ramp(5), ramp(21)];
        let windows = reshape_data(&data, 10).unwrap();

        // 35 -> offsets 0, 10, 20; 5 -> none; 21 -> offsets 0, 10
        assert_eq!(windows.dim(), (5, 10));
        assert_eq!(windows[[2, 0]], 20.0);
        assert_eq!(windows[[3, 0]], 0.0);
        assert_eq!(windows[[4, 9]], 19.0);
    }

    #[test]
    fn test_empty_input() {
        let data: Vec<Vec<f32>> = Vec::new();
        assert_eq!(reshape_data(&data, 100).unwrap().dim(), (0, 100));
    }

    #[test]
    fn test_zero_window_rejected() {
        assert!(matches!(
            reshape_data(&[ramp(10)], 0),
            Err(NoiseUtilsError::Config(_))
        ));
    }

    #[test]
    fn test_method_uses_configured_window() {
        let preparator = DataPreparator::default();
        let windows = preparator.reshape_data(&[ramp(3500)]).unwrap();
        assert_eq!(windows.dim(), (3, 1000));
    }
}
