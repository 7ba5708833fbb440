use crate::constants::PEAK_LIMIT;

/// Largest absolute sample value, 0 for an empty signal
pub fn peak_abs(signal: &[f32]) -> f32 {
    signal.iter().fold(0.0f32, |a, &b| a.max(b.abs()))
}

/// Rescale in place so the peak absolute value is at most 1.0
///
/// Signals already within [-1, 1] are left untouched. Returns the divisor
/// that was applied, if any.
pub fn peak_normalize(signal: &mut [f32]) -> Option<f32> {
    let peak = peak_abs(signal);
    if peak > PEAK_LIMIT {
        for sample in signal.iter_mut() {
            *sample /= peak;
        }
        Some(peak)
    } else {
        None
    }
}

/// `max - min` of a signal, 0 for an empty signal
pub fn signal_range(signal: &[f32]) -> f32 {
    if signal.is_empty() {
        return 0.0;
    }
    let (min, max) = signal
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &x| {
            (lo.min(x), hi.max(x))
        });
    max - min
}
