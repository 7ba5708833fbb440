use std::f32::consts::PI;

/// Parameters of a weakly nonlinear signal
///
/// `amplitude * (sin(t + phase) + nonlinearity * sin(2t + 2 * phase))`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeaklyNonlinearParams {
    pub frequency: f32,
    pub amplitude: f32,
    pub phase: f32,
    pub nonlinearity: f32,
}

impl WeaklyNonlinearParams {
    /// Unit-amplitude variant, used for signals that should stay within [-1.1, 1.1]
    pub fn unit_amplitude() -> Self {
        Self {
            amplitude: 1.0,
            ..Self::default()
        }
    }

    pub fn with_phase(mut self, phase: f32) -> Self {
        self.phase = phase;
        self
    }
}

impl Default for WeaklyNonlinearParams {
    fn default() -> Self {
        Self {
            frequency: 1.0,
            amplitude: 5.0,
            phase: 0.0,
            nonlinearity: 0.1,
        }
    }
}

/// Parameters of a nonlinear signal, `amplitude * sin(t + phase)^2`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NonlinearParams {
    pub frequency: f32,
    pub amplitude: f32,
    pub phase: f32,
}

impl NonlinearParams {
    pub fn with_phase(mut self, phase: f32) -> Self {
        self.phase = phase;
        self
    }
}

impl Default for NonlinearParams {
    fn default() -> Self {
        Self {
            frequency: 1.0,
            amplitude: 5.0,
            phase: 0.0,
        }
    }
}

/// Closed-form generators for the three synthetic signal families
#[derive(Debug, Clone, Copy, Default)]
pub struct SignalGenerator;

impl SignalGenerator {
    pub fn new() -> Self {
        Self
    }

    /// `slope * i + intercept` for `i` in `0..length`
    pub fn linear(&self, length: usize, slope: f32, intercept: f32) -> Vec<f32> {
        (0..length).map(|i| slope * i as f32 + intercept).collect()
    }

    pub fn weakly_nonlinear(&self, length: usize, params: &WeaklyNonlinearParams) -> Vec<f32> {
        let WeaklyNonlinearParams {
            frequency,
            amplitude,
            phase,
            nonlinearity,
        } = *params;

        linspace(0.0, 2.0 * PI * frequency, length)
            .map(|t| {
                let harmonic = (2.0 * t + 2.0 * phase).sin();
                amplitude * ((t + phase).sin() + nonlinearity * harmonic)
            })
            .collect()
    }

    pub fn nonlinear(&self, length: usize, params: &NonlinearParams) -> Vec<f32> {
        let NonlinearParams {
            frequency,
            amplitude,
            phase,
        } = *params;

        linspace(0.0, 2.0 * PI * frequency, length)
            .map(|t| amplitude * (t + phase).sin().powi(2))
            .collect()
    }
}

/// `count` evenly spaced points over `[start, stop]`, both ends included
///
/// A single point is `start`.
fn linspace(start: f32, stop: f32, count: usize) -> impl Iterator<Item = f32> {
    let step = if count > 1 {
        (stop - start) / (count - 1) as f32
    } else {
        0.0
    };
    (0..count).map(move |i| {
        if count > 1 && i == count - 1 {
            stop
        } else {
            start + step * i as f32
        }
    })
}
