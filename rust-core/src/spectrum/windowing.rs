//! Window functions for segment-averaged spectral estimation
//!
//! Windows are generated in their periodic (DFT-even) form, the usual choice
//! for PSD estimation: `w[n]` uses `2πn/M` rather than `2πn/(M-1)`.

use std::f64::consts::PI;

/// Window function types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowType {
    /// w[n] = 0.5 - 0.5*cos(2πn/M)
    #[default]
    Hann,

    /// w[n] = 0.54 - 0.46*cos(2πn/M)
    Hamming,

    /// w[n] = 0.42 - 0.5*cos(2πn/M) + 0.08*cos(4πn/M)
    Blackman,

    /// No windowing
    Rectangular,
}

/// Generate periodic window coefficients w[n] for n = 0..length-1
pub fn generate_window(window_type: WindowType, length: usize) -> Vec<f64> {
    let m = length as f64;

    (0..length)
        .map(|n| {
            let angle = 2.0 * PI * n as f64 / m;
            match window_type {
                WindowType::Hann => 0.5 - 0.5 * angle.cos(),
                WindowType::Hamming => 0.54 - 0.46 * angle.cos(),
                WindowType::Blackman => 0.42 - 0.5 * angle.cos() + 0.08 * (2.0 * angle).cos(),
                WindowType::Rectangular => 1.0,
            }
        })
        .collect()
}

/// Multiply a segment by a window in place
pub fn apply_window_inplace(segment: &mut [f64], window: &[f64]) {
    for (s, w) in segment.iter_mut().zip(window.iter()) {
        *s *= w;
    }
}

/// Window power Σ w[n]², the PSD normalisation of a windowed segment
pub fn window_power(window: &[f64]) -> f64 {
    window.iter().map(|&w| w * w).sum()
}

/// Remove the mean of a segment in place
pub fn detrend_constant(segment: &mut [f64]) {
    if segment.is_empty() {
        return;
    }
    let mean = segment.iter().sum::<f64>() / segment.len() as f64;
    for s in segment.iter_mut() {
        *s -= mean;
    }
}
