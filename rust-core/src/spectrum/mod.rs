//! Spectral tools for time-history processing

pub mod fft;
pub mod windowing;
pub mod welch;
pub mod convolution;

pub use fft::FftEngine;
pub use windowing::WindowType;
pub use welch::{averaged_psd, PsdEstimate, WelchConfig, WelchEstimator};
pub use convolution::FftConvolver;
