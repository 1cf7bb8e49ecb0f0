//! FFT-based linear convolution against a fixed excitation
//!
//! The excitation spectrum is computed once; every kernel convolved against
//! it then costs one forward and one inverse FFT. Complexity O(N log N)
//! instead of O(N*M) for time-domain convolution.

use crate::error::{FdsError, Result};
use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::sync::Arc;

/// Convolver holding the transformed excitation
///
/// `convolve` takes `&self`, so one convolver can be shared across worker
/// threads.
pub struct FftConvolver {
    /// Excitation in frequency domain
    signal_fft: Vec<Complex<f64>>,

    /// Excitation length in samples
    signal_length: usize,

    /// FFT size (power of 2, >= 2*N - 1)
    fft_size: usize,

    fft: Arc<dyn Fft<f64>>,
    ifft: Arc<dyn Fft<f64>>,
}

impl FftConvolver {
    /// Create a convolver for kernels up to `signal.len()` samples long
    pub fn new(signal: &[f64]) -> Result<Self> {
        if signal.is_empty() {
            return Err(FdsError::invalid("cannot convolve an empty time history"));
        }

        let signal_length = signal.len();
        let fft_size = (2 * signal_length - 1).next_power_of_two();

        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(fft_size);
        let ifft = planner.plan_fft_inverse(fft_size);

        let mut signal_fft = vec![Complex::new(0.0, 0.0); fft_size];
        for (slot, &x) in signal_fft.iter_mut().zip(signal) {
            *slot = Complex::new(x, 0.0);
        }
        fft.process(&mut signal_fft);

        Ok(Self {
            signal_fft,
            signal_length,
            fft_size,
            fft,
            ifft,
        })
    }

    /// First `signal.len()` samples of the linear convolution signal * kernel
    pub fn convolve(&self, kernel: &[f64]) -> Result<Vec<f64>> {
        if kernel.len() > self.signal_length {
            return Err(FdsError::invalid(format!(
                "kernel ({} samples) is longer than the excitation ({} samples)",
                kernel.len(),
                self.signal_length
            )));
        }

        let mut buffer = vec![Complex::new(0.0, 0.0); self.fft_size];
        for (slot, &h) in buffer.iter_mut().zip(kernel) {
            *slot = Complex::new(h, 0.0);
        }

        self.fft.process(&mut buffer);
        for (b, &x) in buffer.iter_mut().zip(self.signal_fft.iter()) {
            *b *= x;
        }
        self.ifft.process(&mut buffer);

        // IFFT normalization
        let scale = 1.0 / self.fft_size as f64;
        Ok(buffer[..self.signal_length]
            .iter()
            .map(|c| c.re * scale)
            .collect())
    }

    /// Get FFT size
    pub fn fft_size(&self) -> usize {
        self.fft_size
    }

    /// Get excitation length
    pub fn signal_length(&self) -> usize {
        self.signal_length
    }
}
