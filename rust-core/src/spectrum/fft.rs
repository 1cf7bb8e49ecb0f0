//! FFT engine using realfft for real-valued segments

use crate::error::{FdsError, Result};
use num_complex::Complex;
use realfft::{RealFftPlanner, RealToComplex};
use std::sync::Arc;

/// Forward real FFT of fixed-length segments
///
/// Plans once; the input and spectrum buffers are reused across segments.
pub struct FftEngine {
    size: usize,
    forward: Arc<dyn RealToComplex<f64>>,
    segment: Vec<f64>,
    spectrum: Vec<Complex<f64>>,
}

impl FftEngine {
    /// # Arguments
    /// * `size` - Segment length in samples
    pub fn new(size: usize) -> Self {
        let forward = RealFftPlanner::<f64>::new().plan_fft_forward(size);
        Self {
            size,
            segment: forward.make_input_vec(),
            spectrum: forward.make_output_vec(),
            forward,
        }
    }

    /// Positive-frequency spectrum X[k], k = 0..=size/2
    ///
    /// Shorter segments are zero-padded, longer ones truncated.
    pub fn compute_spectrum(&mut self, segment: &[f64]) -> Result<&[Complex<f64>]> {
        let n = segment.len().min(self.size);
        self.segment[..n].copy_from_slice(&segment[..n]);
        self.segment[n..].fill(0.0);

        self.forward
            .process(&mut self.segment, &mut self.spectrum)
            .map_err(|e| FdsError::invalid(format!("real FFT of segment failed: {}", e)))?;

        Ok(&self.spectrum)
    }

    /// |X[k]|² of one segment
    pub fn compute_power(&mut self, segment: &[f64]) -> Result<Vec<f64>> {
        Ok(self
            .compute_spectrum(segment)?
            .iter()
            .map(|c| c.norm_sqr())
            .collect())
    }

    pub fn fft_size(&self) -> usize {
        self.size
    }

    /// One-sided bin count, size/2 + 1
    pub fn num_bins(&self) -> usize {
        self.size / 2 + 1
    }

    /// Bin centre frequencies [Hz]
    pub fn bin_frequencies(&self, fs: f64) -> Vec<f64> {
        let df = fs / self.size as f64;
        (0..self.num_bins()).map(|k| k as f64 * df).collect()
    }
}
