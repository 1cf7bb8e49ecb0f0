//! Segment-averaged (Welch) power spectral density estimation
//!
//! Turns a time history into a one-sided PSD by averaging windowed
//! periodograms of equal-length blocks.

use super::fft::FftEngine;
use super::windowing::{apply_window_inplace, detrend_constant, generate_window, window_power, WindowType};
use crate::error::{require_positive, FdsError, Result};
use log::debug;
use ndarray::{Array2, Axis};

/// Welch estimator configuration
#[derive(Debug, Clone)]
pub struct WelchConfig {
    /// Window applied to every block
    pub window: WindowType,

    /// Fractional overlap of consecutive blocks, in [0, 1)
    pub overlap: f64,

    /// Remove the block mean before windowing
    pub detrend: bool,
}

impl Default for WelchConfig {
    fn default() -> Self {
        Self {
            window: WindowType::Hann,
            overlap: 0.5,
            detrend: true,
        }
    }
}

/// One-sided PSD on a uniform frequency grid
#[derive(Debug, Clone, PartialEq)]
pub struct PsdEstimate {
    /// Frequencies [Hz], starting at 0
    pub frequencies: Vec<f64>,

    /// PSD ordinates [unit²/Hz]
    pub psd: Vec<f64>,

    /// Number of blocks averaged
    pub segments: usize,
}

/// Welch PSD estimator for a fixed block length
pub struct WelchEstimator {
    config: WelchConfig,
    segment_length: usize,
    fft_engine: FftEngine,
    window: Vec<f64>,
    window_power: f64,
}

impl WelchEstimator {
    /// Create a new estimator
    ///
    /// # Arguments
    /// * `config` - Window, overlap and detrending options
    /// * `segment_length` - Block length in samples (at least 2)
    pub fn new(config: WelchConfig, segment_length: usize) -> Result<Self> {
        if segment_length < 2 {
            return Err(FdsError::invalid(format!(
                "PSD averaging block must hold at least 2 samples (got {})",
                segment_length
            )));
        }
        if !(0.0..1.0).contains(&config.overlap) {
            return Err(FdsError::invalid(format!(
                "block overlap must be in [0, 1) (got {})",
                config.overlap
            )));
        }

        let window = generate_window(config.window, segment_length);
        let window_power = window_power(&window);

        Ok(Self {
            config,
            segment_length,
            fft_engine: FftEngine::new(segment_length),
            window,
            window_power,
        })
    }

    /// Block start positions covering `signal_length` samples
    fn segment_starts(&self, signal_length: usize) -> Vec<usize> {
        let overlap = (self.config.overlap * self.segment_length as f64).round() as usize;
        let step = (self.segment_length - overlap).max(1);

        (0..)
            .map(|i| i * step)
            .take_while(|&start| start + self.segment_length <= signal_length)
            .collect()
    }

    /// Estimate the one-sided PSD of `signal` sampled every `dt` seconds
    pub fn estimate(&mut self, signal: &[f64], dt: f64) -> Result<PsdEstimate> {
        let dt = require_positive("dt", dt)?;
        let fs = 1.0 / dt;

        let starts = self.segment_starts(signal.len());
        if starts.is_empty() {
            return Err(FdsError::invalid(format!(
                "time history ({} samples) is shorter than one block ({} samples)",
                signal.len(),
                self.segment_length
            )));
        }

        let num_bins = self.fft_engine.num_bins();
        let mut periodograms = Array2::<f64>::zeros((starts.len(), num_bins));
        let mut segment = vec![0.0; self.segment_length];

        for (row, &start) in starts.iter().enumerate() {
            segment.copy_from_slice(&signal[start..start + self.segment_length]);
            if self.config.detrend {
                detrend_constant(&mut segment);
            }
            apply_window_inplace(&mut segment, &self.window);

            let power = self.fft_engine.compute_power(&segment)?;
            for (cell, p) in periodograms.row_mut(row).iter_mut().zip(power) {
                *cell = p;
            }
        }

        let mut psd = periodograms
            .mean_axis(Axis(0))
            .ok_or_else(|| FdsError::invalid("no PSD blocks to average"))?
            .to_vec();

        // Density scaling, then fold negative frequencies onto positive ones
        let scale = 1.0 / (fs * self.window_power);
        let nyquist_bin = if self.segment_length % 2 == 0 {
            Some(num_bins - 1)
        } else {
            None
        };
        for (k, p) in psd.iter_mut().enumerate() {
            *p *= scale;
            if k != 0 && Some(k) != nyquist_bin {
                *p *= 2.0;
            }
        }

        debug!(
            "Welch PSD: {} blocks of {} samples, df = {:.4} Hz",
            starts.len(),
            self.segment_length,
            fs / self.segment_length as f64
        );

        Ok(PsdEstimate {
            frequencies: self.fft_engine.bin_frequencies(fs),
            psd,
            segments: starts.len(),
        })
    }
}

/// Average the PSD over `bins` equal blocks of the time history
///
/// With a non-zero overlap, additional shifted blocks are placed between the
/// `bins` contiguous ones.
pub fn averaged_psd(
    signal: &[f64],
    dt: f64,
    bins: usize,
    config: WelchConfig,
) -> Result<PsdEstimate> {
    if bins == 0 {
        return Err(FdsError::invalid("`bins` must be at least 1"));
    }
    let segment_length = signal.len() / bins;
    WelchEstimator::new(config, segment_length)?.estimate(signal, dt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fatigue::trapezoid;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::f64::consts::PI;

    #[test]
    fn test_sine_power_is_preserved() {
        // Area under the PSD equals the signal variance (A²/2)
        let fs = 1024.0;
        let amp = 3.0;
        let signal: Vec<f64> = (0..16384)
            .map(|n| amp * (2.0 * PI * 64.0 * n as f64 / fs).sin())
            .collect();

        let est = averaged_psd(&signal, 1.0 / fs, 8, WelchConfig::default()).unwrap();
        let area = trapezoid(&est.psd, &est.frequencies);

        assert_relative_eq!(area, amp * amp / 2.0, max_relative = 0.02);
        assert_eq!(est.segments, 15);
    }

    #[test]
    fn test_white_noise_level() {
        // Uniform noise on [-0.5, 0.5): σ² = 1/12, one-sided PSD = 2σ²/fs
        let fs = 500.0;
        let mut rng = StdRng::seed_from_u64(7);
        let signal: Vec<f64> = (0..200_000).map(|_| rng.gen::<f64>() - 0.5).collect();

        let est = averaged_psd(&signal, 1.0 / fs, 50, WelchConfig::default()).unwrap();
        let expected = 2.0 * (1.0 / 12.0) / fs;
        let mid = &est.psd[10..est.psd.len() - 10];
        let mean = mid.iter().sum::<f64>() / mid.len() as f64;

        assert_relative_eq!(mean, expected, max_relative = 0.03);
    }

    #[test]
    fn test_contiguous_blocks() {
        let config = WelchConfig {
            window: WindowType::Rectangular,
            overlap: 0.0,
            detrend: false,
        };
        let signal = vec![1.0; 100];
        let est = averaged_psd(&signal, 0.01, 4, config).unwrap();

        assert_eq!(est.segments, 4);
        assert_eq!(est.frequencies.len(), 13);
        assert_relative_eq!(est.frequencies[1], 4.0);
        // Constant signal: everything in the DC bin
        assert!(est.psd[1..].iter().all(|&p| p.abs() < 1e-20));
    }

    #[test]
    fn test_invalid_configuration() {
        let signal = vec![0.0; 10];
        assert!(averaged_psd(&signal, 0.1, 0, WelchConfig::default()).is_err());
        assert!(averaged_psd(&signal, 0.1, 10, WelchConfig::default()).is_err());
        assert!(averaged_psd(&signal, -0.1, 2, WelchConfig::default()).is_err());

        let config = WelchConfig {
            overlap: 1.0,
            ..WelchConfig::default()
        };
        assert!(WelchEstimator::new(config, 8).is_err());
    }
}
