//! Random excitation given as an acceleration time history
//!
//! Two methods:
//!
//! - `Convolution`: the history is convolved with the relative-displacement
//!   impulse response of every resonator. ERS is the peak of `ω0² z`; FDS
//!   sums the Basquin damage of the rainflow cycles of `z`.
//! - `PsdAveraging`: the history is reduced to a segment-averaged PSD and
//!   handed to the PSD evaluator with `T` = history length.

use super::random_psd::PsdLoad;
use super::{ResonatorBank, SpectrumEvaluator};
use crate::error::{require_positive, FdsError, Result};
use crate::fatigue::{extract_cycles, FatigueLaw};
use crate::sdof::transfer::displacement_impulse_response;
use crate::sdof::UnitScale;
use crate::spectrum::{averaged_psd, FftConvolver, WelchConfig};
use log::{debug, warn};
use rayon::prelude::*;
use std::f64::consts::PI;
use std::str::FromStr;

/// Time-domain evaluation method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeMethod {
    #[default]
    Convolution,
    PsdAveraging,
}

impl FromStr for TimeMethod {
    type Err = FdsError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "convolution" => Ok(TimeMethod::Convolution),
            "psd_averaging" => Ok(TimeMethod::PsdAveraging),
            other => Err(FdsError::invalid(format!(
                "Invalid method `{}`. Supported methods: `convolution` and `psd_averaging`.",
                other
            ))),
        }
    }
}

/// Acceleration time-history excitation
#[derive(Debug, Clone)]
pub struct TimeHistoryLoad {
    samples: Vec<f64>,
    dt: f64,
    method: TimeMethod,
    bins: Option<usize>,
    welch: WelchConfig,
    unit: UnitScale,
}

impl TimeHistoryLoad {
    /// # Arguments
    /// * `samples` - Acceleration samples, in `unit`
    /// * `dt` - Sampling interval [s]
    pub fn new(samples: Vec<f64>, dt: f64) -> Result<Self> {
        if samples.len() < 2 {
            return Err(FdsError::invalid("time history needs at least two samples"));
        }
        if samples.iter().any(|x| !x.is_finite()) {
            return Err(FdsError::invalid("time history contains non-finite samples"));
        }

        Ok(Self {
            samples,
            dt: require_positive("dt", dt)?,
            method: TimeMethod::default(),
            bins: None,
            welch: WelchConfig::default(),
            unit: UnitScale::default(),
        })
    }

    pub fn with_method(mut self, method: TimeMethod) -> Self {
        self.method = method;
        self
    }

    /// Number of blocks for the PSD-averaging method
    pub fn with_bins(mut self, bins: usize) -> Self {
        self.bins = Some(bins);
        self
    }

    pub fn with_welch_config(mut self, welch: WelchConfig) -> Self {
        self.welch = welch;
        self
    }

    pub fn with_unit(mut self, unit: UnitScale) -> Self {
        self.unit = unit;
        self
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn method(&self) -> TimeMethod {
        self.method
    }

    /// History length N·dt [s]
    pub fn duration(&self) -> f64 {
        self.samples.len() as f64 * self.dt
    }

    /// Equivalent PSD load for the PSD-averaging method
    pub fn to_psd_load(&self) -> Result<PsdLoad> {
        let bins = self
            .bins
            .ok_or_else(|| FdsError::missing("`bins` is required for the `psd_averaging` method"))?;

        let estimate = averaged_psd(&self.samples, self.dt, bins, self.welch.clone())?;
        Ok(PsdLoad::new(estimate.psd, estimate.frequencies, self.duration())?.with_unit(self.unit))
    }

    /// Map the relative displacement response (input units) of every
    /// resonator through `reduce`, in axis order
    fn map_responses<T, F>(&self, bank: &ResonatorBank, reduce: F) -> Result<Vec<T>>
    where
        T: Send,
        F: Fn(f64, &[f64]) -> T + Sync + Send,
    {
        let nyquist = 0.5 / self.dt;
        if let Some(&f_max) = bank.axis.values().last() {
            if f_max > nyquist {
                warn!(
                    "natural frequency {} Hz exceeds the Nyquist frequency {} Hz",
                    f_max, nyquist
                );
            }
        }

        let convolver = FftConvolver::new(&self.samples)?;
        debug!(
            "Convolution: {} samples, FFT size {}, {} resonators",
            convolver.signal_length(),
            convolver.fft_size(),
            bank.axis.len()
        );

        let zeta = bank.damping.ratio();
        let n = self.samples.len();

        bank.axis
            .values()
            .par_iter()
            .map(|&f0| {
                let kernel = displacement_impulse_response(f0, zeta, self.dt, n)?;
                let z: Vec<f64> = convolver
                    .convolve(&kernel)?
                    .into_iter()
                    .map(|v| v * self.dt)
                    .collect();
                Ok(reduce(f0, &z))
            })
            .collect()
    }

    fn psd_load_for(&self, bank: &ResonatorBank) -> Result<PsdLoad> {
        let load = self.to_psd_load()?;
        let df = load.frequencies()[1] - load.frequencies()[0];
        if let Some(&f0_min) = bank.axis.values().first() {
            let bandwidth = f0_min / bank.q();
            if df > bandwidth {
                warn!(
                    "PSD resolution {:.3} Hz is coarser than the narrowest resonance bandwidth {:.3} Hz; use fewer bins",
                    df, bandwidth
                );
            }
        }
        Ok(load)
    }
}

impl SpectrumEvaluator for TimeHistoryLoad {
    fn ers(&self, bank: &ResonatorBank) -> Result<Vec<f64>> {
        match self.method {
            TimeMethod::Convolution => self.map_responses(bank, |f0, z| {
                let omega0 = 2.0 * PI * f0;
                let peak = z.iter().fold(0.0_f64, |m, v| m.max(v.abs()));
                omega0 * omega0 * peak
            }),
            TimeMethod::PsdAveraging => self.psd_load_for(bank)?.ers(bank),
        }
    }

    fn fds(&self, bank: &ResonatorBank, law: &FatigueLaw) -> Result<Vec<f64>> {
        match self.method {
            TimeMethod::Convolution => {
                let scale = self.unit.scale();
                self.map_responses(bank, |_, z| {
                    extract_cycles(z)
                        .iter()
                        .map(|c| law.cycle_damage(scale * c.amplitude(), c.count))
                        .sum::<f64>()
                })
            }
            TimeMethod::PsdAveraging => self.psd_load_for(bank)?.fds(bank, law),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdof::{Damping, FrequencyAxis};
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    /// Gaussian white noise (Box-Muller) with unit variance
    fn white_noise(n: usize, seed: u64) -> Vec<f64> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..n)
            .map(|_| {
                let u1: f64 = rng.gen::<f64>().max(1e-300);
                let u2: f64 = rng.gen();
                (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
            })
            .collect()
    }

    #[test]
    fn test_method_parsing() {
        assert_eq!("convolution".parse::<TimeMethod>().unwrap(), TimeMethod::Convolution);
        assert_eq!("psd_averaging".parse::<TimeMethod>().unwrap(), TimeMethod::PsdAveraging);
        assert!(matches!("welch".parse::<TimeMethod>(), Err(FdsError::InvalidArgument(_))));
    }

    #[test]
    fn test_psd_averaging_requires_bins() {
        let axis = FrequencyAxis::from_range(20.0, 200.0, 5.0).unwrap();
        let bank = ResonatorBank::new(&axis, Damping::from_q(10.0).unwrap());
        let load = TimeHistoryLoad::new(white_noise(1000, 1), 1e-3)
            .unwrap()
            .with_method(TimeMethod::PsdAveraging);

        assert!(matches!(load.ers(&bank), Err(FdsError::MissingParameter(_))));
    }

    #[test]
    fn test_sine_steady_state_response() {
        // Long sine dwell at resonance: steady-state pseudo-acceleration is amp·Q
        let fs = 5000.0;
        let f = 50.0;
        let samples: Vec<f64> = (0..(fs as usize * 10))
            .map(|n| (2.0 * PI * f * n as f64 / fs).sin())
            .collect();
        let load = TimeHistoryLoad::new(samples, 1.0 / fs).unwrap();

        let axis = FrequencyAxis::from_values(vec![f]).unwrap();
        let bank = ResonatorBank::new(&axis, Damping::from_q(10.0).unwrap());
        let ers = load.ers(&bank).unwrap();

        assert_relative_eq!(ers[0], 10.0, max_relative = 0.03);
    }

    #[test]
    fn test_sine_dwell_damage_matches_closed_form() {
        use crate::excitation::SineLoad;

        let fs = 4000.0;
        let f = 40.0;
        let seconds = 30.0;
        let samples: Vec<f64> = (0..(fs * seconds) as usize)
            .map(|n| 2.0 * (2.0 * PI * f * n as f64 / fs).sin())
            .collect();
        let load = TimeHistoryLoad::new(samples, 1.0 / fs).unwrap();

        // Off resonance the transient dies out quickly
        let axis = FrequencyAxis::from_values(vec![80.0, 120.0]).unwrap();
        let bank = ResonatorBank::new(&axis, Damping::from_q(10.0).unwrap());
        let law = FatigueLaw::new(4.0, 1.0, 1.0).unwrap();

        let fds_time = load.fds(&bank, &law).unwrap();
        let fds_sine = SineLoad::new(f, 2.0)
            .unwrap()
            .with_duration(seconds)
            .unwrap()
            .fds(&bank, &law)
            .unwrap();

        for (t, s) in fds_time.iter().zip(fds_sine.iter()) {
            assert_relative_eq!(*t, *s, max_relative = 0.05);
        }
    }

    #[test]
    fn test_methods_are_consistent() {
        let fs = 2000.0;
        let samples = white_noise(120_000, 42);

        let axis = FrequencyAxis::from_range(50.0, 200.0, 50.0).unwrap();
        let bank = ResonatorBank::new(&axis, Damping::from_q(10.0).unwrap());
        let law = FatigueLaw::new(5.0, 1.0, 1.0).unwrap();

        let convolution = TimeHistoryLoad::new(samples.clone(), 1.0 / fs).unwrap();
        let averaging = TimeHistoryLoad::new(samples, 1.0 / fs)
            .unwrap()
            .with_method(TimeMethod::PsdAveraging)
            .with_bins(20);

        let ers_c = convolution.ers(&bank).unwrap();
        let ers_a = averaging.ers(&bank).unwrap();
        for (c, a) in ers_c.iter().zip(ers_a.iter()) {
            let ratio = c / a;
            assert!(ratio > 0.7 && ratio < 1.4, "ERS ratio {}", ratio);
        }

        let fds_c = convolution.fds(&bank, &law).unwrap();
        let fds_a = averaging.fds(&bank, &law).unwrap();
        for (c, a) in fds_c.iter().zip(fds_a.iter()) {
            assert!(*c > 0.0 && *a > 0.0);
            let ratio = c / a;
            assert!(ratio > 0.5 && ratio < 2.0, "FDS ratio {}", ratio);
        }
    }

    #[test]
    fn test_unit_invariance() {
        let samples = white_noise(20_000, 3);
        let scaled: Vec<f64> = samples.iter().map(|x| x * 9.81).collect();

        let axis = FrequencyAxis::from_range(20.0, 200.0, 20.0).unwrap();
        let bank = ResonatorBank::new(&axis, Damping::from_q(10.0).unwrap());
        let law = FatigueLaw::new(5.0, 1.0, 1.0).unwrap();

        let g = TimeHistoryLoad::new(samples, 1e-3).unwrap().with_unit(UnitScale::G);
        let ms2 = TimeHistoryLoad::new(scaled, 1e-3).unwrap();

        for (a, b) in g.ers(&bank).unwrap().iter().zip(ms2.ers(&bank).unwrap().iter()) {
            assert_relative_eq!(a * 9.81, *b, max_relative = 1e-8);
        }
        for (a, b) in g.fds(&bank, &law).unwrap().iter().zip(ms2.fds(&bank, &law).unwrap().iter()) {
            assert_relative_eq!(*a, *b, max_relative = 1e-7);
        }
    }
}
