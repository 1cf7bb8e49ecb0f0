//! Stationary Gaussian random excitation given as an acceleration PSD
//!
//! Per natural frequency the response PSD `G(f)·H(f, f0)²` is integrated
//! (trapezoidal rule on the PSD grid) into spectral moments
//! `m0 = ∫ G H² df` and `m2 = ∫ f² G H² df`. The expected rate of positive
//! zero crossings is `ν0+ = sqrt(m2/m0)`.
//!
//! - ERS (Rayleigh extreme over T): `sqrt(m0) · sqrt(2 ln(ν0+ T))`
//! - FDS (narrow band): `K^b/C · ν0+ T · (√2 z_rms)^b · Γ(1 + b/2)`,
//!   `z_rms = sqrt(m0) / ω0²`

use super::{ResonatorBank, SpectrumEvaluator};
use crate::error::{require_positive, FdsError, Result};
use crate::fatigue::{gamma, trapezoid, FatigueLaw};
use crate::sdof::{transfer_magnitude, ExcitationKind, UnitScale};
use log::debug;
use rayon::prelude::*;
use std::f64::consts::PI;

/// Acceleration PSD excitation
#[derive(Debug, Clone, PartialEq)]
pub struct PsdLoad {
    psd: Vec<f64>,
    frequencies: Vec<f64>,
    duration: f64,
    unit: UnitScale,
}

/// Spectral moments of one resonator's pseudo-acceleration response
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResponseMoments {
    pub m0: f64,
    pub m2: f64,
}

impl ResponseMoments {
    /// Expected rate of positive zero crossings [Hz]
    pub fn crossing_rate(&self) -> f64 {
        if self.m0 > 0.0 {
            (self.m2 / self.m0).sqrt()
        } else {
            0.0
        }
    }
}

impl PsdLoad {
    /// # Arguments
    /// * `psd` - PSD ordinates, in `unit`²/Hz
    /// * `frequencies` - Strictly increasing frequencies [Hz], same length
    /// * `duration` - Exposure time T [s]
    pub fn new(psd: Vec<f64>, frequencies: Vec<f64>, duration: f64) -> Result<Self> {
        if psd.len() != frequencies.len() {
            return Err(FdsError::invalid(format!(
                "PSD has {} ordinates but {} frequencies",
                psd.len(),
                frequencies.len()
            )));
        }
        if psd.len() < 2 {
            return Err(FdsError::invalid("PSD needs at least two points"));
        }
        if frequencies.iter().any(|f| !f.is_finite() || *f < 0.0)
            || frequencies.windows(2).any(|w| w[1] <= w[0])
        {
            return Err(FdsError::invalid(
                "PSD frequencies must be non-negative and strictly increasing",
            ));
        }
        if psd.iter().any(|p| !p.is_finite() || *p < 0.0) {
            return Err(FdsError::invalid("PSD ordinates must be finite and non-negative"));
        }

        Ok(Self {
            psd,
            frequencies,
            duration: require_positive("T", duration)?,
            unit: UnitScale::default(),
        })
    }

    pub fn with_unit(mut self, unit: UnitScale) -> Self {
        self.unit = unit;
        self
    }

    pub fn psd(&self) -> &[f64] {
        &self.psd
    }

    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// RMS of the excitation, `sqrt(∫ G df)`, in input units
    pub fn rms(&self) -> f64 {
        trapezoid(&self.psd, &self.frequencies).sqrt()
    }

    /// Response moments of a resonator at f0 (unscaled input units)
    pub fn response_moments(&self, f0: f64, q: f64) -> ResponseMoments {
        let (g0, g2): (Vec<f64>, Vec<f64>) = self
            .psd
            .iter()
            .zip(self.frequencies.iter())
            .map(|(&g, &f)| {
                let h = transfer_magnitude(f, f0, q, ExcitationKind::Acceleration);
                let response = g * h * h;
                (response, f * f * response)
            })
            .unzip();

        ResponseMoments {
            m0: trapezoid(&g0, &self.frequencies),
            m2: trapezoid(&g2, &self.frequencies),
        }
    }

    fn moments(&self, bank: &ResonatorBank) -> Vec<ResponseMoments> {
        let q = bank.q();
        bank.axis
            .values()
            .par_iter()
            .map(|&f0| self.response_moments(f0, q))
            .collect()
    }
}

impl SpectrumEvaluator for PsdLoad {
    fn ers(&self, bank: &ResonatorBank) -> Result<Vec<f64>> {
        debug!(
            "Random PSD ERS: {} PSD points, T = {} s",
            self.psd.len(),
            self.duration
        );

        Ok(self
            .moments(bank)
            .into_iter()
            .map(|m| {
                let crossings = m.crossing_rate() * self.duration;
                let peak_factor = (2.0 * crossings.ln()).max(0.0).sqrt();
                m.m0.sqrt() * peak_factor
            })
            .collect())
    }

    fn fds(&self, bank: &ResonatorBank, law: &FatigueLaw) -> Result<Vec<f64>> {
        debug!(
            "Random PSD FDS: {} PSD points, T = {} s, b = {}",
            self.psd.len(),
            self.duration,
            law.b()
        );

        let b = law.b();
        let scale = self.unit.scale();
        let expectation = law.damage_coefficient() * gamma(1.0 + b / 2.0);

        Ok(self
            .moments(bank)
            .into_iter()
            .zip(bank.axis.values().iter())
            .map(|(m, &f0)| {
                let omega0 = 2.0 * PI * f0;
                let z_rms = scale * m.m0.sqrt() / (omega0 * omega0);
                expectation
                    * m.crossing_rate()
                    * self.duration
                    * (std::f64::consts::SQRT_2 * z_rms).powf(b)
            })
            .collect())
    }
}
