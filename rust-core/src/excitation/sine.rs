//! Constant-frequency sine excitation
//!
//! Both spectra are closed form:
//!
//! - ERS: `amp · H(f, f0)`
//! - FDS: `K^b/C · f0 · t · amp^b · ω0^(b(a-2)) · h^(ab+1) / ((1-h²)² + (h/Q)²)^(b/2)`
//!   with `h = f/f0`

use super::{ResonatorBank, SpectrumEvaluator};
use crate::error::{require_positive, FdsError, Result};
use crate::fatigue::FatigueLaw;
use crate::sdof::{dynamic_denominator, transfer_magnitude, ExcitationKind, UnitScale};
use log::debug;
use std::f64::consts::PI;

/// Sine excitation
#[derive(Debug, Clone, PartialEq)]
pub struct SineLoad {
    frequency: f64,
    amplitude: f64,
    kind: ExcitationKind,
    duration: Option<f64>,
    unit: UnitScale,
}

impl SineLoad {
    /// # Arguments
    /// * `frequency` - Sine frequency [Hz]
    /// * `amplitude` - Signal amplitude, in `unit`
    pub fn new(frequency: f64, amplitude: f64) -> Result<Self> {
        Ok(Self {
            frequency: require_positive("sine_freq", frequency)?,
            amplitude: require_positive("amp", amplitude)?,
            kind: ExcitationKind::default(),
            duration: None,
            unit: UnitScale::default(),
        })
    }

    /// Total excitation time [s], needed for FDS only
    pub fn with_duration(mut self, t_total: f64) -> Result<Self> {
        self.duration = Some(require_positive("t_total", t_total)?);
        Ok(self)
    }

    /// Fails for a non-acceleration kind when the unit is `g`
    pub fn with_kind(mut self, kind: ExcitationKind) -> Result<Self> {
        self.unit.check_kind(kind)?;
        self.kind = kind;
        Ok(self)
    }

    /// Fails for `g` when the kind is not acceleration
    pub fn with_unit(mut self, unit: UnitScale) -> Result<Self> {
        unit.check_kind(self.kind)?;
        self.unit = unit;
        Ok(self)
    }

    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }

    pub fn duration(&self) -> Option<f64> {
        self.duration
    }
}

impl SpectrumEvaluator for SineLoad {
    fn ers(&self, bank: &ResonatorBank) -> Result<Vec<f64>> {
        let q = bank.q();
        Ok(bank
            .axis
            .values()
            .iter()
            .map(|&f0| self.amplitude * transfer_magnitude(self.frequency, f0, q, self.kind))
            .collect())
    }

    fn fds(&self, bank: &ResonatorBank, law: &FatigueLaw) -> Result<Vec<f64>> {
        let t_total = self
            .duration
            .ok_or_else(|| FdsError::missing("`t_total` is required for sine FDS"))?;

        debug!(
            "Sine FDS: {} Hz, {} s, {} natural frequencies",
            self.frequency,
            t_total,
            bank.axis.len()
        );

        let q = bank.q();
        let a = self.kind.exponent() as f64;
        let b = law.b();
        let amp = self.amplitude * self.unit.scale();
        let scale = law.damage_coefficient() * t_total * amp.powf(b);

        Ok(bank
            .axis
            .values()
            .iter()
            .map(|&f0| {
                let omega0 = 2.0 * PI * f0;
                let h = self.frequency / f0;
                scale * f0 * omega0.powf(b * (a - 2.0)) * h.powf(a * b + 1.0)
                    / dynamic_denominator(h, q).powf(b / 2.0)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdof::{Damping, FrequencyAxis};
    use approx::assert_relative_eq;

    fn bank_axis() -> FrequencyAxis {
        FrequencyAxis::from_range(0.0, 2000.0, 5.0).unwrap()
    }

    #[test]
    fn test_ers_closed_form() {
        let axis = bank_axis();
        let bank = ResonatorBank::new(&axis, Damping::from_q(10.0).unwrap());
        let load = SineLoad::new(500.0, 10.0).unwrap();

        let ers = load.ers(&bank).unwrap();
        assert_eq!(ers.len(), 401);

        // Resonance at f0 = 500 Hz: amp · Q
        assert_relative_eq!(ers[100], 100.0, max_relative = 1e-12);
        // Far above: static gain -> amp
        assert_relative_eq!(ers[400], 10.0 / ((1.0 - 0.0625_f64).powi(2) + (0.25_f64 / 10.0).powi(2)).sqrt(), max_relative = 1e-12);
        assert!(ers.iter().all(|&v| v >= 0.0 && v.is_finite()));
    }

    #[test]
    fn test_fds_closed_form_at_resonance() {
        let axis = bank_axis();
        let q = 10.0;
        let bank = ResonatorBank::new(&axis, Damping::from_q(q).unwrap());
        let load = SineLoad::new(500.0, 10.0).unwrap().with_duration(3600.0).unwrap();
        let law = FatigueLaw::new(5.0, 1.0, 1.0).unwrap();

        let fds = load.fds(&bank, &law).unwrap();

        // h = 1: f0 · t · (amp · Q / ω0²)^b
        let omega0 = 2.0 * PI * 500.0;
        let expected = 500.0 * 3600.0 * (10.0 * q / (omega0 * omega0)).powi(5);
        assert_relative_eq!(fds[100], expected, max_relative = 1e-10);
        assert!(fds.iter().all(|&v| v >= 0.0 && v.is_finite()));

        // Damage peaks at resonance
        let peak = fds
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap())
            .map(|(i, _)| i)
            .unwrap();
        assert_eq!(peak, 100);
    }

    #[test]
    fn test_fds_unit_scaling() {
        let axis = FrequencyAxis::from_range(10.0, 100.0, 10.0).unwrap();
        let bank = ResonatorBank::new(&axis, Damping::from_ratio(0.05).unwrap());
        let law = FatigueLaw::new(6.0, 1.0, 1.0).unwrap();

        let in_g = SineLoad::new(40.0, 2.0).unwrap()
            .with_duration(60.0).unwrap()
            .with_unit(UnitScale::G).unwrap();
        let in_ms2 = SineLoad::new(40.0, 2.0 * 9.81).unwrap().with_duration(60.0).unwrap();

        let ers_g = in_g.ers(&bank).unwrap();
        let ers_ms2 = in_ms2.ers(&bank).unwrap();
        for (g, m) in ers_g.iter().zip(ers_ms2.iter()) {
            assert_relative_eq!(g * 9.81, *m, max_relative = 1e-12);
        }

        let fds_g = in_g.fds(&bank, &law).unwrap();
        let fds_ms2 = in_ms2.fds(&bank, &law).unwrap();
        for (g, m) in fds_g.iter().zip(fds_ms2.iter()) {
            assert_relative_eq!(*g, *m, max_relative = 1e-10);
        }
    }

    #[test]
    fn test_fds_requires_duration() {
        let axis = bank_axis();
        let bank = ResonatorBank::new(&axis, Damping::from_q(10.0).unwrap());
        let law = FatigueLaw::new(5.0, 1.0, 1.0).unwrap();
        let load = SineLoad::new(500.0, 10.0).unwrap();

        assert!(matches!(load.fds(&bank, &law), Err(FdsError::MissingParameter(_))));
        assert!(SineLoad::new(0.0, 10.0).is_err());
    }

    #[test]
    fn test_velocity_excitation_scaling() {
        let axis = FrequencyAxis::from_values(vec![50.0, 100.0]).unwrap();
        let bank = ResonatorBank::new(&axis, Damping::from_q(10.0).unwrap());
        let acc = SineLoad::new(80.0, 1.0).unwrap().ers(&bank).unwrap();
        let vel = SineLoad::new(80.0, 1.0).unwrap()
            .with_kind(ExcitationKind::Velocity)
            .unwrap()
            .ers(&bank)
            .unwrap();

        assert_relative_eq!(vel[0], acc[0] * 2.0 * PI * 50.0, max_relative = 1e-12);
        assert_relative_eq!(vel[1], acc[1] * 2.0 * PI * 100.0, max_relative = 1e-12);
    }

    #[test]
    fn test_all_kinds_non_negative() {
        let axis = FrequencyAxis::from_range(5.0, 2000.0, 5.0).unwrap();
        let bank = ResonatorBank::new(&axis, Damping::from_q(10.0).unwrap());
        let law = FatigueLaw::new(5.0, 1.0, 1.0).unwrap();

        for kind in [
            ExcitationKind::Acceleration,
            ExcitationKind::Velocity,
            ExcitationKind::Displacement,
        ] {
            let load = SineLoad::new(500.0, 10.0).unwrap()
                .with_duration(3600.0).unwrap()
                .with_kind(kind).unwrap();

            let ers = load.ers(&bank).unwrap();
            let fds = load.fds(&bank, &law).unwrap();
            assert!(ers.iter().all(|&v| v >= 0.0 && v.is_finite()), "{:?} ERS", kind);
            assert!(fds.iter().all(|&v| v >= 0.0 && v.is_finite()), "{:?} FDS", kind);
            assert!(fds[99] > 0.0);
        }
    }

    #[test]
    fn test_g_rejected_for_velocity_and_displacement() {
        let vel = SineLoad::new(80.0, 1.0).unwrap().with_kind(ExcitationKind::Velocity).unwrap();
        assert!(matches!(vel.with_unit(UnitScale::G), Err(FdsError::InvalidArgument(_))));

        let in_g = SineLoad::new(80.0, 1.0).unwrap().with_unit(UnitScale::G).unwrap();
        assert!(in_g.clone().with_kind(ExcitationKind::Displacement).is_err());
        assert!(in_g.with_kind(ExcitationKind::Acceleration).is_ok());
    }
}
