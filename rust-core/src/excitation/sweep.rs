//! Swept-sine excitation with piecewise-constant amplitude
//!
//! The sweep is a sequence of segments `[f1, f2]`, each at a constant
//! amplitude. The ERS takes, per natural frequency, the worst segment
//! response. The FDS integrates the damage rate over the time each segment
//! spends near resonance.
//!
//! With `h = f/f0`, the damage of one segment is
//!
//! `D = ∫ K^b/C · f0 h · amp^b · ω0^(b(a-2)) · h^(ab) / ((1-h²)² + (h/Q)²)^(b/2) · M(h) dh`
//!
//! where `M(h) = dt/dh` is the time density of the sweep:
//!
//! - linear (Hz/min): `M(h) = f0 · tb / (f2 - f1)`
//! - logarithmic (oct/min): `M(h) = tb / (h · ln(f2/f1))`

use super::{ResonatorBank, SpectrumEvaluator};
use crate::error::{require_positive, FdsError, Result};
use crate::fatigue::{trapezoid, FatigueLaw};
use crate::sdof::{dynamic_denominator, ExcitationKind, UnitScale};
use log::debug;
use rayon::prelude::*;
use std::f64::consts::PI;
use std::str::FromStr;

/// Default upper bound on the time step of the damage integration grid [s]
pub const DEFAULT_SWEEP_DT: f64 = 1.0;

/// Frequency progression of the sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepType {
    /// Constant rate in Hz/min
    Linear,

    /// Constant rate in octaves/min
    Logarithmic,
}

impl FromStr for SweepType {
    type Err = FdsError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "lin" | "linear" => Ok(SweepType::Linear),
            "log" | "logarithmic" => Ok(SweepType::Logarithmic),
            other => Err(FdsError::invalid(format!(
                "Invalid sweep type `{}`. Supported types: `linear` (`lin`) and `logarithmic` (`log`).",
                other
            ))),
        }
    }
}

/// Constant-amplitude portion of the sweep
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepSegment {
    pub amplitude: f64,
    pub f1: f64,
    pub f2: f64,
}

impl SweepSegment {
    /// Time spent sweeping from f1 to f2 [s]
    pub fn sweep_time(&self, sweep_type: SweepType, sweep_rate: f64) -> f64 {
        match sweep_type {
            SweepType::Linear => (self.f2 - self.f1) / sweep_rate * 60.0,
            SweepType::Logarithmic => (self.f2 / self.f1).log2() / sweep_rate * 60.0,
        }
    }

    /// Excitation frequency after `t` seconds of a sweep lasting `tb`
    fn frequency_at(&self, sweep_type: SweepType, t: f64, tb: f64) -> f64 {
        match sweep_type {
            SweepType::Linear => self.f1 + (self.f2 - self.f1) * t / tb,
            SweepType::Logarithmic => self.f1 * (self.f2 / self.f1).powf(t / tb),
        }
    }

    /// Peak response of a resonator at f0 during this segment
    ///
    /// Below the band the lower edge dominates, above it the upper edge;
    /// inside the band the resonator is driven at resonance.
    pub fn peak_response(&self, f0: f64, q: f64, kind: ExcitationKind) -> f64 {
        let omega0_a = (2.0 * PI * f0).powi(kind.exponent());
        if f0 <= self.f1 {
            self.amplitude * omega0_a / dynamic_denominator(self.f1 / f0, q).sqrt()
        } else if f0 >= self.f2 {
            self.amplitude * omega0_a / dynamic_denominator(self.f2 / f0, q).sqrt()
        } else {
            self.amplitude * omega0_a * q
        }
    }
}

/// Swept-sine excitation
#[derive(Debug, Clone, PartialEq)]
pub struct SweepLoad {
    amplitudes: Vec<f64>,
    breakpoints: Vec<f64>,
    kind: ExcitationKind,
    sweep_type: Option<SweepType>,
    sweep_rate: Option<f64>,
    dt: f64,
    unit: UnitScale,
}

impl SweepLoad {
    /// # Arguments
    /// * `amplitudes` - N constant amplitudes, in `unit`
    /// * `breakpoints` - N + 1 strictly increasing band edges [Hz]
    pub fn new(amplitudes: Vec<f64>, breakpoints: Vec<f64>) -> Result<Self> {
        if amplitudes.is_empty() {
            return Err(FdsError::invalid("sweep needs at least one amplitude segment"));
        }
        if breakpoints.len() != amplitudes.len() + 1 {
            return Err(FdsError::invalid(format!(
                "sweep with {} amplitudes needs {} band edges (got {})",
                amplitudes.len(),
                amplitudes.len() + 1,
                breakpoints.len()
            )));
        }
        if breakpoints.iter().any(|f| !f.is_finite() || *f <= 0.0) {
            return Err(FdsError::invalid("sweep band edges must be finite and positive"));
        }
        if breakpoints.windows(2).any(|w| w[1] <= w[0]) {
            return Err(FdsError::invalid("sweep band edges must be strictly increasing"));
        }
        if amplitudes.iter().any(|a| !a.is_finite() || *a < 0.0) {
            return Err(FdsError::invalid("sweep amplitudes must be finite and non-negative"));
        }

        Ok(Self {
            amplitudes,
            breakpoints,
            kind: ExcitationKind::default(),
            sweep_type: None,
            sweep_rate: None,
            dt: DEFAULT_SWEEP_DT,
            unit: UnitScale::default(),
        })
    }

    /// Sweep progression and rate (Hz/min for linear, oct/min for logarithmic)
    pub fn with_sweep(mut self, sweep_type: SweepType, sweep_rate: f64) -> Result<Self> {
        self.sweep_type = Some(sweep_type);
        self.sweep_rate = Some(require_positive("sweep_rate", sweep_rate)?);
        Ok(self)
    }

    /// Upper bound on the time step of the damage integration grid [s]
    pub fn with_dt(mut self, dt: f64) -> Result<Self> {
        self.dt = require_positive("dt", dt)?;
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

    pub fn segments(&self) -> impl Iterator<Item = SweepSegment> + '_ {
        self.amplitudes
            .iter()
            .zip(self.breakpoints.windows(2))
            .map(|(&amplitude, edges)| SweepSegment {
                amplitude,
                f1: edges[0],
                f2: edges[1],
            })
    }

    /// Total sweep duration [s]
    pub fn total_time(&self) -> Result<f64> {
        let (sweep_type, rate) = self.sweep_parameters()?;
        Ok(self.segments().map(|s| s.sweep_time(sweep_type, rate)).sum())
    }

    fn sweep_parameters(&self) -> Result<(SweepType, f64)> {
        let sweep_type = self
            .sweep_type
            .ok_or_else(|| FdsError::missing("`sweep_type` is required for sine sweep FDS"))?;
        let rate = self
            .sweep_rate
            .ok_or_else(|| FdsError::missing("`sweep_rate` is required for sine sweep FDS"))?;
        Ok((sweep_type, rate))
    }

    /// Damage accumulated by a resonator at f0 over one segment
    fn segment_damage(
        &self,
        grid: &SegmentGrid,
        f0: f64,
        q: f64,
        law: &FatigueLaw,
    ) -> f64 {
        let a = self.kind.exponent() as f64;
        let b = law.b();
        let omega0 = 2.0 * PI * f0;
        let amp = grid.segment.amplitude * self.unit.scale();
        let scale = law.damage_coefficient() * f0 * amp.powf(b) * omega0.powf(b * (a - 2.0));

        let h: Vec<f64> = grid.frequencies.iter().map(|&f| f / f0).collect();
        let integrand: Vec<f64> = h
            .iter()
            .map(|&h| {
                let density = match grid.sweep_type {
                    SweepType::Linear => f0 * grid.tb / (grid.segment.f2 - grid.segment.f1),
                    SweepType::Logarithmic => grid.tb / (h * grid.log_ratio),
                };
                h.powf(a * b + 1.0) / dynamic_denominator(h, q).powf(b / 2.0) * density
            })
            .collect();

        scale * trapezoid(&integrand, &h)
    }
}

/// Grid points per half-power bandwidth `f0/Q` of any resonance in the band
const POINTS_PER_BANDWIDTH: f64 = 20.0;

/// Excitation frequencies of one segment
///
/// Union of the sweep sampled every `dt` seconds and a geometric grid with
/// `Δf/f <= 1/(20 Q)`, so fast sweeps still resolve every resonance peak.
struct SegmentGrid {
    segment: SweepSegment,
    sweep_type: SweepType,
    tb: f64,
    log_ratio: f64,
    frequencies: Vec<f64>,
}

impl SegmentGrid {
    fn new(segment: SweepSegment, sweep_type: SweepType, rate: f64, dt: f64, q: f64) -> Self {
        let tb = segment.sweep_time(sweep_type, rate);
        let log_ratio = (segment.f2 / segment.f1).ln();

        let time_steps = (tb / dt).ceil().max(1.0) as usize;
        let log_steps = (log_ratio * POINTS_PER_BANDWIDTH * q).ceil().max(1.0) as usize;

        let mut frequencies: Vec<f64> = (0..=time_steps)
            .map(|k| segment.frequency_at(sweep_type, (k as f64 * dt).min(tb), tb))
            .chain((0..=log_steps).map(|k| {
                segment.f1 * (log_ratio * k as f64 / log_steps as f64).exp()
            }))
            .map(|f| f.clamp(segment.f1, segment.f2))
            .collect();
        frequencies.sort_by(f64::total_cmp);
        frequencies.dedup_by(|a, b| (*a - *b).abs() <= 1e-12 * *b);

        Self {
            segment,
            sweep_type,
            tb,
            log_ratio,
            frequencies,
        }
    }
}

impl SpectrumEvaluator for SweepLoad {
    fn ers(&self, bank: &ResonatorBank) -> Result<Vec<f64>> {
        let q = bank.q();
        Ok(bank
            .axis
            .values()
            .iter()
            .map(|&f0| {
                self.segments()
                    .map(|seg| seg.peak_response(f0, q, self.kind))
                    .fold(0.0, f64::max)
            })
            .collect())
    }

    fn fds(&self, bank: &ResonatorBank, law: &FatigueLaw) -> Result<Vec<f64>> {
        let (sweep_type, rate) = self.sweep_parameters()?;
        let q = bank.q();
        let grids: Vec<SegmentGrid> = self
            .segments()
            .map(|seg| SegmentGrid::new(seg, sweep_type, rate, self.dt, q))
            .collect();

        debug!(
            "Sweep FDS: {} segments, {:?} at {} per min, total {:.1} s, {} grid points",
            grids.len(),
            sweep_type,
            rate,
            grids.iter().map(|g| g.tb).sum::<f64>(),
            grids.iter().map(|g| g.frequencies.len()).sum::<usize>()
        );

        Ok(bank
            .axis
            .values()
            .par_iter()
            .map(|&f0| {
                grids
                    .iter()
                    .map(|grid| self.segment_damage(grid, f0, q, law))
                    .sum::<f64>()
            })
            .collect())
    }
}
