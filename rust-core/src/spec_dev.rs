//! Specification development: ERS/FDS of a configured excitation
//!
//! `SpecificationDevelopment` holds the resonator bank (natural frequencies
//! and damping), the current excitation and the fatigue law, and dispatches
//! `get_ers`/`get_fds` to the matching evaluator. Every call recomputes the
//! spectrum from scratch.

use crate::error::{FdsError, Result};
use crate::excitation::{
    Excitation, PsdLoad, ResonatorBank, SineLoad, SpectrumEvaluator, SweepLoad, TimeHistoryLoad,
};
use crate::fatigue::FatigueLaw;
use crate::sdof::{Damping, FrequencyAxis};
use log::debug;

/// Spectrum values aligned 1:1 with the natural frequency axis
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSpectrum {
    frequencies: Vec<f64>,
    values: Vec<f64>,
}

impl ResultSpectrum {
    fn new(axis: &FrequencyAxis, values: Vec<f64>) -> Self {
        Self {
            frequencies: axis.values().to_vec(),
            values,
        }
    }

    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// (natural frequency, value) pairs
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.frequencies
            .iter()
            .copied()
            .zip(self.values.iter().copied())
    }

    /// Largest value and the natural frequency where it occurs
    pub fn peak(&self) -> Option<(f64, f64)> {
        self.iter()
            .fold(None, |best: Option<(f64, f64)>, (f, v)| match best {
                Some((_, bv)) if bv >= v => best,
                _ => Some((f, v)),
            })
    }
}

/// Complete, immutable description of one analysis
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub axis: FrequencyAxis,
    pub damping: Damping,
    pub excitation: Excitation,
}

impl AnalysisConfig {
    pub fn new(axis: FrequencyAxis, damping: Damping, excitation: impl Into<Excitation>) -> Self {
        Self {
            axis,
            damping,
            excitation: excitation.into(),
        }
    }
}

fn evaluate_ers(
    axis: &FrequencyAxis,
    damping: Damping,
    excitation: &Excitation,
) -> Result<ResultSpectrum> {
    debug!(
        "ERS of {} excitation over {} natural frequencies (Q = {})",
        excitation.name(),
        axis.len(),
        damping.q()
    );
    let values = excitation.ers(&ResonatorBank::new(axis, damping))?;
    Ok(ResultSpectrum::new(axis, values))
}

fn evaluate_fds(
    axis: &FrequencyAxis,
    damping: Damping,
    excitation: &Excitation,
    law: &FatigueLaw,
) -> Result<ResultSpectrum> {
    debug!(
        "FDS of {} excitation over {} natural frequencies (Q = {}, b = {}, C = {}, K = {})",
        excitation.name(),
        axis.len(),
        damping.q(),
        law.b(),
        law.c(),
        law.k()
    );
    let values = excitation.fds(&ResonatorBank::new(axis, damping), law)?;
    Ok(ResultSpectrum::new(axis, values))
}

/// Extreme response spectrum of a configured excitation
pub fn compute_ers(config: &AnalysisConfig) -> Result<ResultSpectrum> {
    evaluate_ers(&config.axis, config.damping, &config.excitation)
}

/// Fatigue damage spectrum of a configured excitation
pub fn compute_fds(config: &AnalysisConfig, law: &FatigueLaw) -> Result<ResultSpectrum> {
    evaluate_fds(&config.axis, config.damping, &config.excitation, law)
}

/// Stateful front end over `compute_ers`/`compute_fds`
///
/// Setting a load replaces the previous one entirely, so no parameter of an
/// earlier excitation can leak into a later computation.
#[derive(Debug, Clone)]
pub struct SpecificationDevelopment {
    axis: FrequencyAxis,
    damping: Damping,
    excitation: Option<Excitation>,
    fatigue_law: Option<FatigueLaw>,
    ers: Option<ResultSpectrum>,
    fds: Option<ResultSpectrum>,
}

impl SpecificationDevelopment {
    pub fn new(axis: FrequencyAxis, damping: Damping) -> Self {
        Self {
            axis,
            damping,
            excitation: None,
            fatigue_law: None,
            ers: None,
            fds: None,
        }
    }

    /// Set Basquin constants used by `get_fds`
    pub fn with_fatigue_law(mut self, law: FatigueLaw) -> Self {
        self.fatigue_law = Some(law);
        self
    }

    pub fn set_fatigue_law(&mut self, law: FatigueLaw) {
        self.fatigue_law = Some(law);
    }

    /// Replace the excitation with any supported load
    pub fn set_load(&mut self, load: impl Into<Excitation>) {
        let excitation = load.into();
        debug!("Signal type set to `{}`", excitation.name());
        self.excitation = Some(excitation);
        self.ers = None;
        self.fds = None;
    }

    /// Constant-frequency sine (amplitude, frequency, optional duration)
    pub fn set_sine_load(&mut self, load: SineLoad) {
        self.set_load(load);
    }

    /// Piecewise-constant amplitude sine sweep
    pub fn set_sine_sweep_load(&mut self, load: SweepLoad) {
        self.set_load(load);
    }

    /// Random excitation given as a PSD
    pub fn set_random_psd_load(&mut self, load: PsdLoad) {
        self.set_load(load);
    }

    /// Random excitation given as a time history
    pub fn set_random_time_load(&mut self, load: TimeHistoryLoad) {
        self.set_load(load);
    }

    /// Compute, store and return the ERS of the current excitation
    pub fn get_ers(&mut self) -> Result<&ResultSpectrum> {
        let ers = evaluate_ers(&self.axis, self.damping, self.current_excitation()?)?;
        Ok(self.ers.insert(ers))
    }

    /// Compute, store and return the FDS with the stored fatigue law
    pub fn get_fds(&mut self) -> Result<&ResultSpectrum> {
        let law = self
            .fatigue_law
            .ok_or_else(|| FdsError::missing("`b`, `C` and `K` parameters must be provided"))?;
        let fds = evaluate_fds(&self.axis, self.damping, self.current_excitation()?, &law)?;
        Ok(self.fds.insert(fds))
    }

    /// Set the fatigue law, then compute the FDS
    pub fn get_fds_with(&mut self, law: FatigueLaw) -> Result<&ResultSpectrum> {
        self.fatigue_law = Some(law);
        self.get_fds()
    }

    fn current_excitation(&self) -> Result<&Excitation> {
        self.excitation.as_ref().ok_or_else(|| {
            FdsError::missing("no load set; call one of the `set_*_load` methods first")
        })
    }

    pub fn axis(&self) -> &FrequencyAxis {
        &self.axis
    }

    pub fn damping(&self) -> Damping {
        self.damping
    }

    pub fn excitation(&self) -> Option<&Excitation> {
        self.excitation.as_ref()
    }

    pub fn fatigue_law(&self) -> Option<FatigueLaw> {
        self.fatigue_law
    }

    /// Most recent ERS
    pub fn ers(&self) -> Option<&ResultSpectrum> {
        self.ers.as_ref()
    }

    /// Most recent FDS
    pub fn fds(&self) -> Option<&ResultSpectrum> {
        self.fds.as_ref()
    }
}
