//! Excitation evaluators
//!
//! Each excitation kind carries exactly the data its ERS/FDS formulas need
//! and evaluates them over a bank of SDOF resonators.

pub mod sine;
pub mod sweep;
pub mod random_psd;
pub mod random_time;

pub use sine::SineLoad;
pub use sweep::{SweepLoad, SweepSegment, SweepType};
pub use random_psd::PsdLoad;
pub use random_time::{TimeHistoryLoad, TimeMethod};

use crate::error::Result;
use crate::fatigue::FatigueLaw;
use crate::sdof::{Damping, FrequencyAxis};

/// Bank of SDOF resonators sharing one damping value
#[derive(Debug, Clone, Copy)]
pub struct ResonatorBank<'a> {
    pub axis: &'a FrequencyAxis,
    pub damping: Damping,
}

impl<'a> ResonatorBank<'a> {
    pub fn new(axis: &'a FrequencyAxis, damping: Damping) -> Self {
        Self { axis, damping }
    }

    pub fn q(&self) -> f64 {
        self.damping.q()
    }
}

/// ERS/FDS evaluation over a resonator bank
///
/// Both methods return one value per natural frequency, in axis order.
pub trait SpectrumEvaluator {
    /// Extreme response spectrum
    fn ers(&self, bank: &ResonatorBank) -> Result<Vec<f64>>;

    /// Fatigue damage spectrum
    fn fds(&self, bank: &ResonatorBank, law: &FatigueLaw) -> Result<Vec<f64>>;
}

/// Closed set of supported excitations
#[derive(Debug, Clone)]
pub enum Excitation {
    Sine(SineLoad),
    SineSweep(SweepLoad),
    RandomPsd(PsdLoad),
    RandomTime(TimeHistoryLoad),
}

impl Excitation {
    /// Signal type name
    pub fn name(&self) -> &'static str {
        match self {
            Excitation::Sine(_) => "sine",
            Excitation::SineSweep(_) => "sine_sweep",
            Excitation::RandomPsd(_) => "random_psd",
            Excitation::RandomTime(_) => "random_time",
        }
    }

    fn evaluator(&self) -> &dyn SpectrumEvaluator {
        match self {
            Excitation::Sine(load) => load,
            Excitation::SineSweep(load) => load,
            Excitation::RandomPsd(load) => load,
            Excitation::RandomTime(load) => load,
        }
    }
}

impl SpectrumEvaluator for Excitation {
    fn ers(&self, bank: &ResonatorBank) -> Result<Vec<f64>> {
        self.evaluator().ers(bank)
    }

    fn fds(&self, bank: &ResonatorBank, law: &FatigueLaw) -> Result<Vec<f64>> {
        self.evaluator().fds(bank, law)
    }
}

impl From<SineLoad> for Excitation {
    fn from(load: SineLoad) -> Self {
        Excitation::Sine(load)
    }
}

impl From<SweepLoad> for Excitation {
    fn from(load: SweepLoad) -> Self {
        Excitation::SineSweep(load)
    }
}

impl From<PsdLoad> for Excitation {
    fn from(load: PsdLoad) -> Self {
        Excitation::RandomPsd(load)
    }
}

impl From<TimeHistoryLoad> for Excitation {
    fn from(load: TimeHistoryLoad) -> Self {
        Excitation::RandomTime(load)
    }
}
