//! Fatigue Spectra - Vibration Specification Development Core
//!
//! Extreme response spectra (ERS) and fatigue damage spectra (FDS) of sine,
//! sine-sweep and random excitations on a bank of SDOF resonators, with
//! optional Python bindings.

// Suppress PyO3 non-local impl warnings (harmless macro-generated code)
#![cfg_attr(feature = "python", allow(non_local_definitions))]

pub mod error;
pub mod sdof;
pub mod fatigue;
pub mod spectrum;
pub mod excitation;
pub mod spec_dev;

#[cfg(feature = "python")]
pub mod python_bindings;

pub use error::{FdsError, Result};
pub use sdof::{Damping, ExcitationKind, FrequencyAxis, UnitScale};
pub use fatigue::FatigueLaw;
pub use excitation::{
    Excitation, PsdLoad, SineLoad, SpectrumEvaluator, SweepLoad, SweepType, TimeHistoryLoad,
    TimeMethod,
};
pub use spec_dev::{compute_ers, compute_fds, AnalysisConfig, ResultSpectrum, SpecificationDevelopment};
