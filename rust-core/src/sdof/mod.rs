//! Single-degree-of-freedom resonator model

pub mod frequency;
pub mod damping;
pub mod transfer;
pub mod units;

pub use frequency::FrequencyAxis;
pub use damping::Damping;
pub use transfer::{ExcitationKind, transfer_magnitude, dynamic_denominator};
pub use units::UnitScale;
