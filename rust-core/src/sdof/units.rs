//! Amplitude units of the excitation input

use super::ExcitationKind;
use crate::error::{FdsError, Result};
use std::str::FromStr;

/// Standard gravity used for "g" inputs [m/s²]
pub const STANDARD_GRAVITY: f64 = 9.81;

/// Unit of amplitude-bearing inputs
///
/// ERS scales linearly with the input and is never rescaled. FDS is
/// computed from SI amplitudes, so inputs are multiplied by `scale()`
/// (or `scale()²` for PSD ordinates) first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnitScale {
    /// Multiples of standard gravity
    G,

    /// m/s²
    #[default]
    Ms2,
}

impl UnitScale {
    /// Multiplicative factor to SI acceleration
    pub fn scale(&self) -> f64 {
        match self {
            UnitScale::G => STANDARD_GRAVITY,
            UnitScale::Ms2 => 1.0,
        }
    }

    /// `g` only scales accelerations; velocity and displacement inputs are SI
    pub fn check_kind(&self, kind: ExcitationKind) -> Result<()> {
        match (self, kind) {
            (UnitScale::G, ExcitationKind::Velocity | ExcitationKind::Displacement) => {
                Err(FdsError::invalid(format!(
                    "unit `g` applies to acceleration only, not {:?} excitation",
                    kind
                )))
            }
            _ => Ok(()),
        }
    }
}

impl FromStr for UnitScale {
    type Err = FdsError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "g" => Ok(UnitScale::G),
            "ms2" | "m/s2" | "m/s^2" => Ok(UnitScale::Ms2),
            other => Err(FdsError::invalid(format!(
                "Invalid unit `{}`. Supported units: `g` and `ms2`.",
                other
            ))),
        }
    }
}
