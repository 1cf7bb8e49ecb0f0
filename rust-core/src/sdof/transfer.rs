//! SDOF transfer function and impulse response
//!
//! Shared kernel of all excitation evaluators.

use crate::error::{FdsError, Result};
use std::f64::consts::PI;
use std::str::FromStr;

/// Physical quantity of the base excitation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExcitationKind {
    #[default]
    Acceleration,
    Velocity,
    Displacement,
}

impl ExcitationKind {
    /// Exponent `a` of the (2π f0)^a scaling
    pub fn exponent(&self) -> i32 {
        match self {
            ExcitationKind::Acceleration => 0,
            ExcitationKind::Velocity => 1,
            ExcitationKind::Displacement => 2,
        }
    }
}

impl FromStr for ExcitationKind {
    type Err = FdsError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "acc" | "acceleration" => Ok(ExcitationKind::Acceleration),
            "vel" | "velocity" => Ok(ExcitationKind::Velocity),
            "disp" | "displacement" => Ok(ExcitationKind::Displacement),
            other => Err(FdsError::invalid(format!(
                "Invalid excitation type `{}`. Supported types: `acc`, `vel` and `disp`.",
                other
            ))),
        }
    }
}

/// Squared dynamic denominator `(1 - h²)² + (h/Q)²` at frequency ratio h
#[inline]
pub fn dynamic_denominator(h: f64, q: f64) -> f64 {
    let one_minus = 1.0 - h * h;
    one_minus * one_minus + (h / q) * (h / q)
}

/// Magnitude of the SDOF response
///
/// `H(f, f0) = (2π f0)^a / sqrt((1 - (f/f0)²)² + (f/(Q f0))²)`
///
/// # Arguments
/// * `f` - Excitation frequency [Hz]
/// * `f0` - Natural frequency [Hz], never 0
/// * `q` - Quality factor
/// * `kind` - Excitation kind, selects the exponent `a`
#[inline]
pub fn transfer_magnitude(f: f64, f0: f64, q: f64, kind: ExcitationKind) -> f64 {
    let omega0 = 2.0 * PI * f0;
    omega0.powi(kind.exponent()) / dynamic_denominator(f / f0, q).sqrt()
}

/// Sampled impulse response of the relative displacement z of a base-excited
/// oscillator: `z'' + 2ζω0 z' + ω0² z = -ẍ_base`
///
/// `h(t) = -(1/ωd) e^{-ζ ω0 t} sin(ωd t)` with `ωd = ω0 sqrt(1 - ζ²)`
///
/// # Arguments
/// * `f0` - Natural frequency [Hz]
/// * `zeta` - Damping ratio, must be below 1
/// * `dt` - Sampling interval [s]
/// * `length` - Number of samples
pub fn displacement_impulse_response(
    f0: f64,
    zeta: f64,
    dt: f64,
    length: usize,
) -> Result<Vec<f64>> {
    if zeta >= 1.0 {
        return Err(FdsError::domain(format!(
            "impulse response requires an underdamped resonator (damp = {})",
            zeta
        )));
    }

    let omega0 = 2.0 * PI * f0;
    let omega_d = omega0 * (1.0 - zeta * zeta).sqrt();
    let decay = zeta * omega0;

    Ok((0..length)
        .map(|n| {
            let t = n as f64 * dt;
            -(-decay * t).exp() * (omega_d * t).sin() / omega_d
        })
        .collect())
}
