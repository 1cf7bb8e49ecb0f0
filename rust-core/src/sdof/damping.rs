//! Damping ratio / quality factor of the SDOF resonator

use crate::error::{require_positive, FdsError, Result};
use log::warn;

/// Damping pair satisfying `Q * 2ζ = 1`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Damping {
    zeta: f64,
    q: f64,
}

impl Damping {
    /// Create from damping ratio ζ
    pub fn from_ratio(zeta: f64) -> Result<Self> {
        let zeta = require_positive("damp", zeta)?;
        Ok(Self {
            zeta,
            q: 1.0 / (2.0 * zeta),
        })
    }

    /// Create from quality factor Q
    pub fn from_q(q: f64) -> Result<Self> {
        let q = require_positive("Q", q)?;
        Ok(Self {
            zeta: 1.0 / (2.0 * q),
            q,
        })
    }

    /// Build from whichever of ζ and Q is supplied; ζ wins if both are
    pub fn resolve(zeta: Option<f64>, q: Option<f64>) -> Result<Self> {
        match (zeta, q) {
            (Some(zeta), Some(_)) => {
                warn!("Both `damp` and `Q` are defined. Prioritizing `damp`.");
                Self::from_ratio(zeta)
            }
            (Some(zeta), None) => Self::from_ratio(zeta),
            (None, Some(q)) => Self::from_q(q),
            (None, None) => Err(FdsError::missing("either `damp` or `Q` must be provided")),
        }
    }

    /// Damping ratio ζ
    pub fn ratio(&self) -> f64 {
        self.zeta
    }

    /// Quality factor Q
    pub fn q(&self) -> f64 {
        self.q
    }
}
