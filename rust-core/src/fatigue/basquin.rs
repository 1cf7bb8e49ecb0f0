//! Basquin fatigue law
//!
//! `N · σ^b = C` with stress proportional to relative displacement,
//! `σ = K · z`. One cycle of amplitude z therefore costs `K^b/C · z^b`.

use crate::error::{require_positive, Result};

/// Basquin constants (b, C, K)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FatigueLaw {
    b: f64,
    c: f64,
    k: f64,
}

impl FatigueLaw {
    /// # Arguments
    /// * `b` - S-N curve slope
    /// * `c` - Material constant
    /// * `k` - Stress / deformation proportionality constant
    pub fn new(b: f64, c: f64, k: f64) -> Result<Self> {
        Ok(Self {
            b: require_positive("b", b)?,
            c: require_positive("C", c)?,
            k: require_positive("K", k)?,
        })
    }

    pub fn b(&self) -> f64 {
        self.b
    }

    pub fn c(&self) -> f64 {
        self.c
    }

    pub fn k(&self) -> f64 {
        self.k
    }

    /// Damage scale `K^b / C`
    pub fn damage_coefficient(&self) -> f64 {
        self.k.powf(self.b) / self.c
    }

    /// Damage of `count` cycles with displacement amplitude `amplitude`
    #[inline]
    pub fn cycle_damage(&self, amplitude: f64, count: f64) -> f64 {
        count * self.damage_coefficient() * amplitude.abs().powf(self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cycle_damage() {
        let law = FatigueLaw::new(5.0, 2.0, 3.0).unwrap();
        assert_relative_eq!(law.damage_coefficient(), 243.0 / 2.0);
        assert_relative_eq!(law.cycle_damage(2.0, 0.5), 0.5 * 121.5 * 32.0);
    }

    #[test]
    fn test_rejects_non_positive() {
        assert!(FatigueLaw::new(0.0, 1.0, 1.0).is_err());
        assert!(FatigueLaw::new(5.0, -1.0, 1.0).is_err());
        assert!(FatigueLaw::new(5.0, 1.0, 0.0).is_err());
    }
}
