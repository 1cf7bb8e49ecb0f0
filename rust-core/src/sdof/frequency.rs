//! Natural frequency axis of the SDOF resonator sweep
//!
//! X-axis of every ERS/FDS plot. Built once per analysis run and immutable
//! afterwards.

use crate::error::{FdsError, Result};

/// Value substituted for an exact 0 Hz leading frequency
pub const ZERO_FREQUENCY_CLAMP: f64 = 1e-3;

/// Ordered, strictly increasing natural frequencies in Hz
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyAxis {
    values: Vec<f64>,
}

impl FrequencyAxis {
    /// Build the axis `start, start + step, ..., stop` (stop inclusive)
    ///
    /// # Arguments
    /// * `start` - First natural frequency [Hz]
    /// * `stop` - Last natural frequency [Hz]
    /// * `step` - Frequency increment [Hz]
    pub fn from_range(start: f64, stop: f64, step: f64) -> Result<Self> {
        if !(start.is_finite() && stop.is_finite() && step.is_finite()) {
            return Err(FdsError::invalid("frequency range bounds must be finite"));
        }
        if step <= 0.0 {
            return Err(FdsError::invalid(format!(
                "frequency step must be positive (got {})",
                step
            )));
        }
        if stop < start {
            return Err(FdsError::invalid(format!(
                "frequency stop ({}) is below start ({})",
                stop, start
            )));
        }

        // Same point count as arange(start, stop + step, step), with a small
        // tolerance so that stop is not lost to rounding
        let count = ((stop - start) / step + 1e-9).floor() as usize + 1;
        let values = (0..count).map(|i| start + i as f64 * step).collect();

        Self::from_values(values)
    }

    /// Use a pre-built frequency vector
    pub fn from_values(mut values: Vec<f64>) -> Result<Self> {
        if values.is_empty() {
            return Err(FdsError::invalid("frequency axis is empty"));
        }
        if values.iter().any(|f| !f.is_finite() || *f < 0.0) {
            return Err(FdsError::invalid(
                "natural frequencies must be finite and non-negative",
            ));
        }
        if values.windows(2).any(|w| w[1] <= w[0]) {
            return Err(FdsError::invalid(
                "natural frequencies must be strictly increasing",
            ));
        }

        if values[0] == 0.0 {
            values[0] = ZERO_FREQUENCY_CLAMP;
            // The clamp must not collide with the second point
            if values.len() > 1 && values[1] <= ZERO_FREQUENCY_CLAMP {
                return Err(FdsError::invalid(
                    "second natural frequency is too close to 0 Hz",
                ));
            }
        }

        Ok(Self { values })
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
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_includes_stop() {
        let axis = FrequencyAxis::from_range(20.0, 200.0, 5.0).unwrap();
        assert_eq!(axis.len(), 37);
        assert_eq!(axis.values()[0], 20.0);
        assert_eq!(axis.values()[36], 200.0);
    }

    #[test]
    fn test_zero_frequency_is_clamped() {
        let axis = FrequencyAxis::from_range(0.0, 2000.0, 5.0).unwrap();
        assert_eq!(axis.len(), 401);
        assert_eq!(axis.values()[0], ZERO_FREQUENCY_CLAMP);
        assert!(axis.values().iter().all(|&f| f > 0.0));

        let axis = FrequencyAxis::from_values(vec![0.0, 1.0, 2.0]).unwrap();
        assert_eq!(axis.values()[0], ZERO_FREQUENCY_CLAMP);
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(FrequencyAxis::from_range(0.0, 100.0, 0.0).is_err());
        assert!(FrequencyAxis::from_range(100.0, 10.0, 1.0).is_err());
        assert!(FrequencyAxis::from_values(vec![]).is_err());
        assert!(FrequencyAxis::from_values(vec![10.0, 5.0]).is_err());
        assert!(FrequencyAxis::from_values(vec![-1.0, 5.0]).is_err());
        assert!(FrequencyAxis::from_values(vec![0.0, 1e-4]).is_err());
    }
}
