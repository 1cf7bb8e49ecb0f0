//! Gamma function and trapezoidal quadrature

use std::f64::consts::PI;

/// Lanczos coefficients (g = 7, n = 9)
const LANCZOS_G: f64 = 7.0;
const LANCZOS_COEFFICIENTS: [f64; 9] = [
    0.99999999999980993,
    676.5203681218851,
    -1259.1392167224028,
    771.32342877765313,
    -176.61502916214059,
    12.507343278686905,
    -0.13857109526572012,
    9.9843695780195716e-6,
    1.5056327351493116e-7,
];

/// Natural logarithm of Γ(x) for x > 0
pub fn ln_gamma(x: f64) -> f64 {
    if x < 0.5 {
        // Reflection: Γ(x) Γ(1-x) = π / sin(πx)
        (PI / (PI * x).sin()).ln() - ln_gamma(1.0 - x)
    } else {
        let z = x - 1.0;
        let mut ag = LANCZOS_COEFFICIENTS[0];
        for (i, &c) in LANCZOS_COEFFICIENTS.iter().enumerate().skip(1) {
            ag += c / (z + i as f64);
        }
        let t = z + LANCZOS_G + 0.5;
        0.5 * (2.0 * PI).ln() + (z + 0.5) * t.ln() - t + ag.ln()
    }
}

/// Γ(x) for x > 0
pub fn gamma(x: f64) -> f64 {
    ln_gamma(x).exp()
}

/// Trapezoidal integral of samples `y` over abscissae `x`
pub fn trapezoid(y: &[f64], x: &[f64]) -> f64 {
    y.windows(2)
        .zip(x.windows(2))
        .map(|(yw, xw)| 0.5 * (yw[0] + yw[1]) * (xw[1] - xw[0]))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_gamma_integers() {
        assert_relative_eq!(gamma(1.0), 1.0, max_relative = 1e-12);
        assert_relative_eq!(gamma(5.0), 24.0, max_relative = 1e-12);
        assert_relative_eq!(gamma(7.0), 720.0, max_relative = 1e-12);
    }

    #[test]
    fn test_gamma_half_integers() {
        // Γ(1/2) = √π, Γ(7/2) = 15√π/8
        assert_relative_eq!(gamma(0.5), PI.sqrt(), max_relative = 1e-12);
        assert_relative_eq!(gamma(3.5), 15.0 * PI.sqrt() / 8.0, max_relative = 1e-12);
    }

    #[test]
    fn test_trapezoid() {
        let x: Vec<f64> = (0..=100).map(|i| i as f64 / 100.0).collect();
        let y: Vec<f64> = x.iter().map(|&v| 2.0 * v).collect();
        assert_relative_eq!(trapezoid(&y, &x), 1.0, epsilon = 1e-12);

        let y: Vec<f64> = x.iter().map(|&v| v * v).collect();
        assert_relative_eq!(trapezoid(&y, &x), 1.0 / 3.0, epsilon = 1e-4);

        assert_eq!(trapezoid(&[1.0], &[0.0]), 0.0);
    }
}
