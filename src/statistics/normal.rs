//! Standard normal quantiles.

/// Two-sided critical value for a confidence level, `Φ⁻¹(1 - (1 - c)/2)`.
///
/// Returns about 1.96 for `c = 0.95`.
pub fn z_score(confidence: f64) -> f64 {
    probit(1.0 - (1.0 - confidence) / 2.0)
}

/// Inverse normal CDF (probit function).
///
/// Abramowitz & Stegun 26.2.23 rational approximation, accurate to
/// ~4.5×10⁻⁴ for p ∈ (0, 1).
pub fn probit(p: f64) -> f64 {
    if p <= 0.0 {
        return f64::NEG_INFINITY;
    }
    if p >= 1.0 {
        return f64::INFINITY;
    }

    let (sign, q) = if p < 0.5 { (-1.0, 1.0 - p) } else { (1.0, p) };

    const C0: f64 = 2.515517;
    const C1: f64 = 0.802853;
    const C2: f64 = 0.010328;
    const D1: f64 = 1.432788;
    const D2: f64 = 0.189269;
    const D3: f64 = 0.001308;

    let t = (-2.0 * (1.0 - q).ln()).sqrt();
    let z = t - (C0 + C1 * t + C2 * t * t) / (1.0 + D1 * t + D2 * t * t + D3 * t * t * t);

    sign * z
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probit_accuracy() {
        assert!(probit(0.5).abs() < 1e-3);
        assert!((probit(0.975) - 1.96).abs() < 1e-2);
        assert!((probit(0.995) - 2.576).abs() < 1e-2);
        assert!((probit(0.025) + 1.96).abs() < 1e-2);
    }

    #[test]
    fn z_for_common_levels() {
        assert!((z_score(0.95) - 1.96).abs() < 1e-2);
        assert!((z_score(0.99) - 2.576).abs() < 1e-2);
        assert!((z_score(0.90) - 1.645).abs() < 1e-2);
    }

    #[test]
    fn bounds() {
        assert_eq!(probit(0.0), f64::NEG_INFINITY);
        assert_eq!(probit(1.0), f64::INFINITY);
    }
}
