//! Chi-squared quantile lookup.

use statrs::distribution::{ChiSquared, ContinuousCDF};

use crate::ellipse::EllipseError;

/// Degrees of freedom for a 2-D covariance.
pub const DEGREES_OF_FREEDOM: f64 = 2.0;

/// Inverse CDF of the chi-squared distribution with `dof` degrees of freedom.
///
/// `p` must lie in `[0, 1)`; `p = 1` would drive the quantile to infinity.
pub fn quantile(p: f64, dof: f64) -> Result<f64, EllipseError> {
    if !(0.0..1.0).contains(&p) {
        return Err(EllipseError::QuantileOutOfDomain(p));
    }
    let dist = ChiSquared::new(dof).map_err(|e| EllipseError::QuantileFailure(e.to_string()))?;
    Ok(dist.inverse_cdf(p))
}

/// Upper quantile used for confidence scaling: inverse CDF at `1 - alpha`,
/// 2 degrees of freedom.
pub fn upper_quantile_2dof(alpha: f64) -> Result<f64, EllipseError> {
    quantile(1.0 - alpha, DEGREES_OF_FREEDOM)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // With 2 dof the chi-squared inverse CDF has the closed form
    //   quantile(1 - alpha) = -2 ln(alpha).

    #[test]
    fn test_upper_quantile_matches_closed_form() {
        for alpha in [0.01, 0.1, 0.3173, 0.6065, 0.9] {
            let q = upper_quantile_2dof(alpha).expect("quantile should succeed");
            assert_relative_eq!(q, -2.0 * alpha.ln(), epsilon = 1e-6);
        }
    }

    #[test]
    fn test_upper_quantile_decreases_with_alpha() {
        let alphas = [0.05, 0.2, 0.5, 0.8, 0.95];
        let qs: Vec<f64> = alphas
            .iter()
            .map(|&a| upper_quantile_2dof(a).expect("quantile should succeed"))
            .collect();
        for w in qs.windows(2) {
            assert!(w[0] > w[1], "quantile must decrease as alpha grows");
        }
    }

    #[test]
    fn test_domain_extremes() {
        // alpha near 0 drives the quantile toward infinity; alpha near 1
        // drives it toward 0. Both are expected, not failures.
        let near_inf = upper_quantile_2dof(1e-12).expect("quantile should succeed");
        assert!(near_inf > 50.0, "expected large quantile, got {}", near_inf);

        let near_zero = upper_quantile_2dof(0.999_999).expect("quantile should succeed");
        assert!(
            near_zero < 1e-4,
            "expected near-zero quantile, got {}",
            near_zero
        );
    }

    #[test]
    fn test_p_out_of_domain_rejected() {
        assert!(matches!(
            quantile(-0.1, 2.0),
            Err(EllipseError::QuantileOutOfDomain(_))
        ));
        assert!(matches!(
            quantile(1.0, 2.0),
            Err(EllipseError::QuantileOutOfDomain(_))
        ));
    }

    #[test]
    fn test_invalid_dof_rejected() {
        assert!(matches!(
            quantile(0.5, 0.0),
            Err(EllipseError::QuantileFailure(_))
        ));
    }
}
