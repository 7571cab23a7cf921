//! Confidence ellipse computation and boundary sampling.
//!
//! A confidence ellipse is derived from a symmetric 2×2 covariance matrix and
//! a confidence parameter `alpha`: the eigenvectors give the orientation, and
//! the eigenvalues scaled by the chi-squared upper quantile give the axis
//! lengths.

use nalgebra::{Matrix2, Vector2};

use crate::chi2;

// ── Error type ─────────────────────────────────────────────────────────────

/// Errors that can occur while deriving a confidence ellipse.
#[derive(Debug, Clone, PartialEq)]
pub enum EllipseError {
    /// Confidence parameter outside the open interval (0, 1).
    AlphaOutOfRange(f64),
    /// Covariance matrix contains NaN or infinite entries.
    NonFiniteCovariance,
    /// Covariance matrix has a negative eigenvalue.
    NotPositiveSemiDefinite { eigenvalue: f64 },
    /// Quantile probability outside [0, 1).
    QuantileOutOfDomain(f64),
    /// The quantile distribution could not be constructed.
    QuantileFailure(String),
}

impl std::fmt::Display for EllipseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AlphaOutOfRange(a) => {
                write!(f, "alpha must be in (0, 1), got {}", a)
            }
            Self::NonFiniteCovariance => write!(f, "covariance has non-finite entries"),
            Self::NotPositiveSemiDefinite { eigenvalue } => {
                write!(
                    f,
                    "covariance is not positive semi-definite (eigenvalue {})",
                    eigenvalue
                )
            }
            Self::QuantileOutOfDomain(p) => {
                write!(f, "quantile probability must be in [0, 1), got {}", p)
            }
            Self::QuantileFailure(msg) => write!(f, "quantile failure: {}", msg),
        }
    }
}

impl std::error::Error for EllipseError {}

// ── Types ──────────────────────────────────────────────────────────────────

/// A confidence ellipse in canonical (unrotated, origin-centered) form plus
/// the rotation that maps it into the covariance frame.
///
/// Derived once by [`confidence_ellipse`] and immutable afterward.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfidenceEllipse {
    /// First axis length; the canonical boundary spans `a/2` along x.
    pub a: f64,
    /// Second axis length; the canonical boundary spans `b/2` along y.
    pub b: f64,
    /// Rotation matrix; columns are the unit eigenvectors of the covariance,
    /// paired with `eigenvalues`.
    pub axes: Matrix2<f64>,
    /// Eigenvalues of the covariance, in decomposition order.
    pub eigenvalues: Vector2<f64>,
    /// Chi-squared upper quantile (2 dof) used for scaling.
    pub quantile: f64,
}

// ── Computation ────────────────────────────────────────────────────────────

/// Derive the confidence ellipse of a 2×2 covariance matrix.
///
/// Eigendecomposes `cov`, looks up the chi-squared upper quantile
/// `q = inv_cdf(1 - alpha)` with 2 degrees of freedom, and sets the axis
/// lengths to `sqrt(sqrt(λ) * q)` per eigenvalue.
///
/// The nested square root is intentional and matches the reference
/// derivation this crate reproduces; the conventional formula would be
/// `sqrt(λ * q)`.
///
/// `cov` is assumed symmetric; only its lower triangle is read. Eigenvalues
/// that are negative beyond round-off yield
/// [`EllipseError::NotPositiveSemiDefinite`].
pub fn confidence_ellipse(
    cov: &Matrix2<f64>,
    alpha: f64,
) -> Result<ConfidenceEllipse, EllipseError> {
    if !(alpha > 0.0 && alpha < 1.0) {
        return Err(EllipseError::AlphaOutOfRange(alpha));
    }
    if cov.iter().any(|v| !v.is_finite()) {
        return Err(EllipseError::NonFiniteCovariance);
    }

    let eig = cov.symmetric_eigen();
    let scale = eig.eigenvalues.amax().max(1.0);

    let mut eigenvalues = eig.eigenvalues;
    for ev in eigenvalues.iter_mut() {
        if *ev < 0.0 {
            if *ev < -1e-9 * scale {
                return Err(EllipseError::NotPositiveSemiDefinite { eigenvalue: *ev });
            }
            // Round-off on a PSD input
            *ev = 0.0;
        }
    }

    let quantile = chi2::upper_quantile_2dof(alpha)?;
    let a = (eigenvalues[0].sqrt() * quantile).sqrt();
    let b = (eigenvalues[1].sqrt() * quantile).sqrt();

    Ok(ConfidenceEllipse {
        a,
        b,
        axes: eig.eigenvectors,
        eigenvalues,
        quantile,
    })
}

// ── Boundary sampling ──────────────────────────────────────────────────────

impl ConfidenceEllipse {
    /// Sample `n` boundary points of the canonical (unrotated,
    /// origin-centered) ellipse at equally spaced angles over `[0, 2π]`
    /// inclusive, so the polyline closes on itself (first == last).
    pub fn boundary_points(&self, n: usize) -> Vec<[f64; 2]> {
        let denom = n.saturating_sub(1).max(1) as f64;
        (0..n)
            .map(|i| {
                let theta = 2.0 * std::f64::consts::PI * (i as f64) / denom;
                [self.a / 2.0 * theta.cos(), self.b / 2.0 * theta.sin()]
            })
            .collect()
    }

    /// Rotate each point by the eigenvector matrix, then translate by
    /// `center`, in place.
    pub fn transform_points(&self, points: &mut [[f64; 2]], center: [f64; 2]) {
        for p in points.iter_mut() {
            let v = self.axes * Vector2::new(p[0], p[1]);
            p[0] = v.x + center[0];
            p[1] = v.y + center[1];
        }
    }

    /// Sample the boundary and transform it into the covariance frame.
    pub fn transformed_boundary(&self, center: [f64; 2], n: usize) -> Vec<[f64; 2]> {
        let mut points = self.boundary_points(n);
        self.transform_points(&mut points, center);
        points
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const ALPHA: f64 = 0.6065;

    fn reference_cov() -> Matrix2<f64> {
        Matrix2::new(2.0, 1.0, 1.0, 3.0)
    }

    #[test]
    fn test_reference_matrix_eigenvalues() {
        let e = confidence_ellipse(&reference_cov(), ALPHA).expect("should succeed");

        // Eigenvalues of [[2,1],[1,3]] are (5 ∓ √5) / 2.
        let mut evs = [e.eigenvalues[0], e.eigenvalues[1]];
        evs.sort_by(|x, y| x.partial_cmp(y).unwrap());
        let sqrt5 = 5.0f64.sqrt();
        assert_relative_eq!(evs[0], (5.0 - sqrt5) / 2.0, epsilon = 1e-12);
        assert_relative_eq!(evs[1], (5.0 + sqrt5) / 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_axis_lengths_match_closed_form() {
        let e = confidence_ellipse(&reference_cov(), ALPHA).expect("should succeed");

        // For 2 dof: q = -2 ln(alpha), then axis length = sqrt(sqrt(λ) * q).
        let q = -2.0 * ALPHA.ln();
        assert_relative_eq!(e.quantile, q, epsilon = 1e-6);
        assert_relative_eq!(e.a, (e.eigenvalues[0].sqrt() * q).sqrt(), epsilon = 1e-6);
        assert_relative_eq!(e.b, (e.eigenvalues[1].sqrt() * q).sqrt(), epsilon = 1e-6);
    }

    #[test]
    fn test_eigenvector_matrix_orthonormal() {
        for cov in [
            reference_cov(),
            Matrix2::new(4.0, -1.5, -1.5, 1.0),
            Matrix2::new(1.0, 0.0, 0.0, 1.0),
        ] {
            let e = confidence_ellipse(&cov, 0.3).expect("should succeed");
            let vtv = e.axes.transpose() * e.axes;
            assert_relative_eq!(vtv[(0, 0)], 1.0, epsilon = 1e-12);
            assert_relative_eq!(vtv[(1, 1)], 1.0, epsilon = 1e-12);
            assert_relative_eq!(vtv[(0, 1)], 0.0, epsilon = 1e-12);
            assert_relative_eq!(vtv[(1, 0)], 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_axes_are_eigenvectors() {
        let cov = reference_cov();
        let e = confidence_ellipse(&cov, ALPHA).expect("should succeed");
        for k in 0..2 {
            let v = e.axes.column(k).into_owned();
            let mv = cov * v;
            let lv = v * e.eigenvalues[k];
            assert_relative_eq!(mv.x, lv.x, epsilon = 1e-10);
            assert_relative_eq!(mv.y, lv.y, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_canonical_boundary_on_ellipse() {
        let e = confidence_ellipse(&reference_cov(), ALPHA).expect("should succeed");
        let pts = e.boundary_points(100);
        assert_eq!(pts.len(), 100);
        for &[x, y] in &pts {
            let r = (x / (e.a / 2.0)).powi(2) + (y / (e.b / 2.0)).powi(2);
            assert_relative_eq!(r, 1.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_boundary_is_closed() {
        let e = confidence_ellipse(&reference_cov(), ALPHA).expect("should succeed");
        let pts = e.boundary_points(100);
        let first = pts[0];
        let last = pts[99];
        assert_relative_eq!(first[0], last[0], epsilon = 1e-9);
        assert_relative_eq!(first[1], last[1], epsilon = 1e-9);
    }

    #[test]
    fn test_transformed_centroid_at_center() {
        let center = [1.0, 2.0];
        let e = confidence_ellipse(&reference_cov(), ALPHA).expect("should succeed");
        let pts = e.transformed_boundary(center, 100);

        // Drop the duplicated closing point so the period averages exactly.
        let n = pts.len() - 1;
        let (sx, sy) = pts[..n]
            .iter()
            .fold((0.0, 0.0), |(sx, sy), p| (sx + p[0], sy + p[1]));
        assert_relative_eq!(sx / n as f64, center[0], epsilon = 1e-9);
        assert_relative_eq!(sy / n as f64, center[1], epsilon = 1e-9);
    }

    #[test]
    fn test_recomputation_is_identical() {
        let e1 = confidence_ellipse(&reference_cov(), ALPHA).expect("should succeed");
        let e2 = confidence_ellipse(&reference_cov(), ALPHA).expect("should succeed");
        assert_eq!(e1, e2);
    }

    #[test]
    fn test_alpha_out_of_range_rejected() {
        let cov = reference_cov();
        for alpha in [0.0, 1.0, -0.2, 1.7, f64::NAN] {
            assert!(matches!(
                confidence_ellipse(&cov, alpha),
                Err(EllipseError::AlphaOutOfRange(_))
            ));
        }
    }

    #[test]
    fn test_non_finite_covariance_rejected() {
        let cov = Matrix2::new(2.0, f64::NAN, f64::NAN, 3.0);
        assert!(matches!(
            confidence_ellipse(&cov, ALPHA),
            Err(EllipseError::NonFiniteCovariance)
        ));
    }

    #[test]
    fn test_negative_eigenvalue_rejected() {
        let cov = Matrix2::new(-2.0, 0.0, 0.0, -3.0);
        assert!(matches!(
            confidence_ellipse(&cov, ALPHA),
            Err(EllipseError::NotPositiveSemiDefinite { .. })
        ));
    }

    #[test]
    fn test_rank_deficient_covariance_degenerates() {
        // [[1,1],[1,1]] has eigenvalues 0 and 2: one axis collapses.
        let cov = Matrix2::new(1.0, 1.0, 1.0, 1.0);
        let e = confidence_ellipse(&cov, ALPHA).expect("should succeed");
        let mut axes = [e.a, e.b];
        axes.sort_by(|x, y| x.partial_cmp(y).unwrap());
        assert_relative_eq!(axes[0], 0.0, epsilon = 1e-9);
        assert!(axes[1] > 0.0);
    }
}
