//! covellipse — confidence ellipses of 2-D covariance matrices.
//!
//! Given a symmetric 2×2 covariance matrix, a confidence parameter `alpha`,
//! and a center offset, the pipeline is:
//!
//! 1. **Spectral** – symmetric eigendecomposition of the covariance yields the
//!    principal axes and the rotation of the ellipse.
//! 2. **Scaling** – the chi-squared upper quantile with 2 degrees of freedom
//!    maps `alpha` to axis lengths.
//! 3. **Boundary** – parametric sampling of the ellipse boundary, rotated by
//!    the eigenvector matrix and translated to the center.
//! 4. **Render** – closed polyline on square-aspect 2-D axes, written as a
//!    PNG or SVG chart, or rasterized directly onto an image buffer.
//!
//! The numeric steps are pure functions returning data; the chart writer in
//! [`render`] and the pixel overlay in [`raster`] are the only side effects.

pub mod chi2;
pub mod ellipse;
pub mod raster;
pub mod render;

pub use ellipse::{confidence_ellipse, ConfidenceEllipse, EllipseError};

/// Serializable summary of a computed confidence ellipse.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct EllipseReport {
    /// Confidence parameter in (0, 1).
    pub alpha: f64,
    /// Chi-squared upper quantile at `1 - alpha` with 2 degrees of freedom.
    pub chi2_quantile: f64,
    /// Ellipse center (x, y).
    pub center_xy: [f64; 2],
    /// Eigenvalues of the covariance, in decomposition order.
    pub eigenvalues: [f64; 2],
    /// Unit eigenvectors; each inner array is one column of the rotation.
    pub eigenvectors: [[f64; 2]; 2],
    /// Axis lengths (a, b) paired with `eigenvalues`.
    pub axis_lengths: [f64; 2],
}

impl EllipseReport {
    pub fn new(ellipse: &ConfidenceEllipse, alpha: f64, center_xy: [f64; 2]) -> Self {
        let v = &ellipse.axes;
        Self {
            alpha,
            chi2_quantile: ellipse.quantile,
            center_xy,
            eigenvalues: [ellipse.eigenvalues[0], ellipse.eigenvalues[1]],
            eigenvectors: [[v[(0, 0)], v[(1, 0)]], [v[(0, 1)], v[(1, 1)]]],
            axis_lengths: [ellipse.a, ellipse.b],
        }
    }
}

/// Report plus the transformed boundary samples, for JSON dumps.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct BoundaryDump {
    pub report: EllipseReport,
    /// Transformed boundary points (closed polyline, first == last).
    pub points: Vec<[f64; 2]>,
}
