//! Raster rendering of ellipse boundaries onto image buffers.
//!
//! Overlay path for pixel-coordinate use: the boundary is marched densely
//! enough that adjacent samples land on neighboring pixels, each sample is
//! rounded to the nearest pixel, and out-of-bounds samples are skipped. No
//! axes or legend; for a chart see [`crate::render`].

use image::{ImageBuffer, Pixel};
use nalgebra::Matrix2;

use crate::ellipse::EllipseError;
use crate::{confidence_ellipse, ConfidenceEllipse};

/// Plot boundary points onto an image buffer, one pixel per point.
///
/// Points are in pixel coordinates; non-finite and out-of-bounds points are
/// skipped.
pub fn draw_boundary<P: Pixel>(
    image: &mut ImageBuffer<P, Vec<P::Subpixel>>,
    points: &[[f64; 2]],
    color: P,
) {
    for &[x, y] in points {
        plot_pixel(image, x, y, color);
    }
}

/// Draw the confidence region of a 2×2 covariance directly onto an image.
///
/// Derives the confidence ellipse for `alpha`, then marches its transformed
/// boundary with roughly one sample per pixel of arc. A degenerate ellipse
/// (both axes zero) draws nothing.
pub fn draw_confidence_region<P: Pixel>(
    image: &mut ImageBuffer<P, Vec<P::Subpixel>>,
    cov: &Matrix2<f64>,
    alpha: f64,
    center: [f64; 2],
    color: P,
) -> Result<ConfidenceEllipse, EllipseError> {
    let ellipse = confidence_ellipse(cov, alpha)?;

    let max_axis = ellipse.a.max(ellipse.b);
    if !max_axis.is_finite() || max_axis <= 0.0 {
        return Ok(ellipse);
    }

    // One sample per pixel of arc: perimeter <= pi * max_axis.
    let n = ((std::f64::consts::PI * max_axis).ceil() as usize).max(16);
    let points = ellipse.transformed_boundary(center, n);
    draw_boundary(image, &points, color);

    Ok(ellipse)
}

fn plot_pixel<P: Pixel>(
    image: &mut ImageBuffer<P, Vec<P::Subpixel>>,
    x: f64,
    y: f64,
    color: P,
) {
    if !(x.is_finite() && y.is_finite()) {
        return;
    }
    let xi = x.round() as i64;
    let yi = y.round() as i64;
    if xi < 0 || yi < 0 || xi >= i64::from(image.width()) || yi >= i64::from(image.height()) {
        return;
    }
    image.put_pixel(xi as u32, yi as u32, color);
}
