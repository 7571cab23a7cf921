//! Chart rendering for ellipse boundaries.
//!
//! Draws a closed boundary polyline on square-aspect 2-D axes and writes the
//! chart to a file. The backend is chosen from the output extension: `.svg`
//! uses the SVG backend, anything else is rasterized to a bitmap.

use std::error::Error;
use std::ops::Range;
use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;

/// Chart appearance options.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Chart size in pixels (width, height).
    pub size: (u32, u32),
    /// Chart title.
    pub caption: String,
    /// Horizontal axis description.
    pub x_desc: String,
    /// Vertical axis description.
    pub y_desc: String,
    /// Legend entry for the boundary series.
    pub series_label: String,
    /// Fraction of the data span added as margin around the boundary.
    pub margin_frac: f64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            size: (800, 800),
            caption: "Confidence ellipse".to_string(),
            x_desc: "X-axis".to_string(),
            y_desc: "Y-axis".to_string(),
            series_label: "Ellipse".to_string(),
            margin_frac: 0.1,
        }
    }
}

/// Render a boundary polyline to `path`.
pub fn render_boundary(
    path: &Path,
    points: &[[f64; 2]],
    opts: &RenderOptions,
) -> Result<(), Box<dyn Error>> {
    let ranges = square_ranges(points, opts.margin_frac);
    match path.extension().and_then(|e| e.to_str()) {
        Some("svg") => {
            let root = SVGBackend::new(path, opts.size).into_drawing_area();
            draw_chart(&root, points, ranges, opts)
        }
        _ => {
            let root = BitMapBackend::new(path, opts.size).into_drawing_area();
            draw_chart(&root, points, ranges, opts)
        }
    }
}

fn draw_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    points: &[[f64; 2]],
    (x_range, y_range): (Range<f64>, Range<f64>),
    opts: &RenderOptions,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(root)
        .caption(&opts.caption, ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range, y_range)?;

    chart
        .configure_mesh()
        .x_desc(opts.x_desc.as_str())
        .y_desc(opts.y_desc.as_str())
        .draw()?;

    let series: Vec<(f64, f64)> = points.iter().map(|p| (p[0], p[1])).collect();
    chart
        .draw_series(LineSeries::new(series, &BLUE))?
        .label(opts.series_label.as_str())
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

/// Equal-span x/y ranges covering `points` with a relative margin, so a
/// square drawing area shows equal scales on both axes.
fn square_ranges(points: &[[f64; 2]], margin_frac: f64) -> (Range<f64>, Range<f64>) {
    let mut x_min = f64::INFINITY;
    let mut x_max = f64::NEG_INFINITY;
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for &[x, y] in points {
        x_min = x_min.min(x);
        x_max = x_max.max(x);
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }
    if !(x_min.is_finite() && x_max.is_finite() && y_min.is_finite() && y_max.is_finite()) {
        return (-1.0..1.0, -1.0..1.0);
    }

    let span = (x_max - x_min).max(y_max - y_min).max(1e-12);
    let half = span * (1.0 + margin_frac) / 2.0;
    let x_mid = (x_min + x_max) / 2.0;
    let y_mid = (y_min + y_max) / 2.0;
    (x_mid - half..x_mid + half, y_mid - half..y_mid + half)
}
