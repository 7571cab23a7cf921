use covellipse::render::{render_boundary, RenderOptions};
use nalgebra::Matrix2;
use std::error::Error;
use std::path::Path;

fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = std::env::args().collect();
    let out_path = args.get(1).map(String::as_str).unwrap_or("ellipse.svg");

    let cov = Matrix2::new(2.0, 1.0, 1.0, 3.0);
    let ellipse = covellipse::confidence_ellipse(&cov, 0.6065)?;
    let points = ellipse.transformed_boundary([1.0, 2.0], 100);

    println!(
        "Axis lengths: a={:.4}, b={:.4} (chi2 quantile {:.4}).",
        ellipse.a, ellipse.b, ellipse.quantile
    );

    render_boundary(Path::new(out_path), &points, &RenderOptions::default())?;
    println!("Wrote {out_path}");
    Ok(())
}
