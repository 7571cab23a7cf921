//! covellipse CLI — render confidence ellipses of 2-D covariance matrices.

use clap::{Args, Parser, Subcommand};
use nalgebra::Matrix2;
use std::path::PathBuf;

use covellipse::render::{render_boundary, RenderOptions};
use covellipse::{confidence_ellipse, BoundaryDump, EllipseReport};

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "covellipse")]
#[command(about = "Compute and render the confidence ellipse of a 2x2 covariance matrix")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the confidence ellipse to a PNG or SVG chart.
    Plot(CliPlotArgs),

    /// Print ellipse parameters (quantile, eigenvalues, axis lengths).
    Params(CliParamsArgs),
}

#[derive(Debug, Clone, Args)]
struct CliCovArgs {
    /// Covariance entry (0,0).
    #[arg(long, default_value_t = 2.0)]
    sxx: f64,

    /// Covariance entry (0,1), mirrored to (1,0).
    #[arg(long, default_value_t = 1.0)]
    sxy: f64,

    /// Covariance entry (1,1).
    #[arg(long, default_value_t = 3.0)]
    syy: f64,

    /// Confidence parameter in (0, 1).
    #[arg(long, default_value_t = 0.6065)]
    alpha: f64,

    /// Ellipse center x.
    #[arg(long, default_value_t = 1.0)]
    cx: f64,

    /// Ellipse center y.
    #[arg(long, default_value_t = 2.0)]
    cy: f64,
}

impl CliCovArgs {
    fn matrix(&self) -> Matrix2<f64> {
        Matrix2::new(self.sxx, self.sxy, self.sxy, self.syy)
    }

    fn center(&self) -> [f64; 2] {
        [self.cx, self.cy]
    }
}

#[derive(Debug, Clone, Args)]
struct CliPlotArgs {
    #[command(flatten)]
    cov: CliCovArgs,

    /// Output chart path (.svg for vector output, bitmap otherwise).
    #[arg(long, default_value = "ellipse.png")]
    out: PathBuf,

    /// Number of boundary samples.
    #[arg(long, default_value = "100")]
    samples: usize,

    /// Chart size in pixels (square).
    #[arg(long, default_value = "800")]
    chart_size: u32,

    /// Chart title.
    #[arg(long)]
    title: Option<String>,

    /// Path to write the numeric report and boundary points (JSON).
    #[arg(long)]
    points_json: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
struct CliParamsArgs {
    #[command(flatten)]
    cov: CliCovArgs,

    /// Write the report as JSON to this path instead of printing a table.
    #[arg(long)]
    json: Option<PathBuf>,
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Plot(args) => run_plot(&args),
        Commands::Params(args) => run_params(&args),
    }
}

// ── plot ───────────────────────────────────────────────────────────────────

fn run_plot(args: &CliPlotArgs) -> CliResult<()> {
    let ellipse = confidence_ellipse(&args.cov.matrix(), args.cov.alpha)?;
    let center = args.cov.center();
    let points = ellipse.transformed_boundary(center, args.samples);

    tracing::info!(
        "Axis lengths: a={:.6}, b={:.6} (chi2 quantile {:.6})",
        ellipse.a,
        ellipse.b,
        ellipse.quantile,
    );

    let mut opts = RenderOptions {
        size: (args.chart_size, args.chart_size),
        ..Default::default()
    };
    if let Some(title) = &args.title {
        opts.caption = title.clone();
    }

    render_boundary(&args.out, &points, &opts)?;
    tracing::info!("Chart written to {}", args.out.display());

    if let Some(path) = &args.points_json {
        let dump = BoundaryDump {
            report: EllipseReport::new(&ellipse, args.cov.alpha, center),
            points,
        };
        let json = serde_json::to_string_pretty(&dump)?;
        std::fs::write(path, &json)?;
        tracing::info!("Boundary dump written to {}", path.display());
    }

    Ok(())
}

// ── params ─────────────────────────────────────────────────────────────────

fn run_params(args: &CliParamsArgs) -> CliResult<()> {
    let ellipse = confidence_ellipse(&args.cov.matrix(), args.cov.alpha)?;
    let report = EllipseReport::new(&ellipse, args.cov.alpha, args.cov.center());

    if let Some(path) = &args.json {
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(path, &json)?;
        tracing::info!("Report written to {}", path.display());
        return Ok(());
    }

    println!("confidence ellipse parameters");
    println!("  alpha:          {}", report.alpha);
    println!("  chi2 quantile:  {:.6}  (2 dof, upper)", report.chi2_quantile);
    println!(
        "  eigenvalues:    {:.6}, {:.6}",
        report.eigenvalues[0], report.eigenvalues[1]
    );
    println!(
        "  axis lengths:   a={:.6}, b={:.6}",
        report.axis_lengths[0], report.axis_lengths[1]
    );
    println!(
        "  eigenvector 0:  ({:+.6}, {:+.6})",
        report.eigenvectors[0][0], report.eigenvectors[0][1]
    );
    println!(
        "  eigenvector 1:  ({:+.6}, {:+.6})",
        report.eigenvectors[1][0], report.eigenvectors[1][1]
    );
    println!(
        "  center:         ({}, {})",
        report.center_xy[0], report.center_xy[1]
    );

    Ok(())
}
