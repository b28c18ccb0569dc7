use clap::Parser;
use std::path::PathBuf;

use barscan::{
    BoundingGeometry, DebugConfig, DetectionResult, Detector, DetectorConfig, Mode,
    PipelineContext, Session,
};

#[derive(Parser)]
#[command(name = "barscan")]
#[command(about = "Locate a barcode in an image and mark it")]
struct Cli {
    /// Path to input image file
    #[arg(value_name = "IMAGE")]
    image_path: PathBuf,

    /// Detection method: fast or reference
    #[arg(short, long, default_value = "fast")]
    mode: Mode,

    /// Write the annotated image here
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// JSON file overriding detector parameters
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Save intermediate stage images to directory (must be empty)
    #[arg(long, value_name = "DIR")]
    debug_out: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let config = match &args.config {
        Some(path) => DetectorConfig::from_file(path)?,
        None => DetectorConfig::default(),
    };

    let mut context = PipelineContext::default();
    if let Some(debug_dir) = args.debug_out {
        context = context.with_debug(DebugConfig::new(debug_dir)?);
    }

    let detector = Detector::new(config)?.with_context(context);
    let mut session = Session::new(detector);
    session.set_mode(args.mode);

    session.open(&args.image_path)?;
    if let Some(source) = session.source() {
        log::debug!(
            "Image loaded: {}x{}",
            source.image.width(),
            source.image.height()
        );
    }

    let result = session.detect();
    println!("{}", session.status());

    match result? {
        DetectionResult::Found { geometry, .. } => {
            match geometry {
                BoundingGeometry::Axis(b) => println!(
                    "  box: rows {}..={}, cols {}..={}",
                    b.min_row, b.max_row, b.min_col, b.max_col
                ),
                BoundingGeometry::Oriented(r) => println!(
                    "  rect: center ({:.1}, {:.1}), size {:.1}x{:.1}, angle {:.1}°",
                    r.center.0, r.center.1, r.width, r.height, r.angle
                ),
            }

            if let Some(output) = &args.output {
                session.save_result(output)?;
                println!("{}", session.status());
            }
        }
        DetectionResult::NotFound => {
            if args.output.is_some() {
                log::warn!("nothing detected, no output written");
            }
        }
    }

    Ok(())
}
