use clap::Parser;
use clap::builder::{OsStringValueParser, TypedValueParser};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use facephoto::cascade::{DEFAULT_CASCADE, DEFAULT_NESTED_CASCADE, DetectParams};
use facephoto::source::DEFAULT_INPUT_DIR;
use facephoto::stats::DEFAULT_STATS_FILE;
use facephoto::viewer::DEFAULT_OUTPUT_DIR;
use facephoto::{Classifiers, DetectionPipeline, ResultLogger, Session, Shell, SnapshotViewer, Viewer};

/// Exit status when the primary classifier cannot be loaded (-1)
const CLASSIFIER_LOAD_FAILURE: u8 = 255;

#[derive(Parser)]
#[command(name = "facephoto")]
#[command(about = "Detect faces in a folder of photos with a cascade classifier")]
struct Cli {
    /// Primary trained classifier, such as a frontal face cascade
    #[arg(long, value_name = "PATH", default_value = DEFAULT_CASCADE)]
    cascade: PathBuf,

    /// Optional secondary classifier run inside each face, such as eyes (empty to disable)
    #[arg(
        long = "nested-cascade",
        value_name = "PATH",
        default_value = DEFAULT_NESTED_CASCADE,
        value_parser = OsStringValueParser::new().map(PathBuf::from)
    )]
    nested_cascade: PathBuf,

    /// Image scale, greater or equal to 1; try 1.3 for example
    #[arg(long, default_value_t = 1.0)]
    scale: f64,

    /// Size ratio between two consecutive detection scales
    #[arg(long, default_value_t = 1.1)]
    scale_step: f64,

    /// Overlapping hits a candidate needs to be reported (OpenCV cascades)
    #[arg(long, default_value_t = 2)]
    min_neighbors: i32,

    /// Also detect on the horizontally flipped image
    #[arg(long)]
    try_flip: bool,

    /// Accepted for compatibility; images are read from --input-dir
    #[arg(value_name = "FILENAME")]
    filename: Option<PathBuf>,

    /// Folder scanned at every launch
    #[arg(long, value_name = "DIR", default_value = DEFAULT_INPUT_DIR)]
    input_dir: PathBuf,

    /// Append-only per-image statistics
    #[arg(long, value_name = "FILE", default_value = DEFAULT_STATS_FILE)]
    stats: PathBuf,

    /// Where annotated images are written when no window is shown
    #[arg(long, value_name = "DIR", default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Never open a window, write annotated images to --output-dir instead
    #[arg(long)]
    headless: bool,

    /// Save intermediate images to directory (must be empty)
    #[arg(long, value_name = "DIR")]
    debug_out: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = match Cli::try_parse() {
        Ok(args) => args,
        Err(error) => {
            let _ = error.print();
            return ExitCode::SUCCESS;
        }
    };

    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(io::stderr)
        .with_max_level(if args.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    match run(args) {
        Ok(code) => code,
        Err(error) => {
            tracing::error!("{:#}", error);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Cli) -> anyhow::Result<ExitCode> {
    if let Some(filename) = &args.filename {
        tracing::info!(
            "{} is ignored, images are read from {}",
            filename.display(),
            args.input_dir.display()
        );
    }

    let nested = Some(args.nested_cascade.as_path()).filter(|path| !path.as_os_str().is_empty());
    let classifiers = match Classifiers::load(&args.cascade, nested) {
        Ok(classifiers) => classifiers,
        Err(error) => {
            tracing::error!("could not load classifier cascade: {}", error);
            return Ok(ExitCode::from(CLASSIFIER_LOAD_FAILURE));
        }
    };

    let params = DetectParams {
        scale_factor: args.scale_step.max(1.01),
        min_neighbors: args.min_neighbors.max(0),
        ..DetectParams::default()
    };
    let mut pipeline = DetectionPipeline::new()
        .with_scale(args.scale)
        .with_try_flip(args.try_flip)
        .with_params(params);
    if let Some(debug_dir) = args.debug_out {
        pipeline = pipeline.with_debug(debug_dir)?;
    }

    let logger = ResultLogger::open(&args.stats)?;

    if cfg!(feature = "opencv") && !args.headless {
        #[cfg(feature = "opencv")]
        return serve(Session::new(
            classifiers,
            pipeline,
            logger,
            facephoto::viewer::WindowViewer::new(),
            args.input_dir,
        ));
    }

    serve(Session::new(
        classifiers,
        pipeline,
        logger,
        SnapshotViewer::new(args.output_dir),
        args.input_dir,
    ))
}

fn serve<V: Viewer>(mut session: Session<V>) -> anyhow::Result<ExitCode> {
    let stdin = io::stdin();
    let mut shell = Shell::new(stdin.lock(), io::stdout());
    shell.run(&mut session)?;
    Ok(ExitCode::SUCCESS)
}
