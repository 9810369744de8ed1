//! facepulse CLI: estimate heart rate from a directory of video frames.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use facepulse::{
    measure, CenterRegionDetector, DetectionLossPolicy, EstimateError, FaceSelection,
    FrequencyBand, ImageSequenceSource, PipelineConfig, PrecomputedDetections, PulseError,
    RegionDetector,
};

#[derive(Parser)]
#[command(name = "facepulse")]
#[command(about = "Estimate heart rate (BPM) from face video via remote photoplethysmography")]
#[command(version)]
struct Cli {
    /// Directory containing the video as an image sequence (numbered frames).
    input: PathBuf,

    /// Frame rate of the sequence in frames per second.
    #[arg(long, default_value_t = 30.0)]
    fps: f32,

    /// Per-frame face detections (JSON) from an external detector.
    /// Without this, the fixed center-region fallback is used.
    #[arg(long)]
    detections: Option<PathBuf>,

    /// Candidate to use when a frame has multiple detected faces.
    #[arg(long, value_enum, default_value_t = SelectArg::First)]
    select: SelectArg,

    /// Behavior when a frame yields no usable face region.
    #[arg(long, value_enum, default_value_t = OnLossArg::Halt)]
    on_loss: OnLossArg,

    /// Lower bound of the accepted heart-rate band (BPM).
    #[arg(long, default_value_t = 40.0)]
    min_bpm: f32,

    /// Upper bound of the accepted heart-rate band (BPM).
    #[arg(long, default_value_t = 180.0)]
    max_bpm: f32,

    /// Path to write the full measurement report (JSON).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SelectArg {
    First,
    Largest,
}

impl SelectArg {
    fn to_core(self) -> FaceSelection {
        match self {
            Self::First => FaceSelection::First,
            Self::Largest => FaceSelection::LargestArea,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OnLossArg {
    Halt,
    Skip,
}

impl OnLossArg {
    fn to_core(self) -> DetectionLossPolicy {
        match self {
            Self::Halt => DetectionLossPolicy::Halt,
            Self::Skip => DetectionLossPolicy::Skip,
        }
    }
}

// Exit codes by failure class (0 = success).
const EXIT_GENERIC: u8 = 1;
const EXIT_CONFIG: u8 = 2;
const EXIT_SOURCE: u8 = 3;
const EXIT_INSUFFICIENT_DATA: u8 = 4;
const EXIT_NO_DOMINANT_FREQUENCY: u8 = 5;

enum CliError {
    Pulse(PulseError),
    ReportWrite(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pulse(e) => write!(f, "{}", e),
            Self::ReportWrite(msg) => write!(f, "cannot write report: {}", msg),
        }
    }
}

impl From<PulseError> for CliError {
    fn from(e: PulseError) -> Self {
        Self::Pulse(e)
    }
}

impl From<facepulse::ConfigError> for CliError {
    fn from(e: facepulse::ConfigError) -> Self {
        Self::Pulse(e.into())
    }
}

impl From<facepulse::SourceError> for CliError {
    fn from(e: facepulse::SourceError) -> Self {
        Self::Pulse(e.into())
    }
}

impl CliError {
    fn exit_code(&self) -> u8 {
        match self {
            Self::Pulse(PulseError::Config(_)) => EXIT_CONFIG,
            Self::Pulse(PulseError::Source(_)) => EXIT_SOURCE,
            Self::Pulse(PulseError::Estimate(EstimateError::InsufficientData)) => {
                EXIT_INSUFFICIENT_DATA
            }
            Self::Pulse(PulseError::Estimate(_)) => EXIT_NO_DOMINANT_FREQUENCY,
            Self::ReportWrite(_) => EXIT_GENERIC,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let config = PipelineConfig {
        band: FrequencyBand {
            min_bpm: cli.min_bpm,
            max_bpm: cli.max_bpm,
        },
        selection: cli.select.to_core(),
        on_detection_loss: cli.on_loss.to_core(),
    };
    config.validate()?;

    let mut source = ImageSequenceSource::open(&cli.input, cli.fps)?;

    let mut detector: Box<dyn RegionDetector> = match &cli.detections {
        Some(path) => Box::new(PrecomputedDetections::from_json_file(path)?),
        None => {
            tracing::info!("No detection track given; using center-region fallback");
            Box::new(CenterRegionDetector)
        }
    };

    let report = measure(&mut source, detector.as_mut(), &config)?;

    if let Some(out) = &cli.out {
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| CliError::ReportWrite(e.to_string()))?;
        std::fs::write(out, &json)
            .map_err(|e| CliError::ReportWrite(format!("{}: {}", out.display(), e)))?;
        tracing::info!("Report written to {}", out.display());
    }

    println!("Heart rate: {:.1} BPM", report.estimate.bpm);
    Ok(())
}
