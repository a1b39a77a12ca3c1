use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::Level;
use voice_origin::audio::{decode_file, write_wav};
use voice_origin::{
    Analysis, AppConfig, DetectionError, ErrorCode, FeatureVector, Indicator, VoiceLabel,
    VoiceOriginDetector,
};

/// Input name that reads the payload from stdin
const STDIN_INPUT: &str = "-";

/// Exit code when at least one input could not be analysed
const EXIT_INPUT_FAILED: u8 = 3;

#[derive(Parser, Debug)]
#[command(
    name = "voice_origin_cli",
    about = "Deterministic HUMAN / AI_GENERATED voice classification for audio files"
)]
struct Cli {
    /// JSON configuration file (defaults to $VOICE_ORIGIN_CONFIG, then built-in values)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Classify one or more audio files ("-" reads stdin)
    Classify {
        #[arg(required = true)]
        inputs: Vec<String>,
        /// Include the extracted feature vector in each report
        #[arg(long)]
        with_features: bool,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print the feature vector of one input (null when silent)
    Features { input: String },
    /// Write the normalized mono analysis clip as 16-bit WAV
    Decode {
        input: PathBuf,
        #[arg(long)]
        output: PathBuf,
    },
    /// Print the active threshold set
    Thresholds,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::from(1)
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = match &cli.config {
        Some(path) => AppConfig::load_from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => AppConfig::load(),
    };

    match cli.command {
        Commands::Classify {
            inputs,
            with_features,
            output,
        } => run_classify(config, inputs, with_features, output),
        Commands::Features { input } => run_features(config, &input),
        Commands::Decode { input, output } => run_decode(config, &input, &output),
        Commands::Thresholds => run_thresholds(config),
    }
}

fn run_classify(
    config: AppConfig,
    inputs: Vec<String>,
    with_features: bool,
    output_path: Option<PathBuf>,
) -> Result<ExitCode> {
    let detector = Arc::new(VoiceOriginDetector::new(config).context("invalid configuration")?);

    // Decode and DSP are CPU-bound; fan out on the blocking pool
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("creating Tokio runtime")?;

    let outcomes = runtime.block_on(async {
        let tasks = inputs.iter().cloned().map(|input| {
            let detector = Arc::clone(&detector);
            tokio::task::spawn_blocking(move || analyze_input(&detector, &input))
        });
        futures::future::join_all(tasks).await
    });

    let mut failed = false;
    let mut reports = Vec::with_capacity(inputs.len());
    for (input, outcome) in inputs.iter().zip(outcomes) {
        let outcome = outcome.with_context(|| format!("analysis task for {} panicked", input))?;
        let report = match outcome {
            Ok(analysis) => Report::success(input, analysis, with_features),
            Err(err) => {
                failed = true;
                tracing::warn!("[voice_origin_cli] {}: {}", input, err);
                Report::failure(input, &err)
            }
        };
        reports.push(report);
    }

    let json = serde_json::to_string_pretty(&reports)?;
    if let Some(path) = output_path {
        fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
    } else {
        println!("{json}");
    }

    if failed {
        Ok(ExitCode::from(EXIT_INPUT_FAILED))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn run_features(config: AppConfig, input: &str) -> Result<ExitCode> {
    let detector = VoiceOriginDetector::new(config).context("invalid configuration")?;
    let analysis =
        analyze_input(&detector, input).with_context(|| format!("analysing {}", input))?;
    println!("{}", serde_json::to_string_pretty(&analysis.features)?);
    Ok(ExitCode::SUCCESS)
}

fn run_decode(config: AppConfig, input: &Path, output: &Path) -> Result<ExitCode> {
    let detector = VoiceOriginDetector::new(config).context("invalid configuration")?;
    let clip = decode_file(input, &detector.config().decoder)
        .with_context(|| format!("decoding {}", input.display()))?;
    write_wav(output, &clip).with_context(|| format!("writing {}", output.display()))?;

    let summary = DecodeSummary {
        output: output.display().to_string(),
        sample_rate: clip.sample_rate(),
        samples: clip.len(),
        duration_secs: clip.duration_secs(),
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(ExitCode::SUCCESS)
}

fn run_thresholds(config: AppConfig) -> Result<ExitCode> {
    let detector = VoiceOriginDetector::new(config).context("invalid configuration")?;
    println!(
        "{}",
        serde_json::to_string_pretty(detector.classifier().thresholds())?
    );
    Ok(ExitCode::SUCCESS)
}

/// Analyse a file path, or stdin for "-"
fn analyze_input(detector: &VoiceOriginDetector, input: &str) -> Result<Analysis, DetectionError> {
    if input == STDIN_INPUT {
        let mut bytes = Vec::new();
        std::io::stdin()
            .read_to_end(&mut bytes)
            .map_err(voice_origin::DecodeError::from)?;
        detector.analyze_bytes(&bytes, None)
    } else {
        detector.analyze_file(input)
    }
}

#[derive(Serialize)]
#[serde(untagged)]
enum Report {
    Success(ClassifyReport),
    Failure(FailureReport),
}

impl Report {
    fn success(input: &str, analysis: Analysis, with_features: bool) -> Self {
        let Analysis {
            result,
            features,
            duration_secs,
        } = analysis;
        Report::Success(ClassifyReport {
            input: input.to_string(),
            classification: result.label,
            confidence_score: result.confidence,
            explanation: result.explanation,
            indicators: result.indicators,
            threshold_version: result.threshold_version,
            duration_secs,
            features: with_features.then_some(features),
        })
    }

    fn failure(input: &str, err: &DetectionError) -> Self {
        Report::Failure(FailureReport {
            input: input.to_string(),
            error: ErrorPayload {
                code: err.code(),
                message: err.message(),
            },
        })
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ClassifyReport {
    input: String,
    classification: VoiceLabel,
    confidence_score: f32,
    explanation: String,
    indicators: Vec<Indicator>,
    threshold_version: u32,
    duration_secs: f32,
    /// Present only with --with-features; null for silent clips
    #[serde(skip_serializing_if = "Option::is_none")]
    features: Option<Option<FeatureVector>>,
}

#[derive(Serialize)]
struct FailureReport {
    input: String,
    error: ErrorPayload,
}

#[derive(Serialize)]
struct ErrorPayload {
    code: i32,
    message: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DecodeSummary {
    output: String,
    sample_rate: u32,
    samples: usize,
    duration_secs: f32,
}
