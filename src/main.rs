//! Tumour growth kinetics viewer.
//!
//! Loads a wide table of tumour volumes (time column first, one column per
//! subject) once at startup and shows raw or LOWESS-smoothed growth curves
//! with the treatment windows shaded.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use tumour_kinetics::state::AppState;
use tumour_kinetics::{app, load_dataset, ChartConfig, CurveMode};

/// Interactive tumour growth kinetics chart
#[derive(Parser, Debug)]
#[command(name = "tumour-kinetics")]
#[command(about = "Interactive tumour growth kinetics chart with LOWESS smoothing")]
#[command(version)]
struct Args {
    /// Measurement table (.csv, .xlsx, .json or .parquet); asks with a file dialog if omitted
    data: Option<PathBuf>,

    /// Chart configuration (JSON): dashed subjects, treatment windows, smoothing, layout
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Initial curve type: raw or smoothed
    #[arg(short, long, default_value = "smoothed")]
    mode: CurveMode,

    /// Initially selected subject (repeatable); all subjects if omitted
    #[arg(short, long = "subject")]
    subjects: Vec<String>,

    /// Window width
    #[arg(long, default_value = "1200")]
    width: f32,

    /// Window height
    #[arg(long, default_value = "900")]
    height: f32,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => ChartConfig::load(path)?,
        None => ChartConfig::default(),
    };

    let path = match args.data {
        Some(path) => path,
        None => pick_data_file().context("no measurement table selected")?,
    };

    let dataset = load_dataset(&path)
        .with_context(|| format!("failed to load {}", path.display()))?;

    let mut state = AppState::new(dataset, config.into_pipeline(), args.mode);
    if !args.subjects.is_empty() {
        // A bad initial selection is reported and the default one kept.
        if let Err(e) = state.set_selection(args.subjects) {
            log::warn!("Ignoring --subject: {e}");
        }
    }

    log::info!(
        "Starting viewer: {} subject(s) selected, {} mode",
        state.selection().len(),
        state.mode()
    );
    app::run(state, args.width, args.height)
        .map_err(|e| anyhow::anyhow!("viewer failed: {e}"))
}

fn pick_data_file() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Open tumour volume table")
        .add_filter("Supported files", &["csv", "xlsx", "xls", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("Excel", &["xlsx", "xls"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file()
}
