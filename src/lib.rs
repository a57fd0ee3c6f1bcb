//! Tumour growth kinetics: wide measurement tables reshaped into per-subject
//! curves, optionally LOWESS-smoothed, styled and annotated with treatment
//! windows, and drawn in an egui viewer.

pub mod app;
pub mod chart;
pub mod color;
pub mod config;
pub mod curve;
pub mod data;
pub mod error;
pub mod state;
pub mod ui;

pub use chart::{ChartDescription, ChartPipeline, RenderOutcome};
pub use config::ChartConfig;
pub use curve::CurveMode;
pub use data::model::TumourDataset;
pub use error::{InvalidSelection, LoadError, SmoothingError};

use std::path::Path;

/// Load `path`, reshape it and derive the subject registry.
pub fn load_dataset(path: &Path) -> Result<TumourDataset, LoadError> {
    let table = data::loader::load_table(path)?;
    let dataset = TumourDataset::from_table(path, table);
    log::info!(
        "{} measurements for {} subjects",
        dataset.len(),
        dataset.registry.len()
    );
    Ok(dataset)
}
