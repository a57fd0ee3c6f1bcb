//! Chart configuration: which subjects are dashed, where the treatment
//! windows are, smoothing parameters and layout.
//!
//! Every field has a default, so an empty JSON object (or no file at all)
//! gives the standard tumour-growth chart.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::chart::{AnnotationProvider, Band, ChartAssembler, ChartPipeline, Layout, StyleResolver};
use crate::curve::lowess::{DEFAULT_FRACTION, DEFAULT_ITERATIONS};
use crate::curve::{CurveBuilder, Lowess};

/// Top-level configuration (JSON).
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Subjects drawn with dashed lines.
    pub dashed_subjects: Vec<String>,
    /// Shaded background bands, in days.
    pub treatment_windows: Vec<Band>,
    pub smoothing: SmoothingConfig,
    pub layout: Layout,
}

/// LOWESS parameters.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SmoothingConfig {
    /// Share of the points used for each local fit, in (0, 1].
    pub fraction: f64,
    /// Robustness re-weighting passes.
    pub iterations: usize,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            fraction: DEFAULT_FRACTION,
            iterations: DEFAULT_ITERATIONS,
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            dashed_subjects: ["TP1-PT", "TP2-PT", "TP3-V", "TP5-V"]
                .into_iter()
                .map(String::from)
                .collect(),
            treatment_windows: vec![Band::new(37.0, 57.0), Band::new(65.0, 85.0)],
            smoothing: SmoothingConfig::default(),
            layout: Layout::default(),
        }
    }
}

impl ChartConfig {
    /// Read and validate a JSON configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: ChartConfig = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("invalid config {}", path.display()))?;
        log::info!("Loaded chart configuration from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let fraction = self.smoothing.fraction;
        if !(fraction > 0.0 && fraction <= 1.0) {
            bail!("smoothing.fraction must be in (0, 1], got {fraction}");
        }
        for (i, band) in self.treatment_windows.iter().enumerate() {
            if !band.start.is_finite() || !band.end.is_finite() {
                bail!("treatment_windows[{i}] has a non-finite bound");
            }
            if band.start > band.end {
                bail!(
                    "treatment_windows[{i}] starts after it ends ({} > {})",
                    band.start,
                    band.end
                );
            }
        }
        if !(self.layout.height > 0.0) {
            bail!("layout.height must be positive, got {}", self.layout.height);
        }
        if !(0.0..=1.0).contains(&self.layout.band_style.opacity) {
            bail!(
                "layout.band_style.opacity must be in [0, 1], got {}",
                self.layout.band_style.opacity
            );
        }
        Ok(())
    }

    /// Build the render pipeline from these values.
    pub fn into_pipeline(self) -> ChartPipeline {
        let builder = CurveBuilder::new(Lowess::new(
            self.smoothing.fraction,
            self.smoothing.iterations,
        ));
        let assembler = ChartAssembler::new(
            StyleResolver::new(self.dashed_subjects),
            AnnotationProvider::new(self.treatment_windows),
            self.layout,
        );
        ChartPipeline::new(builder, assembler)
    }
}
