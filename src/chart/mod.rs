//! Chart layer: styling, annotation bands, assembly, and the per-request
//! pipeline that ties them to the curve builder.

pub mod annotation;
pub mod assembler;
pub mod layout;
pub mod style;

pub use annotation::{AnnotationProvider, Band};
pub use assembler::{ChartAssembler, ChartDescription, Series};
pub use layout::{BandStyle, HoverMode, Layout, Margin};
pub use style::{LineStyle, StyleResolver};

use crate::config::ChartConfig;
use crate::curve::{CurveBuilder, CurveMode, SubjectFailure};
use crate::data::model::TumourDataset;
use crate::error::InvalidSelection;

/// A rendered chart plus the subjects that had to be left out of it.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOutcome {
    pub chart: ChartDescription,
    pub warnings: Vec<SubjectFailure>,
}

/// Curve builder and chart assembler, run once per selection/mode change.
/// Nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct ChartPipeline {
    builder: CurveBuilder,
    assembler: ChartAssembler,
}

impl Default for ChartPipeline {
    /// The standard chart: default dashed subjects, treatment windows,
    /// smoothing and layout.
    fn default() -> Self {
        ChartConfig::default().into_pipeline()
    }
}

impl ChartPipeline {
    pub fn new(builder: CurveBuilder, assembler: ChartAssembler) -> Self {
        Self { builder, assembler }
    }

    pub fn assembler(&self) -> &ChartAssembler {
        &self.assembler
    }

    /// Build the chart for `selection` drawn in `mode`.
    pub fn render<S: AsRef<str>>(
        &self,
        dataset: &TumourDataset,
        selection: &[S],
        mode: CurveMode,
    ) -> Result<RenderOutcome, InvalidSelection> {
        let set = self
            .builder
            .build(&dataset.measurements, &dataset.registry, selection, mode)?;

        for failure in &set.failures {
            log::warn!("Dropped {failure}");
        }

        let chart = self.assembler.assemble(set.curves);
        log::debug!(
            "Rendered {} series ({mode}), {} band(s), {} dropped",
            chart.series.len(),
            chart.bands.len(),
            set.failures.len()
        );

        Ok(RenderOutcome {
            chart,
            warnings: set.failures,
        })
    }
}
