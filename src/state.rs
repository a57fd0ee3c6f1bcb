use crate::chart::{ChartDescription, ChartPipeline};
use crate::color::SubjectColors;
use crate::curve::CurveMode;
use crate::data::model::TumourDataset;
use crate::error::InvalidSelection;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Dataset loaded at startup; never replaced.
    pub dataset: TumourDataset,

    pipeline: ChartPipeline,

    /// Selected subjects in the order they were picked.
    selection: Vec<String>,

    mode: CurveMode,

    /// Chart for the current selection and mode.
    pub chart: ChartDescription,

    /// Subjects dropped from the current chart, with the reason.
    pub warnings: Vec<String>,

    /// Subject colours, fixed for the session.
    pub colors: SubjectColors,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Start with every subject selected (sorted) in `mode`.
    pub fn new(dataset: TumourDataset, pipeline: ChartPipeline, mode: CurveMode) -> Self {
        let selection: Vec<String> = dataset.registry.sorted().cloned().collect();
        let colors = SubjectColors::new(&dataset.registry);
        let chart = ChartDescription::empty(pipeline.assembler().layout().clone());

        let mut state = Self {
            dataset,
            pipeline,
            selection,
            mode,
            chart,
            warnings: Vec::new(),
            colors,
            status_message: None,
        };
        state.refresh();
        state
    }

    pub fn selection(&self) -> &[String] {
        &self.selection
    }

    pub fn mode(&self) -> CurveMode {
        self.mode
    }

    pub fn is_dashed(&self, subject: &str) -> bool {
        self.pipeline.assembler().styles().is_dashed(subject)
    }

    pub fn is_selected(&self, subject: &str) -> bool {
        self.selection.iter().any(|s| s == subject)
    }

    /// Replace the selection. Unknown subjects reject the request and leave
    /// the current chart on screen.
    pub fn set_selection(&mut self, selection: Vec<String>) -> Result<(), InvalidSelection> {
        let outcome = match self.pipeline.render(&self.dataset, &selection, self.mode) {
            Ok(outcome) => outcome,
            Err(e) => {
                self.reject(e.clone());
                return Err(e);
            }
        };
        self.selection = selection;
        self.apply(outcome.chart, outcome.warnings.iter().map(ToString::to_string).collect());
        Ok(())
    }

    /// Toggle a single subject; newly added subjects go last.
    pub fn toggle_subject(&mut self, subject: &str) {
        if let Some(pos) = self.selection.iter().position(|s| s == subject) {
            self.selection.remove(pos);
        } else {
            self.selection.push(subject.to_string());
        }
        self.refresh();
    }

    /// Select every subject, sorted.
    pub fn select_all(&mut self) {
        self.selection = self.dataset.registry.sorted().cloned().collect();
        self.refresh();
    }

    /// Deselect everything.
    pub fn select_none(&mut self) {
        self.selection.clear();
        self.refresh();
    }

    pub fn set_mode(&mut self, mode: CurveMode) {
        if self.mode != mode {
            self.mode = mode;
            self.refresh();
        }
    }

    /// Recompute the chart for the current selection and mode.
    pub fn refresh(&mut self) {
        match self.pipeline.render(&self.dataset, &self.selection, self.mode) {
            Ok(outcome) => {
                let warnings = outcome.warnings.iter().map(ToString::to_string).collect();
                self.apply(outcome.chart, warnings);
            }
            Err(e) => self.reject(e),
        }
    }

    fn apply(&mut self, chart: ChartDescription, warnings: Vec<String>) {
        self.chart = chart;
        self.warnings = warnings;
        self.status_message = None;
    }

    fn reject(&mut self, e: InvalidSelection) {
        log::error!("Rejected selection: {e}");
        self.status_message = Some(format!("Error: {e}"));
    }
}
