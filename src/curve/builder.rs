use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use anyhow::bail;

use super::lowess::Lowess;
use crate::data::model::{Measurement, SubjectRegistry};
use crate::error::{InvalidSelection, SmoothingError};

/// Below this many measurements a subject is always drawn raw.
const MIN_POINTS_FOR_SMOOTHING: usize = 3;

// ---------------------------------------------------------------------------
// CurveMode
// ---------------------------------------------------------------------------

/// How each selected subject is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CurveMode {
    /// Observed points, lines + markers.
    Raw,
    /// LOWESS curve, line only.
    #[default]
    Smoothed,
}

impl fmt::Display for CurveMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurveMode::Raw => write!(f, "raw"),
            CurveMode::Smoothed => write!(f, "smoothed"),
        }
    }
}

impl FromStr for CurveMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "raw" => Ok(CurveMode::Raw),
            "smoothed" | "smooth" | "lowess" => Ok(CurveMode::Smoothed),
            other => bail!("unknown curve mode '{other}' (expected 'raw' or 'smoothed')"),
        }
    }
}

// ---------------------------------------------------------------------------
// Curve – one subject's points, before styling
// ---------------------------------------------------------------------------

/// Plottable points for one subject.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    pub subject: String,
    /// `(time, volume)` pairs, non-decreasing in time.
    pub points: Vec<(f64, f64)>,
    /// Legend label: the subject, or `"<subject> (smoothed)"`.
    pub label: String,
    /// Raw observations are drawn with markers, smoothed curves without.
    pub markers: bool,
}

/// A subject whose curve could not be computed.
#[derive(Debug, Clone, PartialEq)]
pub struct SubjectFailure {
    pub subject: String,
    pub error: SmoothingError,
}

impl fmt::Display for SubjectFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.subject, self.error)
    }
}

/// Result of one build: the curves that succeeded, in request order, and
/// the subjects that were dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CurveSet {
    pub curves: Vec<Curve>,
    pub failures: Vec<SubjectFailure>,
}

// ---------------------------------------------------------------------------
// CurveBuilder
// ---------------------------------------------------------------------------

/// Turns long-form measurements into one curve per requested subject.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CurveBuilder {
    smoother: Lowess,
}

impl CurveBuilder {
    pub fn new(smoother: Lowess) -> Self {
        Self { smoother }
    }

    /// Build curves for `selection` in request order.
    ///
    /// Unknown subjects reject the whole request. A smoothing failure only
    /// drops the affected subject, which is reported in
    /// [`CurveSet::failures`].
    pub fn build<S: AsRef<str>>(
        &self,
        measurements: &[Measurement],
        registry: &SubjectRegistry,
        selection: &[S],
        mode: CurveMode,
    ) -> Result<CurveSet, InvalidSelection> {
        validate_selection(registry, selection)?;

        let mut seen = BTreeSet::new();
        let mut set = CurveSet::default();
        for subject in selection.iter().map(AsRef::as_ref) {
            if !seen.insert(subject) {
                continue;
            }
            match self.curve_for(measurements, subject, mode) {
                Ok(curve) => set.curves.push(curve),
                Err(error) => set.failures.push(SubjectFailure {
                    subject: subject.to_string(),
                    error,
                }),
            }
        }
        Ok(set)
    }

    /// Curve for a single subject. Subjects with two or fewer measurements
    /// are returned raw even in smoothed mode.
    pub fn curve_for(
        &self,
        measurements: &[Measurement],
        subject: &str,
        mode: CurveMode,
    ) -> Result<Curve, SmoothingError> {
        let points = sorted_points(measurements, subject);

        if mode == CurveMode::Raw || points.len() < MIN_POINTS_FOR_SMOOTHING {
            return Ok(Curve {
                subject: subject.to_string(),
                points,
                label: subject.to_string(),
                markers: true,
            });
        }

        let (x, y): (Vec<f64>, Vec<f64>) = points.into_iter().unzip();
        let fitted = self.smoother.fit(&x, &y)?;
        Ok(Curve {
            subject: subject.to_string(),
            points: x.into_iter().zip(fitted).collect(),
            label: format!("{subject} (smoothed)"),
            markers: false,
        })
    }
}

/// Reject selections naming subjects outside the registry.
pub fn validate_selection<S: AsRef<str>>(
    registry: &SubjectRegistry,
    selection: &[S],
) -> Result<(), InvalidSelection> {
    let unknown: Vec<String> = selection
        .iter()
        .map(AsRef::as_ref)
        .filter(|s| !registry.contains(s))
        .map(str::to_string)
        .collect();
    if unknown.is_empty() {
        Ok(())
    } else {
        Err(InvalidSelection { unknown })
    }
}

/// The subject's `(time, value)` pairs, stably sorted by time so equal times
/// keep their source order.
fn sorted_points(measurements: &[Measurement], subject: &str) -> Vec<(f64, f64)> {
    let mut points: Vec<(f64, f64)> = measurements
        .iter()
        .filter(|m| m.subject == subject)
        .map(|m| (m.time, m.value))
        .collect();
    points.sort_by(|a, b| a.0.total_cmp(&b.0));
    points
}
