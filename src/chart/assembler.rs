use super::annotation::{AnnotationProvider, Band};
use super::layout::Layout;
use super::style::StyleResolver;
use crate::curve::Curve;

// ---------------------------------------------------------------------------
// Chart description – the renderer's input
// ---------------------------------------------------------------------------

/// One styled line of the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub subject: String,
    /// `(x, y)` pairs, non-decreasing in x.
    pub points: Vec<(f64, f64)>,
    pub label: String,
    pub dashed: bool,
    /// Draw point markers in addition to the line.
    pub markers: bool,
}

/// Everything the renderer needs to draw one chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartDescription {
    pub series: Vec<Series>,
    pub bands: Vec<Band>,
    pub layout: Layout,
}

impl ChartDescription {
    /// A chart with nothing on it: no series, no bands.
    pub fn empty(layout: Layout) -> Self {
        Self {
            series: Vec::new(),
            bands: Vec::new(),
            layout,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Smallest and largest x over all series and bands, if any.
    pub fn x_range(&self) -> Option<(f64, f64)> {
        let xs = self
            .series
            .iter()
            .flat_map(|s| s.points.iter().map(|p| p.0))
            .chain(self.bands.iter().flat_map(|b| [b.start, b.end]));
        xs.fold(None, |acc, x| match acc {
            None => Some((x, x)),
            Some((lo, hi)) => Some((lo.min(x), hi.max(x))),
        })
    }

    /// The point of each series closest in x to `x`, in series order.
    /// Series without points are skipped.
    pub fn points_near(&self, x: f64) -> Vec<(&Series, (f64, f64))> {
        self.series
            .iter()
            .filter_map(|s| {
                s.points
                    .iter()
                    .copied()
                    .min_by(|a, b| (a.0 - x).abs().total_cmp(&(b.0 - x).abs()))
                    .map(|p| (s, p))
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Assembler
// ---------------------------------------------------------------------------

/// Combines curves, line styles and annotation bands into a
/// [`ChartDescription`]. Holds no per-request state.
#[derive(Debug, Clone)]
pub struct ChartAssembler {
    styles: StyleResolver,
    annotations: AnnotationProvider,
    layout: Layout,
}

impl ChartAssembler {
    pub fn new(styles: StyleResolver, annotations: AnnotationProvider, layout: Layout) -> Self {
        Self {
            styles,
            annotations,
            layout,
        }
    }

    pub fn styles(&self) -> &StyleResolver {
        &self.styles
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// An empty selection yields an empty chart: no series and no bands.
    pub fn assemble(&self, curves: Vec<Curve>) -> ChartDescription {
        if curves.is_empty() {
            return ChartDescription::empty(self.layout.clone());
        }

        let series = curves
            .into_iter()
            .map(|curve| Series {
                dashed: self.styles.is_dashed(&curve.subject),
                subject: curve.subject,
                points: curve.points,
                label: curve.label,
                markers: curve.markers,
            })
            .collect();

        ChartDescription {
            series,
            bands: self.annotations.bands().to_vec(),
            layout: self.layout.clone(),
        }
    }
}
