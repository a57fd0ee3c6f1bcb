use serde::{Deserialize, Serialize};

/// A shaded interval on the time axis, e.g. a treatment window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub start: f64,
    pub end: f64,
}

impl Band {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, x: f64) -> bool {
        (self.start..=self.end).contains(&x)
    }
}

impl From<(f64, f64)> for Band {
    fn from((start, end): (f64, f64)) -> Self {
        Band::new(start, end)
    }
}

/// Supplies the fixed list of background bands. The list never depends on
/// subject selection or curve mode.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationProvider {
    bands: Vec<Band>,
}

impl AnnotationProvider {
    pub fn new(bands: Vec<Band>) -> Self {
        Self { bands }
    }

    pub fn bands(&self) -> &[Band] {
        &self.bands
    }
}
