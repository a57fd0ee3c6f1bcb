use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use super::reshape::to_long_form;

// ---------------------------------------------------------------------------
// WideTable – one row per time point, one column per subject
// ---------------------------------------------------------------------------

/// A single subject column of the wide table.
#[derive(Debug, Clone, PartialEq)]
pub struct SubjectColumn {
    /// Column header, used as the subject identifier.
    pub name: String,
    /// One cell per row; `None` marks a missing measurement.
    pub values: Vec<Option<f64>>,
}

/// The source table as loaded: the first column is the time axis, every
/// other column is a subject.
#[derive(Debug, Clone, PartialEq)]
pub struct WideTable {
    /// Header of the time column (e.g. `"Time (Days)"`).
    pub time_column: String,
    /// Time per row. Rows with a missing time are kept but never reshaped.
    pub times: Vec<Option<f64>>,
    /// Subject columns in declaration order, each `times.len()` long.
    pub subjects: Vec<SubjectColumn>,
}

impl WideTable {
    /// Number of rows (time points).
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Subject column names in declaration order.
    pub fn subject_names(&self) -> impl Iterator<Item = &str> {
        self.subjects.iter().map(|c| c.name.as_str())
    }
}

// ---------------------------------------------------------------------------
// Measurement – one row of the long form
// ---------------------------------------------------------------------------

/// A single non-missing observation: `value` of `subject` at `time`.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    pub time: f64,
    pub subject: String,
    pub value: f64,
}

impl Measurement {
    pub fn new(time: f64, subject: impl Into<String>, value: f64) -> Self {
        Self {
            time,
            subject: subject.into(),
            value,
        }
    }
}

// ---------------------------------------------------------------------------
// SubjectRegistry – the fixed set of known subjects
// ---------------------------------------------------------------------------

/// Distinct subject identifiers of the source table, fixed after load.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubjectRegistry {
    declared: Vec<String>,
    index: BTreeSet<String>,
}

impl SubjectRegistry {
    /// Build from subject names; repeated names are kept once, first
    /// occurrence wins.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut declared = Vec::new();
        let mut index = BTreeSet::new();
        for name in names {
            let name = name.into();
            if index.insert(name.clone()) {
                declared.push(name);
            }
        }
        Self { declared, index }
    }

    pub fn from_table(table: &WideTable) -> Self {
        Self::new(table.subject_names())
    }

    pub fn contains(&self, subject: &str) -> bool {
        self.index.contains(subject)
    }

    /// Subjects in column declaration order.
    pub fn declared(&self) -> &[String] {
        &self.declared
    }

    /// Subjects in lexical order, as listed in the selector.
    pub fn sorted(&self) -> impl Iterator<Item = &String> {
        self.index.iter()
    }

    pub fn len(&self) -> usize {
        self.declared.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declared.is_empty()
    }
}

// ---------------------------------------------------------------------------
// TumourDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// Everything derived from the source file at startup. Read-only for the
/// rest of the process lifetime.
#[derive(Debug, Clone)]
pub struct TumourDataset {
    /// Where the table was loaded from.
    pub source: PathBuf,
    pub table: WideTable,
    /// Long form of `table`, in (subject, row) order.
    pub measurements: Vec<Measurement>,
    pub registry: SubjectRegistry,
}

impl TumourDataset {
    /// Reshape the table and derive the registry.
    pub fn from_table(source: &Path, table: WideTable) -> Self {
        let measurements = to_long_form(&table);
        let registry = SubjectRegistry::from_table(&table);
        TumourDataset {
            source: source.to_path_buf(),
            table,
            measurements,
            registry,
        }
    }

    /// Number of measurements after reshaping.
    pub fn len(&self) -> usize {
        self.measurements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.measurements.is_empty()
    }
}
