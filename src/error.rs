use std::path::PathBuf;

use lowess::prelude::LowessError;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Load-time errors (fatal)
// ---------------------------------------------------------------------------

/// Failure to turn a source file into a wide table. There is no recovery:
/// the viewer cannot start without data.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("{}: expected a time column and at least one subject column, found {found} column(s)", path.display())]
    TooFewColumns { path: PathBuf, found: usize },

    #[error("{}: duplicate column name '{name}'", path.display())]
    DuplicateColumn { path: PathBuf, name: String },

    /// Unreadable or malformed source; the chain carries row/column context.
    #[error(transparent)]
    Read(#[from] anyhow::Error),
}

// ---------------------------------------------------------------------------
// Request errors
// ---------------------------------------------------------------------------

/// A selection named subjects that are not in the registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown subject(s): {}", .unknown.join(", "))]
pub struct InvalidSelection {
    /// The offending identifiers, in request order.
    pub unknown: Vec<String>,
}

/// Numerical failure of the local-regression fit for one subject.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SmoothingError {
    #[error("x has {x_len} values but y has {y_len}")]
    MismatchedInputs { x_len: usize, y_len: usize },

    #[error("non-finite input at index {index}")]
    NonFiniteInput { index: usize },

    #[error("x values are not sorted ascending at index {index}")]
    Unsorted { index: usize },

    #[error("smoothing fraction must be in (0, 1], got {0}")]
    InvalidFraction(f64),

    #[error("fit produced a non-finite value at x = {x}")]
    NonFiniteFit { x: f64 },

    #[error("LOWESS fit failed: {0}")]
    Fit(LowessError),
}

impl From<LowessError> for SmoothingError {
    fn from(err: LowessError) -> Self {
        match err {
            LowessError::InvalidFraction(fraction) => Self::InvalidFraction(fraction),
            LowessError::MismatchedInputs { x_len, y_len } => {
                Self::MismatchedInputs { x_len, y_len }
            }
            other => Self::Fit(other),
        }
    }
}
