//! Locally weighted scatterplot smoothing (Cleveland 1979).
//!
//! Thin adapter over the `lowess` crate, configured to reproduce the classic
//! `lowess`/`clowess` results:
//!
//! * tricube neighbourhood weights over `fraction · n` nearest points
//! * bisquare robustness weights scaled by the median absolute residual
//! * no boundary padding and no delta interpolation (every point is fitted)
//! * a point whose neighbourhood carries no weight keeps its observed value
//!
//! ## Invariants
//!
//! * Input x is sorted ascending; output has one fitted value per input
//!   point, in input order.
//! * Tied x values receive identical fitted values.

use lowess::prelude::{
    Batch, Bisquare, Lowess as LowessModel, NoBoundary, ReturnOriginal, Tricube, MAR,
};

use crate::error::SmoothingError;

/// Span fraction used by the tumour-volume chart.
pub const DEFAULT_FRACTION: f64 = 0.35;

/// Robustness re-weighting passes after the initial fit.
pub const DEFAULT_ITERATIONS: usize = 3;

/// LOWESS smoother with a fixed span fraction and iteration count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lowess {
    fraction: f64,
    iterations: usize,
}

impl Default for Lowess {
    fn default() -> Self {
        Self {
            fraction: DEFAULT_FRACTION,
            iterations: DEFAULT_ITERATIONS,
        }
    }
}

impl Lowess {
    pub fn new(fraction: f64, iterations: usize) -> Self {
        Self {
            fraction,
            iterations,
        }
    }

    /// Smooth `y` against ascending `x`, returning one fitted value per point.
    pub fn fit(&self, x: &[f64], y: &[f64]) -> Result<Vec<f64>, SmoothingError> {
        validate(x, y)?;

        let model = LowessModel::new()
            .fraction(self.fraction)
            .iterations(self.iterations)
            .delta(0.0)
            .weight_function(Tricube)
            .robustness_method(Bisquare)
            .scaling_method(MAR)
            .boundary_policy(NoBoundary)
            .zero_weight_fallback(ReturnOriginal)
            .adapter(Batch)
            .build()?;

        // A single point is its own fit.
        if x.len() < 2 {
            return Ok(y.to_vec());
        }

        let fitted = model.fit(x, y)?.y;
        if let Some(i) = fitted.iter().position(|v| !v.is_finite()) {
            return Err(SmoothingError::NonFiniteFit { x: x[i] });
        }
        Ok(fitted)
    }
}

fn validate(x: &[f64], y: &[f64]) -> Result<(), SmoothingError> {
    if x.len() != y.len() {
        return Err(SmoothingError::MismatchedInputs {
            x_len: x.len(),
            y_len: y.len(),
        });
    }
    if let Some(index) = x
        .iter()
        .zip(y)
        .position(|(xi, yi)| !xi.is_finite() || !yi.is_finite())
    {
        return Err(SmoothingError::NonFiniteInput { index });
    }
    if let Some(index) = x.windows(2).position(|w| w[1] < w[0]) {
        return Err(SmoothingError::Unsorted { index: index + 1 });
    }
    Ok(())
}
