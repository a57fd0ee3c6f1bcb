//! Curve layer: per-subject point series, raw or LOWESS-smoothed.
//!
//! ```text
//!   Vec<Measurement> + selection + CurveMode
//!        │
//!        ▼
//!   ┌──────────┐   filter by subject, stable sort by time
//!   │ builder   │──────────────────────────────────────────┐
//!   └──────────┘                                           │ n > 2 && Smoothed
//!        │                                                  ▼
//!        │                                            ┌──────────┐
//!        │                                            │  lowess   │
//!        ▼                                            └──────────┘
//!   CurveSet { curves, failures }
//! ```

pub mod builder;
pub mod lowess;

pub use builder::{Curve, CurveBuilder, CurveMode, CurveSet, SubjectFailure};
pub use lowess::Lowess;
