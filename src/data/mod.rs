/// Data layer: core types, loading, and reshaping.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → WideTable (time column + subject columns)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  reshape  │  melt → Vec<Measurement>, missing cells dropped
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ TumourDataset │  table, measurements, subject registry
///   └──────────────┘
/// ```

pub mod loader;
pub mod model;
pub mod reshape;
