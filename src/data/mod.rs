/// Data layer: sample types and season loading.
///
/// Architecture:
/// ```text
///  season A .csv      season B .csv
///        │                  │
///        ▼                  ▼
///   ┌────────────────────────────┐
///   │  loader  (joined threads)  │  parse rows → Series
///   └────────────────────────────┘
///                 │
///                 ▼
///   ┌────────────────────────────┐
///   │  model   Series ×2         │  validated, date-ordered samples
///   └────────────────────────────┘
/// ```

pub mod loader;
pub mod model;
