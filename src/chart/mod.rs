/// Chart layer: layout, scales, and the model the overlay queries.
///
/// ```text
///   Series A, Series B
///          │
///          ▼
///   ┌─────────────┐   ChartConfig (canvas, margins)
///   │ ChartModel  │◄──────────────
///   └─────────────┘
///     │  TimeScale / LinearScale   → line paths, axes
///     │  CombinedIndex (bisection) → hover marker
/// ```

pub mod config;
pub mod model;
pub mod scale;
