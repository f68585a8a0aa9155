/// Data layer: listing model, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Dataset   │  Vec<Record>, observed ranges and categories
///   └──────────┘
///        │            ┌──────────┐
///        ▼            │ criteria  │  CriteriaDraft → FilterCriteria
///   ┌──────────┐ ◄────┴──────────┘
///   │  filter   │  apply predicates → FilteredView | EmptyResult
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ aggregate │  count, means, per-brand / per-year means
///   └──────────┘
/// ```

pub mod aggregate;
pub mod criteria;
pub mod filter;
pub mod loader;
pub mod model;
