/// Data layer: models, loading, normalization, filtering, and export.
///
/// Two linear pipelines, one per tab:
/// ```text
///  gdp_data.csv (EUC-KR, wide)          fixed literal records
///        │                                     │
///        ▼                                     ▼
///   ┌──────────┐                        ┌───────────┐
///   │  loader   │ decode + parse        │ disaster  │ 13-row table,
///   └──────────┘ (fallback on error)    └───────────┘ process-wide cache
///        │                                     │
///        ▼                                     │
///   ┌───────────┐                              │
///   │ normalize │ wide years → {date, gdp}     │
///   └───────────┘                              │
///        │                                     │
///        ▼                                     ▼
///   ┌──────────┐  year range + smoothing  /  event set
///   │  filter   │ ───────────────────────────────────▶ views
///   └──────────┘                                       │
///        ▲                                             ▼
///   ┌──────────┐                                 ┌──────────┐
///   │  cache    │ TTL memoization of the load    │  export   │ BOM + CSV
///   └──────────┘                                 └──────────┘
/// ```
pub mod cache;
pub mod disaster;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod normalize;
