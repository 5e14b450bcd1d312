//! # Projection Risk Analytics
//!
//! This crate turns a finished projection into the figures a reader acts on:
//! headline KPIs, a liquidation-risk classification, human-readable warnings
//! and a chartable equity/price/ROI series.
//!
//! ## Architectural Principles
//!
//! - **Pure logic:** no knowledge of rendering or export. It depends only on
//!   `core-types` and the `RiskThresholds` from `configuration`.
//! - **Stateless calculation:** the `AnalyticsEngine` holds thresholds only,
//!   takes a result as input and produces a `RiskReport`.
//!
//! ## Public API
//!
//! - `AnalyticsEngine`: the calculator.
//! - `RiskReport`: the report, with `DistanceLevel`, `RiskWarning` and `SeriesPoint`.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use engine::{AnalyticsEngine, chart_series, max_drawdown_pct};
pub use report::{DistanceLevel, RiskReport, RiskWarning, RiskWarningKind, SeriesPoint};
