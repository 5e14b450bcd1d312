//! # Rolling Projection Engine
//!
//! Deterministic step-wise projection of a leveraged long position that is
//! closed and re-opened on its full equity every time price grows by a fixed
//! fraction.
//!
//! ## Architectural Principles
//!
//! - **Pure calculation:** `simulate` reads a `SimulationParameters` and
//!   returns a fresh `SimulationResult`. No shared state and no I/O, so it can
//!   be called from any number of threads at once.
//! - **Total on valid input:** numeric degeneracy (zero prices, overflowing
//!   growth) shows up as non-finite values in the result instead of errors.
//!   Validation happens before the engine is called.
//!
//! ## Public API
//!
//! - `simulate`: runs one projection.
//! - `price_path`, `liquidation_price`, `liquidation_distance_pct`: the
//!   building blocks, exposed for consumers that chart or explain a run.

pub mod engine;

pub use engine::{liquidation_distance_pct, liquidation_price, price_path, simulate};
