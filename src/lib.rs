//! # u-coloring
//!
//! Graph k-coloring with a memetic genetic algorithm: greedy partition
//! crossover, vertex descent local search, and elitist survivor selection,
//! with pairs bred in parallel.
//!
//! ## Modules
//!
//! - [`models`] — Graph structure, colorings, and scored individuals
//! - [`dimacs`] — DIMACS `.col` graph reader
//! - [`local_search`] — Vertex descent repair strategies
//! - [`ga`] — Crossover, selection, generation manager, and driver
//! - [`diagnostics`] — Statistics for per-generation logging
//! - [`random`] — Seeded per-task random generators
//! - [`error`] — Error type

pub mod diagnostics;
pub mod dimacs;
pub mod error;
pub mod ga;
pub mod local_search;
pub mod models;
pub mod random;

pub use error::{ColoringError, Result};
