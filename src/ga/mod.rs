//! Memetic genetic algorithm for graph coloring.
//!
//! - [`gpx_crossover`] / [`split_crossover`] — Recombination operators
//! - [`select_survivors`] — Elitist 2-vs-2 tournament
//! - [`GenerationManager`] — Parallel pairwise breeding of one generation
//! - [`Experiment`] — Driver looping generations until convergence
//! - [`ExperimentConfig`] — Serializable run parameters
//! - [`FitnessHistory`] — Best/average history flushed to a [`HistorySink`]

mod config;
mod crossover;
mod experiment;
mod generation;
mod history;
mod selection;

pub use config::ExperimentConfig;
pub use crossover::{gpx_crossover, split_crossover, ClusterSelection, CrossoverKind};
pub use experiment::{DriverState, EvolutionResult, Experiment};
pub use generation::{GenerationManager, GenerationReport};
pub use history::{FitnessHistory, HistoryBatch, HistorySink, JsonLinesSink, MemorySink, NullSink};
pub use selection::select_survivors;
