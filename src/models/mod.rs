//! Domain model types for graph coloring.
//!
//! Provides the shared graph structure, the mutable coloring that the GA
//! evolves, and the scored population member.

mod coloring;
mod connections;
mod individual;

pub use coloring::{Coloring, Vertex, UNASSIGNED};
pub use connections::Connections;
pub use individual::Individual;
