//! Local search operators for repairing colorings.
//!
//! - [`VertexDescent`] — Full neighbor scan in node order
//! - [`SampledVertexDescent`] — Random visit order, sampled neighbors
//! - [`improve`] — Sweep driver with the no-improvement stopping rule
//! - [`LocalSearchConfig`] — Serializable strategy selection

mod descent;
mod vertex_descent;

pub use descent::{improve, LocalSearchConfig, LocalSearchOutcome, StrategyKind};
pub use vertex_descent::{SampledVertexDescent, VertexDescent};

use rand::Rng;

use crate::models::Coloring;

/// One sweep of a local search over all vertices.
///
/// Implementations recolor vertices in place; the caller decides when to
/// stop and whether to keep the result.
pub trait LocalSearchStrategy: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Performs one pass over the coloring.
    fn sweep<R: Rng>(&self, coloring: &mut Coloring, rng: &mut R);
}
