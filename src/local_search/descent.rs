//! Sweep driver shared by all local search strategies.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{LocalSearchStrategy, SampledVertexDescent, VertexDescent};
use crate::error::{ColoringError, Result};
use crate::models::Coloring;

/// Which sweep implementation to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// [`VertexDescent`].
    #[default]
    VertexDescent,
    /// [`SampledVertexDescent`].
    SampledVertexDescent,
}

/// Local search settings.
///
/// # Examples
///
/// ```
/// use u_coloring::local_search::{LocalSearchConfig, StrategyKind};
///
/// let cfg = LocalSearchConfig::default()
///     .with_strategy(StrategyKind::SampledVertexDescent)
///     .with_stagnation_limit(10);
/// assert!(cfg.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalSearchConfig {
    /// Sweep implementation.
    pub strategy: StrategyKind,
    /// Consecutive non-improving sweeps before stopping.
    pub stagnation_limit: usize,
    /// Neighbor fraction for the sampled strategy.
    pub neighbor_fraction: f64,
}

impl Default for LocalSearchConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::VertexDescent,
            stagnation_limit: 20,
            neighbor_fraction: 0.5,
        }
    }
}

impl LocalSearchConfig {
    /// Sets the sweep implementation.
    pub fn with_strategy(mut self, strategy: StrategyKind) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the number of non-improving sweeps tolerated.
    pub fn with_stagnation_limit(mut self, limit: usize) -> Self {
        self.stagnation_limit = limit;
        self
    }

    /// Sets the neighbor fraction for the sampled strategy.
    pub fn with_neighbor_fraction(mut self, fraction: f64) -> Self {
        self.neighbor_fraction = fraction;
        self
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<()> {
        if self.stagnation_limit == 0 {
            return Err(ColoringError::config("stagnation_limit must be at least 1"));
        }
        if !(self.neighbor_fraction > 0.0 && self.neighbor_fraction <= 1.0) {
            return Err(ColoringError::config(format!(
                "neighbor_fraction {} outside (0, 1]",
                self.neighbor_fraction
            )));
        }
        Ok(())
    }

    /// Runs the configured strategy on `coloring`.
    pub fn run<R: Rng>(&self, coloring: &mut Coloring, rng: &mut R) -> LocalSearchOutcome {
        match self.strategy {
            StrategyKind::VertexDescent => {
                improve(&VertexDescent, coloring, self.stagnation_limit, rng)
            }
            StrategyKind::SampledVertexDescent => improve(
                &SampledVertexDescent::new(self.neighbor_fraction),
                coloring,
                self.stagnation_limit,
                rng,
            ),
        }
    }
}

/// Summary of one local search run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalSearchOutcome {
    /// Conflicts on entry.
    pub initial_fitness: usize,
    /// Conflicts of the configuration left in the coloring.
    pub final_fitness: usize,
    /// Sweeps performed.
    pub sweeps: usize,
}

impl LocalSearchOutcome {
    /// Conflicts removed.
    pub fn improvement(&self) -> usize {
        self.initial_fitness - self.final_fitness
    }
}

/// Repeats `strategy` sweeps until `stagnation_limit` consecutive sweeps fail
/// to strictly reduce conflicts, or a proper coloring is reached.
///
/// The best configuration seen is restored before returning, so the final
/// conflict count never exceeds the initial one.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use u_coloring::models::{Coloring, Connections};
/// use u_coloring::local_search::{improve, VertexDescent};
/// use u_coloring::random::create_rng;
///
/// let graph = Arc::new(Connections::new(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]).unwrap());
/// let mut rng = create_rng(42);
/// let mut c = Coloring::random(graph, 2, &mut rng).unwrap();
/// let outcome = improve(&VertexDescent, &mut c, 20, &mut rng);
/// assert!(outcome.final_fitness <= outcome.initial_fitness);
/// assert_eq!(outcome.final_fitness, c.conflict_count());
/// ```
pub fn improve<S, R>(
    strategy: &S,
    coloring: &mut Coloring,
    stagnation_limit: usize,
    rng: &mut R,
) -> LocalSearchOutcome
where
    S: LocalSearchStrategy,
    R: Rng,
{
    let initial = coloring.conflict_count();
    let mut best = initial;
    let mut best_configuration = coloring.configuration();
    let mut current = initial;
    let mut streak = 0;
    let mut sweeps = 0;

    while current > 0 && streak < stagnation_limit {
        let before = current;
        strategy.sweep(coloring, rng);
        sweeps += 1;
        current = coloring.conflict_count();

        if current >= before {
            streak += 1;
        } else {
            streak = 0;
        }
        if current < best {
            best = current;
            best_configuration = coloring.configuration();
        }
    }

    if current > best {
        coloring.overwrite(&best_configuration);
    }

    log::trace!(
        "{}: {} -> {} conflicts in {} sweeps",
        strategy.name(),
        initial,
        best,
        sweeps
    );

    LocalSearchOutcome {
        initial_fitness: initial,
        final_fitness: best,
        sweeps,
    }
}
