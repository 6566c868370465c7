//! One generation of the memetic GA.
//!
//! The population is shuffled and split into adjacent pairs. Each pair is
//! bred independently on the rayon pool: two crossovers, local search on
//! both children (run concurrently), then the elitist 2-vs-2 tournament.
//! Pairs share nothing but the best-fitness scalar; every other statistic is
//! computed after all pairs have finished.

use parking_lot::Mutex;
use rand::Rng;
use rayon::prelude::*;

use super::config::ExperimentConfig;
use super::crossover::{gpx_crossover, split_crossover, ClusterSelection, CrossoverKind};
use super::selection::select_survivors;
use crate::diagnostics;
use crate::error::{ColoringError, Result};
use crate::local_search::LocalSearchConfig;
use crate::models::{Coloring, Individual};
use crate::random::{create_rng, derive_seeds};

/// Result of one generation.
#[derive(Debug, Clone)]
pub struct GenerationReport {
    /// The next population, same size as the input.
    pub population: Vec<Individual>,
    /// Lowest fitness among the survivors.
    pub best_fitness: usize,
    /// Mean fitness of the survivors.
    pub average_fitness: f64,
    /// Variance of the survivors' fitness.
    pub fitness_variance: f64,
    /// Local search runs performed.
    pub local_search_calls: usize,
    /// Correlation between mean parent fitness and child fitness before
    /// local search.
    pub crossover_correlation: f64,
    /// Same correlation measured after local search.
    pub memetic_correlation: f64,
}

/// What one pair produced.
struct PairOutcome {
    survivors: [Individual; 2],
    parent_mean: f64,
    raw_children: [usize; 2],
    children: [usize; 2],
}

/// Breeds a population into the next one.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use u_coloring::models::{Coloring, Connections, Individual};
/// use u_coloring::ga::{ExperimentConfig, GenerationManager};
/// use u_coloring::random::create_rng;
///
/// let graph = Arc::new(Connections::new(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]).unwrap());
/// let mut rng = create_rng(7);
/// let population: Vec<Individual> = (0..4)
///     .map(|_| Individual::new(Coloring::random(graph.clone(), 2, &mut rng).unwrap()))
///     .collect();
///
/// let manager = GenerationManager::new(&ExperimentConfig::new(2)).unwrap();
/// let report = manager.produce_next_generation(population, &mut rng).unwrap();
/// assert_eq!(report.population.len(), 4);
/// assert_eq!(report.local_search_calls, 4);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct GenerationManager {
    crossover: CrossoverKind,
    cluster_selection: ClusterSelection,
    local_search: LocalSearchConfig,
}

impl GenerationManager {
    /// Takes the operator settings from `config`.
    ///
    /// # Errors
    ///
    /// Returns the first error reported by [`ExperimentConfig::validate`].
    pub fn new(config: &ExperimentConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            crossover: config.crossover,
            cluster_selection: config.cluster_selection,
            local_search: config.local_search,
        })
    }

    /// Shuffles, pairs, breeds, and selects.
    ///
    /// # Errors
    ///
    /// Returns [`ColoringError::InvalidPopulationSize`] for an odd or empty
    /// population.
    pub fn produce_next_generation<R: Rng>(
        &self,
        mut population: Vec<Individual>,
        rng: &mut R,
    ) -> Result<GenerationReport> {
        let n = population.len();
        if n < 2 || n % 2 != 0 {
            return Err(ColoringError::InvalidPopulationSize(n));
        }

        shuffle(&mut population, rng);
        let seeds = derive_seeds(rng, n / 2);

        let mut pairs = Vec::with_capacity(n / 2);
        let mut members = population.into_iter();
        while let (Some(a), Some(b)) = (members.next(), members.next()) {
            pairs.push((a, b));
        }

        let best = Mutex::new(usize::MAX);
        let outcomes: Vec<PairOutcome> = pairs
            .into_par_iter()
            .zip(seeds)
            .map(|((p1, p2), seed)| {
                let outcome = self.breed_pair(p1, p2, seed);
                let pair_best = outcome.survivors[0].fitness();
                let mut guard = best.lock();
                if pair_best < *guard {
                    *guard = pair_best;
                }
                outcome
            })
            .collect();

        let best_fitness = best.into_inner();
        let mut parent_means = Vec::with_capacity(n);
        let mut raw = Vec::with_capacity(n);
        let mut improved = Vec::with_capacity(n);
        let mut next = Vec::with_capacity(n);
        for outcome in outcomes {
            for i in 0..2 {
                parent_means.push(outcome.parent_mean);
                raw.push(outcome.raw_children[i] as f64);
                improved.push(outcome.children[i] as f64);
            }
            next.extend(outcome.survivors);
        }

        let fitness: Vec<f64> = next.iter().map(|ind| ind.fitness() as f64).collect();
        Ok(GenerationReport {
            population: next,
            best_fitness,
            average_fitness: diagnostics::mean(&fitness),
            fitness_variance: diagnostics::variance(&fitness),
            local_search_calls: n,
            crossover_correlation: diagnostics::correlation(&parent_means, &raw),
            memetic_correlation: diagnostics::correlation(&parent_means, &improved),
        })
    }

    /// Full pipeline for one pair, driven by its own generator.
    fn breed_pair(&self, p1: Individual, p2: Individual, seed: u64) -> PairOutcome {
        let mut rng = create_rng(seed);
        let parent_mean = (p1.fitness() + p2.fitness()) as f64 / 2.0;

        let mut c1 = self.crossover(p1.coloring(), p2.coloring(), &mut rng);
        let mut c2 = self.crossover(p1.coloring(), p2.coloring(), &mut rng);
        let raw_children = [c1.conflict_count(), c2.conflict_count()];

        let (s1, s2) = (rng.random::<u64>(), rng.random::<u64>());
        let ls = self.local_search;
        let (o1, o2) = rayon::join(
            || ls.run(&mut c1, &mut create_rng(s1)),
            || ls.run(&mut c2, &mut create_rng(s2)),
        );

        let children = [o1.final_fitness, o2.final_fitness];
        log::trace!(
            "pair parents ({}, {}) -> children ({}, {}) after local search ({}, {})",
            p1.fitness(),
            p2.fitness(),
            raw_children[0],
            raw_children[1],
            children[0],
            children[1]
        );

        let survivors = select_survivors(
            [p1, p2],
            [
                Individual::from_parts(c1, o1.final_fitness),
                Individual::from_parts(c2, o2.final_fitness),
            ],
        );

        PairOutcome {
            survivors,
            parent_mean,
            raw_children,
            children,
        }
    }

    fn crossover<R: Rng>(&self, p1: &Coloring, p2: &Coloring, rng: &mut R) -> Coloring {
        match self.crossover {
            CrossoverKind::Gpx => {
                let randomized = self.cluster_selection.draw(rng);
                gpx_crossover(p1, p2, randomized, rng)
            }
            CrossoverKind::SinglePoint => split_crossover(p1, p2, rng),
        }
    }
}

/// Knuth shuffle: position `t` swaps with a uniform index in `[t, n)`.
fn shuffle<T, R: Rng>(items: &mut [T], rng: &mut R) {
    let n = items.len();
    for t in 0..n {
        let r = rng.random_range(t..n);
        items.swap(t, r);
    }
}
