//! Evolution driver: repeats generations until a proper coloring appears.

use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rayon::prelude::*;

use super::config::ExperimentConfig;
use super::generation::GenerationManager;
use super::history::{FitnessHistory, HistorySink, NullSink};
use crate::error::Result;
use crate::models::{Coloring, Connections, Individual};
use crate::random::{create_rng, derive_seeds, rng_from_option};

/// Where the driver stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    /// Still searching.
    Running,
    /// A zero-conflict coloring was found.
    Converged,
    /// The configured generation cap was reached first.
    GenerationLimit,
}

/// Final report of a run.
#[derive(Debug, Clone)]
pub struct EvolutionResult {
    /// Best coloring in the final population.
    pub best: Coloring,
    /// Its conflict count.
    pub best_fitness: usize,
    /// Generations produced.
    pub generations: usize,
    /// Local search runs, including initialization.
    pub local_search_calls: usize,
    /// Wall time since the experiment was created.
    pub elapsed: Duration,
    /// Terminal state.
    pub state: DriverState,
}

impl EvolutionResult {
    /// Returns `true` if a proper coloring was found.
    pub fn converged(&self) -> bool {
        self.state == DriverState::Converged
    }
}

/// A memetic GA run over one graph.
///
/// Creation builds the initial population (random colorings, each improved
/// by local search). [`step`](Self::step) produces one generation and
/// [`run`](Self::run) loops until convergence or the generation cap.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use u_coloring::models::Connections;
/// use u_coloring::ga::{Experiment, ExperimentConfig};
///
/// let graph = Arc::new(Connections::new(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]).unwrap());
/// let config = ExperimentConfig::new(2)
///     .with_population_size(8)
///     .with_seed(42)
///     .with_max_generations(200);
///
/// let result = Experiment::new(graph, config).unwrap().run().unwrap();
/// assert!(result.converged());
/// assert_eq!(result.best.conflict_count(), 0);
/// ```
pub struct Experiment {
    config: ExperimentConfig,
    manager: GenerationManager,
    population: Vec<Individual>,
    rng: StdRng,
    generation: usize,
    local_search_calls: usize,
    best_fitness: usize,
    state: DriverState,
    history: FitnessHistory,
    started: Instant,
}

impl Experiment {
    /// Validates `config` and builds the initial population.
    ///
    /// History is discarded; use [`with_sink`](Self::with_sink) to keep it.
    pub fn new(connections: Arc<Connections>, config: ExperimentConfig) -> Result<Self> {
        Self::with_sink(connections, config, Box::new(NullSink))
    }

    /// Like [`new`](Self::new), flushing fitness history into `sink`.
    pub fn with_sink(
        connections: Arc<Connections>,
        config: ExperimentConfig,
        sink: Box<dyn HistorySink>,
    ) -> Result<Self> {
        let manager = GenerationManager::new(&config)?;
        let started = Instant::now();
        let mut rng = rng_from_option(config.seed);

        let colors = config.colors;
        let local_search = config.local_search;
        let population = derive_seeds(&mut rng, config.population_size)
            .into_par_iter()
            .map(|seed| -> Result<Individual> {
                let mut rng = create_rng(seed);
                let mut coloring = Coloring::random(Arc::clone(&connections), colors, &mut rng)?;
                let outcome = local_search.run(&mut coloring, &mut rng);
                Ok(Individual::from_parts(coloring, outcome.final_fitness))
            })
            .collect::<Result<Vec<_>>>()?;

        let best_fitness = population
            .iter()
            .map(Individual::fitness)
            .min()
            .unwrap_or(usize::MAX);
        let state = if best_fitness == 0 {
            DriverState::Converged
        } else {
            DriverState::Running
        };

        log::info!(
            "initialized population of {} for {} vertices, {} edges, k = {}: best {} conflicts",
            population.len(),
            connections.size(),
            connections.num_edges(),
            colors,
            best_fitness
        );

        Ok(Self {
            manager,
            local_search_calls: population.len(),
            history: FitnessHistory::new(config.history_flush_interval, sink),
            config,
            population,
            rng,
            generation: 0,
            best_fitness,
            state,
            started,
        })
    }

    /// Produces one generation if still running; returns the new state.
    pub fn step(&mut self) -> Result<DriverState> {
        if self.state != DriverState::Running {
            return Ok(self.state);
        }

        let population = std::mem::take(&mut self.population);
        let report = self
            .manager
            .produce_next_generation(population, &mut self.rng)?;

        self.population = report.population;
        self.generation += 1;
        self.local_search_calls += report.local_search_calls;
        self.best_fitness = self.best_fitness.min(report.best_fitness);
        self.history
            .record(self.generation, report.best_fitness, report.average_fitness)?;

        log::debug!(
            "generation {}: best {}, average {:.2}, variance {:.2}, corr(crossover) {:.3}, corr(memetic) {:.3}",
            self.generation,
            report.best_fitness,
            report.average_fitness,
            report.fitness_variance,
            report.crossover_correlation,
            report.memetic_correlation
        );

        if self.best_fitness == 0 {
            self.state = DriverState::Converged;
        } else if self
            .config
            .max_generations
            .is_some_and(|max| self.generation >= max)
        {
            self.state = DriverState::GenerationLimit;
        }
        Ok(self.state)
    }

    /// Runs until a terminal state and reports the outcome.
    pub fn run(mut self) -> Result<EvolutionResult> {
        while self.step()? == DriverState::Running {}
        self.history.flush()?;

        let elapsed = self.started.elapsed();
        match self.state {
            DriverState::Converged => log::info!(
                "proper {}-coloring found after {} generations, {} local searches, {:.2?}",
                self.config.colors,
                self.generation,
                self.local_search_calls,
                elapsed
            ),
            _ => log::info!(
                "stopped after {} generations with {} conflicts, {} local searches, {:.2?}",
                self.generation,
                self.best_fitness,
                self.local_search_calls,
                elapsed
            ),
        }

        let best = self.best_individual().coloring().clone();
        Ok(EvolutionResult {
            best_fitness: self.best_fitness,
            best,
            generations: self.generation,
            local_search_calls: self.local_search_calls,
            elapsed,
            state: self.state,
        })
    }

    /// Member of the current population with the fewest conflicts.
    pub fn best_individual(&self) -> &Individual {
        self.population
            .iter()
            .min_by_key(|ind| ind.fitness())
            .expect("population is never empty")
    }

    /// Current population.
    pub fn population(&self) -> &[Individual] {
        &self.population
    }

    /// Generations produced so far.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Best fitness seen so far.
    pub fn best_fitness(&self) -> usize {
        self.best_fitness
    }

    /// Local search runs so far.
    pub fn local_search_calls(&self) -> usize {
        self.local_search_calls
    }

    /// Current state.
    pub fn state(&self) -> DriverState {
        self.state
    }

    /// The configuration in use.
    pub fn config(&self) -> &ExperimentConfig {
        &self.config
    }
}
