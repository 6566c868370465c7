//! Experiment configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::crossover::{ClusterSelection, CrossoverKind};
use crate::error::{ColoringError, Result};
use crate::local_search::LocalSearchConfig;

fn default_population_size() -> usize {
    100
}

fn default_flush_interval() -> usize {
    100
}

/// Parameters of one evolutionary run.
///
/// Only `colors` is required when loading from JSON; everything else falls
/// back to the defaults of [`ExperimentConfig::new`].
///
/// # Examples
///
/// ```
/// use u_coloring::ga::ExperimentConfig;
///
/// let config = ExperimentConfig::new(3)
///     .with_population_size(20)
///     .with_seed(42)
///     .with_max_generations(500);
/// assert!(config.validate().is_ok());
///
/// let parsed: ExperimentConfig = serde_json::from_str(r#"{"colors": 4}"#).unwrap();
/// assert_eq!(parsed.population_size, 100);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentConfig {
    /// Number of colors (k).
    pub colors: usize,
    /// Population size; must be even.
    #[serde(default = "default_population_size")]
    pub population_size: usize,
    /// Root RNG seed; OS entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Stop after this many generations even without a proper coloring.
    #[serde(default)]
    pub max_generations: Option<usize>,
    /// Crossover operator.
    #[serde(default)]
    pub crossover: CrossoverKind,
    /// Class choice inside GPX.
    #[serde(default)]
    pub cluster_selection: ClusterSelection,
    /// Local search settings.
    #[serde(default)]
    pub local_search: LocalSearchConfig,
    /// Generations between history flushes.
    #[serde(default = "default_flush_interval")]
    pub history_flush_interval: usize,
}

impl ExperimentConfig {
    /// Default settings for `colors` colors.
    pub fn new(colors: usize) -> Self {
        Self {
            colors,
            population_size: default_population_size(),
            seed: None,
            max_generations: None,
            crossover: CrossoverKind::default(),
            cluster_selection: ClusterSelection::default(),
            local_search: LocalSearchConfig::default(),
            history_flush_interval: default_flush_interval(),
        }
    }

    /// Loads a JSON configuration file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Sets the number of colors.
    pub fn with_colors(mut self, colors: usize) -> Self {
        self.colors = colors;
        self
    }

    /// Sets the population size.
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    /// Fixes the root seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Caps the number of generations.
    pub fn with_max_generations(mut self, max: usize) -> Self {
        self.max_generations = Some(max);
        self
    }

    /// Sets the crossover operator.
    pub fn with_crossover(mut self, crossover: CrossoverKind) -> Self {
        self.crossover = crossover;
        self
    }

    /// Sets the GPX class choice.
    pub fn with_cluster_selection(mut self, selection: ClusterSelection) -> Self {
        self.cluster_selection = selection;
        self
    }

    /// Sets local search settings.
    pub fn with_local_search(mut self, local_search: LocalSearchConfig) -> Self {
        self.local_search = local_search;
        self
    }

    /// Sets the history flush interval.
    pub fn with_history_flush_interval(mut self, interval: usize) -> Self {
        self.history_flush_interval = interval;
        self
    }

    /// Checks every value range.
    pub fn validate(&self) -> Result<()> {
        if self.colors == 0 {
            return Err(ColoringError::InvalidColorCount(self.colors));
        }
        if self.population_size < 2 || self.population_size % 2 != 0 {
            return Err(ColoringError::InvalidPopulationSize(self.population_size));
        }
        if let ClusterSelection::Randomized { probability } = self.cluster_selection {
            if !(0.0..=1.0).contains(&probability) {
                return Err(ColoringError::config(format!(
                    "cluster probability {probability} outside [0, 1]"
                )));
            }
        }
        if self.history_flush_interval == 0 {
            return Err(ColoringError::config(
                "history_flush_interval must be at least 1",
            ));
        }
        self.local_search.validate()
    }
}
