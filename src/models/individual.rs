//! Population member: a coloring with its cached fitness.

use super::Coloring;

/// A coloring paired with its conflict count.
///
/// Fitness is computed once at construction and never rewritten, so the
/// value can be read freely from parallel tasks. Lower fitness is better;
/// zero means a proper coloring.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use u_coloring::models::{Coloring, Connections, Individual};
///
/// let graph = Arc::new(Connections::new(2, &[(0, 1)]).unwrap());
/// let ind = Individual::new(Coloring::from_colors(graph, 2, vec![1, 1]).unwrap());
/// assert_eq!(ind.fitness(), 1);
/// assert!(!ind.is_proper());
/// ```
#[derive(Debug, Clone)]
pub struct Individual {
    coloring: Coloring,
    fitness: usize,
}

impl Individual {
    /// Scores a coloring.
    pub fn new(coloring: Coloring) -> Self {
        let fitness = coloring.conflict_count();
        Self { coloring, fitness }
    }

    /// Wraps a coloring whose conflict count is already known.
    pub(crate) fn from_parts(coloring: Coloring, fitness: usize) -> Self {
        debug_assert_eq!(coloring.conflict_count(), fitness);
        Self { coloring, fitness }
    }

    /// Conflict count.
    pub fn fitness(&self) -> usize {
        self.fitness
    }

    /// Returns `true` if the coloring has no conflicts.
    pub fn is_proper(&self) -> bool {
        self.fitness == 0
    }

    /// The underlying coloring.
    pub fn coloring(&self) -> &Coloring {
        &self.coloring
    }

    /// Consumes the individual, returning its coloring.
    pub fn into_coloring(self) -> Coloring {
        self.coloring
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Connections;
    use std::sync::Arc;

    #[test]
    fn test_fitness_cached() {
        let g = Arc::new(Connections::new(3, &[(0, 1), (1, 2)]).expect("valid"));
        let ind = Individual::new(Coloring::from_colors(g, 2, vec![1, 2, 1]).expect("valid"));
        assert_eq!(ind.fitness(), 0);
        assert!(ind.is_proper());
        assert_eq!(ind.into_coloring().colors(), &[1, 2, 1]);
    }
}
