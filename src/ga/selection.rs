//! Elitist 2-vs-2 survivor selection.

use crate::models::Individual;

/// Picks two survivors out of two parents and their two children.
///
/// Both pools are ranked by fitness. For each output slot the best remaining
/// child is compared with the best remaining parent: the parent survives
/// only if the child has strictly more conflicts, otherwise the child
/// survives. The winner leaves its pool before the second slot is decided.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use u_coloring::models::{Coloring, Connections, Individual};
/// use u_coloring::ga::select_survivors;
///
/// let g = Arc::new(Connections::new(2, &[(0, 1)]).unwrap());
/// let ind = |c: Vec<usize>| Individual::new(Coloring::from_colors(g.clone(), 2, c).unwrap());
///
/// let parents = [ind(vec![1, 1]), ind(vec![2, 2])];
/// let children = [ind(vec![1, 2]), ind(vec![2, 2])];
/// let survivors = select_survivors(parents, children);
/// assert_eq!(survivors[0].fitness(), 0);
/// assert_eq!(survivors[1].fitness(), 1);
/// ```
pub fn select_survivors(parents: [Individual; 2], children: [Individual; 2]) -> [Individual; 2] {
    let mut parents = ranked(parents);
    let mut children = ranked(children);

    let first = pick(&mut parents, &mut children);
    let second = pick(&mut parents, &mut children);
    [first, second]
}

/// Sorted so the best individual is last, ready for `pop`.
fn ranked(pool: [Individual; 2]) -> Vec<Individual> {
    let mut pool = Vec::from(pool);
    pool.sort_by_key(|ind| std::cmp::Reverse(ind.fitness()));
    pool
}

fn pick(parents: &mut Vec<Individual>, children: &mut Vec<Individual>) -> Individual {
    let parent_wins = match (parents.last(), children.last()) {
        (Some(p), Some(c)) => c.fitness() > p.fitness(),
        (Some(_), None) => true,
        _ => false,
    };
    let pool = if parent_wins { parents } else { children };
    // Two picks from two pools of two can never drain both.
    pool.pop().expect("survivor pools exhausted")
}
