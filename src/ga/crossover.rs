//! Crossover operators for colorings.
//!
//! # Operators
//!
//! - [`gpx_crossover`] — Greedy partition crossover (GPX): alternately copies
//!   whole color classes from each parent
//! - [`split_crossover`] — Single-point crossover over the color vector
//!
//! # Reference
//!
//! Galinier, P. & Hao, J.-K. (1999). "Hybrid Evolutionary Algorithms for
//! Graph Coloring", *Journal of Combinatorial Optimization* 3(4), 379-397.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::models::Coloring;

/// Which crossover operator produces children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CrossoverKind {
    /// [`gpx_crossover`].
    #[default]
    Gpx,
    /// [`split_crossover`].
    SinglePoint,
}

/// How GPX picks the class to transplant from the current parent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClusterSelection {
    /// Always the largest class.
    Greatest,
    /// With the given probability per crossover call, a uniformly chosen
    /// class instead of the largest.
    Randomized {
        /// Chance that a crossover call uses random classes.
        probability: f64,
    },
}

impl Default for ClusterSelection {
    fn default() -> Self {
        ClusterSelection::Randomized { probability: 0.7 }
    }
}

impl ClusterSelection {
    /// Decides whether one crossover call uses random classes.
    pub fn draw<R: Rng>(&self, rng: &mut R) -> bool {
        match *self {
            ClusterSelection::Greatest => false,
            ClusterSelection::Randomized { probability } => rng.random_bool(probability),
        }
    }
}

/// Greedy partition crossover.
///
/// Starting with `parent1`, takes a color class from the current parent,
/// stamps it onto the child with the next color, removes its vertices from
/// the working copies of *both* parents, and switches parent. Once more
/// classes than colors have been taken, further classes get a random color.
/// The parents are not modified.
///
/// With `randomized` set, each class is chosen uniformly among the classes
/// still present instead of being the largest one.
///
/// # Panics
///
/// Panics if the parents have different sizes or color counts.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use u_coloring::models::{Coloring, Connections};
/// use u_coloring::ga::gpx_crossover;
/// use u_coloring::random::create_rng;
///
/// let graph = Arc::new(Connections::new(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]).unwrap());
/// let p1 = Coloring::from_colors(graph.clone(), 2, vec![1, 2, 1, 2]).unwrap();
/// let p2 = Coloring::from_colors(graph, 2, vec![2, 1, 2, 1]).unwrap();
///
/// let child = gpx_crossover(&p1, &p2, false, &mut create_rng(1));
/// assert!(child.is_complete());
/// assert_eq!(child.conflict_count(), 0);
/// ```
pub fn gpx_crossover<R: Rng>(
    parent1: &Coloring,
    parent2: &Coloring,
    randomized: bool,
    rng: &mut R,
) -> Coloring {
    gpx_pass(parent1, parent2, randomized, rng).0
}

/// Runs GPX and also returns the number of clusters extracted.
pub(crate) fn gpx_pass<R: Rng>(
    parent1: &Coloring,
    parent2: &Coloring,
    randomized: bool,
    rng: &mut R,
) -> (Coloring, usize) {
    check_compatible(parent1, parent2);
    let k = parent1.colors_count();

    let mut working = [parent1.clone(), parent2.clone()];
    for w in working.iter_mut() {
        w.reset_live();
    }
    let mut child = parent1.blank();

    let mut current = 0;
    let mut next_color = 1;
    let mut extractions = 0;
    while working[current].live_count() > 0 {
        let cluster = if randomized {
            working[current].random_color_cluster(rng)
        } else {
            working[current].greatest_color_cluster()
        };
        extractions += 1;

        let color = if next_color <= k {
            next_color
        } else {
            rng.random_range(1..=k)
        };

        for &node in &cluster {
            child.set_color(node, color);
            // Removing from both copies keeps the other parent from
            // offering this vertex again.
            working[0].remove(node);
            working[1].remove(node);
        }

        current = 1 - current;
        next_color += 1;
    }

    assert!(
        child.is_complete(),
        "crossover left unassigned vertices in child"
    );
    (child, extractions)
}

/// Single-point crossover: colors before a random cut come from `parent1`,
/// the rest from `parent2`.
///
/// # Panics
///
/// Panics if the parents have different sizes or color counts.
pub fn split_crossover<R: Rng>(parent1: &Coloring, parent2: &Coloring, rng: &mut R) -> Coloring {
    check_compatible(parent1, parent2);
    let cut = rng.random_range(0..=parent1.size());

    let mut colors = Vec::with_capacity(parent1.size());
    colors.extend_from_slice(&parent1.colors()[..cut]);
    colors.extend_from_slice(&parent2.colors()[cut..]);

    let mut child = parent1.blank();
    child.overwrite(&colors);
    child
}

fn check_compatible(parent1: &Coloring, parent2: &Coloring) {
    assert_eq!(parent1.size(), parent2.size(), "parents differ in size");
    assert_eq!(
        parent1.colors_count(),
        parent2.colors_count(),
        "parents differ in color count"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Connections;
    use crate::random::create_rng;
    use std::sync::Arc;

    fn graph(n: usize) -> Arc<Connections> {
        let edges: Vec<(usize, usize)> = (0..n).map(|i| (i, (i + 1) % n)).collect();
        Arc::new(Connections::new(n, &edges).expect("valid"))
    }

    #[test]
    fn test_gpx_child_complete() {
        let mut rng = create_rng(42);
        let g = graph(40);
        for k in 1..6 {
            let p1 = Coloring::random(g.clone(), k, &mut rng).expect("valid");
            let p2 = Coloring::random(g.clone(), k, &mut rng).expect("valid");
            for randomized in [false, true] {
                let child = gpx_crossover(&p1, &p2, randomized, &mut rng);
                assert!(child.is_complete());
                assert!(child.colors().iter().all(|&c| (1..=k).contains(&c)));
                assert_eq!(child.live_count(), 40);
            }
        }
    }

    #[test]
    fn test_gpx_extractions_bounded_by_size() {
        let mut rng = create_rng(77);
        for n in [1, 2, 7, 40] {
            let g = graph(n);
            for k in 1..6 {
                let p1 = Coloring::random(g.clone(), k, &mut rng).expect("valid");
                let p2 = Coloring::random(g.clone(), k, &mut rng).expect("valid");
                for randomized in [false, true] {
                    let (child, extractions) = gpx_pass(&p1, &p2, randomized, &mut rng);
                    assert!(child.is_complete());
                    assert!(extractions >= 1);
                    assert!(extractions <= n);
                }
            }
        }

        // One class per vertex in both parents: exactly `size` extractions.
        let g = Arc::new(Connections::new(5, &[]).expect("valid"));
        let p1 = Coloring::from_colors(g.clone(), 5, vec![1, 2, 3, 4, 5]).expect("valid");
        let p2 = Coloring::from_colors(g, 5, vec![5, 4, 3, 2, 1]).expect("valid");
        let (_, extractions) = gpx_pass(&p1, &p2, false, &mut create_rng(0));
        assert_eq!(extractions, 5);
    }

    #[test]
    fn test_gpx_parents_untouched() {
        let mut rng = create_rng(3);
        let g = graph(12);
        let p1 = Coloring::random(g.clone(), 3, &mut rng).expect("valid");
        let p2 = Coloring::random(g, 3, &mut rng).expect("valid");
        let (s1, s2) = (p1.configuration(), p2.configuration());

        let mut child = gpx_crossover(&p1, &p2, true, &mut rng);
        for n in 0..child.size() {
            child.set_color(n, 1);
        }
        assert_eq!(p1.configuration(), s1);
        assert_eq!(p2.configuration(), s2);
        assert_eq!(p1.live_count(), 12);
        assert_eq!(p2.live_count(), 12);
    }

    #[test]
    fn test_gpx_alternates_parents() {
        // p1's biggest class {0,1,2} gets color 1; then p2's biggest class
        // among {3,4,5} is {3,4} -> color 2; then p1 offers {5} -> color 3.
        let g = Arc::new(Connections::new(6, &[]).expect("valid"));
        let p1 = Coloring::from_colors(g.clone(), 3, vec![1, 1, 1, 2, 3, 2]).expect("valid");
        let p2 = Coloring::from_colors(g, 3, vec![1, 2, 3, 2, 2, 1]).expect("valid");
        let child = gpx_crossover(&p1, &p2, false, &mut create_rng(0));
        assert_eq!(child.colors(), &[1, 1, 1, 2, 2, 3]);
    }

    #[test]
    fn test_gpx_overflow_uses_valid_colors() {
        // Every vertex has its own class in p1, so classes outnumber colors.
        let g = Arc::new(Connections::new(6, &[]).expect("valid"));
        let p1 = Coloring::from_colors(g.clone(), 6, vec![1, 2, 3, 4, 5, 6]).expect("valid");
        let p2 = Coloring::from_colors(g, 6, vec![6, 5, 4, 3, 2, 1]).expect("valid");
        let child = gpx_crossover(&p1, &p2, false, &mut create_rng(0));
        assert!(child.is_complete());

        let p1 = Coloring::from_colors(
            Arc::new(Connections::new(4, &[]).expect("valid")),
            2,
            vec![1, 2, 1, 2],
        )
        .expect("valid");
        let child = gpx_crossover(&p1, &p1, true, &mut create_rng(4));
        assert!(child.colors().iter().all(|&c| c == 1 || c == 2));
    }

    #[test]
    fn test_split_crossover() {
        let g = graph(6);
        let p1 = Coloring::from_colors(g.clone(), 2, vec![1; 6]).expect("valid");
        let p2 = Coloring::from_colors(g, 2, vec![2; 6]).expect("valid");
        let mut rng = create_rng(5);
        for _ in 0..20 {
            let child = split_crossover(&p1, &p2, &mut rng);
            let cut = child.colors().iter().take_while(|&&c| c == 1).count();
            assert!(child.colors()[cut..].iter().all(|&c| c == 2));
        }
    }

    #[test]
    fn test_cluster_selection_draw() {
        let mut rng = create_rng(1);
        assert!(!ClusterSelection::Greatest.draw(&mut rng));
        assert!(ClusterSelection::Randomized { probability: 1.0 }.draw(&mut rng));
        assert!(!ClusterSelection::Randomized { probability: 0.0 }.draw(&mut rng));
    }

    #[test]
    #[should_panic]
    fn test_mismatched_parents_panic() {
        let a = Coloring::from_colors(graph(3), 2, vec![1, 2, 1]).expect("valid");
        let b = Coloring::from_colors(graph(4), 2, vec![1, 2, 1, 2]).expect("valid");
        gpx_crossover(&a, &b, false, &mut create_rng(0));
    }
}
