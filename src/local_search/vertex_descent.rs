//! Vertex descent sweeps.
//!
//! # Algorithm
//!
//! Each visited vertex is moved to the color least used among its neighbors
//! (ties to the lowest color). This minimizes the conflicts at that vertex
//! given the current colors of everything else.
//!
//! # Complexity
//!
//! O(|E| + n·k) per sweep for the full scan.

use std::sync::Arc;

use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;

use super::LocalSearchStrategy;
use crate::models::Coloring;

/// Full-scan vertex descent: every vertex in node order, all neighbors.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use u_coloring::models::{Coloring, Connections};
/// use u_coloring::local_search::{LocalSearchStrategy, VertexDescent};
/// use u_coloring::random::create_rng;
///
/// let graph = Arc::new(Connections::new(3, &[(0, 1), (1, 2)]).unwrap());
/// let mut c = Coloring::from_colors(graph, 2, vec![1, 1, 1]).unwrap();
/// VertexDescent.sweep(&mut c, &mut create_rng(0));
/// assert_eq!(c.conflict_count(), 0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct VertexDescent;

impl LocalSearchStrategy for VertexDescent {
    fn name(&self) -> &str {
        "vertex_descent"
    }

    fn sweep<R: Rng>(&self, coloring: &mut Coloring, _rng: &mut R) {
        let graph = Arc::clone(coloring.connections());
        let mut tally = vec![0usize; coloring.colors_count() + 1];
        for node in 0..coloring.size() {
            let color = least_used_color(coloring, graph.neighbors(node).iter(), &mut tally);
            coloring.set_color(node, color);
        }
    }
}

/// Sampled vertex descent: random visit order, a fraction of each vertex's
/// neighbors.
///
/// The sample holds `ceil(fraction · degree)` distinct neighbors, at least
/// one and at most the degree.
#[derive(Debug, Clone, Copy)]
pub struct SampledVertexDescent {
    neighbor_fraction: f64,
}

impl SampledVertexDescent {
    /// Creates the strategy; `neighbor_fraction` is clamped to `[0, 1]`, and
    /// a vertex with neighbors always samples at least one.
    pub fn new(neighbor_fraction: f64) -> Self {
        Self {
            neighbor_fraction: neighbor_fraction.clamp(0.0, 1.0),
        }
    }

    /// Fraction of neighbors inspected per vertex.
    pub fn neighbor_fraction(&self) -> f64 {
        self.neighbor_fraction
    }

    fn sample_size(&self, degree: usize) -> usize {
        let wanted = (self.neighbor_fraction * degree as f64).ceil() as usize;
        wanted.max(1).min(degree)
    }
}

impl LocalSearchStrategy for SampledVertexDescent {
    fn name(&self) -> &str {
        "sampled_vertex_descent"
    }

    fn sweep<R: Rng>(&self, coloring: &mut Coloring, rng: &mut R) {
        let graph = Arc::clone(coloring.connections());
        let mut tally = vec![0usize; coloring.colors_count() + 1];
        let mut order: Vec<usize> = (0..coloring.size()).collect();
        order.shuffle(rng);

        for node in order {
            let neighbors = graph.neighbors(node);
            let sample = neighbors.choose_multiple(rng, self.sample_size(neighbors.len()));
            let color = least_used_color(coloring, sample, &mut tally);
            coloring.set_color(node, color);
        }
    }
}

/// Color in `1..=k` least used among `neighbors`, lowest index on ties.
fn least_used_color<'a, I>(coloring: &Coloring, neighbors: I, tally: &mut [usize]) -> usize
where
    I: Iterator<Item = &'a usize>,
{
    tally.fill(0);
    for &n in neighbors {
        tally[coloring.color_of(n)] += 1;
    }
    // Color 0 is never a candidate.
    tally[0] = usize::MAX;

    let mut best = 1;
    for color in 2..tally.len() {
        if tally[color] < tally[best] {
            best = color;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Connections;
    use crate::random::create_rng;

    fn cycle(n: usize) -> Arc<Connections> {
        let edges: Vec<(usize, usize)> = (0..n).map(|i| (i, (i + 1) % n)).collect();
        Arc::new(Connections::new(n, &edges).expect("valid"))
    }

    #[test]
    fn test_least_used_color_ties_lowest() {
        let g = Arc::new(Connections::new(4, &[(0, 1), (0, 2), (0, 3)]).expect("valid"));
        let c = Coloring::from_colors(g.clone(), 4, vec![1, 3, 1, 2]).expect("valid");
        let mut tally = vec![0; 5];
        // neighbors use 3, 1, 2 once each; 4 is unused
        assert_eq!(least_used_color(&c, g.neighbors(0).iter(), &mut tally), 4);

        let c = Coloring::from_colors(g.clone(), 3, vec![1, 3, 1, 2]).expect("valid");
        let mut tally = vec![0; 4];
        assert_eq!(least_used_color(&c, g.neighbors(0).iter(), &mut tally), 1);
    }

    #[test]
    fn test_isolated_vertex_gets_color_one() {
        let g = Arc::new(Connections::new(2, &[]).expect("valid"));
        let mut c = Coloring::from_colors(g, 3, vec![3, 2]).expect("valid");
        VertexDescent.sweep(&mut c, &mut create_rng(0));
        assert_eq!(c.colors(), &[1, 1]);
    }

    #[test]
    fn test_full_scan_solves_even_cycle() {
        let mut c = Coloring::from_colors(cycle(4), 2, vec![1, 1, 1, 1]).expect("valid");
        VertexDescent.sweep(&mut c, &mut create_rng(0));
        assert_eq!(c.colors(), &[2, 1, 2, 1]);
        assert_eq!(c.conflict_count(), 0);
    }

    #[test]
    fn test_sweep_keeps_colors_valid() {
        let mut rng = create_rng(17);
        let mut c = Coloring::random(cycle(25), 3, &mut rng).expect("valid");
        VertexDescent.sweep(&mut c, &mut rng);
        SampledVertexDescent::new(0.5).sweep(&mut c, &mut rng);
        assert!(c.colors().iter().all(|&x| (1..=3).contains(&x)));
    }

    #[test]
    fn test_sample_size_capped() {
        let s = SampledVertexDescent::new(1.0);
        assert_eq!(s.sample_size(3), 3);
        let s = SampledVertexDescent::new(0.5);
        assert_eq!(s.sample_size(3), 2);
        assert_eq!(s.sample_size(0), 0);
        let s = SampledVertexDescent::new(0.0);
        assert_eq!(s.sample_size(3), 1);
        assert_eq!(s.sample_size(0), 0);
        let s = SampledVertexDescent::new(-2.0);
        assert_eq!(s.sample_size(5), 1);
        let s = SampledVertexDescent::new(7.0);
        assert_eq!(s.neighbor_fraction(), 1.0);
        assert_eq!(s.sample_size(4), 4);
    }

    #[test]
    fn test_zero_fraction_still_repairs_path() {
        // With one sampled neighbor per vertex, a 2-vertex edge is always
        // split into different colors.
        let g = Arc::new(Connections::new(2, &[(0, 1)]).expect("valid"));
        for seed in 0..10 {
            let mut c = Coloring::from_colors(g.clone(), 2, vec![1, 1]).expect("valid");
            SampledVertexDescent::new(0.0).sweep(&mut c, &mut create_rng(seed));
            assert_eq!(c.conflict_count(), 0);
        }
    }

    #[test]
    fn test_sampled_full_fraction_matches_tally_rule() {
        let g = Arc::new(Connections::new(3, &[(0, 1), (0, 2)]).expect("valid"));
        let mut c = Coloring::from_colors(g, 2, vec![1, 1, 1]).expect("valid");
        SampledVertexDescent::new(1.0).sweep(&mut c, &mut create_rng(3));
        assert_eq!(c.conflict_count(), 0);
    }
}
