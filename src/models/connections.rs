//! Shared, read-only graph structure.

use std::collections::HashSet;

use crate::error::{ColoringError, Result};

/// The fixed edge list of a graph plus its derived adjacency lists.
///
/// Built once per input graph and shared by every [`Coloring`](super::Coloring)
/// through an `Arc`. Edges are stored as unordered pairs without duplicates.
/// A self-loop stays in the edge list, where it is a conflict under every
/// coloring, but is left out of the adjacency lists.
///
/// # Examples
///
/// ```
/// use u_coloring::models::Connections;
///
/// let c = Connections::new(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]).unwrap();
/// assert_eq!(c.size(), 4);
/// assert_eq!(c.num_edges(), 4);
/// assert_eq!(c.neighbors(0), &[1, 3]);
/// ```
#[derive(Debug, Clone)]
pub struct Connections {
    size: usize,
    edges: Vec<(usize, usize)>,
    adjacency: Vec<Vec<usize>>,
}

impl Connections {
    /// Builds the graph from 0-based edges.
    ///
    /// # Errors
    ///
    /// Returns [`ColoringError::InvalidGraphSize`] when `size == 0` and
    /// [`ColoringError::VertexOutOfRange`] when an endpoint is `>= size`.
    pub fn new(size: usize, edges: &[(usize, usize)]) -> Result<Self> {
        if size == 0 {
            return Err(ColoringError::InvalidGraphSize(size));
        }

        let mut seen = HashSet::with_capacity(edges.len());
        let mut kept = Vec::with_capacity(edges.len());
        let mut adjacency = vec![Vec::new(); size];
        let mut self_loops = 0usize;

        for &(u, v) in edges {
            for node in [u, v] {
                if node >= size {
                    return Err(ColoringError::VertexOutOfRange { node, size });
                }
            }
            let key = (u.min(v), u.max(v));
            if !seen.insert(key) {
                continue;
            }
            kept.push((u, v));
            if u == v {
                self_loops += 1;
                continue;
            }
            adjacency[u].push(v);
            adjacency[v].push(u);
        }

        if self_loops > 0 {
            log::warn!("{self_loops} self-loop edge(s): graph has no proper coloring");
        }
        let duplicates = edges.len() - kept.len();
        if duplicates > 0 {
            log::debug!("dropped {duplicates} duplicate edge(s)");
        }

        Ok(Self {
            size,
            edges: kept,
            adjacency,
        })
    }

    /// Number of vertices.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of distinct edges, self-loops included.
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// The deduplicated edge list in input order, self-loops included.
    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    /// Neighbors of `node` in edge insertion order; never contains `node`.
    ///
    /// # Panics
    ///
    /// Panics if `node >= size`.
    pub fn neighbors(&self, node: usize) -> &[usize] {
        &self.adjacency[node]
    }

    /// Degree of `node`.
    pub fn degree(&self, node: usize) -> usize {
        self.adjacency[node].len()
    }

    /// Largest vertex degree, or 0 for an edgeless graph.
    pub fn max_degree(&self) -> usize {
        self.adjacency.iter().map(Vec::len).max().unwrap_or(0)
    }
}
