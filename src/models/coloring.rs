//! Mutable color assignment over a shared graph.

use std::sync::Arc;

use rand::Rng;

use super::Connections;
use crate::error::{ColoringError, Result};

/// Color value marking a vertex that has not been assigned yet.
pub const UNASSIGNED: usize = 0;

/// Read-only view of one vertex inside a [`Coloring`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vertex<'a> {
    node: usize,
    color: usize,
    neighbors: &'a [usize],
}

impl<'a> Vertex<'a> {
    /// 0-based vertex index.
    pub fn node(&self) -> usize {
        self.node
    }

    /// Current color (`0` = unassigned).
    pub fn color(&self) -> usize {
        self.color
    }

    /// Adjacent vertex indices.
    pub fn neighbors(&self) -> &'a [usize] {
        self.neighbors
    }
}

/// A candidate k-coloring of a fixed graph: the individual of the GA.
///
/// Valid colors are `1..=k`; [`UNASSIGNED`] only appears in children under
/// construction. Besides the colors, a coloring carries a *live set* used by
/// the crossover: [`remove`](Self::remove) excludes a vertex from cluster
/// extraction without touching its color or the graph.
///
/// Cloning copies colors and live flags and shares the [`Connections`].
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use u_coloring::models::{Coloring, Connections};
///
/// let graph = Arc::new(Connections::new(3, &[(0, 1), (1, 2)]).unwrap());
/// let mut c = Coloring::from_colors(graph, 2, vec![1, 1, 2]).unwrap();
/// assert_eq!(c.conflict_count(), 1);
///
/// c.set_color(0, 2);
/// assert_eq!(c.conflict_count(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct Coloring {
    connections: Arc<Connections>,
    colors_count: usize,
    colors: Vec<usize>,
    live: Vec<bool>,
    live_count: usize,
}

impl Coloring {
    /// Creates a coloring with every vertex unassigned and live.
    ///
    /// # Errors
    ///
    /// Returns [`ColoringError::InvalidColorCount`] when `colors_count == 0`.
    pub fn unassigned(connections: Arc<Connections>, colors_count: usize) -> Result<Self> {
        if colors_count == 0 {
            return Err(ColoringError::InvalidColorCount(colors_count));
        }
        let n = connections.size();
        Ok(Self {
            connections,
            colors_count,
            colors: vec![UNASSIGNED; n],
            live: vec![true; n],
            live_count: n,
        })
    }

    /// Creates a coloring with colors drawn uniformly from `1..=colors_count`.
    pub fn random<R: Rng>(
        connections: Arc<Connections>,
        colors_count: usize,
        rng: &mut R,
    ) -> Result<Self> {
        let mut coloring = Self::unassigned(connections, colors_count)?;
        for color in coloring.colors.iter_mut() {
            *color = rng.random_range(1..=colors_count);
        }
        Ok(coloring)
    }

    /// Creates a coloring from explicit colors.
    ///
    /// # Errors
    ///
    /// Fails when the vector length differs from the graph size or a color
    /// lies outside `1..=colors_count`.
    pub fn from_colors(
        connections: Arc<Connections>,
        colors_count: usize,
        colors: Vec<usize>,
    ) -> Result<Self> {
        let mut coloring = Self::unassigned(connections, colors_count)?;
        coloring.check_configuration(&colors)?;
        coloring.colors = colors;
        Ok(coloring)
    }

    /// An all-unassigned, all-live coloring over the same graph and colors.
    pub fn blank(&self) -> Self {
        let n = self.size();
        Self {
            connections: Arc::clone(&self.connections),
            colors_count: self.colors_count,
            colors: vec![UNASSIGNED; n],
            live: vec![true; n],
            live_count: n,
        }
    }

    /// Number of vertices.
    pub fn size(&self) -> usize {
        self.colors.len()
    }

    /// Number of available colors (k).
    pub fn colors_count(&self) -> usize {
        self.colors_count
    }

    /// The shared graph.
    pub fn connections(&self) -> &Arc<Connections> {
        &self.connections
    }

    /// Number of edges whose endpoints share a color.
    pub fn conflict_count(&self) -> usize {
        self.connections
            .edges()
            .iter()
            .filter(|&&(u, v)| self.colors[u] == self.colors[v])
            .count()
    }

    /// Edges whose endpoints share a color.
    pub fn conflicting_edges(&self) -> Vec<(usize, usize)> {
        self.connections
            .edges()
            .iter()
            .copied()
            .filter(|&(u, v)| self.colors[u] == self.colors[v])
            .collect()
    }

    /// Number of neighbors of `node` sharing its color.
    pub fn vertex_conflicts(&self, node: usize) -> usize {
        let color = self.colors[node];
        self.connections
            .neighbors(node)
            .iter()
            .filter(|&&n| self.colors[n] == color)
            .count()
    }

    /// Current color of `node`.
    pub fn color_of(&self, node: usize) -> usize {
        self.colors[node]
    }

    /// Recolors `node`.
    ///
    /// # Panics
    ///
    /// Panics if `color` is outside `1..=k` or `node` is out of range.
    pub fn set_color(&mut self, node: usize, color: usize) {
        assert!(
            (1..=self.colors_count).contains(&color),
            "color {color} outside [1, {}]",
            self.colors_count
        );
        self.colors[node] = color;
    }

    /// A view of one vertex.
    pub fn vertex(&self, node: usize) -> Vertex<'_> {
        Vertex {
            node,
            color: self.colors[node],
            neighbors: self.connections.neighbors(node),
        }
    }

    /// Iterates over all vertices in node order.
    pub fn vertices(&self) -> impl Iterator<Item = Vertex<'_>> + '_ {
        (0..self.size()).map(move |node| self.vertex(node))
    }

    /// Returns `true` once every vertex holds a real color.
    pub fn is_complete(&self) -> bool {
        self.colors.iter().all(|&c| c != UNASSIGNED)
    }

    /// Snapshot of all colors, indexed by node.
    pub fn configuration(&self) -> Vec<usize> {
        self.colors.clone()
    }

    /// Borrowed view of all colors.
    pub fn colors(&self) -> &[usize] {
        &self.colors
    }

    /// Writes back a snapshot taken with [`configuration`](Self::configuration).
    ///
    /// # Errors
    ///
    /// Fails on a length mismatch or an out-of-range color; the coloring is
    /// left untouched in that case.
    pub fn restore(&mut self, configuration: &[usize]) -> Result<()> {
        self.check_configuration(configuration)?;
        self.colors.copy_from_slice(configuration);
        Ok(())
    }

    /// Restores a snapshot taken from this same coloring.
    pub(crate) fn overwrite(&mut self, configuration: &[usize]) {
        debug_assert!(self.check_configuration(configuration).is_ok());
        self.colors.copy_from_slice(configuration);
    }

    /// Number of vertices still live.
    pub fn live_count(&self) -> usize {
        self.live_count
    }

    /// Whether `node` is still live.
    pub fn is_live(&self, node: usize) -> bool {
        self.live[node]
    }

    /// Excludes `node` from cluster extraction.
    ///
    /// Colors and adjacency are unchanged. Returns `false` if the vertex was
    /// already removed.
    pub fn remove(&mut self, node: usize) -> bool {
        if !self.live[node] {
            return false;
        }
        self.live[node] = false;
        self.live_count -= 1;
        true
    }

    /// Marks every vertex live again.
    pub fn reset_live(&mut self) {
        self.live.fill(true);
        self.live_count = self.live.len();
    }

    /// Members of the largest same-color group among live vertices.
    ///
    /// Ties go to the color met first when scanning nodes in order. Returns
    /// an empty vector once no vertex is live.
    pub fn greatest_color_cluster(&self) -> Vec<usize> {
        let (mut buckets, order) = self.live_buckets();
        let mut best: Option<usize> = None;
        for &color in &order {
            let better = best.map_or(true, |b| buckets[color].len() > buckets[b].len());
            if better {
                best = Some(color);
            }
        }
        best.map(|c| std::mem::take(&mut buckets[c]))
            .unwrap_or_default()
    }

    /// Members of a uniformly chosen color group among live vertices.
    ///
    /// Every color present in the live set is equally likely, regardless of
    /// group size. Returns an empty vector once no vertex is live.
    pub fn random_color_cluster<R: Rng>(&self, rng: &mut R) -> Vec<usize> {
        let (mut buckets, order) = self.live_buckets();
        if order.is_empty() {
            return Vec::new();
        }
        let pick = order[rng.random_range(0..order.len())];
        std::mem::take(&mut buckets[pick])
    }

    /// Groups live nodes by color; also returns colors in first-seen order.
    fn live_buckets(&self) -> (Vec<Vec<usize>>, Vec<usize>) {
        let mut buckets: Vec<Vec<usize>> = vec![Vec::new(); self.colors_count + 1];
        let mut order = Vec::new();
        for (node, &color) in self.colors.iter().enumerate() {
            if !self.live[node] {
                continue;
            }
            if buckets[color].is_empty() {
                order.push(color);
            }
            buckets[color].push(node);
        }
        (buckets, order)
    }

    fn check_configuration(&self, colors: &[usize]) -> Result<()> {
        if colors.len() != self.size() {
            return Err(ColoringError::SizeMismatch {
                expected: self.size(),
                actual: colors.len(),
            });
        }
        if let Some((node, &color)) = colors
            .iter()
            .enumerate()
            .find(|&(_, &c)| c == UNASSIGNED || c > self.colors_count)
        {
            return Err(ColoringError::ColorOutOfRange {
                node,
                color,
                colors: self.colors_count,
            });
        }
        Ok(())
    }
}
