//! DIMACS `.col` graph reader.
//!
//! - `c ...` lines are comments
//! - `p edge N M` declares `N` vertices (the edge count `M` is informational)
//! - `e U V` declares an edge between 1-based vertices `U` and `V`
//!
//! When no problem line is present the vertex count is taken from the largest
//! endpoint seen. Other line types are skipped.
//!
//! ```text
//! c 4-cycle
//! p edge 4 4
//! e 1 2
//! e 2 3
//! e 3 4
//! e 4 1
//! ```

use std::fs;
use std::path::Path;

use crate::error::{ColoringError, Result};
use crate::models::Connections;

/// Parses DIMACS text into a graph with 0-based vertices.
///
/// # Examples
///
/// ```
/// use u_coloring::dimacs::parse_dimacs_str;
///
/// let g = parse_dimacs_str("p edge 3 2\ne 1 2\ne 2 3\n").unwrap();
/// assert_eq!(g.size(), 3);
/// assert_eq!(g.edges(), &[(0, 1), (1, 2)]);
/// ```
pub fn parse_dimacs_str(input: &str) -> Result<Connections> {
    let mut declared: Option<(usize, usize)> = None;
    let mut edges = Vec::new();
    let mut max_vertex = 0usize;

    for (idx, raw) in input.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('c') {
            continue;
        }
        let parts: Vec<&str> = line.split_whitespace().collect();
        match parts[0] {
            "p" => {
                if declared.is_some() {
                    return Err(ColoringError::parse(line_no, "duplicate problem line"));
                }
                if parts.len() < 4 {
                    return Err(ColoringError::parse(
                        line_no,
                        format!("expected 'p edge N M', got '{line}'"),
                    ));
                }
                if parts[1] != "edge" && parts[1] != "col" {
                    return Err(ColoringError::parse(
                        line_no,
                        format!("unsupported problem type '{}'", parts[1]),
                    ));
                }
                let n = parse_count(parts[2], line_no)?;
                let m = parse_count(parts[3], line_no)?;
                if max_vertex > n {
                    return Err(ColoringError::parse(
                        line_no,
                        format!("earlier edge uses vertex {max_vertex} beyond declared {n}"),
                    ));
                }
                declared = Some((n, m));
            }
            "e" => {
                if parts.len() < 3 {
                    return Err(ColoringError::parse(
                        line_no,
                        format!("expected 'e U V', got '{line}'"),
                    ));
                }
                let u = parse_vertex(parts[1], line_no)?;
                let v = parse_vertex(parts[2], line_no)?;
                if let Some((n, _)) = declared {
                    for w in [u, v] {
                        if w > n {
                            return Err(ColoringError::parse(
                                line_no,
                                format!("vertex {w} out of range [1, {n}]"),
                            ));
                        }
                    }
                }
                max_vertex = max_vertex.max(u).max(v);
                edges.push((u - 1, v - 1));
            }
            other => {
                log::debug!("ignoring DIMACS line type '{other}' at line {line_no}");
            }
        }
    }

    let size = match declared {
        Some((n, m)) => {
            if m != edges.len() {
                log::debug!("problem line declares {m} edges, found {}", edges.len());
            }
            n
        }
        None => max_vertex,
    };

    Connections::new(size, &edges)
}

/// Reads and parses a DIMACS file.
pub fn parse_dimacs_file<P: AsRef<Path>>(path: P) -> Result<Connections> {
    let text = fs::read_to_string(path.as_ref())?;
    let graph = parse_dimacs_str(&text)?;
    log::info!(
        "loaded {}: {} vertices, {} edges",
        path.as_ref().display(),
        graph.size(),
        graph.num_edges()
    );
    Ok(graph)
}

fn parse_count(token: &str, line: usize) -> Result<usize> {
    token
        .parse::<usize>()
        .map_err(|_| ColoringError::parse(line, format!("invalid count '{token}'")))
}

fn parse_vertex(token: &str, line: usize) -> Result<usize> {
    match token.parse::<usize>() {
        Ok(0) | Err(_) => Err(ColoringError::parse(
            line,
            format!("invalid vertex '{token}': expected a positive integer"),
        )),
        Ok(v) => Ok(v),
    }
}
