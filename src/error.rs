//! Error types for graph coloring.

use thiserror::Error;

/// Errors raised while building graphs, colorings, and experiments.
#[derive(Debug, Error)]
pub enum ColoringError {
    /// The number of colors must be at least one.
    #[error("invalid color count {0}: at least one color is required")]
    InvalidColorCount(usize),

    /// The graph must contain at least one vertex.
    #[error("invalid graph size {0}: at least one vertex is required")]
    InvalidGraphSize(usize),

    /// An edge endpoint lies outside `[0, size)`.
    #[error("vertex {node} out of range for graph of size {size}")]
    VertexOutOfRange {
        /// Offending vertex index (0-based).
        node: usize,
        /// Graph size.
        size: usize,
    },

    /// A color outside `[1, k]` was supplied.
    #[error("color {color} at vertex {node} outside [1, {colors}]")]
    ColorOutOfRange {
        /// Vertex index.
        node: usize,
        /// Supplied color.
        color: usize,
        /// Number of colors.
        colors: usize,
    },

    /// A color vector does not match the graph size.
    #[error("expected {expected} colors, got {actual}")]
    SizeMismatch {
        /// Graph size.
        expected: usize,
        /// Length of the supplied vector.
        actual: usize,
    },

    /// Population size must be even and at least two.
    #[error("invalid population size {0}: must be even and at least 2")]
    InvalidPopulationSize(usize),

    /// Any other out-of-range configuration value.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Malformed DIMACS input.
    #[error("DIMACS parse error at line {line}: {message}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// Description of the problem.
        message: String,
    },

    /// I/O failure while reading input or writing history.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization failure.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ColoringError {
    /// Creates a parse error for the given 1-based line.
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        ColoringError::Parse {
            line,
            message: message.into(),
        }
    }

    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        ColoringError::InvalidConfig(message.into())
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, ColoringError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_message() {
        let err = ColoringError::parse(7, "bad edge");
        assert_eq!(err.to_string(), "DIMACS parse error at line 7: bad edge");
    }

    #[test]
    fn test_vertex_out_of_range_message() {
        let err = ColoringError::VertexOutOfRange { node: 5, size: 4 };
        assert!(err.to_string().contains("vertex 5"));
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: ColoringError = io.into();
        assert!(matches!(err, ColoringError::Io(_)));
    }
}
