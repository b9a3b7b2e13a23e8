//! Core algorithm trait definitions for the NETPLAN solvers
//!
//! This module establishes the shared vocabulary of the three planners:
//! vertex identifiers, the tagged error type every solver returns, and the
//! descriptive `Algorithm` trait used by presentation layers.
//!
//! # Key Design Principles
//! - Every solve returns `Result<_, AlgorithmError>`; no sentinel values
//! - Solvers never mutate caller-supplied matrices
//! - Failure paths are silent; surfacing errors belongs to the caller
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::fmt::{self, Debug, Display};

use serde::{Deserialize, Serialize};

/// Vertex index into a dense matrix, `0..n`
pub type NodeId = usize;

/// Non-negative integer edge weight or capacity
pub type Weight = u64;

/// Error classification shared by all solvers
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    InvalidInput,
    DisconnectedGraph,
    NoHamiltonianCycle,
    InvalidEndpoints,
    SearchTruncated,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::InvalidInput => "INVALID_INPUT",
            ErrorKind::DisconnectedGraph => "DISCONNECTED_GRAPH",
            ErrorKind::NoHamiltonianCycle => "NO_HAMILTONIAN_CYCLE",
            ErrorKind::InvalidEndpoints => "INVALID_ENDPOINTS",
            ErrorKind::SearchTruncated => "SEARCH_TRUNCATED",
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Comprehensive error types for algorithm operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AlgorithmError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Graph is not connected - vertex {unreached} cannot be reached from vertex 0")]
    DisconnectedGraph { unreached: NodeId },

    #[error("No Hamiltonian cycle exists over {vertex_count} vertices")]
    NoHamiltonianCycle { vertex_count: usize },

    #[error("Invalid endpoints: source {source_vertex}, sink {sink_vertex} in a graph of {vertex_count} vertices")]
    InvalidEndpoints {
        source_vertex: NodeId,
        sink_vertex: NodeId,
        vertex_count: usize,
    },

    #[error("Search truncated after {steps} steps (best complete tour so far: {})", incumbent(.best_total))]
    SearchTruncated {
        steps: u64,
        best_total: Option<Weight>,
    },
}

fn incumbent(best_total: &Option<Weight>) -> String {
    best_total.map_or_else(|| "none".to_string(), |total| total.to_string())
}

impl AlgorithmError {
    /// Returns the tagged kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AlgorithmError::InvalidInput(_) => ErrorKind::InvalidInput,
            AlgorithmError::DisconnectedGraph { .. } => ErrorKind::DisconnectedGraph,
            AlgorithmError::NoHamiltonianCycle { .. } => ErrorKind::NoHamiltonianCycle,
            AlgorithmError::InvalidEndpoints { .. } => ErrorKind::InvalidEndpoints,
            AlgorithmError::SearchTruncated { .. } => ErrorKind::SearchTruncated,
        }
    }
}

/// Common surface of the solvers, used by the report layer for logging
pub trait Algorithm: Debug + Send + Sync {
    /// Returns the algorithm's descriptive name
    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds_render_as_tags() {
        let err = AlgorithmError::InvalidEndpoints { source_vertex: 2, sink_vertex: 2, vertex_count: 3 };
        assert_eq!(err.kind(), ErrorKind::InvalidEndpoints);
        assert_eq!(err.kind().to_string(), "INVALID_ENDPOINTS");

        let err = AlgorithmError::DisconnectedGraph { unreached: 4 };
        assert_eq!(err.kind().as_str(), "DISCONNECTED_GRAPH");
        assert!(err.to_string().contains("vertex 4"));
    }

    #[test]
    fn test_truncation_message_reports_incumbent() {
        let none = AlgorithmError::SearchTruncated { steps: 10, best_total: None };
        assert!(none.to_string().contains("none"));

        let some = AlgorithmError::SearchTruncated { steps: 10, best_total: Some(42) };
        assert!(some.to_string().contains("42"));
        assert_eq!(some.kind(), ErrorKind::SearchTruncated);
    }

    #[test]
    fn test_error_kind_serializes_as_tag() {
        let json = serde_json::to_string(&ErrorKind::NoHamiltonianCycle).unwrap();
        assert_eq!(json, "\"NO_HAMILTONIAN_CYCLE\"");
    }
}
