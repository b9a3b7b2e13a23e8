//! Dense weighted adjacency matrix
//!
//! `WeightedGraph` is the single graph representation shared by the spanning
//! tree, tour and flow solvers. It is immutable once built: solvers borrow it
//! and any working state they need is their own copy.
//!
//! Edge presence is explicit (`Option<Weight>`). The textual convention of
//! "0 means no edge" is honoured only by [`WeightedGraph::from_rows`]; use
//! [`WeightedGraph::from_entries`] when a genuine zero-cost edge is required.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use serde::{Deserialize, Serialize};

use crate::algorithm::traits::{AlgorithmError, NodeId, Weight};

/// Immutable dense N×N matrix of optional non-negative weights
///
/// Deserialization goes through [`WeightedGraph::from_entries`], so a
/// decoded graph obeys the same shape rules as one built in code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawMatrix")]
pub struct WeightedGraph {
    vertex_count: usize,
    /// Row-major entries, `None` for an absent edge
    entries: Vec<Option<Weight>>,
}

/// Unvalidated wire form of [`WeightedGraph`]
#[derive(Deserialize)]
struct RawMatrix {
    vertex_count: usize,
    entries: Vec<Option<Weight>>,
}

impl TryFrom<RawMatrix> for WeightedGraph {
    type Error = AlgorithmError;

    fn try_from(raw: RawMatrix) -> Result<Self, Self::Error> {
        Self::from_entries(raw.vertex_count, raw.entries)
    }
}

impl WeightedGraph {
    /// Build from signed row-major rows where `0` marks an absent edge.
    ///
    /// Fails with `InvalidInput` for an empty, non-square or negative matrix.
    /// Diagonal entries are ignored.
    pub fn from_rows(rows: &[Vec<i64>]) -> Result<Self, AlgorithmError> {
        let n = rows.len();
        if n == 0 {
            return Err(AlgorithmError::InvalidInput(
                "graph must contain at least one vertex".to_string(),
            ));
        }

        let mut entries = Vec::with_capacity(n * n);
        for (u, row) in rows.iter().enumerate() {
            if row.len() != n {
                return Err(AlgorithmError::InvalidInput(format!(
                    "matrix is not square: row {} has {} entries, expected {}",
                    u,
                    row.len(),
                    n
                )));
            }
            for (v, &value) in row.iter().enumerate() {
                if value < 0 {
                    return Err(AlgorithmError::InvalidInput(format!(
                        "negative weight {} at ({}, {})",
                        value, u, v
                    )));
                }
                let present = u != v && value != 0;
                entries.push(present.then_some(value as Weight));
            }
        }

        Ok(Self { vertex_count: n, entries })
    }

    /// Build from explicit row-major entries of an `n`×`n` matrix.
    pub fn from_entries(n: usize, mut entries: Vec<Option<Weight>>) -> Result<Self, AlgorithmError> {
        if n == 0 {
            return Err(AlgorithmError::InvalidInput(
                "graph must contain at least one vertex".to_string(),
            ));
        }
        let expected = n.checked_mul(n).ok_or_else(|| {
            AlgorithmError::InvalidInput(format!("vertex count {} is too large", n))
        })?;
        if entries.len() != expected {
            return Err(AlgorithmError::InvalidInput(format!(
                "expected {} entries for a {}x{} matrix, found {}",
                expected,
                n,
                n,
                entries.len()
            )));
        }
        for u in 0..n {
            entries[u * n + u] = None;
        }

        Ok(Self { vertex_count: n, entries })
    }

    /// Complete graph where every ordered pair carries `weight`
    pub fn complete(n: usize, weight: Weight) -> Result<Self, AlgorithmError> {
        Self::from_entries(n, vec![Some(weight); n * n])
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Weight of the directed entry `u -> v`, `None` when absent or out of range
    #[inline]
    pub fn weight(&self, u: NodeId, v: NodeId) -> Option<Weight> {
        if u >= self.vertex_count || v >= self.vertex_count {
            return None;
        }
        self.entries[u * self.vertex_count + v]
    }

    /// Present out-neighbours of `u` in ascending index order
    pub fn neighbors(&self, u: NodeId) -> impl Iterator<Item = (NodeId, Weight)> + '_ {
        let n = self.vertex_count;
        let row: &[Option<Weight>] = if u < n { &self.entries[u * n..(u + 1) * n] } else { &[] };
        row.iter()
            .enumerate()
            .filter_map(|(v, w)| w.map(|w| (v, w)))
    }

    /// Number of present directed entries
    pub fn edge_count(&self) -> usize {
        self.entries.iter().filter(|w| w.is_some()).count()
    }

    pub fn is_symmetric(&self) -> bool {
        let n = self.vertex_count;
        (0..n).all(|u| (u + 1..n).all(|v| self.weight(u, v) == self.weight(v, u)))
    }

    /// Sum of present capacities leaving `u`, `None` on overflow
    pub fn out_weight(&self, u: NodeId) -> Option<Weight> {
        self.neighbors(u).try_fold(0, |sum: Weight, (_, w)| sum.checked_add(w))
    }

    /// Sum of present capacities entering `v`, `None` on overflow
    pub fn in_weight(&self, v: NodeId) -> Option<Weight> {
        (0..self.vertex_count)
            .filter_map(|u| self.weight(u, v))
            .try_fold(0, |sum: Weight, w| sum.checked_add(w))
    }

    /// Row-major dense copy with absent entries as zero
    pub fn to_dense(&self) -> Vec<Weight> {
        self.entries.iter().map(|w| w.unwrap_or(0)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_marks_absent_edge() {
        let graph = WeightedGraph::from_rows(&[
            vec![0, 4, 0],
            vec![4, 0, 2],
            vec![0, 2, 0],
        ])
        .unwrap();

        assert_eq!(graph.vertex_count(), 3);
        assert_eq!(graph.weight(0, 1), Some(4));
        assert_eq!(graph.weight(0, 2), None);
        assert_eq!(graph.weight(1, 1), None);
        assert_eq!(graph.edge_count(), 4);
        assert!(graph.is_symmetric());
    }

    #[test]
    fn test_rejects_malformed_matrices() {
        assert!(WeightedGraph::from_rows(&[]).is_err());
        assert!(WeightedGraph::from_rows(&[vec![0, 1], vec![1]]).is_err());

        let err = WeightedGraph::from_rows(&[vec![0, -3], vec![1, 0]]).unwrap_err();
        assert!(matches!(err, AlgorithmError::InvalidInput(_)));
        assert!(WeightedGraph::from_entries(2, vec![None; 3]).is_err());
    }

    #[test]
    fn test_explicit_zero_cost_edge() {
        let graph = WeightedGraph::from_entries(2, vec![Some(7), Some(0), None, Some(7)]).unwrap();

        assert_eq!(graph.weight(0, 1), Some(0));
        assert_eq!(graph.weight(1, 0), None);
        // Diagonal is cleared regardless of input
        assert_eq!(graph.weight(0, 0), None);
        assert!(!graph.is_symmetric());
    }

    #[test]
    fn test_neighbors_are_ascending() {
        let graph = WeightedGraph::from_rows(&[
            vec![0, 5, 0, 1],
            vec![0, 0, 0, 0],
            vec![0, 0, 0, 0],
            vec![0, 0, 0, 0],
        ])
        .unwrap();

        let neighbors: Vec<_> = graph.neighbors(0).collect();
        assert_eq!(neighbors, vec![(1, 5), (3, 1)]);
        assert_eq!(graph.neighbors(9).count(), 0);
        assert_eq!(graph.out_weight(0), Some(6));
        assert_eq!(graph.in_weight(3), Some(1));
    }

    #[test]
    fn test_weight_sums_report_overflow() {
        let graph = WeightedGraph::complete(3, Weight::MAX).unwrap();
        assert_eq!(graph.out_weight(0), None);
        assert_eq!(graph.in_weight(2), None);

        let single = WeightedGraph::complete(2, Weight::MAX).unwrap();
        assert_eq!(single.out_weight(0), Some(Weight::MAX));
    }

    #[test]
    fn test_deserialization_validates_shape() {
        let short = serde_json::from_str::<WeightedGraph>(r#"{"vertex_count":3,"entries":[null]}"#);
        assert!(short.is_err());
        assert!(serde_json::from_str::<WeightedGraph>(r#"{"vertex_count":0,"entries":[]}"#).is_err());

        let graph: WeightedGraph =
            serde_json::from_str(r#"{"vertex_count":2,"entries":[5,1,null,5]}"#).unwrap();
        assert_eq!(graph.weight(0, 1), Some(1));
        assert_eq!(graph.weight(0, 0), None);
        assert_eq!(graph.weight(1, 1), None);

        let json = serde_json::to_string(&graph).unwrap();
        assert_eq!(serde_json::from_str::<WeightedGraph>(&json).unwrap(), graph);
    }

    #[test]
    fn test_dense_copy() {
        let graph = WeightedGraph::complete(2, 3).unwrap();
        assert_eq!(graph.to_dense(), vec![0, 3, 3, 0]);
    }
}
