//! Maximum Flow Algorithm Implementation
//!
//! Edmonds-Karp: Ford-Fulkerson with breadth-first search for shortest
//! augmenting paths, over a dense residual matrix. Shortest paths bound the
//! number of augmentations by O(V·E), giving O(V·E²) overall, i.e. O(V⁵) for
//! dense matrix input.
//!
//! The residual network is an owned copy of the caller's capacity matrix,
//! built at the start of each solve and dropped at its end. The caller's
//! matrix is never written.
//!
//! Neighbour visitation order inside the BFS is fixed (ascending index unless
//! a custom permutation is installed), so intermediate residual states are
//! reproducible. The final flow value does not depend on that order.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::VecDeque;
use std::time::Instant;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::algorithm::traits::{Algorithm, AlgorithmError, NodeId, Weight};
use crate::data_structures::matrix::WeightedGraph;

/// Flow value type
pub type Flow = Weight;

/// Residual capacities of a flow network
///
/// `residual(u, v)` starts at the capacity of `u -> v` and tracks remaining
/// forward capacity plus flow that may be cancelled along `v -> u`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResidualNetwork {
    vertex_count: usize,
    residual: Vec<Weight>,
}

impl ResidualNetwork {
    /// Owned copy of the capacities of `graph`; absent edges become zero
    pub fn from_capacities(graph: &WeightedGraph) -> Self {
        Self {
            vertex_count: graph.vertex_count(),
            residual: graph.to_dense(),
        }
    }

    #[inline]
    pub fn residual(&self, u: NodeId, v: NodeId) -> Weight {
        self.residual[u * self.vertex_count + v]
    }

    /// Breadth-first search for a shortest augmenting path.
    ///
    /// Stops as soon as `sink` is discovered and returns the path from
    /// `source` to `sink` read off the predecessor chain.
    fn find_augmenting_path(
        &self,
        source: NodeId,
        sink: NodeId,
        order: &[NodeId],
        visits: &mut usize,
    ) -> Option<Vec<NodeId>> {
        let mut predecessor: Vec<Option<NodeId>> = vec![None; self.vertex_count];
        let mut discovered = vec![false; self.vertex_count];
        let mut queue = VecDeque::new();

        discovered[source] = true;
        queue.push_back(source);

        'search: while let Some(u) = queue.pop_front() {
            *visits += 1;
            for &v in order {
                if discovered[v] || self.residual(u, v) == 0 {
                    continue;
                }
                discovered[v] = true;
                predecessor[v] = Some(u);
                if v == sink {
                    break 'search;
                }
                queue.push_back(v);
            }
        }

        if !discovered[sink] {
            return None;
        }

        let mut path = vec![sink];
        let mut current = sink;
        while let Some(previous) = predecessor[current] {
            path.push(previous);
            current = previous;
        }
        path.reverse();
        Some(path)
    }

    /// Minimum residual capacity along `path`
    fn bottleneck(&self, path: &[NodeId]) -> Weight {
        path.windows(2)
            .map(|edge| self.residual(edge[0], edge[1]))
            .min()
            .unwrap_or(0)
    }

    /// Push `amount` along `path`: forward residuals shrink, reverse ones grow
    fn augment(&mut self, path: &[NodeId], amount: Weight) -> Result<(), AlgorithmError> {
        let n = self.vertex_count;
        for edge in path.windows(2) {
            let (u, v) = (edge[0], edge[1]);
            self.residual[u * n + v] -= amount;
            self.residual[v * n + u] = self.residual[v * n + u]
                .checked_add(amount)
                .ok_or_else(|| AlgorithmError::InvalidInput("residual capacity overflows".to_string()))?;
        }
        Ok(())
    }

    /// Vertices reachable from `source` over positive residual capacity
    pub fn reachable_from(&self, source: NodeId) -> Vec<NodeId> {
        let mut seen = vec![false; self.vertex_count];
        let mut stack = vec![source];
        seen[source] = true;

        while let Some(u) = stack.pop() {
            for v in 0..self.vertex_count {
                if !seen[v] && self.residual(u, v) > 0 {
                    seen[v] = true;
                    stack.push(v);
                }
            }
        }

        (0..self.vertex_count).filter(|&v| seen[v]).collect()
    }
}

/// Flow path representation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowPath {
    /// Path vertices from source to sink
    pub path: Vec<NodeId>,
    /// Flow amount pushed along the path
    pub flow: Flow,
}

/// Flow algorithm performance metrics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowMetrics {
    /// Number of augmenting paths applied
    pub augmentations: usize,
    /// Vertices dequeued across all breadth-first searches
    pub bfs_visits: usize,
    pub execution_time_ms: f64,
}

/// Maximum flow result with detailed flow information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaxFlowResult {
    /// Maximum flow value
    pub max_flow: Flow,
    /// Augmenting paths in the order they were applied
    pub flow_paths: Vec<FlowPath>,
    /// Source side of a minimum cut
    pub min_cut: Vec<NodeId>,
    pub metrics: FlowMetrics,
}

/// Edmonds-Karp maximum flow solver
#[derive(Debug, Clone, Default)]
pub struct MaxFlowSolver {
    /// Custom BFS neighbour order; ascending index when unset
    neighbor_order: Option<Vec<NodeId>>,
    metrics: FlowMetrics,
}

impl MaxFlowSolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Visit BFS neighbours in `order`, which must be a permutation of `0..n`
    pub fn with_neighbor_order(mut self, order: Vec<NodeId>) -> Self {
        self.neighbor_order = Some(order);
        self
    }

    pub fn get_metrics(&self) -> &FlowMetrics {
        &self.metrics
    }

    /// Compute the maximum flow from `source` to `sink`.
    ///
    /// Fails with `InvalidEndpoints` when `source == sink` or either lies
    /// outside `0..n`.
    pub fn solve(
        &mut self,
        capacities: &WeightedGraph,
        source: NodeId,
        sink: NodeId,
    ) -> Result<MaxFlowResult, AlgorithmError> {
        let start_time = Instant::now();
        let n = capacities.vertex_count();

        if source == sink || source >= n || sink >= n {
            return Err(AlgorithmError::InvalidEndpoints {
                source_vertex: source,
                sink_vertex: sink,
                vertex_count: n,
            });
        }
        let order = self.visitation_order(n)?;

        self.metrics = FlowMetrics::default();
        let mut network = ResidualNetwork::from_capacities(capacities);
        let mut max_flow: Flow = 0;
        let mut flow_paths = Vec::new();

        while let Some(path) = network.find_augmenting_path(source, sink, &order, &mut self.metrics.bfs_visits) {
            let amount = network.bottleneck(&path);
            network.augment(&path, amount)?;
            max_flow = max_flow
                .checked_add(amount)
                .ok_or_else(|| AlgorithmError::InvalidInput("flow value overflows".to_string()))?;

            self.metrics.augmentations += 1;
            flow_paths.push(FlowPath { path, flow: amount });
        }

        let min_cut = network.reachable_from(source);
        self.metrics.execution_time_ms = start_time.elapsed().as_secs_f64() * 1000.0;
        for flow_path in &flow_paths {
            trace!("edmonds-karp: pushed {} along {:?}", flow_path.flow, flow_path.path);
        }
        debug!(
            "edmonds-karp: max flow {} from {} to {} after {} augmentations",
            max_flow, source, sink, self.metrics.augmentations
        );

        Ok(MaxFlowResult {
            max_flow,
            flow_paths,
            min_cut,
            metrics: self.metrics.clone(),
        })
    }

    fn visitation_order(&self, n: usize) -> Result<Vec<NodeId>, AlgorithmError> {
        let Some(order) = &self.neighbor_order else {
            return Ok((0..n).collect());
        };

        let mut seen = vec![false; n];
        let is_permutation = order.len() == n
            && order.iter().all(|&v| v < n && !std::mem::replace(&mut seen[v], true));
        if !is_permutation {
            return Err(AlgorithmError::InvalidInput(format!(
                "neighbor order {:?} is not a permutation of 0..{}",
                order, n
            )));
        }
        Ok(order.clone())
    }
}

impl Algorithm for MaxFlowSolver {
    fn name(&self) -> &'static str {
        "Edmonds-Karp"
    }
}
