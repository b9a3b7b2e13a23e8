//! Exact Travelling Salesman Tour Search
//!
//! Exhaustive search for the shortest closed tour that visits every vertex
//! once and returns to vertex 0. Vertex 0 is fixed as the start, which removes
//! rotational duplicates; reflections are searched separately.
//!
//! # Search Order
//!
//! Tours are generated recursively in lexicographic order of the vertices
//! after 0. A prefix is abandoned together with all of its extensions when
//! its last edge is absent, or when its cost already reaches the best
//! complete tour found so far. Weights are non-negative, so the second cut
//! never discards a strictly better tour, and the first tour in generation
//! order wins ties.
//!
//! # Complexity
//!
//! O(n!) worst case. Every solve runs under a [`SearchBudget`]; exceeding it
//! ends the search with `SearchTruncated`.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::time::{Duration, Instant};

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::algorithm::traits::{Algorithm, AlgorithmError, NodeId, Weight};
use crate::data_structures::matrix::WeightedGraph;

/// Steps between two wall-clock checks
const CLOCK_CHECK_INTERVAL: u64 = 1024;

/// Upper bound on the work a single tour search may perform
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchBudget {
    /// Maximum number of prefix extensions
    pub max_steps: Option<u64>,
    /// Maximum wall-clock time
    pub time_limit: Option<Duration>,
}

impl SearchBudget {
    pub fn unlimited() -> Self {
        Self::default()
    }

    pub fn steps(max_steps: u64) -> Self {
        Self { max_steps: Some(max_steps), time_limit: None }
    }

    pub fn time(limit: Duration) -> Self {
        Self { max_steps: None, time_limit: Some(limit) }
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }
}

/// Optimal closed tour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TourResult {
    /// N+1 vertices, starting and ending at vertex 0
    pub tour: Vec<NodeId>,
    /// Sum of weights along the tour including the closing edge
    pub total: Weight,
    pub statistics: TourStatistics,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TourStatistics {
    /// Prefix extensions attempted
    pub steps: u64,
    /// Tours that closed back to vertex 0
    pub complete_tours: u64,
    /// Prefixes cut because they could not beat the incumbent
    pub pruned_prefixes: u64,
    /// Prefixes cut because a required edge is absent
    pub dead_ends: u64,
    pub execution_time_ms: f64,
}

/// Exhaustive Hamiltonian cycle search under a search budget
#[derive(Debug, Clone)]
pub struct ExactTourSolver {
    budget: SearchBudget,
    statistics: TourStatistics,
}

impl ExactTourSolver {
    pub fn new(budget: SearchBudget) -> Self {
        Self {
            budget,
            statistics: TourStatistics::default(),
        }
    }

    pub fn budget(&self) -> SearchBudget {
        self.budget
    }

    pub fn get_statistics(&self) -> &TourStatistics {
        &self.statistics
    }

    /// Find the minimum-weight closed tour through every vertex.
    ///
    /// Fails with `NoHamiltonianCycle` when no ordering closes, and with
    /// `SearchTruncated` when the budget runs out first.
    pub fn solve(&mut self, graph: &WeightedGraph) -> Result<TourResult, AlgorithmError> {
        let start_time = Instant::now();
        let n = graph.vertex_count();

        if n == 1 {
            self.statistics = TourStatistics::default();
            return Ok(TourResult {
                tour: vec![0, 0],
                total: 0,
                statistics: self.statistics.clone(),
            });
        }

        let mut search = TourSearch::new(graph, self.budget, start_time);
        let outcome = search.extend(0);
        search.statistics.execution_time_ms = start_time.elapsed().as_secs_f64() * 1000.0;
        self.statistics = search.statistics.clone();
        outcome?;

        let (total, mut tour) = search
            .best
            .ok_or(AlgorithmError::NoHamiltonianCycle { vertex_count: n })?;
        tour.push(0);

        trace!("tour search: best tour {:?}", tour);
        debug!(
            "tour search: total {} after {} steps ({} complete tours, {} pruned)",
            total, self.statistics.steps, self.statistics.complete_tours, self.statistics.pruned_prefixes
        );

        Ok(TourResult {
            tour,
            total,
            statistics: self.statistics.clone(),
        })
    }
}

/// Per-call search state; dropped when `solve` returns
struct TourSearch<'a> {
    graph: &'a WeightedGraph,
    budget: SearchBudget,
    started: Instant,
    prefix: Vec<NodeId>,
    used: Vec<bool>,
    best: Option<(Weight, Vec<NodeId>)>,
    statistics: TourStatistics,
}

impl<'a> TourSearch<'a> {
    fn new(graph: &'a WeightedGraph, budget: SearchBudget, started: Instant) -> Self {
        let n = graph.vertex_count();
        let mut used = vec![false; n];
        used[0] = true;
        let mut prefix = Vec::with_capacity(n);
        prefix.push(0);

        Self {
            graph,
            budget,
            started,
            prefix,
            used,
            best: None,
            statistics: TourStatistics::default(),
        }
    }

    fn best_total(&self) -> Option<Weight> {
        self.best.as_ref().map(|(total, _)| *total)
    }

    fn charge_step(&mut self) -> Result<(), AlgorithmError> {
        if self.budget.max_steps.is_some_and(|max| self.statistics.steps >= max) {
            return Err(self.truncated());
        }
        self.statistics.steps += 1;

        if self.statistics.steps % CLOCK_CHECK_INTERVAL == 0 {
            if let Some(limit) = self.budget.time_limit {
                if self.started.elapsed() >= limit {
                    return Err(self.truncated());
                }
            }
        }
        Ok(())
    }

    fn truncated(&self) -> AlgorithmError {
        AlgorithmError::SearchTruncated {
            steps: self.statistics.steps,
            best_total: self.best_total(),
        }
    }

    fn extend(&mut self, cost: Weight) -> Result<(), AlgorithmError> {
        let n = self.graph.vertex_count();
        let last = self.prefix[self.prefix.len() - 1];

        if self.prefix.len() == n {
            let Some(closing) = self.graph.weight(last, 0) else {
                self.statistics.dead_ends += 1;
                return Ok(());
            };
            let total = add_weight(cost, closing)?;
            self.statistics.complete_tours += 1;
            if self.best_total().map_or(true, |best| total < best) {
                self.best = Some((total, self.prefix.clone()));
            }
            return Ok(());
        }

        for next in 1..n {
            if self.used[next] {
                continue;
            }
            self.charge_step()?;

            let Some(weight) = self.graph.weight(last, next) else {
                self.statistics.dead_ends += 1;
                continue;
            };
            let partial = add_weight(cost, weight)?;
            if self.best_total().is_some_and(|best| partial >= best) {
                self.statistics.pruned_prefixes += 1;
                continue;
            }

            self.used[next] = true;
            self.prefix.push(next);
            self.extend(partial)?;
            self.prefix.pop();
            self.used[next] = false;
        }

        Ok(())
    }
}

fn add_weight(cost: Weight, weight: Weight) -> Result<Weight, AlgorithmError> {
    cost.checked_add(weight)
        .ok_or_else(|| AlgorithmError::InvalidInput("tour weight overflows".to_string()))
}

impl Algorithm for ExactTourSolver {
    fn name(&self) -> &'static str {
        "Exact Tour Search"
    }
}
