//! Network planning solvers over dense weighted matrices
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod max_flow;
pub mod mst;
pub mod tsp;

#[cfg(test)]
mod log_capture;

pub use self::max_flow::{FlowPath, MaxFlowResult, MaxFlowSolver, ResidualNetwork};
pub use self::mst::{MSTEdge, MSTResult, MinimumSpanningTree, UnionFind};
pub use self::tsp::{ExactTourSolver, SearchBudget, TourResult};
