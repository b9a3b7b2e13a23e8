//! NETPLAN core: cabling, routing and capacity planning for city networks
//!
//! Three independent solvers share one dense matrix representation:
//!
//! - [`MinimumSpanningTree`]: Prim's algorithm, the cheapest cabling plan
//! - [`ExactTourSolver`]: exhaustive search for the shortest closed route,
//!   bounded by a [`SearchBudget`]
//! - [`MaxFlowSolver`]: Edmonds-Karp maximum flow between two vertices
//!
//! Around them sit the input reader, solver configuration, exchange lookup
//! and report rendering used by the command-line front end.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod algorithm;
pub mod config;
pub mod data_structures;
pub mod geometry;
pub mod io;
pub mod presentation;

pub use algorithm::graph::{ExactTourSolver, MaxFlowSolver, MinimumSpanningTree, SearchBudget};
pub use algorithm::traits::{Algorithm, AlgorithmError, ErrorKind, NodeId, Weight};
pub use config::SolverConfig;
pub use data_structures::matrix::WeightedGraph;
