//! Network plan report
//!
//! Runs the cabling, routing and capacity solvers over a parsed network,
//! answers nearest-exchange queries, and renders the outcome as text or
//! JSON. Each section carries either its result or the tagged error that
//! stopped it; one failing section never hides the others.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::fmt;

use log::{info, warn};
use serde::Serialize;

use crate::algorithm::graph::{ExactTourSolver, MaxFlowSolver, MinimumSpanningTree};
use crate::algorithm::traits::{Algorithm, AlgorithmError, ErrorKind, NodeId, Weight};
use crate::config::SolverConfig;
use crate::geometry::nearest::{nearest_exchange, ExchangeMatch, Position};
use crate::io::input::NetworkInput;
use crate::presentation::labels::{format_route, vertex_label};

/// Result of one report section
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome<T> {
    Ok(T),
    Error { kind: ErrorKind, message: String },
}

impl<T> Outcome<T> {
    pub fn is_error(&self) -> bool {
        matches!(self, Outcome::Error { .. })
    }

    pub fn ok(&self) -> Option<&T> {
        match self {
            Outcome::Ok(value) => Some(value),
            Outcome::Error { .. } => None,
        }
    }
}

impl<T> From<Result<T, AlgorithmError>> for Outcome<T> {
    fn from(result: Result<T, AlgorithmError>) -> Self {
        match result {
            Ok(value) => Outcome::Ok(value),
            Err(err) => Outcome::Error {
                kind: err.kind(),
                message: err.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabeledEdge {
    pub from: String,
    pub to: String,
    pub from_index: NodeId,
    pub to_index: NodeId,
    pub weight: Weight,
}

/// Minimum spanning tree over the distance matrix
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CablingPlan {
    pub edges: Vec<LabeledEdge>,
    pub total_weight: Weight,
}

/// Shortest closed tour over the distance matrix
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutePlan {
    pub route: Vec<String>,
    pub tour: Vec<NodeId>,
    pub total: Weight,
}

/// Maximum flow over the capacity matrix
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CapacityPlan {
    pub source: String,
    pub sink: String,
    pub max_flow: Weight,
    /// Source side of a minimum cut
    pub min_cut: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExchangeAssignment {
    pub location: Position,
    pub exchange: Option<ExchangeMatch>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkReport {
    pub vertex_count: usize,
    pub cabling: Outcome<CablingPlan>,
    pub routing: Outcome<RoutePlan>,
    pub capacity: Outcome<CapacityPlan>,
    pub exchanges: Vec<ExchangeAssignment>,
}

impl NetworkReport {
    /// Run every solver over `input` and answer each location query
    pub fn compute(input: &NetworkInput, config: &SolverConfig, locations: &[Position]) -> Self {
        let n = input.vertex_count();

        let mut mst = MinimumSpanningTree::new();
        info!("running {} over {} vertices", mst.name(), n);
        let cabling = mst.build(&input.distances).map(|result| CablingPlan {
            edges: result
                .edges
                .iter()
                .map(|edge| LabeledEdge {
                    from: vertex_label(edge.source),
                    to: vertex_label(edge.target),
                    from_index: edge.source,
                    to_index: edge.target,
                    weight: edge.weight,
                })
                .collect(),
            total_weight: result.total_weight,
        });

        let mut tour_solver = ExactTourSolver::new(config.tour_budget());
        info!("running {} with budget {:?}", tour_solver.name(), tour_solver.budget());
        let routing = tour_solver.solve(&input.distances).map(|result| RoutePlan {
            route: result.tour.iter().map(|&v| vertex_label(v)).collect(),
            tour: result.tour,
            total: result.total,
        });

        let (source, sink) = config.flow.endpoints(n);
        let mut flow_solver = MaxFlowSolver::new();
        info!("running {} from {} to {}", flow_solver.name(), source, sink);
        let capacity = flow_solver.solve(&input.capacities, source, sink).map(|result| CapacityPlan {
            source: vertex_label(source),
            sink: vertex_label(sink),
            max_flow: result.max_flow,
            min_cut: result.min_cut.iter().map(|&v| vertex_label(v)).collect(),
        });

        let exchanges = locations
            .iter()
            .map(|&location| ExchangeAssignment {
                location,
                exchange: nearest_exchange(&input.exchanges, location),
            })
            .collect();

        let report = Self {
            vertex_count: n,
            cabling: cabling.into(),
            routing: routing.into(),
            capacity: capacity.into(),
            exchanges,
        };
        for (section, failed) in [
            ("cabling", report.cabling.is_error()),
            ("routing", report.routing.is_error()),
            ("capacity", report.capacity.is_error()),
        ] {
            if failed {
                warn!("{} section failed", section);
            }
        }
        report
    }

    /// True when any solver section failed
    pub fn has_failures(&self) -> bool {
        self.cabling.is_error() || self.routing.is_error() || self.capacity.is_error()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for NetworkReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Cabling plan (minimum spanning tree):")?;
        match &self.cabling {
            Outcome::Ok(plan) => {
                for edge in &plan.edges {
                    writeln!(f, "  ({}, {}) {}", edge.from, edge.to, edge.weight)?;
                }
                writeln!(f, "  Total: {}", plan.total_weight)?;
            }
            Outcome::Error { kind, message } => writeln!(f, "  {}: {}", kind, message)?,
        }

        writeln!(f, "Route (shortest closed tour):")?;
        match &self.routing {
            Outcome::Ok(plan) => {
                writeln!(f, "  {}", format_route(&plan.tour))?;
                writeln!(f, "  Total: {}", plan.total)?;
            }
            Outcome::Error { kind, message } => writeln!(f, "  {}: {}", kind, message)?,
        }

        match &self.capacity {
            Outcome::Ok(plan) => {
                writeln!(f, "Maximum flow from {} to {}: {}", plan.source, plan.sink, plan.max_flow)?;
            }
            Outcome::Error { kind, message } => writeln!(f, "Maximum flow:\n  {}: {}", kind, message)?,
        }

        for assignment in &self.exchanges {
            let location = assignment.location;
            match &assignment.exchange {
                Some(found) => writeln!(
                    f,
                    "Nearest exchange to ({}, {}): #{} at ({}, {}), distance {:.2}",
                    location.x,
                    location.y,
                    found.index + 1,
                    found.position.x,
                    found.position.y,
                    found.distance
                )?,
                None => writeln!(f, "Nearest exchange to ({}, {}): no exchanges known", location.x, location.y)?,
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::input::parse_network;

    const NETWORK: &str = "\
4
0 16 45 32
16 0 18 21
45 18 0 7
32 21 7 0
0 48 12 18
52 0 42 32
18 46 0 56
24 36 52 0
(200,500) (300,100) (450,150) (520,480)
";

    #[test]
    fn test_full_report() {
        let input = parse_network(NETWORK).unwrap();
        let report = NetworkReport::compute(&input, &SolverConfig::default(), &[Position::new(400.0, 300.0)]);

        let cabling = report.cabling.ok().unwrap();
        assert_eq!(cabling.total_weight, 41);
        assert_eq!(cabling.edges.len(), 3);
        assert_eq!(cabling.edges[0].from, "A");
        assert_eq!(cabling.edges[0].to, "B");

        let routing = report.routing.ok().unwrap();
        assert_eq!(routing.total, 16 + 18 + 7 + 32);
        assert_eq!(routing.route, vec!["A", "B", "C", "D", "A"]);

        let capacity = report.capacity.ok().unwrap();
        assert_eq!(capacity.source, "A");
        assert_eq!(capacity.sink, "D");
        assert_eq!(capacity.max_flow, 78);

        assert_eq!(report.exchanges[0].exchange.map(|e| e.index), Some(2));
        assert!(!report.has_failures());

        let text = report.to_string();
        assert!(text.contains("(A, B) 16"));
        assert!(text.contains("A -> B -> C -> D -> A"));
        assert!(text.contains("Maximum flow from A to D: 78"));
        assert!(text.contains("#3 at (450, 150)"));
    }

    #[test]
    fn test_failures_are_reported_per_section() {
        let input = parse_network("1\n0\n0\n").unwrap();
        let report = NetworkReport::compute(&input, &SolverConfig::default(), &[Position::new(0.0, 0.0)]);

        assert_eq!(report.cabling.ok().map(|plan| plan.edges.len()), Some(0));
        assert_eq!(report.routing.ok().map(|plan| plan.total), Some(0));
        assert!(matches!(
            report.capacity,
            Outcome::Error { kind: ErrorKind::InvalidEndpoints, .. }
        ));
        assert!(report.has_failures());
        let text = report.to_string();
        assert!(text.contains("INVALID_ENDPOINTS"));
        assert!(text.contains("no exchanges known"));
    }

    #[test]
    fn test_json_tags_errors() {
        let input = parse_network("2\n0 0\n0 0\n0 0\n0 0\n").unwrap();
        let report = NetworkReport::compute(&input, &SolverConfig::default(), &[]);
        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

        assert_eq!(json["cabling"]["error"]["kind"], "DISCONNECTED_GRAPH");
        assert_eq!(json["routing"]["error"]["kind"], "NO_HAMILTONIAN_CYCLE");
        assert_eq!(json["capacity"]["ok"]["max_flow"], 0);
    }
}
