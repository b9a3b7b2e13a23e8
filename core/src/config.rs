//! Solver configuration
//!
//! Settings are read from a JSON document; every field is optional and
//! falls back to the defaults below.
//!
//! ```json
//! { "tour": { "max_steps": 5000000, "time_limit_ms": 10000 },
//!   "flow": { "source": 0, "sink": null } }
//! ```
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::algorithm::graph::tsp::SearchBudget;
use crate::algorithm::traits::NodeId;

pub const DEFAULT_TOUR_MAX_STEPS: u64 = 50_000_000;
pub const DEFAULT_TOUR_TIME_LIMIT_MS: u64 = 30_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Search limits for the exact tour solver; `None` removes a limit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TourConfig {
    pub max_steps: Option<u64>,
    pub time_limit_ms: Option<u64>,
}

impl Default for TourConfig {
    fn default() -> Self {
        Self {
            max_steps: Some(DEFAULT_TOUR_MAX_STEPS),
            time_limit_ms: Some(DEFAULT_TOUR_TIME_LIMIT_MS),
        }
    }
}

/// Flow endpoints; unset means first and last vertex
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FlowConfig {
    pub source: Option<NodeId>,
    pub sink: Option<NodeId>,
}

impl FlowConfig {
    /// Resolve `(source, sink)` for a network of `vertex_count` vertices
    pub fn endpoints(&self, vertex_count: usize) -> (NodeId, NodeId) {
        let source = self.source.unwrap_or(0);
        let sink = self.sink.unwrap_or(vertex_count.saturating_sub(1));
        (source, sink)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolverConfig {
    pub tour: TourConfig,
    pub flow: FlowConfig,
}

impl SolverConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn tour_budget(&self) -> SearchBudget {
        SearchBudget {
            max_steps: self.tour.max_steps,
            time_limit: self.tour.time_limit_ms.map(Duration::from_millis),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SolverConfig::default();
        let budget = config.tour_budget();

        assert_eq!(budget.max_steps, Some(DEFAULT_TOUR_MAX_STEPS));
        assert_eq!(budget.time_limit, Some(Duration::from_millis(DEFAULT_TOUR_TIME_LIMIT_MS)));
        assert_eq!(config.flow.endpoints(6), (0, 5));
        assert_eq!(config.flow.endpoints(1), (0, 0));
    }

    #[test]
    fn test_partial_document_keeps_defaults() {
        let config = SolverConfig::from_json(r#"{ "flow": { "sink": 2 } }"#).unwrap();

        assert_eq!(config.tour, TourConfig::default());
        assert_eq!(config.flow.endpoints(6), (0, 2));
    }

    #[test]
    fn test_null_removes_limit() {
        let config = SolverConfig::from_json(r#"{ "tour": { "max_steps": null, "time_limit_ms": 250 } }"#).unwrap();
        let budget = config.tour_budget();

        assert_eq!(budget.max_steps, None);
        assert_eq!(budget.time_limit, Some(Duration::from_millis(250)));
    }

    #[test]
    fn test_rejects_unknown_fields() {
        let err = SolverConfig::from_json(r#"{ "tour": { "steps": 3 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
