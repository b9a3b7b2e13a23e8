//! Turning index-based solver results into labelled plans
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod labels;
pub mod report;

pub use self::labels::{format_route, vertex_label};
pub use self::report::{NetworkReport, Outcome};
