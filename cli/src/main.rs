use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use log::{error, info};

use netplan_core::config::SolverConfig;
use netplan_core::io::load_network;
use netplan_core::presentation::NetworkReport;

use crate::cli::ProgramArguments;

mod cli;

/// Section failures exit with 1, unusable input or configuration with 2
fn main() -> ExitCode {
    env_logger::init();

    let args = ProgramArguments::parse();
    info!("{:?}", &args);

    match run(&args) {
        Ok(report) if report.has_failures() => ExitCode::from(1),
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{:#}", err);
            eprintln!("error: {:#}", err);
            ExitCode::from(2)
        }
    }
}

fn run(args: &ProgramArguments) -> anyhow::Result<NetworkReport> {
    let config = resolve_config(args)?;

    let input = load_network(&args.input)
        .with_context(|| format!("cannot load network from {}", args.input.display()))?;
    info!(
        "loaded {} vertices and {} exchanges from {}",
        input.vertex_count(),
        input.exchanges.len(),
        args.input.display()
    );

    let report = NetworkReport::compute(&input, &config, &args.locations);
    if args.json {
        println!("{}", report.to_json().context("cannot serialize report")?);
    } else {
        print!("{}", report);
    }
    Ok(report)
}

/// Configuration file values, overridden by command-line flags
fn resolve_config(args: &ProgramArguments) -> anyhow::Result<SolverConfig> {
    let mut config = match &args.config {
        Some(path) => SolverConfig::load(path)
            .with_context(|| format!("cannot load configuration from {}", path.display()))?,
        None => SolverConfig::default(),
    };

    if args.unbounded_tour {
        config.tour.max_steps = None;
        config.tour.time_limit_ms = None;
    }
    if args.max_steps.is_some() {
        config.tour.max_steps = args.max_steps;
    }
    if args.time_limit_ms.is_some() {
        config.tour.time_limit_ms = args.time_limit_ms;
    }
    if args.source.is_some() {
        config.flow.source = args.source;
    }
    if args.sink.is_some() {
        config.flow.sink = args.sink;
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_defaults() {
        let args = ProgramArguments::try_parse_from([
            "netplan", "net.txt", "--max-steps", "10", "--source", "1",
        ])
        .unwrap();
        let config = resolve_config(&args).unwrap();

        assert_eq!(config.tour.max_steps, Some(10));
        assert_eq!(config.tour.time_limit_ms, SolverConfig::default().tour.time_limit_ms);
        assert_eq!(config.flow.endpoints(4), (1, 3));
    }

    #[test]
    fn test_unbounded_tour_clears_limits() {
        let args = ProgramArguments::try_parse_from(["netplan", "net.txt", "--unbounded-tour"]).unwrap();
        let budget = resolve_config(&args).unwrap().tour_budget();

        assert_eq!(budget.max_steps, None);
        assert_eq!(budget.time_limit, None);
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let args = ProgramArguments::try_parse_from([
            "netplan", "net.txt", "--config", "/nonexistent/netplan.json",
        ])
        .unwrap();
        assert!(resolve_config(&args).is_err());
    }
}
