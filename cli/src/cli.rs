use std::path::PathBuf;

use clap::Parser;
use netplan_core::geometry::Position;
use netplan_core::io::parse_position;

#[derive(Parser, Debug)]
#[command(version, about = "Cabling, routing and capacity planning for a city network")]
pub struct ProgramArguments {
    #[arg(help = "network description file")]
    pub input: PathBuf,

    #[arg(short, long, help = "JSON solver configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "step cap for the exact tour search")]
    pub max_steps: Option<u64>,

    #[arg(long, help = "time limit for the exact tour search in milliseconds")]
    pub time_limit_ms: Option<u64>,

    #[arg(long, help = "disable every tour search limit", conflicts_with_all = ["max_steps", "time_limit_ms"])]
    pub unbounded_tour: bool,

    #[arg(long, help = "flow source vertex index (default: first vertex)")]
    pub source: Option<usize>,

    #[arg(long, help = "flow sink vertex index (default: last vertex)")]
    pub sink: Option<usize>,

    #[arg(
        long = "locate",
        value_name = "(X,Y)",
        value_parser = parse_location,
        help = "service location to assign to its nearest exchange; repeatable"
    )]
    pub locations: Vec<Position>,

    #[arg(long, help = "print the report as JSON", default_value = "false")]
    pub json: bool,
}

fn parse_location(text: &str) -> Result<Position, String> {
    parse_position(text).map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_arguments() {
        let args = ProgramArguments::try_parse_from(["netplan", "inputs/input.txt"]).unwrap();

        assert_eq!(args.input, PathBuf::from("inputs/input.txt"));
        assert!(args.config.is_none());
        assert!(args.locations.is_empty());
        assert!(!args.json);
    }

    #[test]
    fn test_overrides_and_locations() {
        let args = ProgramArguments::try_parse_from([
            "netplan", "net.txt", "--max-steps", "1000", "--sink", "2",
            "--locate", "(400,300)", "--locate", "( 1.5 , 2 )", "--json",
        ])
        .unwrap();

        assert_eq!(args.max_steps, Some(1000));
        assert_eq!(args.sink, Some(2));
        assert_eq!(args.locations, vec![Position::new(400.0, 300.0), Position::new(1.5, 2.0)]);
        assert!(args.json);
    }

    #[test]
    fn test_rejects_bad_location_and_conflicts() {
        assert!(ProgramArguments::try_parse_from(["netplan", "net.txt", "--locate", "400,300"]).is_err());
        assert!(ProgramArguments::try_parse_from([
            "netplan", "net.txt", "--unbounded-tour", "--max-steps", "5",
        ])
        .is_err());
    }
}
