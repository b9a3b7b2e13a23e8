//! Network description reader
//!
//! The input is line oriented but token based: a vertex count N, then N²
//! distances and N² capacities (both row-major, `0` meaning "no link"), then
//! exchange coordinates written as `(x,y)`. Values may be spread over lines
//! freely and lines starting with `#` are comments.
//!
//! ```text
//! 4
//! 0 16 45 32
//! 16 0 18 21
//! 45 18 0 7
//! 32 21 7 0
//!
//! 0 48 12 18
//! 52 0 42 32
//! 18 46 0 56
//! 24 36 52 0
//!
//! (200,500)
//! (300,100)
//! (450,150)
//! (520,480)
//! ```

use std::fs;
use std::path::Path;

use serde::Serialize;
use thiserror::Error;

use crate::algorithm::traits::AlgorithmError;
use crate::data_structures::matrix::WeightedGraph;
use crate::geometry::nearest::Position;

/// Parsed network description
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkInput {
    /// Link lengths between neighbourhoods
    pub distances: WeightedGraph,
    /// Transmission capacity between neighbourhoods
    pub capacities: WeightedGraph,
    /// Exchange locations, any number including none
    pub exchanges: Vec<Position>,
}

impl NetworkInput {
    pub fn vertex_count(&self) -> usize {
        self.distances.vertex_count()
    }
}

#[derive(Debug, Error)]
pub enum InputError {
    #[error("Failed to read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unexpected end of input: expected {expected}")]
    UnexpectedEof { expected: String },

    #[error("Line {line}: expected an integer, found `{token}`")]
    InvalidNumber { line: usize, token: String },

    #[error("Line {line}: vertex count must be positive, found {count}")]
    InvalidVertexCount { line: usize, count: i64 },

    #[error("Line {line}: malformed coordinate `{token}`, expected `(x,y)`")]
    InvalidCoordinate { line: usize, token: String },

    #[error("Invalid {name} matrix")]
    Matrix {
        name: &'static str,
        #[source]
        source: AlgorithmError,
    },
}

#[derive(Debug, Clone, Copy)]
struct Token<'a> {
    text: &'a str,
    line: usize,
}

fn tokenize(source: &str) -> Vec<Token<'_>> {
    source
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim_start().starts_with('#'))
        .flat_map(|(index, line)| line.split_whitespace().map(move |text| Token { text, line: index + 1 }))
        .collect()
}

struct TokenStream<'a> {
    tokens: Vec<Token<'a>>,
    cursor: usize,
}

impl<'a> TokenStream<'a> {
    fn next_integer(&mut self, expected: &str) -> Result<(i64, usize), InputError> {
        let token = self
            .tokens
            .get(self.cursor)
            .copied()
            .ok_or_else(|| InputError::UnexpectedEof { expected: expected.to_string() })?;
        self.cursor += 1;

        let value = token.text.parse::<i64>().map_err(|_| InputError::InvalidNumber {
            line: token.line,
            token: token.text.to_string(),
        })?;
        Ok((value, token.line))
    }

    fn read_matrix(&mut self, n: usize, name: &'static str) -> Result<WeightedGraph, InputError> {
        let mut rows = Vec::with_capacity(n.min(1024));
        for u in 0..n {
            let mut row = Vec::with_capacity(n.min(1024));
            for v in 0..n {
                let (value, _) = self.next_integer(&format!("{} entry ({}, {})", name, u, v))?;
                row.push(value);
            }
            rows.push(row);
        }
        WeightedGraph::from_rows(&rows).map_err(|source| InputError::Matrix { name, source })
    }

    /// Remaining tokens as `(x,y)` pairs; whitespace inside a pair is allowed
    fn read_coordinates(&mut self) -> Result<Vec<Position>, InputError> {
        let mut positions = Vec::new();
        let mut pending = String::new();
        let mut pending_line = 0;

        for token in &self.tokens[self.cursor..] {
            if pending.is_empty() {
                if !token.text.starts_with('(') {
                    return Err(InputError::InvalidCoordinate {
                        line: token.line,
                        token: token.text.to_string(),
                    });
                }
                pending_line = token.line;
            }
            pending.push_str(token.text);

            if pending.ends_with(')') {
                positions.push(parse_pair(&pending, pending_line)?);
                pending.clear();
            }
        }
        self.cursor = self.tokens.len();

        if !pending.is_empty() {
            return Err(InputError::InvalidCoordinate { line: pending_line, token: pending });
        }
        Ok(positions)
    }
}

fn parse_pair(text: &str, line: usize) -> Result<Position, InputError> {
    let invalid = || InputError::InvalidCoordinate { line, token: text.to_string() };

    let inner = text
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(invalid)?;
    let (x, y) = inner.split_once(',').ok_or_else(invalid)?;
    let x = x.trim().parse::<f64>().map_err(|_| invalid())?;
    let y = y.trim().parse::<f64>().map_err(|_| invalid())?;

    if !x.is_finite() || !y.is_finite() {
        return Err(invalid());
    }
    Ok(Position::new(x, y))
}

/// Parse a single `(x,y)` coordinate, e.g. a service location
pub fn parse_position(text: &str) -> Result<Position, InputError> {
    let compact: String = text.split_whitespace().collect();
    parse_pair(&compact, 1)
}

/// Parse a network description from text
pub fn parse_network(source: &str) -> Result<NetworkInput, InputError> {
    let mut stream = TokenStream { tokens: tokenize(source), cursor: 0 };

    let (count, line) = stream.next_integer("vertex count")?;
    if count <= 0 {
        return Err(InputError::InvalidVertexCount { line, count });
    }
    let n = count as usize;

    let distances = stream.read_matrix(n, "distance")?;
    let capacities = stream.read_matrix(n, "capacity")?;
    let exchanges = stream.read_coordinates()?;

    Ok(NetworkInput { distances, capacities, exchanges })
}

/// Read and parse a network description file
pub fn load_network(path: &Path) -> Result<NetworkInput, InputError> {
    let source = fs::read_to_string(path)?;
    parse_network(&source)
}
