//! Nearest exchange lookup
//!
//! Given the coordinates of the exchanges a new home can be wired to, find
//! the exchange closest to a service location by straight-line distance.
//! A linear scan; exchange sets are small and unordered.

use serde::{Deserialize, Serialize};

/// 2D position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn squared_distance_to(&self, other: &Position) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

/// Closest exchange to a query location
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExchangeMatch {
    /// Index into the exchange list
    pub index: usize,
    pub position: Position,
    pub distance: f64,
}

/// Closest of `exchanges` to `location`; ties go to the lowest index.
///
/// Returns `None` when there are no exchanges.
pub fn nearest_exchange(exchanges: &[Position], location: Position) -> Option<ExchangeMatch> {
    let mut best: Option<(usize, f64)> = None;
    for (index, exchange) in exchanges.iter().enumerate() {
        let d2 = exchange.squared_distance_to(&location);
        if best.map_or(true, |(_, best_d2)| d2 < best_d2) {
            best = Some((index, d2));
        }
    }

    best.map(|(index, d2)| ExchangeMatch {
        index,
        position: exchanges[index],
        distance: d2.sqrt(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance() {
        let a = Position::new(0.0, 0.0);
        let b = Position::new(3.0, 4.0);
        assert_eq!(a.squared_distance_to(&b), 25.0);
        assert_eq!(b.squared_distance_to(&a), 25.0);
    }

    #[test]
    fn test_picks_closest_exchange() {
        let exchanges = [
            Position::new(200.0, 500.0),
            Position::new(300.0, 100.0),
            Position::new(450.0, 150.0),
            Position::new(520.0, 480.0),
        ];
        let found = nearest_exchange(&exchanges, Position::new(400.0, 300.0)).unwrap();

        assert_eq!(found.index, 2);
        assert_eq!(found.position, exchanges[2]);
        assert!((found.distance - 158.113_883).abs() < 1e-5);
    }

    #[test]
    fn test_ties_prefer_first_exchange() {
        let exchanges = [Position::new(-1.0, 0.0), Position::new(1.0, 0.0)];
        let found = nearest_exchange(&exchanges, Position::new(0.0, 0.0)).unwrap();
        assert_eq!(found.index, 0);
        assert_eq!(found.distance, 1.0);
    }

    #[test]
    fn test_no_exchanges() {
        assert!(nearest_exchange(&[], Position::new(1.0, 1.0)).is_none());
    }
}
