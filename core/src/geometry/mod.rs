//! Planar geometry for exchange placement
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod nearest;

pub use self::nearest::{nearest_exchange, ExchangeMatch, Position};
