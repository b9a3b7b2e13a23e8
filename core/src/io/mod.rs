//! Reading network descriptions
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod input;

pub use self::input::{load_network, parse_network, parse_position, InputError, NetworkInput};
