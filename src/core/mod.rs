//! Core engine types: players, RNG, configuration.
//!
//! These are the building blocks shared by the deck and the match engine.

pub mod player;
pub mod rng;
pub mod config;

pub use player::{PlayerId, PlayerMap, PLAYER_COUNT};
pub use rng::GameRng;
pub use config::{ConfigError, MatchConfig};
