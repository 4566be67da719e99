//! Game rules.
//!
//! Pure functions that judge a flipped pair, price it, and decide the
//! winner. The match engine calls into these but keeps all the state.

pub mod engine;

pub use engine::{is_pair, match_reward, GameResult};
