//! # memory-match
//!
//! Game engine for two-player "concentration": a 52-card deck is dealt face
//! down, players take turns flipping two cards, and matching ranks score.
//!
//! ## Rules
//!
//! 1. **Pairs**: two cards of the same rank, suit irrelevant.
//!
//! 2. **Turns**: a match keeps the turn, a mismatch passes it.
//!
//! 3. **Endgame bonus**: the last 5 of the 26 pairs are worth 2 points
//!    instead of 1. Higher score wins; equal scores draw.
//!
//! ## Architecture
//!
//! - **Session object**: `MatchEngine` owns all state. No globals, so any
//!   number of games can run side by side.
//!
//! - **Virtual clock**: the reveal pause and the mismatch hide delay are
//!   timers on a clock the host advances. Every timer is stamped with the
//!   game generation and dropped if a restart happened in between.
//!
//! - **Push notifications**: views subscribe a `GameListener` and never
//!   mutate state directly.
//!
//! ## Modules
//!
//! - `core`: Players, RNG, configuration
//! - `cards`: Card values, faces, deck construction and shuffling
//! - `rules`: Pair judging, rewards, final result
//! - `engine`: Turn state machine, timers, notifications

pub mod core;
pub mod cards;
pub mod rules;
pub mod engine;

// Re-export commonly used types
pub use crate::core::{ConfigError, GameRng, MatchConfig, PlayerId, PlayerMap};

pub use crate::cards::{Card, CardFace, Deck, Rank, Suit, SuitColor, DECK_SIZE, TOTAL_PAIRS};

pub use crate::rules::{is_pair, match_reward, GameResult};

pub use crate::engine::{
    Flipped, GameListener, GameSnapshot, MatchEngine, Message, Notification, Phase,
    SelectionIgnored, TurnPhase,
};
