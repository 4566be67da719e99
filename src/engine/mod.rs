//! Match engine: the turn state machine for a two-player memory game.
//!
//! ## Key Types
//!
//! - `MatchEngine`: one game session; accepts selections, runs timers
//! - `Flipped`: cards flipped this turn, at most two
//! - `Phase` / `TurnPhase`: lifecycle and turn sub-state
//! - `Notification` / `GameListener`: push updates to a view
//! - `Message`: status line text
//! - `TimerQueue`: fire-once timers on the session's virtual clock
//!
//! ## Example
//!
//! ```
//! use memory_match::core::{MatchConfig, PlayerId};
//! use memory_match::engine::MatchEngine;
//!
//! let mut engine = MatchEngine::with_config(MatchConfig::default().with_seed(7)).unwrap();
//! engine.start();
//!
//! // Find a pair and flip it
//! let first = 0;
//! let second = (1..52)
//!     .find(|&i| engine.cards()[i].rank == engine.cards()[first].rank)
//!     .unwrap();
//! engine.select_card(first);
//! engine.select_card(second);
//!
//! // Judged after the reveal pause
//! engine.advance(450);
//! assert_eq!(engine.matched_pairs(), 1);
//! assert_eq!(engine.current_player(), PlayerId::ONE);
//! ```

pub mod events;
pub mod message;
pub mod session;
pub mod state;
pub mod timers;

pub use events::{GameListener, Notification};
pub use message::Message;
pub use session::{MatchEngine, SelectionIgnored};
pub use state::{Flipped, GameSnapshot, Phase, TurnPhase};
pub use timers::{Timer, TimerKind, TimerQueue};
