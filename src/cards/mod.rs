//! Card system: card values, slot faces, and the deck.
//!
//! ## Key Types
//!
//! - `Rank`, `Suit`, `Card`: immutable card identity
//! - `CardFace`: what a dealt slot currently shows
//! - `Deck`: ordered card sequence with construction and shuffling

pub mod card;
pub mod deck;

pub use card::{Card, CardFace, Rank, Suit, SuitColor};
pub use deck::{Deck, DECK_SIZE, TOTAL_PAIRS};
