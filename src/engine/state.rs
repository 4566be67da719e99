//! Game state for one match.
//!
//! ## Phase
//!
//! `NotStarted -> Active -> Finished`. While `Active`, the turn sub-state
//! is derived from the pending flips and the lock (see [`TurnPhase`]).
//!
//! ## Flipped
//!
//! The pending-selection buffer holds at most two card indices. It is a
//! tagged value so "two pending and unlocked" can be ruled out by looking
//! at a single match.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::message::Message;
use crate::cards::{Card, CardFace, Deck, TOTAL_PAIRS};
use crate::core::{PlayerId, PlayerMap};
use crate::rules::GameResult;

/// Lifecycle of a game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// No game dealt yet.
    #[default]
    NotStarted,
    /// Accepting flips, or resolving a pair.
    Active,
    /// Every pair matched. Terminal until the next start.
    Finished(GameResult),
}

/// Sub-state of an active game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    AwaitingFirstFlip,
    AwaitingSecondFlip,
    /// Board locked: the reveal pause, judging, or a mismatch waiting to be hidden.
    Resolving,
}

/// Cards flipped this turn and not yet judged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Flipped {
    #[default]
    None,
    One(usize),
    Two(usize, usize),
}

impl Flipped {
    /// Add a card to the buffer. Returns `None` when it already holds two.
    #[must_use]
    pub fn push(self, index: usize) -> Option<Self> {
        match self {
            Flipped::None => Some(Flipped::One(index)),
            Flipped::One(first) => Some(Flipped::Two(first, index)),
            Flipped::Two(..) => None,
        }
    }

    #[must_use]
    pub fn len(self) -> usize {
        match self {
            Flipped::None => 0,
            Flipped::One(_) => 1,
            Flipped::Two(..) => 2,
        }
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Flipped::None
    }

    #[must_use]
    pub fn contains(self, index: usize) -> bool {
        match self {
            Flipped::None => false,
            Flipped::One(a) => a == index,
            Flipped::Two(a, b) => a == index || b == index,
        }
    }
}

/// Mutable state owned by a match session.
#[derive(Clone, Debug, Default)]
pub(crate) struct GameState {
    pub cards: Vector<Card>,
    pub faces: Vector<CardFace>,
    pub matched_pairs: u8,
    pub scores: PlayerMap<u32>,
    pub current_player: PlayerId,
    pub flipped: Flipped,
    pub locked: bool,
    pub phase: Phase,
    pub message: Option<Message>,
    /// Bumped on every start. Timers from older generations are ignored.
    pub generation: u64,
}

impl GameState {
    /// Discard everything and deal `deck` as a fresh game.
    pub fn reset(&mut self, deck: Deck) {
        let cards: Vector<Card> = deck.into_cards().into_iter().collect();
        self.faces = cards.iter().map(|_| CardFace::Hidden).collect();
        self.cards = cards;
        self.matched_pairs = 0;
        self.scores = PlayerMap::with_value(0);
        self.current_player = PlayerId::ONE;
        self.flipped = Flipped::None;
        self.locked = false;
        self.phase = Phase::Active;
        self.message = None;
        self.generation += 1;
    }

    pub fn is_active(&self) -> bool {
        self.phase == Phase::Active
    }

    pub fn remaining_pairs(&self) -> u8 {
        TOTAL_PAIRS.saturating_sub(self.matched_pairs)
    }

    pub fn turn_phase(&self) -> Option<TurnPhase> {
        if !self.is_active() {
            return None;
        }
        Some(match (self.locked, self.flipped) {
            (true, _) => TurnPhase::Resolving,
            (false, Flipped::One(_)) => TurnPhase::AwaitingSecondFlip,
            (false, _) => TurnPhase::AwaitingFirstFlip,
        })
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            generation: self.generation,
            phase: self.phase,
            turn_phase: self.turn_phase(),
            cards: self.cards.clone(),
            faces: self.faces.clone(),
            scores: self.scores,
            current_player: self.current_player,
            remaining_pairs: self.remaining_pairs(),
            locked: self.locked,
            message: self.message,
        }
    }
}

/// Point-in-time copy of everything a view shows.
///
/// Card vectors are persistent, so taking a snapshot is O(1).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub generation: u64,
    pub phase: Phase,
    pub turn_phase: Option<TurnPhase>,
    pub cards: Vector<Card>,
    pub faces: Vector<CardFace>,
    pub scores: PlayerMap<u32>,
    pub current_player: PlayerId,
    pub remaining_pairs: u8,
    pub locked: bool,
    pub message: Option<Message>,
}
