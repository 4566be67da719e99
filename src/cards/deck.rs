//! Deck construction and shuffling.
//!
//! `Deck::standard()` enumerates the 52 cards rank-major: every suit of
//! the Ace, then every suit of the Two, and so on. `Deck::shuffled()`
//! returns a uniformly random permutation and leaves the source deck alone.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::card::{Card, Rank, Suit};
use crate::core::GameRng;

/// Cards in a standard deck.
pub const DECK_SIZE: usize = 52;

/// Pairs in a standard deck.
pub const TOTAL_PAIRS: u8 = 26;

/// An ordered sequence of cards.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Build the standard 52-card deck in rank-major order.
    ///
    /// ```
    /// use memory_match::cards::{Card, Deck, Rank, Suit};
    ///
    /// let deck = Deck::standard();
    /// assert_eq!(deck.len(), 52);
    /// assert_eq!(deck.cards()[0], Card::new(Rank::Ace, Suit::Spades));
    /// assert_eq!(deck.cards()[4], Card::new(Rank::Two, Suit::Spades));
    /// ```
    #[must_use]
    pub fn standard() -> Self {
        let cards = Rank::ALL
            .iter()
            .flat_map(|&rank| Suit::ALL.iter().map(move |&suit| Card::new(rank, suit)))
            .collect();
        Self { cards }
    }

    /// Return a shuffled copy of this deck.
    ///
    /// Fisher-Yates: walk `i` from the last position down to 1, draw `j`
    /// uniformly from `0..=i`, swap. Every permutation is equally likely
    /// given a uniform source.
    #[must_use]
    pub fn shuffled(&self, rng: &mut GameRng) -> Self {
        let mut cards = self.cards.clone();
        for i in (1..cards.len()).rev() {
            let j = rng.gen_index(i);
            cards.swap(i, j);
        }
        Self { cards }
    }

    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Check that every (rank, suit) pair appears exactly once.
    ///
    /// Implies 4 cards per rank and 13 per suit.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        if self.cards.len() != DECK_SIZE {
            return false;
        }

        let mut seen: FxHashMap<Card, usize> = FxHashMap::default();
        for card in &self.cards {
            *seen.entry(*card).or_insert(0) += 1;
        }

        seen.len() == DECK_SIZE && seen.values().all(|&n| n == 1)
    }

    /// Count cards of each rank.
    #[must_use]
    pub fn rank_counts(&self) -> FxHashMap<Rank, usize> {
        let mut counts = FxHashMap::default();
        for card in &self.cards {
            *counts.entry(card.rank).or_insert(0) += 1;
        }
        counts
    }

    /// Count cards of each suit.
    #[must_use]
    pub fn suit_counts(&self) -> FxHashMap<Suit, usize> {
        let mut counts = FxHashMap::default();
        for card in &self.cards {
            *counts.entry(card.suit).or_insert(0) += 1;
        }
        counts
    }

    /// Consume the deck, yielding its cards in order.
    #[must_use]
    pub fn into_cards(self) -> Vec<Card> {
        self.cards
    }
}

impl From<Vec<Card>> for Deck {
    fn from(cards: Vec<Card>) -> Self {
        Self { cards }
    }
}
