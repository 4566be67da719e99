//! Pair judging, scoring, and final results.

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::core::{MatchConfig, PlayerId, PlayerMap};

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// Equal scores.
    Draw,
}

impl GameResult {
    /// Decide the result from final scores. Strictly higher score wins.
    ///
    /// ```
    /// use memory_match::core::{PlayerId, PlayerMap};
    /// use memory_match::rules::GameResult;
    ///
    /// let scores = PlayerMap::new(|p| if p == PlayerId::ONE { 15 } else { 11 });
    /// assert_eq!(GameResult::from_scores(&scores), GameResult::Winner(PlayerId::ONE));
    ///
    /// let tied = PlayerMap::with_value(13);
    /// assert_eq!(GameResult::from_scores(&tied), GameResult::Draw);
    /// ```
    #[must_use]
    pub fn from_scores(scores: &PlayerMap<u32>) -> Self {
        let one = scores[PlayerId::ONE];
        let two = scores[PlayerId::TWO];
        match one.cmp(&two) {
            std::cmp::Ordering::Greater => GameResult::Winner(PlayerId::ONE),
            std::cmp::Ordering::Less => GameResult::Winner(PlayerId::TWO),
            std::cmp::Ordering::Equal => GameResult::Draw,
        }
    }

    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            GameResult::Winner(p) => *p == player,
            GameResult::Draw => false,
        }
    }
}

/// Two cards form a pair when their ranks match. Suit is irrelevant.
#[must_use]
pub fn is_pair(first: Card, second: Card) -> bool {
    first.rank == second.rank
}

/// Points awarded for a pair, given how many pairs were matched before it.
///
/// Pairs found once `matched_before` reaches the bonus threshold (21 of 26
/// by default) pay the bonus reward.
#[must_use]
pub fn match_reward(matched_before: u8, config: &MatchConfig) -> u32 {
    if matched_before >= config.bonus_threshold() {
        config.bonus_reward
    } else {
        config.base_reward
    }
}
