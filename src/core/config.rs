//! Match configuration.
//!
//! Timing and scoring knobs for a game. The defaults are the standard
//! rules: a 450 ms reveal pause before judging, 900 ms before a mismatch is
//! turned back over, and double points for the last five pairs.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cards::TOTAL_PAIRS;

/// Errors from validating a [`MatchConfig`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("bonus_pairs {0} exceeds the {max} pairs in a deck", max = TOTAL_PAIRS)]
    TooManyBonusPairs(u8),
    #[error("base_reward must be at least 1")]
    ZeroBaseReward,
    #[error("bonus_reward must be at least 1")]
    ZeroBonusReward,
    #[error("a full game could score more than {max} points", max = u32::MAX)]
    ScoreOverflow,
}

/// Configuration for a match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Pause with both cards face up before the pair is judged.
    pub reveal_delay_ms: u64,

    /// How long a mismatched pair stays face up before being hidden.
    pub hide_delay_ms: u64,

    /// Delay before the "your turn" prompt after a match.
    pub turn_prompt_delay_ms: u64,

    /// How many of the final pairs pay `bonus_reward` instead of `base_reward`.
    pub bonus_pairs: u8,

    /// Points for a regular pair.
    pub base_reward: u32,

    /// Points for a pair within the final `bonus_pairs`.
    pub bonus_reward: u32,

    /// Shuffle seed. `None` seeds from the operating system.
    pub seed: Option<u64>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            reveal_delay_ms: 450,
            hide_delay_ms: 900,
            turn_prompt_delay_ms: 900,
            bonus_pairs: 5,
            base_reward: 1,
            bonus_reward: 2,
            seed: None,
        }
    }
}

impl MatchConfig {
    /// Set a fixed shuffle seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the reveal pause.
    #[must_use]
    pub fn with_reveal_delay(mut self, ms: u64) -> Self {
        self.reveal_delay_ms = ms;
        self
    }

    /// Set the mismatch hide delay.
    #[must_use]
    pub fn with_hide_delay(mut self, ms: u64) -> Self {
        self.hide_delay_ms = ms;
        self
    }

    /// Set the post-match turn prompt delay.
    #[must_use]
    pub fn with_turn_prompt_delay(mut self, ms: u64) -> Self {
        self.turn_prompt_delay_ms = ms;
        self
    }

    /// Set the endgame bonus window and its reward.
    #[must_use]
    pub fn with_bonus(mut self, pairs: u8, reward: u32) -> Self {
        self.bonus_pairs = pairs;
        self.bonus_reward = reward;
        self
    }

    /// Number of pairs that must already be matched before bonus scoring applies.
    #[must_use]
    pub fn bonus_threshold(&self) -> u8 {
        TOTAL_PAIRS.saturating_sub(self.bonus_pairs)
    }

    /// Check that the configuration describes a playable game.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bonus_pairs > TOTAL_PAIRS {
            return Err(ConfigError::TooManyBonusPairs(self.bonus_pairs));
        }
        if self.base_reward == 0 {
            return Err(ConfigError::ZeroBaseReward);
        }
        if self.bonus_reward == 0 {
            return Err(ConfigError::ZeroBonusReward);
        }
        if self.max_score().is_none() {
            return Err(ConfigError::ScoreOverflow);
        }
        Ok(())
    }

    /// Most points one player can collect, if it fits in a `u32`.
    ///
    /// That is a sweep of all regular pairs followed by all bonus pairs.
    #[must_use]
    pub fn max_score(&self) -> Option<u32> {
        let regular = u32::from(self.bonus_threshold()).checked_mul(self.base_reward)?;
        let bonus = u32::from(self.bonus_pairs.min(TOTAL_PAIRS)).checked_mul(self.bonus_reward)?;
        regular.checked_add(bonus)
    }
}
