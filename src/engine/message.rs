//! Status line messages.
//!
//! Messages are typed values; views render them with `Display`.

use serde::{Deserialize, Serialize};

use crate::cards::Rank;
use crate::core::PlayerId;
use crate::rules::GameResult;

/// The status line shown above the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Message {
    /// First prompt of a new game.
    Opening(PlayerId),
    /// Whose turn it is.
    Turn(PlayerId),
    /// A pair was found; the same player continues.
    Matched {
        player: PlayerId,
        rank: Rank,
        reward: u32,
    },
    /// The two cards differ.
    Mismatch,
    /// Final result.
    Finished(GameResult),
}

impl std::fmt::Display for Message {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Message::Opening(player) => {
                write!(f, "{player}'s turn. Flip cards to find a pair.")
            }
            Message::Turn(player) => write!(f, "{player}'s turn."),
            Message::Matched { player, rank, reward } => {
                let unit = if *reward == 1 { "point" } else { "points" };
                write!(f, "{player} matched a pair of {rank}. {reward} {unit}! Keep going.")
            }
            Message::Mismatch => f.write_str("Not a pair."),
            Message::Finished(GameResult::Winner(player)) => write!(f, "Game over: {player} wins!"),
            Message::Finished(GameResult::Draw) => f.write_str("Game over: It's a draw."),
        }
    }
}
