//! State change notifications.
//!
//! The engine pushes a [`Notification`] to every subscribed
//! [`GameListener`] after each change a view needs to reflect. Listeners
//! run synchronously, in subscription order.
//!
//! Any `FnMut(&Notification)` closure is a listener:
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use memory_match::engine::{MatchEngine, Notification};
//! use memory_match::core::MatchConfig;
//!
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let sink = Rc::clone(&seen);
//!
//! let mut engine = MatchEngine::with_config(MatchConfig::default().with_seed(1)).unwrap();
//! engine.subscribe(move |n: &Notification| sink.borrow_mut().push(n.clone()));
//! engine.start();
//!
//! assert!(matches!(seen.borrow()[0], Notification::BoardDealt { .. }));
//! ```

use serde::{Deserialize, Serialize};

use super::message::Message;
use crate::cards::{Card, CardFace};
use crate::core::{PlayerId, PlayerMap};
use crate::rules::GameResult;

/// Something a view should redraw.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Notification {
    /// A new game was dealt. Redraw the whole board, all cards hidden.
    BoardDealt { cards: Vec<Card> },

    /// One card slot changed face.
    CardChanged { index: usize, face: CardFace },

    /// Score line changed.
    ScoresChanged {
        scores: PlayerMap<u32>,
        remaining_pairs: u8,
    },

    /// Turn indicator changed. `None` once the game is over.
    PlayerChanged { current: Option<PlayerId> },

    /// Status line changed.
    MessageChanged(Message),

    /// Every pair has been matched.
    GameFinished {
        result: GameResult,
        scores: PlayerMap<u32>,
    },
}

/// Receiver for engine notifications.
pub trait GameListener {
    fn on_notification(&mut self, notification: &Notification);
}

impl<F> GameListener for F
where
    F: FnMut(&Notification),
{
    fn on_notification(&mut self, notification: &Notification) {
        self(notification);
    }
}
