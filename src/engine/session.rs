//! The match session: turn state machine, flip lock, and timed resolution.
//!
//! ## Flow
//!
//! 1. `start()` deals a shuffled deck and hands the turn to player 1.
//! 2. `select_card()` flips a card. The second flip locks the board and
//!    schedules a `Resolve` timer after the reveal pause.
//! 3. On `Resolve`, a pair scores and unlocks at once (same player goes
//!    again); a mismatch stays locked until `HideMismatch` turns both
//!    cards back and passes the turn.
//! 4. The 26th pair finishes the game: the board stays locked for good.
//!
//! Time only moves when the host calls [`MatchEngine::advance`] or
//! [`MatchEngine::run_until_idle`]. Nothing blocks.

use im::Vector;
use log::{debug, info, trace};
use thiserror::Error;

use super::events::{GameListener, Notification};
use super::message::Message;
use super::state::{Flipped, GameSnapshot, GameState, Phase, TurnPhase};
use super::timers::{Timer, TimerKind, TimerQueue};
use crate::cards::{Card, CardFace, Deck, TOTAL_PAIRS};
use crate::core::{ConfigError, GameRng, MatchConfig, PlayerId, PlayerMap};
use crate::rules::{is_pair, match_reward, GameResult};

/// Why a selection was ignored.
///
/// Ignored selections never change state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum SelectionIgnored {
    #[error("no game in progress")]
    Inactive,
    #[error("board is locked")]
    Locked,
    #[error("card {0} does not exist")]
    OutOfRange(usize),
    #[error("card {0} is already face up")]
    AlreadyFaceUp(usize),
    #[error("card {0} is already matched")]
    AlreadyMatched(usize),
}

/// One two-player game session.
///
/// Owns all game state; views observe it through accessors and
/// notifications. Several sessions can coexist.
pub struct MatchEngine {
    config: MatchConfig,
    rng: GameRng,
    state: GameState,
    timers: TimerQueue,
    now: u64,
    listeners: Vec<Box<dyn GameListener>>,
}

impl Default for MatchEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchEngine {
    /// Create a session with the standard rules and an entropy seed.
    #[must_use]
    pub fn new() -> Self {
        Self::build(MatchConfig::default())
    }

    /// Create a session with custom rules.
    pub fn with_config(config: MatchConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: MatchConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        };
        Self {
            config,
            rng,
            state: GameState::default(),
            timers: TimerQueue::new(),
            now: 0,
            listeners: Vec::new(),
        }
    }

    /// Register a listener for state change notifications.
    pub fn subscribe(&mut self, listener: impl GameListener + 'static) {
        self.listeners.push(Box::new(listener));
    }

    // === Commands ===

    /// Deal a fresh shuffled deck and start a new game.
    ///
    /// Discards any game in progress. Timers still queued from it will
    /// fire as no-ops.
    pub fn start(&mut self) {
        let deck = Deck::standard().shuffled(&mut self.rng);
        self.state.reset(deck);
        info!(
            "game {} started (seed {})",
            self.state.generation,
            self.rng.seed()
        );

        let cards = self.state.cards.iter().copied().collect();
        self.emit(Notification::BoardDealt { cards });
        self.emit_scores();
        self.emit(Notification::PlayerChanged {
            current: Some(PlayerId::ONE),
        });
        self.set_message(Message::Opening(PlayerId::ONE));
    }

    /// Flip the card at `index`. Silently ignores illegal selections.
    pub fn select_card(&mut self, index: usize) {
        if let Err(reason) = self.try_select_card(index) {
            debug!("selection of card {index} ignored: {reason}");
        }
    }

    /// Flip the card at `index`, reporting why the selection was ignored.
    pub fn try_select_card(&mut self, index: usize) -> Result<(), SelectionIgnored> {
        if !self.state.is_active() {
            return Err(SelectionIgnored::Inactive);
        }
        if self.state.locked {
            return Err(SelectionIgnored::Locked);
        }
        let Some(&face) = self.state.faces.get(index) else {
            return Err(SelectionIgnored::OutOfRange(index));
        };
        if self.state.flipped.contains(index) {
            return Err(SelectionIgnored::AlreadyFaceUp(index));
        }
        if face == CardFace::Matched {
            return Err(SelectionIgnored::AlreadyMatched(index));
        }
        let flipped = self
            .state
            .flipped
            .push(index)
            .ok_or(SelectionIgnored::Locked)?;

        trace!("{} flips card {index}", self.state.current_player);
        self.state.flipped = flipped;
        self.set_face(index, CardFace::FaceUp);

        if let Flipped::Two(first, second) = flipped {
            self.state.locked = true;
            self.schedule(self.config.reveal_delay_ms, TimerKind::Resolve { first, second });
        }
        Ok(())
    }

    // === Clock ===

    /// Move the clock forward by `ms`, firing every timer that falls due.
    ///
    /// Timers scheduled by a firing timer also fire if they fall inside the
    /// window.
    pub fn advance(&mut self, ms: u64) {
        let target = self.now.saturating_add(ms);
        while let Some(timer) = self.timers.pop_due(target) {
            self.now = self.now.max(timer.due);
            self.fire(timer);
        }
        self.now = target;
    }

    /// Fire every queued timer, moving the clock to the last one.
    pub fn run_until_idle(&mut self) {
        while let Some(timer) = self.timers.pop_due(u64::MAX) {
            self.now = self.now.max(timer.due);
            self.fire(timer);
        }
    }

    /// Clock time (ms) of the next queued timer.
    #[must_use]
    pub fn next_timer_due(&self) -> Option<u64> {
        self.timers.next_due()
    }

    /// Queued timers in firing order.
    #[must_use]
    pub fn pending_timers(&self) -> Vec<Timer> {
        self.timers.pending()
    }

    /// Current clock time in milliseconds.
    #[must_use]
    pub fn now(&self) -> u64 {
        self.now
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    #[must_use]
    pub fn scores(&self) -> PlayerMap<u32> {
        self.state.scores
    }

    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.state.current_player
    }

    #[must_use]
    pub fn remaining_pairs(&self) -> u8 {
        self.state.remaining_pairs()
    }

    #[must_use]
    pub fn matched_pairs(&self) -> u8 {
        self.state.matched_pairs
    }

    #[must_use]
    pub fn message(&self) -> Option<Message> {
        self.state.message
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.state.locked
    }

    #[must_use]
    pub fn flipped(&self) -> Flipped {
        self.state.flipped
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    /// Turn sub-state, `None` unless the game is active.
    #[must_use]
    pub fn turn_phase(&self) -> Option<TurnPhase> {
        self.state.turn_phase()
    }

    /// Final result, once every pair is matched.
    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        match self.state.phase {
            Phase::Finished(result) => Some(result),
            _ => None,
        }
    }

    /// Generation of the current game. Bumped by every `start()`.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.state.generation
    }

    /// The dealt cards, in board order.
    #[must_use]
    pub fn cards(&self) -> &Vector<Card> {
        &self.state.cards
    }

    #[must_use]
    pub fn card(&self, index: usize) -> Option<Card> {
        self.state.cards.get(index).copied()
    }

    #[must_use]
    pub fn card_face(&self, index: usize) -> Option<CardFace> {
        self.state.faces.get(index).copied()
    }

    #[must_use]
    pub fn faces(&self) -> &Vector<CardFace> {
        &self.state.faces
    }

    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        self.state.snapshot()
    }

    // === Timer handlers ===

    fn schedule(&mut self, delay_ms: u64, kind: TimerKind) {
        let due = self.now.saturating_add(delay_ms);
        trace!("scheduling {kind:?} at {due}ms");
        self.timers.schedule(due, self.state.generation, kind);
    }

    fn fire(&mut self, timer: Timer) {
        if timer.generation != self.state.generation {
            debug!(
                "dropping {:?} from game {} (current game {})",
                timer.kind, timer.generation, self.state.generation
            );
            return;
        }
        match timer.kind {
            TimerKind::Resolve { first, second } => self.resolve(first, second),
            TimerKind::HideMismatch { first, second } => self.hide_mismatch(first, second),
            TimerKind::TurnPrompt => {
                if self.state.is_active() {
                    self.set_message(Message::Turn(self.state.current_player));
                }
            }
        }
    }

    fn resolve(&mut self, first: usize, second: usize) {
        if !self.state.is_active() {
            return;
        }
        let cards = match self.state.flipped {
            Flipped::Two(a, b) if a == first && b == second => {
                self.state.cards.get(a).copied().zip(self.state.cards.get(b).copied())
            }
            _ => None,
        };
        let Some((first_card, second_card)) = cards else {
            debug!("resolve found no flipped pair, clearing");
            self.state.flipped = Flipped::None;
            self.state.locked = false;
            return;
        };

        if is_pair(first_card, second_card) {
            self.resolve_match(first, second, first_card);
        } else {
            trace!("{first_card} and {second_card} do not match");
            self.set_message(Message::Mismatch);
            self.schedule(
                self.config.hide_delay_ms,
                TimerKind::HideMismatch { first, second },
            );
        }
    }

    fn resolve_match(&mut self, first: usize, second: usize, card: Card) {
        let player = self.state.current_player;
        let reward = match_reward(self.state.matched_pairs, &self.config);

        self.state.matched_pairs += 1;
        self.state.scores[player] += reward;
        self.set_face(first, CardFace::Matched);
        self.set_face(second, CardFace::Matched);
        self.emit_scores();
        self.set_message(Message::Matched {
            player,
            rank: card.rank,
            reward,
        });

        self.state.flipped = Flipped::None;
        self.state.locked = false;

        if self.state.matched_pairs >= TOTAL_PAIRS {
            self.finish();
        } else {
            self.schedule(self.config.turn_prompt_delay_ms, TimerKind::TurnPrompt);
        }
    }

    fn hide_mismatch(&mut self, first: usize, second: usize) {
        if !self.state.is_active() || self.state.flipped != Flipped::Two(first, second) {
            debug!("hide for cards {first} and {second} no longer applies");
            return;
        }
        self.set_face(first, CardFace::Hidden);
        self.set_face(second, CardFace::Hidden);
        self.state.flipped = Flipped::None;
        self.state.locked = false;

        let next = self.state.current_player.other();
        self.state.current_player = next;
        self.emit(Notification::PlayerChanged {
            current: Some(next),
        });
        self.set_message(Message::Turn(next));
    }

    fn finish(&mut self) {
        let result = GameResult::from_scores(&self.state.scores);
        self.state.phase = Phase::Finished(result);
        self.state.locked = true;

        for index in 0..self.state.faces.len() {
            if self.state.faces[index] != CardFace::Matched {
                self.set_face(index, CardFace::Matched);
            }
        }

        info!(
            "game {} finished: {:?} ({} to {})",
            self.state.generation,
            result,
            self.state.scores[PlayerId::ONE],
            self.state.scores[PlayerId::TWO]
        );
        self.emit(Notification::PlayerChanged { current: None });
        self.set_message(Message::Finished(result));
        self.emit(Notification::GameFinished {
            result,
            scores: self.state.scores,
        });
    }

    // === Notifications ===

    fn set_face(&mut self, index: usize, face: CardFace) {
        if let Some(slot) = self.state.faces.get_mut(index) {
            *slot = face;
            self.emit(Notification::CardChanged { index, face });
        }
    }

    fn set_message(&mut self, message: Message) {
        self.state.message = Some(message);
        self.emit(Notification::MessageChanged(message));
    }

    fn emit_scores(&mut self) {
        self.emit(Notification::ScoresChanged {
            scores: self.state.scores,
            remaining_pairs: self.state.remaining_pairs(),
        });
    }

    fn emit(&mut self, notification: Notification) {
        for listener in &mut self.listeners {
            listener.on_notification(&notification);
        }
    }
}
