//! Fire-once timers on a virtual clock.
//!
//! Timers cannot be cancelled. Each one records the game generation it was
//! scheduled in plus the card indices it concerns, and the engine drops it
//! on arrival if the generation is no longer current.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// What a timer does when it fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Judge the two flipped cards.
    Resolve { first: usize, second: usize },
    /// Turn a mismatched pair back over and pass the turn.
    HideMismatch { first: usize, second: usize },
    /// Repeat the current player's turn prompt after a match.
    TurnPrompt,
}

/// A scheduled timer.
#[derive(Clone, Copy, Debug)]
pub struct Timer {
    /// Clock time (ms) at which the timer fires.
    pub due: u64,
    /// Game generation at schedule time.
    pub generation: u64,
    pub kind: TimerKind,
    /// Schedule order, breaks ties between timers due at the same time.
    seq: u64,
}

impl PartialEq for Timer {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Timer {}

impl PartialOrd for Timer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Timer {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.due, self.seq).cmp(&(other.due, other.seq))
    }
}

/// Min-queue of timers ordered by due time, then schedule order.
#[derive(Clone, Debug, Default)]
pub struct TimerQueue {
    heap: BinaryHeap<Reverse<Timer>>,
    next_seq: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a timer.
    pub fn schedule(&mut self, due: u64, generation: u64, kind: TimerKind) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(Timer {
            due,
            generation,
            kind,
            seq,
        }));
    }

    /// Due time of the earliest timer.
    #[must_use]
    pub fn next_due(&self) -> Option<u64> {
        self.heap.peek().map(|Reverse(t)| t.due)
    }

    /// Remove and return the earliest timer if it is due at or before `now`.
    pub fn pop_due(&mut self, now: u64) -> Option<Timer> {
        match self.heap.peek() {
            Some(Reverse(t)) if t.due <= now => self.heap.pop().map(|Reverse(t)| t),
            _ => None,
        }
    }

    /// Timers in firing order.
    #[must_use]
    pub fn pending(&self) -> Vec<Timer> {
        let mut timers: Vec<_> = self.heap.iter().map(|Reverse(t)| *t).collect();
        timers.sort();
        timers
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
