//! Match engine flow tests.
//!
//! These tests play whole turns and whole games through the public API:
//! scoring, turn passing, completion, notifications, and restarts.

use std::cell::RefCell;
use std::rc::Rc;

use memory_match::cards::CardFace;
use memory_match::core::{MatchConfig, PlayerId, PlayerMap};
use memory_match::engine::{MatchEngine, Message, Notification, Phase, SelectionIgnored};
use memory_match::rules::GameResult;

// =============================================================================
// Helpers
// =============================================================================

fn seeded(seed: u64) -> MatchEngine {
    MatchEngine::with_config(MatchConfig::default().with_seed(seed)).unwrap()
}

fn hidden(engine: &MatchEngine) -> Vec<usize> {
    (0..engine.cards().len())
        .filter(|&i| engine.card_face(i) == Some(CardFace::Hidden))
        .collect()
}

/// The other card of the same rank as `index`, if it is still hidden.
fn partner_of(engine: &MatchEngine, index: usize) -> Option<usize> {
    let rank = engine.cards()[index].rank;
    hidden(engine)
        .into_iter()
        .find(|&i| i != index && engine.cards()[i].rank == rank)
}

/// Flip a hidden pair and let it resolve.
fn play_match(engine: &mut MatchEngine) {
    let view: &MatchEngine = &*engine;
    let (a, b) = hidden(view)
        .into_iter()
        .find_map(|a| partner_of(view, a).map(|b| (a, b)))
        .expect("a hidden pair");
    engine.select_card(a);
    engine.select_card(b);
    engine.advance(450);
}

/// Flip two hidden cards of different ranks and let the turn pass.
fn play_mismatch(engine: &mut MatchEngine) {
    let view: &MatchEngine = &*engine;
    let cards = hidden(view);
    let a = cards[0];
    let b = *cards
        .iter()
        .find(|&&b| view.cards()[b].rank != view.cards()[a].rank)
        .expect("two hidden ranks");
    engine.select_card(a);
    engine.select_card(b);
    engine.advance(450 + 900);
}

fn recorder(engine: &mut MatchEngine) -> Rc<RefCell<Vec<Notification>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    engine.subscribe(move |n: &Notification| sink.borrow_mut().push(n.clone()));
    log
}

fn card_changed(index: usize, face: CardFace) -> Notification {
    Notification::CardChanged { index, face }
}

fn player_changed(current: Option<PlayerId>) -> Notification {
    Notification::PlayerChanged { current }
}

// =============================================================================
// Turn Tests
// =============================================================================

/// Match on the first turn, then miss, as a view would drive it.
#[test]
fn test_match_then_mismatch_scenario() {
    let mut engine = seeded(42);
    engine.start();

    let partner = partner_of(&engine, 0).unwrap();
    engine.select_card(0);
    engine.select_card(partner);
    engine.advance(450);

    assert_eq!(engine.matched_pairs(), 1);
    assert_eq!(engine.scores()[PlayerId::ONE], 1);
    assert_eq!(engine.current_player(), PlayerId::ONE);
    assert_eq!(engine.card_face(0), Some(CardFace::Matched));
    assert_eq!(engine.card_face(partner), Some(CardFace::Matched));

    let cards = hidden(&engine);
    let a = cards[0];
    let b = *cards
        .iter()
        .find(|&&b| engine.cards()[b].rank != engine.cards()[a].rank)
        .unwrap();
    engine.select_card(a);
    engine.select_card(b);
    engine.advance(450);
    engine.advance(900);

    assert_eq!(engine.card_face(a), Some(CardFace::Hidden));
    assert_eq!(engine.card_face(b), Some(CardFace::Hidden));
    assert_eq!(engine.current_player(), PlayerId::TWO);
    assert_eq!(engine.scores()[PlayerId::ONE], 1);
    assert_eq!(engine.scores()[PlayerId::TWO], 0);
}

/// Test that consecutive mismatches alternate the turn.
#[test]
fn test_mismatches_alternate_players() {
    let mut engine = seeded(3);
    engine.start();

    play_mismatch(&mut engine);
    assert_eq!(engine.current_player(), PlayerId::TWO);
    play_mismatch(&mut engine);
    assert_eq!(engine.current_player(), PlayerId::ONE);
    play_mismatch(&mut engine);
    assert_eq!(engine.current_player(), PlayerId::TWO);
}

/// Test that points go to whoever holds the turn.
#[test]
fn test_player_two_scores_on_own_turn() {
    let mut engine = seeded(8);
    engine.start();

    play_mismatch(&mut engine);
    play_match(&mut engine);

    assert_eq!(engine.scores()[PlayerId::ONE], 0);
    assert_eq!(engine.scores()[PlayerId::TWO], 1);
    assert_eq!(engine.current_player(), PlayerId::TWO);
}

/// Test that locked, matched, and pending cards never change state.
#[test]
fn test_ignored_selections_change_nothing() {
    let mut engine = seeded(21);
    engine.start();
    play_match(&mut engine);

    let before = engine.snapshot();
    let matched = (0..52)
        .find(|&i| engine.card_face(i) == Some(CardFace::Matched))
        .unwrap();
    assert_eq!(
        engine.try_select_card(matched),
        Err(SelectionIgnored::AlreadyMatched(matched))
    );
    assert_eq!(engine.snapshot(), before);

    let cards = hidden(&engine);
    engine.select_card(cards[0]);
    engine.select_card(cards[0]);
    assert_eq!(engine.flipped().len(), 1);

    engine.select_card(cards[1]);
    let locked = engine.snapshot();
    engine.select_card(cards[2]);
    engine.select_card(cards[3]);
    assert_eq!(engine.snapshot(), locked);
    assert_eq!(engine.scores(), before.scores);
    assert_eq!(engine.current_player(), before.current_player);
}

// =============================================================================
// Scoring Tests
// =============================================================================

/// Test that the 21st pair pays 1 point and the 22nd pays 2.
#[test]
fn test_bonus_starts_after_twenty_one_pairs() {
    let mut engine = seeded(99);
    engine.start();

    for _ in 0..20 {
        play_match(&mut engine);
    }
    assert_eq!(engine.matched_pairs(), 20);
    assert_eq!(engine.scores()[PlayerId::ONE], 20);

    play_match(&mut engine);
    assert_eq!(engine.matched_pairs(), 21);
    assert_eq!(engine.scores()[PlayerId::ONE], 21);

    play_match(&mut engine);
    assert_eq!(engine.matched_pairs(), 22);
    assert_eq!(engine.scores()[PlayerId::ONE], 23);
    assert!(matches!(
        engine.message(),
        Some(Message::Matched { reward: 2, .. })
    ));
}

// =============================================================================
// Completion Tests
// =============================================================================

/// Test that one player sweeping the board wins with 31 points.
#[test]
fn test_sweep_finishes_game() {
    let mut engine = seeded(1);
    engine.start();

    for _ in 0..26 {
        play_match(&mut engine);
    }

    assert!(!engine.is_active());
    assert!(engine.is_locked());
    assert_eq!(engine.remaining_pairs(), 0);
    assert_eq!(engine.scores()[PlayerId::ONE], 31);
    assert_eq!(engine.result(), Some(GameResult::Winner(PlayerId::ONE)));
    assert_eq!(engine.phase(), Phase::Finished(GameResult::Winner(PlayerId::ONE)));
    assert_eq!(engine.turn_phase(), None);
    assert!(engine.faces().iter().all(|f| *f == CardFace::Matched));
    assert_eq!(
        engine.message(),
        Some(Message::Finished(GameResult::Winner(PlayerId::ONE)))
    );
    assert_eq!(engine.message().unwrap().to_string(), "Game over: Player 1 wins!");

    // Turn prompts still queued from earlier pairs stay silent
    engine.run_until_idle();
    assert_eq!(
        engine.message(),
        Some(Message::Finished(GameResult::Winner(PlayerId::ONE)))
    );
}

/// Test that a finished game ignores every selection.
#[test]
fn test_finished_game_is_terminal() {
    let mut engine = seeded(2);
    engine.start();
    for _ in 0..26 {
        play_match(&mut engine);
    }

    let finished = engine.snapshot();
    for index in 0..52 {
        assert_eq!(engine.try_select_card(index), Err(SelectionIgnored::Inactive));
    }
    engine.advance(10_000);
    assert_eq!(engine.snapshot(), finished);
}

/// Test that equal scores end in a draw.
#[test]
fn test_split_board_draws() {
    let config = MatchConfig::default().with_seed(4).with_bonus(0, 1);
    let mut engine = MatchEngine::with_config(config).unwrap();
    engine.start();

    for _ in 0..13 {
        play_match(&mut engine);
    }
    play_mismatch(&mut engine);
    for _ in 0..13 {
        play_match(&mut engine);
    }

    assert_eq!(engine.scores(), PlayerMap::with_value(13));
    assert_eq!(engine.result(), Some(GameResult::Draw));
    assert_eq!(engine.message().unwrap().to_string(), "Game over: It's a draw.");
}

/// Test that player 2 can win.
#[test]
fn test_player_two_wins() {
    let mut engine = seeded(6);
    engine.start();

    play_match(&mut engine);
    play_mismatch(&mut engine);
    for _ in 0..25 {
        play_match(&mut engine);
    }

    assert_eq!(engine.scores()[PlayerId::ONE], 1);
    assert_eq!(engine.scores()[PlayerId::TWO], 30);
    assert_eq!(engine.result(), Some(GameResult::Winner(PlayerId::TWO)));
}

/// Test that start() after a finished game deals a fresh one.
#[test]
fn test_restart_after_finish() {
    let mut engine = seeded(12);
    engine.start();
    for _ in 0..26 {
        play_match(&mut engine);
    }

    engine.start();

    assert!(engine.is_active());
    assert!(!engine.is_locked());
    assert_eq!(engine.remaining_pairs(), 26);
    assert_eq!(engine.scores(), PlayerMap::with_value(0));
    assert_eq!(engine.result(), None);
    assert!(engine.faces().iter().all(|f| *f == CardFace::Hidden));
}

// =============================================================================
// Notification Tests
// =============================================================================

/// Test the notifications a view receives for a new game.
#[test]
fn test_start_notifications() {
    let mut engine = seeded(10);
    let log = recorder(&mut engine);
    engine.start();

    let log = log.borrow();
    assert_eq!(log.len(), 4);
    match &log[0] {
        Notification::BoardDealt { cards } => assert_eq!(cards.len(), 52),
        other => panic!("expected BoardDealt, got {other:?}"),
    }
    assert_eq!(
        log[1],
        Notification::ScoresChanged {
            scores: PlayerMap::with_value(0),
            remaining_pairs: 26,
        }
    );
    assert_eq!(log[2], player_changed(Some(PlayerId::ONE)));
    assert_eq!(log[3], Notification::MessageChanged(Message::Opening(PlayerId::ONE)));
}

/// Test the notifications for a mismatch, in order.
#[test]
fn test_mismatch_notifications() {
    let mut engine = seeded(10);
    engine.start();
    let log = recorder(&mut engine);

    let cards = hidden(&engine);
    let a = cards[0];
    let b = *cards
        .iter()
        .find(|&&b| engine.cards()[b].rank != engine.cards()[a].rank)
        .unwrap();
    engine.select_card(a);
    engine.select_card(b);
    engine.run_until_idle();

    assert_eq!(
        *log.borrow(),
        vec![
            card_changed(a, CardFace::FaceUp),
            card_changed(b, CardFace::FaceUp),
            Notification::MessageChanged(Message::Mismatch),
            card_changed(a, CardFace::Hidden),
            card_changed(b, CardFace::Hidden),
            player_changed(Some(PlayerId::TWO)),
            Notification::MessageChanged(Message::Turn(PlayerId::TWO)),
        ]
    );
}

/// Test that the final pair reports the result.
#[test]
fn test_finish_notifications() {
    let mut engine = seeded(14);
    engine.start();
    for _ in 0..25 {
        play_match(&mut engine);
    }
    let log = recorder(&mut engine);
    play_match(&mut engine);

    let log = log.borrow();
    assert!(log.contains(&Notification::PlayerChanged { current: None }));
    assert_eq!(
        log.last(),
        Some(&Notification::GameFinished {
            result: GameResult::Winner(PlayerId::ONE),
            scores: engine.scores(),
        })
    );
}

/// Test that ignored selections are silent.
#[test]
fn test_ignored_selection_emits_nothing() {
    let mut engine = seeded(10);
    let log = recorder(&mut engine);

    engine.select_card(0);
    assert!(log.borrow().is_empty());
}

// =============================================================================
// Session Tests
// =============================================================================

/// Test that two sessions run independently.
#[test]
fn test_independent_sessions() {
    let mut a = seeded(30);
    let mut b = seeded(31);
    a.start();
    b.start();

    play_mismatch(&mut a);

    assert_eq!(a.current_player(), PlayerId::TWO);
    assert_eq!(b.current_player(), PlayerId::ONE);
    assert_eq!(b.now(), 0);
}

/// Test that a restart during the reveal pause discards the old pair.
#[test]
fn test_restart_during_reveal_pause() {
    let mut engine = seeded(50);
    engine.start();
    let partner = partner_of(&engine, 0).unwrap();
    engine.select_card(0);
    engine.select_card(partner);
    engine.advance(200);

    engine.start();
    engine.advance(1000);

    assert_eq!(engine.matched_pairs(), 0);
    assert_eq!(engine.scores(), PlayerMap::with_value(0));
    assert!(!engine.is_locked());
}
