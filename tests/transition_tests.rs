//! Snapshot transition tests.
//!
//! A tracker subscribed to the engine turns the snapshot stream into
//! per-card flip and match events for the presentation layer.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use memory_match::{
    diff, CardKey, CardTransition, DeckSnapshot, MatchConfig, MatchEngine, TransitionKind,
    TransitionTracker,
};

const DELAY: Duration = Duration::from_millis(1000);

fn engine(seed: u64) -> MatchEngine {
    let config = MatchConfig::new().with_card_types(["A", "B", "C"]).with_seed(seed);
    let mut engine = MatchEngine::new(config).unwrap();
    engine.start_round().unwrap();
    engine
}

fn twin_of(engine: &MatchEngine, key: CardKey) -> CardKey {
    let deck = engine.deck().unwrap();
    let card_type = &deck.get(key).unwrap().card_type;
    deck.iter()
        .find(|c| c.key != key && &c.card_type == card_type)
        .unwrap()
        .key
}

fn stranger_of(engine: &MatchEngine, key: CardKey) -> CardKey {
    let deck = engine.deck().unwrap();
    let card_type = &deck.get(key).unwrap().card_type;
    deck.iter().find(|c| &c.card_type != card_type).unwrap().key
}

/// Subscribe a tracker that records (key, kind) pairs.
fn track(engine: &mut MatchEngine) -> Rc<RefCell<Vec<(CardKey, TransitionKind)>>> {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    let start = engine.snapshot();
    engine.subscribe(TransitionTracker::from_snapshot(start, move |t: &CardTransition| {
        sink.borrow_mut().push((t.key, t.kind));
    }));
    events
}

// =============================================================================
// Tracker Events
// =============================================================================

#[test]
fn test_mismatch_flips_up_then_down() {
    let mut engine = engine(4);
    let events = track(&mut engine);

    let first = CardKey(0);
    let other = stranger_of(&engine, first);
    engine.on_card_selected(first);
    engine.on_card_selected(other);
    engine.tick(DELAY);

    let events = events.borrow();
    assert_eq!(
        events[..2],
        [(first, TransitionKind::FlippedUp), (other, TransitionKind::FlippedUp)]
    );
    let mut hidden = events[2..].to_vec();
    hidden.sort_by_key(|(key, _)| *key);
    let mut expected = vec![(first, TransitionKind::FlippedDown), (other, TransitionKind::FlippedDown)];
    expected.sort_by_key(|(key, _)| *key);
    assert_eq!(hidden, expected);
}

#[test]
fn test_refused_taps_emit_nothing() {
    let mut engine = engine(4);
    let events = track(&mut engine);

    let first = CardKey(0);
    let other = stranger_of(&engine, first);
    engine.on_card_selected(first);
    engine.on_card_selected(first);
    engine.on_card_selected(other);
    engine.on_card_selected(CardKey(99));

    assert_eq!(events.borrow().len(), 2);
}

#[test]
fn test_new_round_emits_nothing() {
    let mut engine = engine(4);
    let events = track(&mut engine);

    engine.on_card_selected(CardKey(0));
    engine.start_round().unwrap();
    engine.on_card_selected(CardKey(1));

    assert_eq!(
        *events.borrow(),
        vec![
            (CardKey(0), TransitionKind::FlippedUp),
            (CardKey(1), TransitionKind::FlippedUp),
        ]
    );
}

// =============================================================================
// Snapshot Diffs
// =============================================================================

#[test]
fn test_match_reports_only_matched() {
    let mut engine = engine(9);
    let first = CardKey(0);
    let twin = twin_of(&engine, first);
    engine.on_card_selected(first);
    engine.on_card_selected(twin);

    let pending = engine.snapshot();
    engine.tick(DELAY);
    let resolved = engine.snapshot();

    let transitions = diff(&pending, &resolved);
    assert_eq!(transitions.len(), 2);
    for t in &transitions {
        assert_eq!(t.kind, TransitionKind::Matched);
        assert!(t.key == first || t.key == twin);
    }
}

#[test]
fn test_diff_of_empty_snapshots_is_empty() {
    assert!(diff(&DeckSnapshot::empty(), &DeckSnapshot::empty()).is_empty());
}

#[test]
fn test_transition_serializes() {
    let mut engine = engine(9);
    let before = engine.snapshot();
    engine.on_card_selected(CardKey(2));

    let transitions = diff(&before, &engine.snapshot());
    let json = serde_json::to_string(&transitions).unwrap();
    let back: Vec<CardTransition> = serde_json::from_str(&json).unwrap();

    assert_eq!(back, transitions);
    assert_eq!(back[0].kind, TransitionKind::FlippedUp);
}
