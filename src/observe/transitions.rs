//! Per-card transitions between successive snapshots.
//!
//! The engine knows nothing about animation or sound. A presentation layer
//! subscribes a [`TransitionTracker`] and hangs its effects off the events:
//! slide the curtain out on `FlippedUp`, back in on `FlippedDown`, and so on.

use serde::{Deserialize, Serialize};

use crate::core::{CardKey, CardType};

use super::snapshot::{DeckSnapshot, SnapshotObserver};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransitionKind {
    /// Turned face-up for an attempt.
    FlippedUp,
    /// Hidden again after a failed attempt.
    FlippedDown,
    /// Confirmed as half of a pair.
    Matched,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardTransition {
    pub key: CardKey,
    pub card_type: CardType,
    pub kind: TransitionKind,
}

/// Diff two snapshots card by card.
///
/// Snapshots from different rounds describe different decks and yield no
/// transitions. A card that resolves as matched yields only `Matched`.
#[must_use]
pub fn diff(prev: &DeckSnapshot, next: &DeckSnapshot) -> Vec<CardTransition> {
    if prev.round != next.round {
        return Vec::new();
    }

    prev.deck
        .iter()
        .zip(next.deck.iter())
        .filter_map(|(before, after)| {
            let kind = if !before.matched && after.matched {
                TransitionKind::Matched
            } else if !before.flipped && after.flipped {
                TransitionKind::FlippedUp
            } else if before.flipped && !after.flipped {
                TransitionKind::FlippedDown
            } else {
                return None;
            };
            Some(CardTransition {
                key: after.key,
                card_type: after.card_type.clone(),
                kind,
            })
        })
        .collect()
}

/// Observer that diffs each snapshot against the previous one and forwards
/// the transitions to a hook.
pub struct TransitionTracker<F> {
    last: Option<DeckSnapshot>,
    hook: F,
}

impl<F: FnMut(&CardTransition)> TransitionTracker<F> {
    pub fn new(hook: F) -> Self {
        Self { last: None, hook }
    }

    /// Start from a known snapshot, so the first update already diffs.
    pub fn from_snapshot(snapshot: DeckSnapshot, hook: F) -> Self {
        Self {
            last: Some(snapshot),
            hook,
        }
    }

    /// Last snapshot seen.
    #[must_use]
    pub fn last(&self) -> Option<&DeckSnapshot> {
        self.last.as_ref()
    }
}

impl<F: FnMut(&CardTransition)> SnapshotObserver for TransitionTracker<F> {
    fn on_snapshot(&mut self, snapshot: &DeckSnapshot) {
        if let Some(prev) = &self.last {
            for transition in diff(prev, snapshot) {
                (self.hook)(&transition);
            }
        }
        self.last = Some(snapshot.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MatchConfig;
    use crate::engine::MatchEngine;
    use std::time::Duration;

    fn engine() -> MatchEngine {
        let config = MatchConfig::new().with_card_types(["a", "b"]).with_seed(7);
        let mut engine = MatchEngine::new(config).unwrap();
        engine.start_round().unwrap();
        engine
    }

    fn pair_keys(engine: &MatchEngine, same: bool) -> (CardKey, CardKey) {
        let deck = engine.deck().unwrap();
        let first = deck.get(CardKey(0)).unwrap();
        let second = deck
            .iter()
            .find(|c| c.key != first.key && (c.card_type == first.card_type) == same)
            .unwrap();
        (first.key, second.key)
    }

    #[test]
    fn test_flip_up() {
        let mut engine = engine();
        let before = engine.snapshot();
        engine.on_card_selected(CardKey(3));

        let transitions = diff(&before, &engine.snapshot());

        assert_eq!(transitions.len(), 1);
        assert_eq!(transitions[0].key, CardKey(3));
        assert_eq!(transitions[0].kind, TransitionKind::FlippedUp);
    }

    #[test]
    fn test_matched_pair() {
        let mut engine = engine();
        let (a, b) = pair_keys(&engine, true);
        engine.on_card_selected(a);
        engine.on_card_selected(b);
        let before = engine.snapshot();

        engine.tick(Duration::from_millis(1000));
        let transitions = diff(&before, &engine.snapshot());

        assert_eq!(transitions.len(), 2);
        assert!(transitions.iter().all(|t| t.kind == TransitionKind::Matched));
    }

    #[test]
    fn test_mismatched_pair() {
        let mut engine = engine();
        let (a, b) = pair_keys(&engine, false);
        engine.on_card_selected(a);
        engine.on_card_selected(b);
        let before = engine.snapshot();

        engine.tick(Duration::from_millis(1000));
        let kinds: Vec<_> = diff(&before, &engine.snapshot())
            .into_iter()
            .map(|t| (t.key, t.kind))
            .collect();

        let mut expected = vec![(a, TransitionKind::FlippedDown), (b, TransitionKind::FlippedDown)];
        expected.sort_by_key(|(k, _)| *k);
        assert_eq!(kinds, expected);
    }

    #[test]
    fn test_tracker_diffs_from_second_update() {
        let count = std::rc::Rc::new(std::cell::Cell::new(0));
        let sink = std::rc::Rc::clone(&count);
        let mut tracker = TransitionTracker::new(move |_: &CardTransition| sink.set(sink.get() + 1));

        let mut engine = engine();
        let first = engine.snapshot();
        engine.on_card_selected(CardKey(0));

        tracker.on_snapshot(&first);
        assert!(tracker.last().is_some());
        tracker.on_snapshot(&engine.snapshot());

        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_new_round_has_no_transitions() {
        let mut engine = engine();
        engine.on_card_selected(CardKey(0));
        let before = engine.snapshot();

        engine.start_round().unwrap();

        assert!(diff(&before, &engine.snapshot()).is_empty());
    }

    #[test]
    fn test_tracker_forwards_events() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);

        let mut engine = engine();
        let start = engine.snapshot();
        engine.subscribe(TransitionTracker::from_snapshot(start, move |t: &CardTransition| {
            sink.borrow_mut().push(t.kind);
        }));

        let (a, b) = pair_keys(&engine, true);
        engine.on_card_selected(a);
        engine.on_card_selected(b);
        engine.tick(Duration::from_millis(1000));

        assert_eq!(
            *events.borrow(),
            vec![
                TransitionKind::FlippedUp,
                TransitionKind::FlippedUp,
                TransitionKind::Matched,
                TransitionKind::Matched,
            ]
        );
    }
}
