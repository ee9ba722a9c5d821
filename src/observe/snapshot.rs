//! Deck snapshots and the observer registry.

use serde::{Deserialize, Serialize};

use crate::deck::Deck;
use crate::engine::{MatchPhase, RoundStats};

/// Immutable view of the engine after a mutation.
///
/// Cloning is O(1): the deck shares structure with the engine's copy.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckSnapshot {
    /// Round number; 0 when no round is active.
    pub round: u64,
    pub phase: MatchPhase,
    pub deck: Deck,
    pub stats: RoundStats,
}

impl DeckSnapshot {
    /// Snapshot published when no round is active.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Every card matched.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.deck.all_matched()
    }
}

/// Receives a snapshot after every engine mutation.
///
/// Implemented for any `FnMut(&DeckSnapshot)`.
pub trait SnapshotObserver {
    fn on_snapshot(&mut self, snapshot: &DeckSnapshot);
}

impl<F: FnMut(&DeckSnapshot)> SnapshotObserver for F {
    fn on_snapshot(&mut self, snapshot: &DeckSnapshot) {
        self(snapshot);
    }
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObserverId(pub u32);

/// Subscribed observers, notified in subscription order.
#[derive(Default)]
pub struct ObserverRegistry {
    next_id: u32,
    observers: Vec<(ObserverId, Box<dyn SnapshotObserver>)>,
}

impl ObserverRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, observer: Box<dyn SnapshotObserver>) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, observer));
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(i, _)| *i != id);
        self.observers.len() != before
    }

    pub fn notify(&mut self, snapshot: &DeckSnapshot) {
        for (_, observer) in &mut self.observers {
            observer.on_snapshot(snapshot);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl std::fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("observers", &self.observers.len())
            .finish()
    }
}
