//! Snapshot observation for the presentation layer.
//!
//! The engine publishes a [`DeckSnapshot`] after every mutation to each
//! subscribed [`SnapshotObserver`]. [`diff`] and [`TransitionTracker`] turn
//! successive snapshots into per-card events for animation and sound.

mod snapshot;
mod transitions;

pub use snapshot::{DeckSnapshot, ObserverId, ObserverRegistry, SnapshotObserver};
pub use transitions::{diff, CardTransition, TransitionKind, TransitionTracker};
