//! # memory-match
//!
//! Engine for a memory (concentration) card game.
//!
//! A round deals a shuffled deck with two cards of every type. The player
//! flips two cards per attempt; equal types stay revealed, unequal types are
//! hidden again after a short pause.
//!
//! ## Design Principles
//!
//! 1. **Presentation-Agnostic**: The engine never renders, animates or plays
//!    sound. It publishes immutable snapshots; the UI reacts to them.
//!
//! 2. **Deterministic**: Deals come from a seeded ChaCha8 stream and the
//!    resolution pause runs on a pluggable timer, so every game can be
//!    replayed exactly in tests.
//!
//! 3. **Total Input Handling**: Every tap is answered. Taps that are not
//!    allowed (matched card, same card twice, during the pause) are refused
//!    with a reason and change nothing.
//!
//! ## Modules
//!
//! - `core`: Cards, keys, types, RNG, configuration, errors
//! - `deck`: Decks and the deck generator
//! - `engine`: The flip/compare/resolve state machine
//! - `timer`: Delayed resolution (virtual and wall clock)
//! - `observe`: Snapshots, observers, per-card transitions
//! - `session`: Home/game navigation owning the round lifecycle

pub mod core;
pub mod deck;
pub mod engine;
pub mod timer;
pub mod observe;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    Card, CardKey, CardType,
    DeckRng, DeckRngState,
    MatchConfig, MatchError, Result,
};

pub use crate::deck::{Deck, DeckGenerator};

pub use crate::engine::{IgnoreReason, MatchEngine, MatchPhase, RoundStats, SelectOutcome};

pub use crate::timer::{ManualTimer, ResolutionTicket, SystemTimer, TimerService};

pub use crate::observe::{
    diff, CardTransition, DeckSnapshot, ObserverId, SnapshotObserver,
    TransitionKind, TransitionTracker,
};

pub use crate::session::{Screen, Session};
