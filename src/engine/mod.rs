//! Match engine: the flip/compare/resolve state machine.
//!
//! ## States
//!
//! - `Idle`: no card face-up in the current attempt
//! - `OneFlipped`: first card face-up, waiting for the second
//! - `Resolving`: two cards face-up; taps are ignored until the timer
//!   hands back the resolution ticket
//!
//! Resolution sets `flipped = false` on both cards and `matched` to whether
//! their types were equal. Matched cards can never be picked again.

mod engine;
mod phase;

pub use engine::MatchEngine;
pub use phase::{IgnoreReason, MatchPhase, RoundStats, SelectOutcome};
