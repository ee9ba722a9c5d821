//! Engine states and selection outcomes.

use serde::{Deserialize, Serialize};

use crate::core::CardKey;
use crate::timer::ResolutionTicket;

/// Where the engine is within a pair attempt.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchPhase {
    /// No card flipped.
    #[default]
    Idle,
    /// One card flipped, waiting for the second pick.
    OneFlipped,
    /// Two cards flipped, waiting for the timed resolution.
    Resolving,
}

impl MatchPhase {
    /// Whether taps are currently accepted.
    #[must_use]
    pub fn accepts_input(self) -> bool {
        !matches!(self, MatchPhase::Resolving)
    }
}

/// Why a tap was refused. State is unchanged in every case.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IgnoreReason {
    /// Not on the game screen; no deck dealt.
    NoActiveRound,
    /// A pair attempt is waiting for its resolution.
    Resolving,
    /// The key is not in the deck.
    UnknownCard,
    /// The card is already part of a confirmed pair.
    AlreadyMatched,
    /// The card is the one already flipped in this attempt.
    AlreadySelected,
}

/// Result of [`MatchEngine::on_card_selected`](super::MatchEngine::on_card_selected).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectOutcome {
    /// First card of an attempt turned face-up.
    Flipped { key: CardKey },

    /// Second card turned face-up; resolution is scheduled.
    PairPending {
        first: CardKey,
        second: CardKey,
        /// Outcome the resolution will apply.
        matched: bool,
        ticket: ResolutionTicket,
    },

    /// Tap refused.
    Ignored(IgnoreReason),
}

impl SelectOutcome {
    /// Whether the tap changed state.
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        !matches!(self, SelectOutcome::Ignored(_))
    }
}

/// Progress of the current round.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoundStats {
    /// Round number; 0 when no round is active.
    pub round: u64,
    /// Pair attempts made (second cards flipped).
    pub attempts: u32,
    /// Pairs confirmed so far.
    pub matched_pairs: u32,
    /// Pairs in the deck.
    pub total_pairs: u32,
}

impl RoundStats {
    /// All pairs found.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.total_pairs > 0 && self.matched_pairs == self.total_pairs
    }
}
