//! Delayed resolution.
//!
//! When a second card is flipped, the engine hands the timer a
//! [`ResolutionTicket`] and a delay. The host later drives the timer with
//! [`TimerService::expired`]; every ticket that came due is handed back to
//! the engine, which resolves it if it still belongs to the live attempt.
//!
//! ## Implementations
//!
//! - [`ManualTimer`]: virtual clock advanced by the caller. Deterministic;
//!   suits tests and hosts with their own frame clock.
//! - [`SystemTimer`]: wall clock (`std::time::Instant`).
//!
//! ```
//! use std::time::Duration;
//! use memory_match::timer::{ManualTimer, ResolutionTicket, TimerService};
//!
//! let mut timer = ManualTimer::new();
//! let ticket = ResolutionTicket::new(1, 1);
//! timer.schedule(ticket, Duration::from_millis(1000));
//!
//! assert!(timer.expired(Duration::from_millis(999)).is_empty());
//! assert_eq!(timer.expired(Duration::from_millis(1)), vec![ticket]);
//! ```

mod manual;
mod system;

pub use manual::ManualTimer;
pub use system::SystemTimer;

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Token for one pending pair resolution.
///
/// Keyed by round and attempt number so a ticket outliving its round is
/// recognised as stale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolutionTicket {
    /// Round the attempt belongs to.
    pub round: u64,
    /// Pair attempt number within the round (starts at 1).
    pub attempt: u32,
}

impl ResolutionTicket {
    #[must_use]
    pub const fn new(round: u64, attempt: u32) -> Self {
        Self { round, attempt }
    }
}

impl std::fmt::Display for ResolutionTicket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Ticket(round {}, attempt {})", self.round, self.attempt)
    }
}

/// Delayed-callback primitive used by the engine.
pub trait TimerService {
    /// Arrange for `ticket` to come due after `delay`.
    fn schedule(&mut self, ticket: ResolutionTicket, delay: Duration);

    /// Drop a scheduled ticket. Unknown tickets are ignored.
    fn cancel(&mut self, ticket: ResolutionTicket);

    /// Report `elapsed` time since the last call and collect due tickets,
    /// earliest first. Each ticket is returned at most once.
    fn expired(&mut self, elapsed: Duration) -> Vec<ResolutionTicket>;

    /// Number of tickets still waiting.
    fn pending(&self) -> usize;
}

impl<T: TimerService + ?Sized> TimerService for Box<T> {
    fn schedule(&mut self, ticket: ResolutionTicket, delay: Duration) {
        (**self).schedule(ticket, delay);
    }

    fn cancel(&mut self, ticket: ResolutionTicket) {
        (**self).cancel(ticket);
    }

    fn expired(&mut self, elapsed: Duration) -> Vec<ResolutionTicket> {
        (**self).expired(elapsed)
    }

    fn pending(&self) -> usize {
        (**self).pending()
    }
}
