//! Virtual-clock timer.

use std::time::Duration;

use smallvec::SmallVec;
use tracing::debug;

use super::{ResolutionTicket, TimerService};

#[derive(Clone, Copy, Debug)]
struct Scheduled {
    ticket: ResolutionTicket,
    due: Duration,
}

/// Timer driven entirely by the caller's `expired(elapsed)` calls.
///
/// Time only moves when the host says so, so behaviour is fully
/// deterministic. The engine keeps at most one ticket outstanding; the
/// inline capacity reflects that.
#[derive(Clone, Debug, Default)]
pub struct ManualTimer {
    now: Duration,
    scheduled: SmallVec<[Scheduled; 2]>,
}

impl ManualTimer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed since creation.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Time left until the earliest ticket comes due.
    #[must_use]
    pub fn next_due_in(&self) -> Option<Duration> {
        self.scheduled
            .iter()
            .map(|s| s.due.saturating_sub(self.now))
            .min()
    }
}

impl TimerService for ManualTimer {
    fn schedule(&mut self, ticket: ResolutionTicket, delay: Duration) {
        debug!(%ticket, ?delay, "scheduled resolution");
        self.scheduled.push(Scheduled {
            ticket,
            due: self.now + delay,
        });
    }

    fn cancel(&mut self, ticket: ResolutionTicket) {
        let before = self.scheduled.len();
        self.scheduled.retain(|s| s.ticket != ticket);
        if self.scheduled.len() != before {
            debug!(%ticket, "cancelled resolution");
        }
    }

    fn expired(&mut self, elapsed: Duration) -> Vec<ResolutionTicket> {
        self.now += elapsed;
        let now = self.now;

        let mut due: Vec<Scheduled> = self
            .scheduled
            .iter()
            .filter(|s| s.due <= now)
            .copied()
            .collect();
        self.scheduled.retain(|s| s.due > now);

        due.sort_by_key(|s| s.due);
        due.into_iter().map(|s| s.ticket).collect()
    }

    fn pending(&self) -> usize {
        self.scheduled.len()
    }
}
