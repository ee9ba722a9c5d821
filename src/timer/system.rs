//! Wall-clock timer.

use std::time::{Duration, Instant};

use tracing::debug;

use super::{ResolutionTicket, TimerService};

/// Timer backed by `Instant::now()`.
///
/// The `elapsed` argument of [`TimerService::expired`] is ignored; deadlines
/// are checked against the real clock, so the host only needs to poll.
#[derive(Clone, Debug, Default)]
pub struct SystemTimer {
    scheduled: Vec<(ResolutionTicket, Instant)>,
}

impl SystemTimer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Time left until the earliest deadline.
    #[must_use]
    pub fn next_due_in(&self) -> Option<Duration> {
        let now = Instant::now();
        self.scheduled
            .iter()
            .map(|&(_, deadline)| deadline.saturating_duration_since(now))
            .min()
    }
}

impl TimerService for SystemTimer {
    fn schedule(&mut self, ticket: ResolutionTicket, delay: Duration) {
        debug!(%ticket, ?delay, "scheduled resolution");
        self.scheduled.push((ticket, Instant::now() + delay));
    }

    fn cancel(&mut self, ticket: ResolutionTicket) {
        self.scheduled.retain(|&(t, _)| t != ticket);
    }

    fn expired(&mut self, _elapsed: Duration) -> Vec<ResolutionTicket> {
        let now = Instant::now();
        let (mut due, waiting): (Vec<_>, Vec<_>) = self
            .scheduled
            .drain(..)
            .partition(|&(_, deadline)| deadline <= now);
        self.scheduled = waiting;

        due.sort_by_key(|&(_, deadline)| deadline);
        due.into_iter().map(|(ticket, _)| ticket).collect()
    }

    fn pending(&self) -> usize {
        self.scheduled.len()
    }
}
