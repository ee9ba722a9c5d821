//! The match engine.

use std::time::Duration;

use smallvec::SmallVec;
use tracing::{debug, info, trace};

use crate::core::{CardKey, CardType, DeckRng, MatchConfig, Result};
use crate::deck::{Deck, DeckGenerator};
use crate::observe::{DeckSnapshot, ObserverId, ObserverRegistry, SnapshotObserver};
use crate::timer::{ManualTimer, ResolutionTicket, TimerService};

use super::phase::{IgnoreReason, MatchPhase, RoundStats, SelectOutcome};

#[derive(Clone, Copy, Debug)]
struct PendingResolution {
    ticket: ResolutionTicket,
    matched: bool,
}

/// State of one dealt round.
#[derive(Clone, Debug)]
struct Round {
    number: u64,
    deck: Deck,
    /// Flipped-but-unresolved keys, in pick order.
    selection: SmallVec<[CardKey; 2]>,
    /// Type of the first card of the current attempt.
    pending_type: Option<CardType>,
    pending: Option<PendingResolution>,
    attempts: u32,
    matched_pairs: u32,
}

impl Round {
    fn new(number: u64, deck: Deck) -> Self {
        Self {
            number,
            deck,
            selection: SmallVec::new(),
            pending_type: None,
            pending: None,
            attempts: 0,
            matched_pairs: 0,
        }
    }

    fn phase(&self) -> MatchPhase {
        if self.pending.is_some() {
            MatchPhase::Resolving
        } else if self.selection.is_empty() {
            MatchPhase::Idle
        } else {
            MatchPhase::OneFlipped
        }
    }

    fn stats(&self) -> RoundStats {
        RoundStats {
            round: self.number,
            attempts: self.attempts,
            matched_pairs: self.matched_pairs,
            total_pairs: u32::try_from(self.deck.pair_count()).unwrap_or(u32::MAX),
        }
    }

    fn select<T: TimerService>(
        &mut self,
        key: CardKey,
        timer: &mut T,
        delay: Duration,
    ) -> SelectOutcome {
        if self.pending.is_some() {
            return SelectOutcome::Ignored(IgnoreReason::Resolving);
        }
        if self.selection.contains(&key) {
            return SelectOutcome::Ignored(IgnoreReason::AlreadySelected);
        }
        let Some(card) = self.deck.get_mut(key) else {
            return SelectOutcome::Ignored(IgnoreReason::UnknownCard);
        };
        if card.matched {
            return SelectOutcome::Ignored(IgnoreReason::AlreadyMatched);
        }

        card.flipped = true;
        let card_type = card.card_type.clone();
        self.selection.push(key);

        let Some(matched) = self.pending_type.as_ref().map(|first| *first == card_type) else {
            debug!(round = self.number, %key, %card_type, "flipped first card");
            self.pending_type = Some(card_type);
            return SelectOutcome::Flipped { key };
        };

        let first = self.selection[0];
        self.attempts += 1;

        let ticket = ResolutionTicket::new(self.number, self.attempts);
        self.pending = Some(PendingResolution { ticket, matched });
        timer.schedule(ticket, delay);

        debug!(round = self.number, %first, second = %key, matched, "pair attempt pending");
        SelectOutcome::PairPending {
            first,
            second: key,
            matched,
            ticket,
        }
    }

    /// Apply a pending resolution. Caller has checked the ticket.
    fn resolve(&mut self, pending: PendingResolution) {
        for key in self.selection.drain(..) {
            if let Some(card) = self.deck.get_mut(key) {
                card.flipped = false;
                card.matched = pending.matched;
            }
        }
        if pending.matched {
            self.matched_pairs += 1;
        }
        self.pending_type = None;
        self.pending = None;
    }
}

/// Memory-match game engine.
///
/// Holds the deck of the active round, the current selection and the
/// outstanding resolution ticket. Every state change is published to the
/// subscribed observers as a [`DeckSnapshot`].
///
/// ## Flow
///
/// 1. [`start_round`](Self::start_round) deals a deck.
/// 2. [`on_card_selected`](Self::on_card_selected) for each tap. The second
///    tap of an attempt schedules a ticket on the timer.
/// 3. [`tick`](Self::tick) drives the timer; due tickets are resolved.
///
/// ```
/// use std::time::Duration;
/// use memory_match::{CardKey, MatchConfig, MatchEngine, MatchPhase};
///
/// let config = MatchConfig::new().with_card_types(["a", "b"]).with_seed(42);
/// let mut engine = MatchEngine::new(config).unwrap();
/// engine.start_round().unwrap();
///
/// engine.on_card_selected(CardKey(0));
/// assert_eq!(engine.phase(), MatchPhase::OneFlipped);
/// engine.on_card_selected(CardKey(1));
/// assert_eq!(engine.phase(), MatchPhase::Resolving);
///
/// engine.tick(Duration::from_millis(1000));
/// assert_eq!(engine.phase(), MatchPhase::Idle);
/// ```
pub struct MatchEngine<T: TimerService = ManualTimer> {
    config: MatchConfig,
    generator: DeckGenerator,
    timer: T,
    observers: ObserverRegistry,
    rounds_started: u64,
    round: Option<Round>,
}

impl MatchEngine<ManualTimer> {
    /// Create an engine driven by a virtual clock.
    pub fn new(config: MatchConfig) -> Result<Self> {
        Self::with_timer(config, ManualTimer::new())
    }
}

impl<T: TimerService> MatchEngine<T> {
    /// Create an engine with a custom timer.
    ///
    /// Fails if the configuration does not validate.
    pub fn with_timer(config: MatchConfig, timer: T) -> Result<Self> {
        config.validate()?;

        let rng = config.seed.map_or_else(DeckRng::from_entropy, DeckRng::new);
        debug!(seed = rng.seed(), pairs = config.pair_count(), "created match engine");

        Ok(Self {
            config,
            generator: DeckGenerator::new(rng),
            timer,
            observers: ObserverRegistry::new(),
            rounds_started: 0,
            round: None,
        })
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    #[must_use]
    pub fn timer(&self) -> &T {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut T {
        &mut self.timer
    }

    /// RNG state of the dealer, for reproducing the next deals.
    #[must_use]
    pub fn rng_state(&self) -> crate::core::DeckRngState {
        self.generator.rng().state()
    }

    // === Observers ===

    /// Subscribe to snapshots. The observer is called after every mutation.
    pub fn subscribe(&mut self, observer: impl SnapshotObserver + 'static) -> ObserverId {
        self.observers.subscribe(Box::new(observer))
    }

    /// Remove an observer. Returns false if it was not subscribed.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.observers.unsubscribe(id)
    }

    fn notify(&mut self) {
        if self.observers.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        self.observers.notify(&snapshot);
    }

    // === Rounds ===

    /// Deal a fresh deck and reset the selection.
    ///
    /// A resolution still pending from the previous round is cancelled.
    pub fn start_round(&mut self) -> Result<()> {
        let deck = self.generator.generate(&self.config.card_types)?;
        self.discard_round();

        self.rounds_started += 1;
        info!(round = self.rounds_started, pairs = deck.pair_count(), "round started");
        self.round = Some(Round::new(self.rounds_started, deck));
        self.notify();
        Ok(())
    }

    /// Discard the active round. Returns its final stats, or `None` if no
    /// round was active.
    pub fn end_round(&mut self) -> Option<RoundStats> {
        let stats = self.discard_round()?;
        info!(
            round = stats.round,
            attempts = stats.attempts,
            matched_pairs = stats.matched_pairs,
            "round ended"
        );
        self.notify();
        Some(stats)
    }

    fn discard_round(&mut self) -> Option<RoundStats> {
        let round = self.round.take()?;
        if let Some(pending) = round.pending {
            self.timer.cancel(pending.ticket);
        }
        Some(round.stats())
    }

    /// Whether a deck is dealt.
    #[must_use]
    pub fn has_round(&self) -> bool {
        self.round.is_some()
    }

    // === Play ===

    /// Handle a tap on the card with `key`.
    ///
    /// Refused taps return [`SelectOutcome::Ignored`] and change nothing.
    pub fn on_card_selected(&mut self, key: CardKey) -> SelectOutcome {
        let delay = self.config.resolve_delay();
        let outcome = match self.round.as_mut() {
            Some(round) => round.select(key, &mut self.timer, delay),
            None => SelectOutcome::Ignored(IgnoreReason::NoActiveRound),
        };

        match outcome {
            SelectOutcome::Ignored(reason) => trace!(%key, ?reason, "ignored selection"),
            _ => self.notify(),
        }
        outcome
    }

    /// Resolve a pair attempt.
    ///
    /// Normally called from [`tick`](Self::tick). Returns false when the
    /// ticket is stale (its round ended or it was already resolved).
    pub fn resolve(&mut self, ticket: ResolutionTicket) -> bool {
        let Some(round) = self.round.as_mut() else {
            debug!(%ticket, "dropped stale ticket: no active round");
            return false;
        };
        let Some(pending) = round.pending.filter(|p| p.ticket == ticket) else {
            debug!(%ticket, round = round.number, "dropped stale ticket");
            return false;
        };

        round.resolve(pending);
        debug!(%ticket, matched = pending.matched, "resolved pair attempt");

        if round.deck.all_matched() {
            info!(round = round.number, attempts = round.attempts, "round complete");
        }
        self.notify();
        true
    }

    /// Advance the timer by `elapsed` and resolve every due ticket.
    ///
    /// Returns the number of resolutions applied.
    pub fn tick(&mut self, elapsed: Duration) -> usize {
        let due = self.timer.expired(elapsed);
        let mut applied = 0;
        for ticket in due {
            if self.resolve(ticket) {
                applied += 1;
            }
        }
        applied
    }

    // === Queries ===

    /// Current phase. `Idle` when no round is active.
    #[must_use]
    pub fn phase(&self) -> MatchPhase {
        self.round.as_ref().map_or(MatchPhase::Idle, Round::phase)
    }

    /// Deck of the active round.
    #[must_use]
    pub fn deck(&self) -> Option<&Deck> {
        self.round.as_ref().map(|r| &r.deck)
    }

    /// Keys flipped in the current attempt.
    #[must_use]
    pub fn selection(&self) -> &[CardKey] {
        self.round.as_ref().map_or(&[][..], |r| r.selection.as_slice())
    }

    /// Ticket of the attempt waiting to resolve.
    #[must_use]
    pub fn pending_ticket(&self) -> Option<ResolutionTicket> {
        self.round.as_ref()?.pending.map(|p| p.ticket)
    }

    /// Stats of the active round (zeroed when none).
    #[must_use]
    pub fn stats(&self) -> RoundStats {
        self.round.as_ref().map(Round::stats).unwrap_or_default()
    }

    /// Every card of the active round is matched.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.round.as_ref().is_some_and(|r| r.deck.all_matched())
    }

    /// Immutable view of the current state.
    #[must_use]
    pub fn snapshot(&self) -> DeckSnapshot {
        match &self.round {
            Some(round) => DeckSnapshot {
                round: round.number,
                phase: round.phase(),
                deck: round.deck.clone(),
                stats: round.stats(),
            },
            None => DeckSnapshot::empty(),
        }
    }
}
