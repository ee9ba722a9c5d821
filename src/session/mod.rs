//! Screen navigation and round lifecycle.
//!
//! The app has two screens: a home screen with a "play" link and the game
//! screen with a "back" link. A round lives exactly as long as the game
//! screen is shown:
//! - entering the game screen deals a fresh deck
//! - leaving it discards the round and cancels any pending resolution, so a
//!   late timer never touches a discarded deck

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{CardKey, MatchConfig, Result};
use crate::engine::{IgnoreReason, MatchEngine, RoundStats, SelectOutcome};
use crate::timer::{ManualTimer, TimerService};

/// Screens of the app.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Screen {
    #[default]
    Home,
    Game,
}

/// Navigation state wrapped around a [`MatchEngine`].
pub struct Session<T: TimerService = ManualTimer> {
    screen: Screen,
    engine: MatchEngine<T>,
}

impl Session<ManualTimer> {
    /// Create a session on the home screen.
    pub fn new(config: MatchConfig) -> Result<Self> {
        Ok(Self::with_engine(MatchEngine::new(config)?))
    }
}

impl<T: TimerService> Session<T> {
    /// Wrap an existing engine. Any active round is left as is.
    #[must_use]
    pub fn with_engine(engine: MatchEngine<T>) -> Self {
        let screen = if engine.has_round() { Screen::Game } else { Screen::Home };
        Self { screen, engine }
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    #[must_use]
    pub fn engine(&self) -> &MatchEngine<T> {
        &self.engine
    }

    /// Engine access for subscribing observers or driving it directly.
    pub fn engine_mut(&mut self) -> &mut MatchEngine<T> {
        &mut self.engine
    }

    /// Navigate to the game screen and deal a round.
    ///
    /// Returns false (and keeps the current round) if already there.
    pub fn enter_game(&mut self) -> Result<bool> {
        if self.screen == Screen::Game {
            return Ok(false);
        }
        self.engine.start_round()?;
        self.screen = Screen::Game;
        debug!("entered game screen");
        Ok(true)
    }

    /// Navigate back home, ending the round.
    ///
    /// Returns the stats of the discarded round, `None` if already home.
    pub fn leave_game(&mut self) -> Option<RoundStats> {
        if self.screen == Screen::Home {
            return None;
        }
        self.screen = Screen::Home;
        debug!("left game screen");
        self.engine.end_round()
    }

    /// Deal a new round without leaving the game screen.
    pub fn restart(&mut self) -> Result<()> {
        if self.screen == Screen::Home {
            self.screen = Screen::Game;
        }
        self.engine.start_round()
    }

    /// Forward a tap from the board.
    pub fn tap(&mut self, key: CardKey) -> SelectOutcome {
        if self.screen == Screen::Home {
            return SelectOutcome::Ignored(IgnoreReason::NoActiveRound);
        }
        self.engine.on_card_selected(key)
    }

    /// Drive the engine timer.
    pub fn tick(&mut self, elapsed: Duration) -> usize {
        self.engine.tick(elapsed)
    }

    /// On the game screen with every pair found.
    #[must_use]
    pub fn is_won(&self) -> bool {
        self.screen == Screen::Game && self.engine.is_complete()
    }
}
