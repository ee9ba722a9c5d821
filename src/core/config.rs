//! Match configuration.
//!
//! Hosts configure the engine at startup with a `MatchConfig`:
//! - the card types dealt each round
//! - the pause before a pair attempt resolves
//! - the card footprint (visual only, carried for the presentation layer)
//! - an optional RNG seed for reproducible deals
//!
//! Configs can be built in code or loaded from JSON.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::card::CardType;
use super::error::{MatchError, Result};
use crate::deck::validate_types;

/// Icon names dealt when no types are configured.
pub const DEFAULT_CARD_TYPES: [&str; 8] = [
    "ios-bicycle",
    "ios-beer",
    "ios-cafe",
    "ios-bug",
    "ios-basketball",
    "ios-camera",
    "ios-hammer",
    "ios-rocket",
];

/// Pause between flipping the second card and resolving the attempt.
pub const DEFAULT_RESOLVE_DELAY_MS: u64 = 1000;

/// Card width and height in layout units.
pub const DEFAULT_CARD_SIZE: u32 = 80;

/// Complete match configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Distinct card types; each is dealt twice.
    pub card_types: Vec<CardType>,

    /// Delay before a pair attempt resolves, in milliseconds.
    pub resolve_delay_ms: u64,

    /// Card footprint. Not used by the engine.
    pub card_size: u32,

    /// RNG seed. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            card_types: DEFAULT_CARD_TYPES.iter().map(|&s| CardType::new(s)).collect(),
            resolve_delay_ms: DEFAULT_RESOLVE_DELAY_MS,
            card_size: DEFAULT_CARD_SIZE,
            seed: None,
        }
    }
}

impl MatchConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a JSON configuration.
    ///
    /// Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Replace the card type set.
    #[must_use]
    pub fn with_card_types<I, T>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<CardType>,
    {
        self.card_types = types.into_iter().map(Into::into).collect();
        self
    }

    /// Set the resolution delay.
    #[must_use]
    pub fn with_resolve_delay(mut self, delay: Duration) -> Self {
        self.resolve_delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Set the card footprint.
    #[must_use]
    pub fn with_card_size(mut self, size: u32) -> Self {
        self.card_size = size;
        self
    }

    /// Fix the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Resolution delay as a `Duration`.
    #[must_use]
    pub fn resolve_delay(&self) -> Duration {
        Duration::from_millis(self.resolve_delay_ms)
    }

    /// Number of pairs dealt per round.
    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.card_types.len()
    }

    /// Check the type set and the card size.
    pub fn validate(&self) -> Result<()> {
        validate_types(&self.card_types)?;
        if self.card_size == 0 {
            return Err(MatchError::InvalidConfig(
                "card size must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}
