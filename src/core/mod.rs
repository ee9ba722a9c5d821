//! Core types: cards, RNG, configuration, errors.
//!
//! Everything else in the crate is built on these.

pub mod card;
pub mod rng;
pub mod config;
pub mod error;

pub use card::{Card, CardKey, CardType};
pub use rng::{DeckRng, DeckRngState};
pub use config::{MatchConfig, DEFAULT_CARD_SIZE, DEFAULT_CARD_TYPES, DEFAULT_RESOLVE_DELAY_MS};
pub use error::{MatchError, Result};
