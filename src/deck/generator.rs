//! Deck dealing.

use rustc_hash::FxHashSet;
use tracing::debug;

use crate::core::{Card, CardKey, CardType, DeckRng, MatchError, Result};

use super::Deck;

/// Largest type set that can be dealt: every card key must fit in a `u32`.
pub const MAX_CARD_TYPES: usize = (u32::MAX / 2) as usize;

/// Check that a type set can be dealt: non-empty, no repeats, keys fit.
pub fn validate_types(types: &[CardType]) -> Result<()> {
    if types.is_empty() {
        return Err(MatchError::InvalidInput("card type set is empty".to_string()));
    }
    if types.len() > MAX_CARD_TYPES {
        return Err(MatchError::InvalidInput(format!(
            "{} card types exceed the limit of {MAX_CARD_TYPES}",
            types.len()
        )));
    }

    let mut seen = FxHashSet::default();
    for card_type in types {
        if !seen.insert(card_type) {
            return Err(MatchError::InvalidInput(format!(
                "card type `{card_type}` appears more than once"
            )));
        }
    }

    Ok(())
}

/// Deals shuffled decks from a type set.
///
/// Owns a [`DeckRng`]; every deal draws from a fresh fork so consecutive
/// rounds are independent but reproducible from the root seed.
#[derive(Clone, Debug)]
pub struct DeckGenerator {
    rng: DeckRng,
}

impl DeckGenerator {
    /// Create a generator over the given RNG.
    #[must_use]
    pub fn new(rng: DeckRng) -> Self {
        Self { rng }
    }

    /// Create a generator with a fixed seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(DeckRng::new(seed))
    }

    /// The underlying RNG (for checkpointing its state).
    #[must_use]
    pub fn rng(&self) -> &DeckRng {
        &self.rng
    }

    /// Deal a deck with two cards of every type, uniformly shuffled.
    ///
    /// Keys are assigned `0..2N` after shuffling, so key order is deck order.
    pub fn generate(&mut self, types: &[CardType]) -> Result<Deck> {
        validate_types(types)?;

        let mut faces: Vec<CardType> = types
            .iter()
            .flat_map(|t| [t.clone(), t.clone()])
            .collect();

        let mut round_rng = self.rng.fork();
        round_rng.shuffle(&mut faces);

        let cards = faces
            .into_iter()
            .enumerate()
            .map(|(i, card_type)| Card::new(CardKey::from_index(i), card_type))
            .collect();

        debug!(pairs = types.len(), seed = round_rng.seed(), "dealt deck");
        Ok(Deck::from_cards(cards))
    }
}
