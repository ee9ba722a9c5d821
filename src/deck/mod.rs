//! Decks and deck dealing.
//!
//! A `Deck` is the ordered set of cards for one round. Its composition never
//! changes after dealing; only the per-card `flipped`/`matched` flags do.
//!
//! Backed by `im::Vector` so taking a snapshot for observers is O(1).

mod generator;

pub use generator::{validate_types, DeckGenerator, MAX_CARD_TYPES};

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::{Card, CardKey, MatchError};

/// Cards of one round, indexed by key.
///
/// Deserializing checks that every key equals its position, since lookups
/// index by key.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DeckRepr")]
pub struct Deck {
    cards: Vector<Card>,
}

/// Wire shape of a deck before its keys are checked.
#[derive(Deserialize)]
struct DeckRepr {
    cards: Vector<Card>,
}

impl TryFrom<DeckRepr> for Deck {
    type Error = MatchError;

    fn try_from(repr: DeckRepr) -> Result<Self, Self::Error> {
        if let Some((i, card)) = repr
            .cards
            .iter()
            .enumerate()
            .find(|(i, c)| c.key.index() != *i)
        {
            return Err(MatchError::InvalidInput(format!(
                "{} found at position {i}",
                card.key
            )));
        }
        Ok(Self { cards: repr.cards })
    }
}

impl Deck {
    /// Build a deck from cards whose keys equal their positions.
    pub(crate) fn from_cards(cards: Vector<Card>) -> Self {
        debug_assert!(cards.iter().enumerate().all(|(i, c)| c.key.index() == i));
        Self { cards }
    }

    /// Number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// True for the empty deck held between rounds.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Number of pairs dealt.
    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.cards.len() / 2
    }

    /// Look up a card by key.
    #[must_use]
    pub fn get(&self, key: CardKey) -> Option<&Card> {
        self.cards.get(key.index())
    }

    pub(crate) fn get_mut(&mut self, key: CardKey) -> Option<&mut Card> {
        self.cards.get_mut(key.index())
    }

    /// Iterate cards in deck order.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Cards currently flipped and awaiting resolution.
    pub fn flipped(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter().filter(|c| c.flipped)
    }

    /// Number of matched cards.
    #[must_use]
    pub fn matched_count(&self) -> usize {
        self.cards.iter().filter(|c| c.matched).count()
    }

    /// Every card matched. False for an empty deck.
    #[must_use]
    pub fn all_matched(&self) -> bool {
        !self.cards.is_empty() && self.cards.iter().all(|c| c.matched)
    }
}

impl<'a> IntoIterator for &'a Deck {
    type Item = &'a Card;
    type IntoIter = im::vector::Iter<'a, Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.iter()
    }
}
