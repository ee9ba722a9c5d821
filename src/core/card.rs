//! Card identity and per-card flags.
//!
//! ## Keys
//!
//! Every card in a deck has a `CardKey`. Keys are allocated `0..2N` in deck
//! order when the deck is dealt and never change for the round.
//!
//! ## Types
//!
//! A `CardType` is the symbol drawn on the card face (an icon name in the
//! default set). Each type appears on exactly two cards per deck.
//!
//! ```
//! use memory_match::core::{Card, CardKey, CardType};
//!
//! let card = Card::new(CardKey(3), CardType::new("ios-beer"));
//! assert!(!card.is_face_up());
//! assert_eq!(card.card_type.as_str(), "ios-beer");
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier of a card within one deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardKey(pub u32);

impl CardKey {
    /// Create a key from a deck position.
    ///
    /// Positions past `u32::MAX` saturate. Dealing caps decks well below that.
    #[must_use]
    pub fn from_index(index: usize) -> Self {
        Self(u32::try_from(index).unwrap_or(u32::MAX))
    }

    /// Position of this key in the deck.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for CardKey {
    fn from(key: u32) -> Self {
        Self(key)
    }
}

impl std::fmt::Display for CardKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Symbol identifying the face of a card.
///
/// Opaque to the engine: two cards match when their types compare equal.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardType(String);

impl CardType {
    /// Create a card type from any string-like symbol.
    pub fn new(symbol: impl Into<String>) -> Self {
        Self(symbol.into())
    }

    /// The underlying symbol.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CardType {
    fn from(symbol: &str) -> Self {
        Self::new(symbol)
    }
}

impl From<String> for CardType {
    fn from(symbol: String) -> Self {
        Self(symbol)
    }
}

impl std::fmt::Display for CardType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A card on the board.
///
/// `flipped` and `matched` are the only fields that change during a round.
/// A card is drawn face-up when either flag is set.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    /// Key within the deck.
    pub key: CardKey,

    /// Face symbol.
    pub card_type: CardType,

    /// Face-up and waiting for the pair attempt to resolve.
    pub flipped: bool,

    /// Permanently revealed as half of a confirmed pair.
    pub matched: bool,
}

impl Card {
    /// Create a face-down, unmatched card.
    #[must_use]
    pub fn new(key: CardKey, card_type: CardType) -> Self {
        Self {
            key,
            card_type,
            flipped: false,
            matched: false,
        }
    }

    /// Whether the presentation layer should show the icon.
    #[must_use]
    pub fn is_face_up(&self) -> bool {
        self.flipped || self.matched
    }

    /// Whether the card can still be picked.
    #[must_use]
    pub fn is_selectable(&self) -> bool {
        !self.flipped && !self.matched
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_index_roundtrip() {
        let key = CardKey::from_index(7);
        assert_eq!(key, CardKey(7));
        assert_eq!(key.index(), 7);
        assert_eq!(CardKey::from(3), CardKey(3));
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_key_from_large_index_saturates() {
        let past_max = u32::MAX as usize + 5;
        assert_eq!(CardKey::from_index(past_max), CardKey(u32::MAX));
        assert_ne!(CardKey::from_index(past_max), CardKey(4));
    }

    #[test]
    fn test_key_display() {
        assert_eq!(format!("{}", CardKey(42)), "Card(42)");
    }

    #[test]
    fn test_type_equality() {
        assert_eq!(CardType::new("ios-bug"), CardType::from("ios-bug"));
        assert_ne!(CardType::new("ios-bug"), CardType::new("ios-cafe"));
        assert_eq!(format!("{}", CardType::new("ios-cafe")), "ios-cafe");
    }

    #[test]
    fn test_new_card_is_face_down() {
        let card = Card::new(CardKey(0), CardType::new("ios-rocket"));
        assert!(!card.flipped);
        assert!(!card.matched);
        assert!(!card.is_face_up());
        assert!(card.is_selectable());
    }

    #[test]
    fn test_face_up_flags() {
        let mut card = Card::new(CardKey(0), CardType::new("ios-rocket"));

        card.flipped = true;
        assert!(card.is_face_up());
        assert!(!card.is_selectable());

        card.flipped = false;
        card.matched = true;
        assert!(card.is_face_up());
        assert!(!card.is_selectable());
    }

    #[test]
    fn test_type_serializes_as_plain_string() {
        let json = serde_json::to_string(&CardType::new("ios-hammer")).unwrap();
        assert_eq!(json, "\"ios-hammer\"");
    }

    #[test]
    fn test_card_serialization() {
        let card = Card::new(CardKey(5), CardType::new("ios-camera"));
        let json = serde_json::to_string(&card).unwrap();
        let deserialized: Card = serde_json::from_str(&json).unwrap();
        assert_eq!(card, deserialized);
    }
}
