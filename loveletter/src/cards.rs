use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Number of distinct card types.
pub const NUM_CARD_TYPES: usize = 8;

/// Number of cards in a full deck, i.e. the sum of all [start counts](CardType::start_count).
pub const DECK_SIZE: usize = 16;

/// A card type. The discriminant is the card's rank.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum CardType {
    Guard = 1,
    Priest = 2,
    Baron = 3,
    Handmaiden = 4,
    Prince = 5,
    King = 6,
    Countess = 7,
    Princess = 8,
}

impl CardType {
    /// All card types, by ascending rank.
    pub const ALL: [CardType; NUM_CARD_TYPES] = [
        CardType::Guard,
        CardType::Priest,
        CardType::Baron,
        CardType::Handmaiden,
        CardType::Prince,
        CardType::King,
        CardType::Countess,
        CardType::Princess,
    ];

    pub fn rank(self) -> u8 {
        self as u8
    }

    pub fn from_rank(rank: u8) -> Option<Self> {
        let idx = rank.checked_sub(1)?;
        Self::ALL.get(usize::from(idx)).copied()
    }

    /// Position in [`Self::ALL`].
    pub(crate) fn index(self) -> usize {
        self as usize - 1
    }

    /// How many copies of this card are in a full deck.
    pub fn start_count(self) -> u8 {
        match self {
            CardType::Guard => 5,
            CardType::Priest | CardType::Baron | CardType::Handmaiden | CardType::Prince => 2,
            CardType::King | CardType::Countess | CardType::Princess => 1,
        }
    }

    /// Whether playing this card requires naming a target player.
    pub fn needs_target(self) -> bool {
        matches!(
            self,
            CardType::Guard
                | CardType::Priest
                | CardType::Baron
                | CardType::Prince
                | CardType::King
        )
    }

    /// Only the Prince may be played on its own player.
    pub fn may_target_self(self) -> bool {
        self == CardType::Prince
    }

    pub fn name(self) -> &'static str {
        match self {
            CardType::Guard => "GUARD",
            CardType::Priest => "PRIEST",
            CardType::Baron => "BARON",
            CardType::Handmaiden => "HANDMAIDEN",
            CardType::Prince => "PRINCE",
            CardType::King => "KING",
            CardType::Countess => "COUNTESS",
            CardType::Princess => "PRINCESS",
        }
    }
}

impl std::fmt::Display for CardType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Displays a card that may be missing, e.g. the final hand of an eliminated player.
pub struct MaybeCard(pub Option<CardType>);

impl std::fmt::Display for MaybeCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Some(card) => write!(f, "{}", card),
            None => f.write_str("NONE"),
        }
    }
}

/// The error type for the [`FromStr`] instance of [`CardType`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardFromStrErr {
    Empty,
    RankOutOfRange,
    UnknownName,
}

impl std::fmt::Display for CardFromStrErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CardFromStrErr::Empty => write!(f, "No card given"),
            CardFromStrErr::RankOutOfRange => write!(f, "Card ranks go from 1 to 8"),
            CardFromStrErr::UnknownName => write!(f, "Unknown card name"),
        }
    }
}

impl std::error::Error for CardFromStrErr {}

/// Accepts either the rank (`"5"`) or the name in any case (`"prince"`).
impl FromStr for CardType {
    type Err = CardFromStrErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(CardFromStrErr::Empty);
        }
        if let Ok(rank) = s.parse::<u8>() {
            return CardType::from_rank(rank).ok_or(CardFromStrErr::RankOutOfRange);
        }
        CardType::ALL
            .into_iter()
            .find(|card| card.name().eq_ignore_ascii_case(s))
            .ok_or(CardFromStrErr::UnknownName)
    }
}
