use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::{CardType, DECK_SIZE};

/// The real, shuffled draw pile of one round.
///
/// Cards are drawn from the back. The front card is the burn card: the
/// turn loop stops once it is the only card left, so only a Prince can
/// ever make someone draw it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<CardType>,
}

impl Deck {
    /// All 16 cards, sorted by rank.
    pub fn unshuffled() -> Self {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        for card in CardType::ALL {
            for _ in 0..card.start_count() {
                cards.push(card);
            }
        }
        Self { cards }
    }

    pub fn shuffled(rng: &mut StdRng) -> Self {
        let mut deck = Self::unshuffled();
        deck.cards.shuffle(rng);
        deck
    }

    /// A deck in a fixed order, where the last card is drawn first.
    ///
    /// Useful for replaying a known deal.
    pub fn from_cards(cards: Vec<CardType>) -> Self {
        Self { cards }
    }

    pub fn draw(&mut self) -> Option<CardType> {
        self.cards.pop()
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
