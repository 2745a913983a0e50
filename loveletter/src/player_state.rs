use crate::CardType;

/// The true state of a single player, as tracked by the judge.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlayerState {
    /// One card between turns, two while it is this player's turn.
    pub hand: Vec<CardType>,
    pub out: bool,
    /// Set by the Handmaiden until the start of this player's next turn.
    pub protected: bool,
    /// Rounds won in the current match.
    pub score: u32,
}

impl PlayerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets everything except the score.
    pub fn start_round(&mut self, card: CardType) {
        self.hand = vec![card];
        self.out = false;
        self.protected = false;
    }

    /// The card held between turns.
    pub fn card(&self) -> Option<CardType> {
        self.hand.first().copied()
    }

    /// Removes one copy of `card` from the hand.
    pub fn take(&mut self, card: CardType) -> Option<CardType> {
        let idx = self.hand.iter().position(|&c| c == card)?;
        Some(self.hand.remove(idx))
    }

    /// Marks the player as out and returns the cards they were holding.
    pub fn eliminate(&mut self) -> Vec<CardType> {
        self.out = true;
        self.protected = false;
        std::mem::take(&mut self.hand)
    }
}
