use crate::{CardType, Deck, PlayerState, DECK_SIZE};

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 4;

/// The ground truth of a round: the deck, every hand and the discard pile.
#[derive(Clone, Debug)]
pub struct Table {
    pub players: Vec<PlayerState>,
    pub deck: Deck,
    /// Every card that left a hand this round, including the face-down
    /// cards of eliminated players.
    pub discards: Vec<CardType>,
}

impl Table {
    /// Panics if the number of players is not supported.
    pub fn new(num_players: usize) -> Self {
        assert!(
            (MIN_PLAYERS..=MAX_PLAYERS).contains(&num_players),
            "Love Letter is played by {} to {} players, not {}",
            MIN_PLAYERS,
            MAX_PLAYERS,
            num_players
        );
        Self {
            players: vec![PlayerState::new(); num_players],
            deck: Deck::unshuffled(),
            discards: Vec::new(),
        }
    }

    pub fn num_players(&self) -> usize {
        self.players.len()
    }

    /// Deals one card to every player in seat order, and returns them.
    ///
    /// Scores are kept.
    pub fn start_round(&mut self, deck: Deck) -> Vec<CardType> {
        self.deck = deck;
        self.discards.clear();
        let mut dealt = Vec::with_capacity(self.players.len());
        for player in self.players.iter_mut() {
            let card = self
                .deck
                .draw()
                .expect("A full deck has more cards than there are players");
            player.start_round(card);
            dealt.push(card);
        }
        self.debug_check_card_count();
        dealt
    }

    /// Begins the turn of `seat`: protection lapses and a card is drawn.
    ///
    /// Returns `None` only if the deck is exhausted, which the turn loop
    /// never lets happen.
    pub fn begin_turn(&mut self, seat: usize) -> Option<CardType> {
        let player = &mut self.players[seat];
        debug_assert!(!player.out);
        debug_assert_eq!(player.hand.len(), 1);
        player.protected = false;
        let card = self.deck.draw()?;
        player.hand.push(card);
        Some(card)
    }

    pub fn players_in_round(&self) -> usize {
        self.players.iter().filter(|p| !p.out).count()
    }

    /// True while the turn loop should keep going.
    pub fn round_continues(&self) -> bool {
        self.deck.remaining() > 1 && self.players_in_round() >= 2
    }

    /// The next seat after `seat` that is still in the round.
    pub fn next_in_round(&self, seat: usize) -> usize {
        let n = self.players.len();
        (1..=n)
            .map(|offset| (seat + offset) % n)
            .find(|&s| !self.players[s].out)
            .unwrap_or(seat)
    }

    /// Each player's card, or `None` for players who are out.
    pub fn final_hands(&self) -> Vec<Option<CardType>> {
        self.players
            .iter()
            .map(|p| if p.out { None } else { p.card() })
            .collect()
    }

    /// Cards anywhere on the table. Always the full deck.
    pub fn card_count(&self) -> usize {
        self.deck.remaining()
            + self.discards.len()
            + self.players.iter().map(|p| p.hand.len()).sum::<usize>()
    }

    pub(crate) fn debug_check_card_count(&self) {
        debug_assert_eq!(
            self.card_count(),
            DECK_SIZE,
            "Cards went missing or were duplicated: {:?}",
            self
        );
    }
}

/// The winner of a round: the single highest card among the players still in.
///
/// A tie for the highest card means nobody wins the round.
pub fn round_winner(final_hands: &[Option<CardType>]) -> Option<usize> {
    let best = final_hands.iter().flatten().max()?;
    let mut holders = final_hands
        .iter()
        .enumerate()
        .filter(|(_, card)| card.as_ref() == Some(best))
        .map(|(seat, _)| seat);
    let winner = holders.next();
    match holders.next() {
        Some(_) => None,
        None => winner,
    }
}
