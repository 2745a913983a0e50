use loveletter::{BeliefState, CardType, EventView, MaybeCard, PublicEvent, DECK_SIZE};

/// What an [`Observer`] believes about one seat.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeatBelief {
    /// The card held between turns. For the observer's own seat, this is
    /// its exact hand, so it holds two cards during its turn.
    pub hand: BeliefState,
    pub out: bool,
    pub protected: bool,
    pub score: u32,
    /// The held card has already been taken out of the unseen pool.
    known: bool,
}

impl SeatBelief {
    fn new() -> Self {
        Self {
            hand: BeliefState::empty(),
            out: false,
            protected: false,
            score: 0,
            known: false,
        }
    }

    /// True if the observer has seen this seat's card.
    pub fn is_known(&self) -> bool {
        self.known
    }
}

/// Information about the cards in a round, derived from one player's view
/// of the plays.
///
/// Keeps a [`BeliefState`] for every seat and one for the unseen pool,
/// i.e. the undrawn deck, the burn card and every card that this player has
/// not seen yet. The judge only shows each player its own private channel,
/// so two observers of the same round generally believe different things.
#[derive(Clone, Debug)]
pub struct Observer {
    seat: usize,
    seats: Vec<SeatBelief>,
    unseen: BeliefState,
    deck_remaining: usize,
}

impl Observer {
    pub fn new(seat: usize, num_players: usize) -> Self {
        assert!(seat < num_players);
        Self {
            seat,
            seats: vec![SeatBelief::new(); num_players],
            unseen: BeliefState::full(),
            deck_remaining: DECK_SIZE - num_players,
        }
    }

    /// The seat of the player doing the observing.
    pub fn seat(&self) -> usize {
        self.seat
    }

    pub fn num_players(&self) -> usize {
        self.seats.len()
    }

    pub fn unseen(&self) -> &BeliefState {
        &self.unseen
    }

    /// Cards left in the deck, including the burn card.
    pub fn deck_remaining(&self) -> usize {
        self.deck_remaining
    }

    pub fn seat_belief(&self, seat: usize) -> &SeatBelief {
        &self.seats[seat]
    }

    pub fn hand_belief(&self, seat: usize) -> &BeliefState {
        &self.seats[seat].hand
    }

    pub fn is_out(&self, seat: usize) -> bool {
        self.seats[seat].out
    }

    pub fn is_protected(&self, seat: usize) -> bool {
        self.seats[seat].protected
    }

    pub fn score(&self, seat: usize) -> u32 {
        self.seats[seat].score
    }

    /// The other players that are still in the round.
    pub fn opponents(&self) -> impl Iterator<Item = (usize, &SeatBelief)> + '_ {
        self.seats
            .iter()
            .enumerate()
            .filter(move |&(seat, belief)| seat != self.seat && !belief.out)
    }

    pub fn start_game(&mut self) {
        for seat in self.seats.iter_mut() {
            seat.score = 0;
        }
    }

    /// Everything except our own card is unknown again.
    pub fn start_round(&mut self, card: CardType) {
        self.unseen = BeliefState::full();
        self.unseen.remove(card);
        self.deck_remaining = DECK_SIZE - self.seats.len();
        for (seat, belief) in self.seats.iter_mut().enumerate() {
            belief.out = false;
            belief.protected = false;
            if seat == self.seat {
                belief.hand = BeliefState::single(card);
                belief.known = true;
            } else {
                belief.hand = self.unseen;
                belief.known = false;
            }
        }
    }

    /// We drew `card` at the start of our turn.
    pub fn report_draw(&mut self, card: CardType) {
        self.deck_remaining = self.deck_remaining.saturating_sub(1);
        self.forget_card(card, self.seat);
        self.seats[self.seat].hand.add(card);
    }

    pub fn report_play(&mut self, event: &EventView) {
        let PublicEvent {
            actor,
            card,
            target,
            challenge,
            discarded,
            eliminated,
        } = event.public;
        debug_assert!(actor < self.seats.len());
        debug_assert!(target.map_or(true, |t| t < self.seats.len()));
        debug_assert!(!self.seats[actor].out, "Player {} played while out", actor);
        debug_assert_eq!(card.needs_target(), target.is_some());

        self.seats[actor].protected = false;

        if actor == self.seat {
            self.seats[actor].hand.remove(card);
        } else {
            self.deck_remaining = self.deck_remaining.saturating_sub(1);
            self.resolve_unseen_draw(actor, card);
        }

        // A protected target gives nothing away, whoever is looking
        let target = target.filter(|&t| t == actor || !self.seats[t].protected);
        if let Some(t) = target {
            match card {
                CardType::Guard => {
                    if eliminated == Some(t) {
                        if let Some(discarded) = discarded {
                            self.public_discard(t, discarded);
                        }
                    } else if let Some(challenge) = challenge {
                        self.rule_out(t, challenge);
                    }
                }
                CardType::Priest => {
                    if let Some(revealed) = event.revealed() {
                        debug_assert_eq!(actor, self.seat);
                        self.reveal(t, revealed);
                    }
                }
                CardType::Baron => self.apply_baron(actor, t, event),
                CardType::Prince => self.apply_prince(t, event),
                CardType::King => self.apply_king(actor, t, event),
                _ => {}
            }
        }

        match card {
            CardType::Handmaiden => self.seats[actor].protected = true,
            // Usually played because of a Prince or the King in hand
            CardType::Countess if actor != self.seat && !self.seats[actor].known => {
                let mut narrowed = self.seats[actor].hand;
                narrowed.clear(None, ..=CardType::Handmaiden);
                if !narrowed.is_empty() {
                    self.seats[actor].hand = narrowed;
                }
            }
            _ => {}
        }

        if let Some(seat) = eliminated {
            self.eliminate(seat);
        }
    }

    pub fn end_round(&mut self, final_hands: &[Option<CardType>], winner: Option<usize>) {
        debug_assert_eq!(final_hands.len(), self.seats.len());
        if let Some(winner) = winner {
            self.seats[winner].score += 1;
        }
    }

    /// The actor held its old card plus a draw we did not see, and played
    /// `card` from those two.
    fn resolve_unseen_draw(&mut self, actor: usize, card: CardType) {
        let belief = &self.seats[actor];
        let old_card_played = belief.hand.is_certain(card);
        let either_played = !old_card_played && belief.hand.contains(card);
        if !(old_card_played && belief.known) {
            self.forget_card(card, actor);
        }

        let unseen = self.unseen;
        let belief = &mut self.seats[actor];
        if old_card_played {
            belief.hand = unseen;
            belief.known = false;
        } else if either_played {
            // The copy on the table is in neither of the two pools any more
            belief.hand.remove(card);
            belief.hand.merge_max(&unseen);
            belief.known = false;
        }
    }

    /// `card` turned up somewhere we had not seen it before, so it is
    /// neither in the unseen pool nor in any other unknown hand.
    fn forget_card(&mut self, card: CardType, except: usize) {
        self.unseen.remove(card);
        for (seat, belief) in self.seats.iter_mut().enumerate() {
            if seat == except || seat == self.seat || belief.known || belief.out {
                continue;
            }
            belief.hand.remove(card);
            if belief.hand.is_empty() {
                // The belief was wrong; start over from what we have not seen
                belief.hand = self.unseen;
            }
        }
    }

    /// `seat` discarded `card` face-up.
    fn public_discard(&mut self, seat: usize, card: CardType) {
        if seat == self.seat {
            self.seats[seat].hand.remove(card);
        } else if !self.seats[seat].known {
            self.forget_card(card, seat);
        }
    }

    fn rule_out(&mut self, seat: usize, card: CardType) {
        let belief = &mut self.seats[seat];
        if seat == self.seat || belief.known {
            return;
        }
        belief.hand.rule_out(card);
        if belief.hand.is_empty() {
            belief.hand = self.unseen;
        }
    }

    /// We have seen that `seat` holds `card`.
    fn reveal(&mut self, seat: usize, card: CardType) {
        let belief = &mut self.seats[seat];
        if seat == self.seat {
            belief.hand = BeliefState::single(card);
        } else {
            belief.hand.narrow(card);
        }
        if !belief.known {
            belief.known = true;
            self.forget_card(card, seat);
        }
    }

    fn apply_baron(&mut self, actor: usize, target: usize, event: &EventView) {
        let party = self.seat == actor || self.seat == target;
        match event.public.eliminated {
            Some(loser) => {
                let winner = if loser == actor { target } else { actor };
                let Some(discarded) = event.public.discarded else {
                    return;
                };
                self.public_discard(loser, discarded);
                if winner == self.seat {
                    return;
                }
                match event.revealed().filter(|_| party) {
                    Some(winning_card) => self.reveal(winner, winning_card),
                    None if !self.seats[winner].known => {
                        // The winner's card beat the discarded one
                        let mut narrowed = self.seats[winner].hand;
                        narrowed.clear(None, ..=discarded);
                        if !narrowed.is_empty() {
                            self.seats[winner].hand = narrowed;
                        }
                    }
                    None => {}
                }
            }
            None if party => {
                let other = if self.seat == actor { target } else { actor };
                if let Some(revealed) = event.revealed() {
                    self.reveal(other, revealed);
                }
            }
            None => {}
        }
    }

    fn apply_prince(&mut self, target: usize, event: &EventView) {
        let Some(discarded) = event.public.discarded else {
            return;
        };
        self.public_discard(target, discarded);
        if event.public.eliminated == Some(target) {
            return;
        }

        self.deck_remaining = self.deck_remaining.saturating_sub(1);
        if target == self.seat {
            if let Some(new_card) = event.new_card() {
                self.forget_card(new_card, self.seat);
                self.seats[target].hand.add(new_card);
            }
        } else {
            let belief = &mut self.seats[target];
            belief.hand = self.unseen;
            belief.known = false;
        }
    }

    fn apply_king(&mut self, actor: usize, target: usize, event: &EventView) {
        if actor == target {
            return;
        }
        let (a, b) = pair_mut(&mut self.seats, actor, target);
        std::mem::swap(&mut a.hand, &mut b.hand);
        std::mem::swap(&mut a.known, &mut b.known);

        if self.seat == actor || self.seat == target {
            if let Some(received) = event.revealed() {
                self.reveal(self.seat, received);
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn set_deck_remaining(&mut self, deck_remaining: usize) {
        self.deck_remaining = deck_remaining;
    }

    fn eliminate(&mut self, seat: usize) {
        let belief = &mut self.seats[seat];
        belief.hand = BeliefState::empty();
        belief.known = true;
        belief.out = true;
        belief.protected = false;
    }
}

fn pair_mut<T>(items: &mut [T], i: usize, j: usize) -> (&mut T, &mut T) {
    if i < j {
        let (left, right) = items.split_at_mut(j);
        (&mut left[i], &mut right[0])
    } else {
        let (left, right) = items.split_at_mut(i);
        (&mut right[0], &mut left[j])
    }
}

impl std::fmt::Display for Observer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player scores:")?;
        for (seat, belief) in self.seats.iter().enumerate() {
            write!(f, "  {}: {}", seat + 1, belief.score)?;
        }
        writeln!(f)?;
        writeln!(f, "Unseen ({} in deck): {}", self.deck_remaining, self.unseen)?;
        for (seat, belief) in self.seats.iter().enumerate() {
            if belief.out {
                writeln!(f, "Player {}: {}", seat + 1, MaybeCard(None))?;
            } else {
                writeln!(f, "Player {}: {}", seat + 1, belief.hand)?;
            }
        }
        Ok(())
    }
}
