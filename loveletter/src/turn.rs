use crate::{CardType, IllegalPlay, Play, PlayEvent, Table};

impl Table {
    /// Checks a play by the player in `actor` against the true hands.
    pub fn validate_play(&self, actor: usize, play: &Play) -> Result<(), IllegalPlay> {
        let hand = &self.players[actor].hand;
        if !hand.contains(&play.card) {
            return Err(IllegalPlay::CardNotInHand { card: play.card });
        }
        if play.card != CardType::Countess
            && hand.contains(&CardType::Countess)
            && (hand.contains(&CardType::King) || hand.contains(&CardType::Prince))
        {
            return Err(IllegalPlay::MustPlayCountess);
        }

        if play.card.needs_target() {
            let target = play.target.ok_or(IllegalPlay::MissingTarget)?;
            if target >= self.players.len() {
                return Err(IllegalPlay::TargetOutOfRange { target });
            }
            if target == actor && !play.card.may_target_self() {
                return Err(IllegalPlay::TargetIsSelf);
            }
            if self.players[target].out {
                return Err(IllegalPlay::TargetEliminated { target });
            }
            if target != actor
                && self.players[target].protected
                && self.has_unprotected_opponent(actor)
            {
                return Err(IllegalPlay::TargetProtected { target });
            }
        }

        if play.card == CardType::Guard {
            match play.challenge {
                None => return Err(IllegalPlay::MissingChallenge),
                Some(CardType::Guard) => return Err(IllegalPlay::ChallengedGuard),
                Some(_) => {}
            }
        }
        Ok(())
    }

    fn has_unprotected_opponent(&self, actor: usize) -> bool {
        self.players
            .iter()
            .enumerate()
            .any(|(seat, p)| seat != actor && !p.out && !p.protected)
    }

    /// Validates and applies a play, and describes what happened.
    ///
    /// On error, nothing is changed. A play on a protected player (only
    /// legal when there is no one else to target) discards the card
    /// without any effect.
    pub fn execute_play(&mut self, actor: usize, play: Play) -> Result<PlayEvent, IllegalPlay> {
        self.validate_play(actor, &play)?;
        let Play {
            card,
            target,
            challenge,
        } = play;

        let played = self.players[actor].take(card);
        debug_assert_eq!(played, Some(card));
        self.discards.push(card);

        let mut event = PlayEvent::new(actor, card);
        if card.needs_target() {
            event.public.target = target;
        }
        if card == CardType::Guard {
            event.public.challenge = challenge;
        }

        let target = event
            .public
            .target
            .filter(|&t| t == actor || !self.players[t].protected);

        match (card, target) {
            (CardType::Guard, Some(t)) => {
                if self.players[t].card() == challenge {
                    self.eliminate(t);
                    event.public.discarded = challenge;
                    event.public.eliminated = Some(t);
                }
            }
            (CardType::Priest, Some(t)) => {
                event.actor.revealed = self.players[t].card();
            }
            (CardType::Baron, Some(t)) => {
                let actor_card = self.players[actor].card();
                let target_card = self.players[t].card();
                event.actor.revealed = target_card;
                event.target.revealed = actor_card;
                let loser = match actor_card.cmp(&target_card) {
                    std::cmp::Ordering::Less => Some((actor, actor_card)),
                    std::cmp::Ordering::Equal => None,
                    std::cmp::Ordering::Greater => Some((t, target_card)),
                };
                if let Some((loser, loser_card)) = loser {
                    self.eliminate(loser);
                    event.public.discarded = loser_card;
                    event.public.eliminated = Some(loser);
                }
            }
            (CardType::Handmaiden, _) => {
                self.players[actor].protected = true;
            }
            (CardType::Prince, Some(t)) => {
                let discarded = self.players[t].hand.pop();
                self.discards.extend(discarded);
                event.public.discarded = discarded;
                if discarded == Some(CardType::Princess) {
                    self.eliminate(t);
                    event.public.eliminated = Some(t);
                } else {
                    // The turn loop always leaves at least the burn card
                    let new_card = self
                        .deck
                        .draw()
                        .expect("The deck ran out before a Prince was played");
                    self.players[t].hand.push(new_card);
                    event.target.new_card = Some(new_card);
                }
            }
            (CardType::King, Some(t)) => {
                event.actor.revealed = self.players[t].card();
                event.target.revealed = self.players[actor].card();
                let (a, b) = pair_mut(&mut self.players, actor, t);
                std::mem::swap(&mut a.hand, &mut b.hand);
            }
            (CardType::Princess, _) => {
                self.eliminate(actor);
                event.public.eliminated = Some(actor);
            }
            _ => {}
        }

        self.debug_check_card_count();
        Ok(event)
    }

    fn eliminate(&mut self, seat: usize) {
        let hand = self.players[seat].eliminate();
        self.discards.extend(hand);
    }
}

/// Mutable references to two distinct elements.
fn pair_mut<T>(items: &mut [T], i: usize, j: usize) -> (&mut T, &mut T) {
    assert_ne!(i, j);
    if i < j {
        let (left, right) = items.split_at_mut(j);
        (&mut left[i], &mut right[0])
    } else {
        let (left, right) = items.split_at_mut(i);
        (&mut right[0], &mut left[j])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Deck, PrivateView, DECK_SIZE};
    use CardType::*;

    /// A table where player 0 holds `hand0` (its turn) and the others one card each.
    fn table_with(hand0: [CardType; 2], others: &[CardType]) -> Table {
        let mut table = Table::new(others.len() + 1);
        let mut deck = Deck::unshuffled();
        // Keep the card count consistent by taking the hands out of the deck
        let mut rest = Vec::new();
        let mut wanted: Vec<CardType> = hand0.iter().chain(others).copied().collect();
        while let Some(card) = deck.draw() {
            if let Some(pos) = wanted.iter().position(|&c| c == card) {
                wanted.remove(pos);
            } else {
                rest.push(card);
            }
        }
        assert!(wanted.is_empty());
        rest.reverse();
        table.deck = Deck::from_cards(rest);
        table.players[0].hand = hand0.to_vec();
        for (player, &card) in table.players[1..].iter_mut().zip(others) {
            player.hand = vec![card];
        }
        assert_eq!(table.card_count(), DECK_SIZE);
        table
    }

    #[test]
    fn card_must_be_in_hand() {
        let table = table_with([Guard, Priest], &[Baron]);
        assert_eq!(
            table.validate_play(0, &Play::targeted(King, 1)),
            Err(IllegalPlay::CardNotInHand { card: King })
        );
    }

    #[test]
    fn countess_is_forced() {
        for other in [Prince, King] {
            let table = table_with([Countess, other], &[Guard]);
            assert_eq!(
                table.validate_play(0, &Play::targeted(other, 1)),
                Err(IllegalPlay::MustPlayCountess)
            );
            assert_eq!(table.validate_play(0, &Play::untargeted(Countess)), Ok(()));
        }
    }

    #[test]
    fn targets_are_checked() {
        let mut table = table_with([Guard, Prince], &[Baron, Priest]);
        assert_eq!(
            table.validate_play(0, &Play { card: Guard, target: None, challenge: Some(King) }),
            Err(IllegalPlay::MissingTarget)
        );
        assert_eq!(
            table.validate_play(0, &Play::guard(0, King)),
            Err(IllegalPlay::TargetIsSelf)
        );
        assert_eq!(
            table.validate_play(0, &Play::guard(5, King)),
            Err(IllegalPlay::TargetOutOfRange { target: 5 })
        );
        assert_eq!(
            table.validate_play(0, &Play::targeted(Guard, 1)),
            Err(IllegalPlay::MissingChallenge)
        );
        assert_eq!(
            table.validate_play(0, &Play::guard(1, Guard)),
            Err(IllegalPlay::ChallengedGuard)
        );
        assert_eq!(table.validate_play(0, &Play::targeted(Prince, 0)), Ok(()));

        table.players[2].out = true;
        assert_eq!(
            table.validate_play(0, &Play::guard(2, King)),
            Err(IllegalPlay::TargetEliminated { target: 2 })
        );
    }

    #[test]
    fn protected_players_are_only_targeted_as_a_last_resort() {
        let mut table = table_with([Guard, Priest], &[Baron, King]);
        table.players[1].protected = true;
        assert_eq!(
            table.validate_play(0, &Play::guard(1, Baron)),
            Err(IllegalPlay::TargetProtected { target: 1 })
        );
        table.players[2].protected = true;
        let event = table.execute_play(0, Play::guard(1, Baron)).unwrap();
        // No effect
        assert_eq!(event.public.eliminated, None);
        assert!(!table.players[1].out);
        assert_eq!(table.players[0].hand, vec![Priest]);
    }

    #[test]
    fn guard_eliminates_on_a_correct_guess() {
        let mut table = table_with([Guard, Priest], &[Baron, King]);
        let miss = table.clone().execute_play(0, Play::guard(1, King)).unwrap();
        assert_eq!(miss.public.eliminated, None);
        assert_eq!(miss.public.challenge, Some(King));

        let hit = table.execute_play(0, Play::guard(2, King)).unwrap();
        assert_eq!(hit.public.eliminated, Some(2));
        assert_eq!(hit.public.discarded, Some(King));
        assert!(table.players[2].out);
        assert!(table.players[2].hand.is_empty());
        assert_eq!(table.card_count(), DECK_SIZE);
    }

    #[test]
    fn priest_reveals_to_the_actor_only() {
        let mut table = table_with([Priest, Guard], &[Princess, Baron]);
        let event = table.execute_play(0, Play::targeted(Priest, 1)).unwrap();
        assert_eq!(event.view_for(0).revealed(), Some(Princess));
        assert_eq!(event.view_for(1).revealed(), None);
        assert_eq!(event.view_for(2).private, PrivateView::None);
    }

    #[test]
    fn baron_eliminates_the_lower_card() {
        let mut table = table_with([Baron, Handmaiden], &[Priest]);
        let event = table.execute_play(0, Play::targeted(Baron, 1)).unwrap();
        assert_eq!(event.public.eliminated, Some(1));
        assert_eq!(event.public.discarded, Some(Priest));
        assert_eq!(event.actor.revealed, Some(Priest));
        assert_eq!(event.target.revealed, Some(Handmaiden));

        let mut table = table_with([Baron, Guard], &[Priest]);
        let event = table.execute_play(0, Play::targeted(Baron, 1)).unwrap();
        assert_eq!(event.public.eliminated, Some(0));
        assert_eq!(event.public.discarded, Some(Guard));
        assert!(table.players[0].out);

        let mut table = table_with([Baron, Priest], &[Priest]);
        let event = table.execute_play(0, Play::targeted(Baron, 1)).unwrap();
        assert_eq!(event.public.eliminated, None);
        assert_eq!(table.players_in_round(), 2);
    }

    #[test]
    fn handmaiden_protects() {
        let mut table = table_with([Handmaiden, Guard], &[Priest]);
        let event = table.execute_play(0, Play::untargeted(Handmaiden)).unwrap();
        assert_eq!(event.public.target, None);
        assert!(table.players[0].protected);
    }

    #[test]
    fn prince_forces_a_redraw() {
        let mut table = table_with([Prince, Guard], &[Baron]);
        let remaining = table.deck.remaining();
        let event = table.execute_play(0, Play::targeted(Prince, 1)).unwrap();
        assert_eq!(event.public.discarded, Some(Baron));
        assert_eq!(table.deck.remaining(), remaining - 1);
        assert_eq!(table.players[1].card(), event.target.new_card);
        assert_eq!(event.view_for(0).new_card(), None);
        assert_eq!(table.card_count(), DECK_SIZE);
    }

    #[test]
    fn prince_on_the_princess_eliminates() {
        let mut table = table_with([Prince, Guard], &[Princess]);
        let event = table.execute_play(0, Play::targeted(Prince, 1)).unwrap();
        assert_eq!(event.public.eliminated, Some(1));
        assert_eq!(event.target.new_card, None);
    }

    #[test]
    fn king_swaps_hands() {
        let mut table = table_with([King, Guard], &[Countess]);
        let event = table.execute_play(0, Play::targeted(King, 1)).unwrap();
        assert_eq!(table.players[0].hand, vec![Countess]);
        assert_eq!(table.players[1].hand, vec![Guard]);
        assert_eq!(event.actor.revealed, Some(Countess));
        assert_eq!(event.target.revealed, Some(Guard));
    }

    #[test]
    fn princess_eliminates_the_actor() {
        let mut table = table_with([Princess, Guard], &[Priest]);
        let event = table.execute_play(0, Play::untargeted(Princess)).unwrap();
        assert_eq!(event.public.eliminated, Some(0));
        assert!(table.players[0].out);
        assert_eq!(table.card_count(), DECK_SIZE);
    }

    #[test]
    fn illegal_plays_change_nothing() {
        let mut table = table_with([Countess, King], &[Priest]);
        let before = table.clone();
        assert!(table.execute_play(0, Play::targeted(King, 1)).is_err());
        assert_eq!(table.players, before.players);
        assert_eq!(table.deck, before.deck);
    }

    #[test]
    fn pair_mut_order() {
        let mut v = [1, 2, 3];
        let (a, b) = pair_mut(&mut v, 2, 0);
        std::mem::swap(a, b);
        assert_eq!(v, [3, 2, 1]);
    }
}
