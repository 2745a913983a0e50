mod baseline;
mod cautious;
mod endgame;
mod observer;
mod random;
pub mod ranking;

pub use baseline::BaselinePolicy;
pub use cautious::CautiousPolicy;
pub use endgame::EndgamePolicy;
pub use observer::*;
pub use random::RandomPolicy;

use loveletter::{Agent, CardType, Diagnostics, EventView, Play};

/// A trait to simplify writing bots: decide on a play given the hand and
/// what has been observed so far.
pub trait Policy {
    /// `hand` holds the two cards of the current turn.
    fn choose_play(&mut self, hand: &[CardType], observer: &Observer, diagnostics: &Diagnostics) -> Play;
}

/// The play every policy has to make: the Countess, when it is held
/// together with a Prince or the King.
pub fn forced_play(hand: &[CardType]) -> Option<Play> {
    let has = |card| hand.contains(&card);
    if has(CardType::Countess) && (has(CardType::King) || has(CardType::Prince)) {
        Some(Play::untargeted(CardType::Countess))
    } else {
        None
    }
}

/// Turns a [`Policy`] into an [`Agent`] by keeping track of the hand and
/// feeding every event into an [`Observer`].
pub struct ObservingAgent<P> {
    policy: P,
    observer: Observer,
    hand: Vec<CardType>,
    diagnostics: Diagnostics,
}

impl<P: Policy> ObservingAgent<P> {
    pub fn new(seat: usize, num_players: usize, policy: P, diagnostics: Diagnostics) -> Self {
        Self {
            policy,
            observer: Observer::new(seat, num_players),
            hand: Vec::with_capacity(2),
            diagnostics,
        }
    }

    pub fn observer(&self) -> &Observer {
        &self.observer
    }

    pub fn hand(&self) -> &[CardType] {
        &self.hand
    }

    fn take(&mut self, card: CardType) {
        if let Some(pos) = self.hand.iter().position(|&c| c == card) {
            self.hand.remove(pos);
        }
    }

    fn debug_check_hand(&self) {
        let mut expected = loveletter::BeliefState::empty();
        for &card in &self.hand {
            expected.add(card);
        }
        debug_assert_eq!(
            &expected,
            self.observer.hand_belief(self.observer.seat()),
            "Hand and observer disagree"
        );
    }
}

impl<P: Policy> Agent for ObservingAgent<P> {
    fn start_game(&mut self) {
        self.observer.start_game();
    }

    fn start_round(&mut self, card: CardType) {
        self.hand = vec![card];
        self.observer.start_round(card);
    }

    fn report_draw(&mut self, card: CardType) {
        self.hand.push(card);
        self.observer.report_draw(card);
    }

    fn report_play(&mut self, event: &EventView) {
        let me = self.observer.seat();
        let public = event.public;
        if public.actor == me {
            self.take(public.card);
        }
        if public.eliminated == Some(me) {
            self.hand.clear();
        } else {
            match public.card {
                CardType::Prince if public.target == Some(me) => {
                    if let Some(discarded) = public.discarded {
                        self.take(discarded);
                    }
                    self.hand.extend(event.new_card());
                }
                CardType::King if public.actor == me || public.target == Some(me) => {
                    if let Some(received) = event.revealed() {
                        self.hand = vec![received];
                    }
                }
                _ => {}
            }
        }
        self.observer.report_play(event);
        self.debug_check_hand();
    }

    fn get_play(&mut self) -> Play {
        if self.diagnostics.is_enabled("ai") {
            self.diagnostics.emit(
                "ai",
                format_args!("Player {} holds {:?}\n{}", self.observer.seat() + 1, self.hand, self.observer),
            );
        }
        let play = self.policy.choose_play(&self.hand, &self.observer, &self.diagnostics);
        self.diagnostics
            .emit("ai", format_args!("Player {} plays {}", self.observer.seat() + 1, play));
        play
    }

    fn end_round(&mut self, final_hands: &[Option<CardType>], winner: Option<usize>) {
        self.observer.end_round(final_hands, winner);
    }

    fn end_game(&mut self, _winner: usize) {}
}

#[cfg(test)]
mod tests {
    use loveletter::{Deck, Table};
    use quickcheck::quickcheck;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    /// Plays a round between random agents, calling `check` after every
    /// play with the event and every agent before and after it.
    fn play_random_round(
        seed: u64,
        mut check: impl FnMut(&Table, &loveletter::PlayEvent, &[Observer], &[ObservingAgent<RandomPolicy>]),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let n = 2 + (seed % 3) as usize;
        let mut agents: Vec<_> = (0..n)
            .map(|seat| {
                let policy = RandomPolicy::new(StdRng::seed_from_u64(seed.wrapping_add(seat as u64)));
                ObservingAgent::new(seat, n, policy, Diagnostics::disabled())
            })
            .collect();
        let mut table = Table::new(n);
        for agent in agents.iter_mut() {
            agent.start_game();
        }
        let dealt = table.start_round(Deck::shuffled(&mut rng));
        for (agent, card) in agents.iter_mut().zip(dealt) {
            agent.start_round(card);
        }

        let mut seat = 0;
        while table.round_continues() {
            let card = table.begin_turn(seat).unwrap();
            agents[seat].report_draw(card);
            let play = agents[seat].get_play();
            let event = table.execute_play(seat, play).expect("Random plays are legal");
            let before: Vec<Observer> = agents.iter().map(|a| a.observer().clone()).collect();
            for (recipient, agent) in agents.iter_mut().enumerate() {
                agent.report_play(&event.view_for(recipient));
            }
            check(&table, &event, &before, &agents);
            seat = table.next_in_round(seat);
        }
        let final_hands = table.final_hands();
        let winner = loveletter::round_winner(&final_hands);
        for agent in agents.iter_mut() {
            agent.end_round(&final_hands, winner);
        }
        if let Some(winner) = winner {
            assert!(agents.iter().all(|a| a.observer().score(winner) == 1));
        }
    }

    #[test]
    fn agents_track_their_true_hands() {
        for seed in 0..200 {
            play_random_round(seed, |table, _, _, agents| {
                for (seat, agent) in agents.iter().enumerate() {
                    let mut held = agent.hand().to_vec();
                    let mut truth = table.players[seat].hand.clone();
                    held.sort();
                    truth.sort();
                    assert_eq!(held, truth, "seed {}, seat {}", seed, seat);
                    assert_eq!(agent.observer().is_out(seat), table.players[seat].out);
                }
            });
        }
    }

    #[test]
    fn deck_count_matches() {
        for seed in 0..100 {
            play_random_round(seed, |table, _, _, agents| {
                for agent in agents {
                    assert_eq!(agent.observer().deck_remaining(), table.deck.remaining());
                }
            });
        }
    }

    #[test]
    fn known_cards_are_right() {
        for seed in 0..200 {
            play_random_round(seed, |table, _, _, agents| {
                for agent in agents {
                    for (seat, belief) in agent.observer().opponents() {
                        let truth = table.players[seat].card();
                        if belief.is_known() {
                            assert!(truth.map_or(false, |c| belief.hand.is_certain(c)), "seed {}", seed);
                        }
                    }
                }
            });
        }
    }

    quickcheck! {
        fn protected_beliefs_do_not_change(seed: u64) -> bool {
            let mut ok = true;
            play_random_round(seed, |_, event, before, agents| {
                let public = event.public;
                let Some(target) = public.target else { return };
                if target == public.actor {
                    return;
                }
                for (observer_seat, agent) in agents.iter().enumerate() {
                    if observer_seat == target || !before[observer_seat].is_protected(target) {
                        continue;
                    }
                    let old = before[observer_seat].seat_belief(target);
                    let actor = before[observer_seat].seat_belief(public.actor);
                    // Only a card this observer had not seen yet leaves the other hands
                    let newly_seen = observer_seat != public.actor
                        && !(actor.is_known() && actor.hand.is_certain(public.card));
                    let mut expected = old.hand;
                    if newly_seen && !old.is_known() {
                        expected.remove(public.card);
                    }
                    if !expected.is_empty() {
                        ok &= agent.observer().hand_belief(target) == &expected;
                    }
                }
            });
            ok
        }

        fn certainties_sum_to_one(seed: u64) -> bool {
            let mut ok = true;
            play_random_round(seed, |_, _, _, agents| {
                for agent in agents {
                    for (_, belief) in agent.observer().opponents() {
                        let sum: f64 = CardType::ALL.iter().map(|&c| belief.hand.certainty(c)).sum();
                        ok &= (sum - 1.0).abs() < 1e-9;
                    }
                }
            });
            ok
        }
    }

    #[test]
    fn countess_is_forced_only_with_royalty() {
        use CardType::*;
        assert_eq!(forced_play(&[Countess, King]), Some(Play::untargeted(Countess)));
        assert_eq!(forced_play(&[Prince, Countess]), Some(Play::untargeted(Countess)));
        assert_eq!(forced_play(&[Countess, Princess]), None);
        assert_eq!(forced_play(&[Guard, King]), None);
    }
}
