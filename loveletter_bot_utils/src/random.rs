use loveletter::{CardType, Diagnostics, Play};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::{forced_play, Observer, Policy};

/// Plays a random card at a random target, but always a legal one.
pub struct RandomPolicy {
    rng: StdRng,
}

impl RandomPolicy {
    pub fn new(rng: StdRng) -> Self {
        Self { rng }
    }
}

impl Policy for RandomPolicy {
    fn choose_play(&mut self, hand: &[CardType], observer: &Observer, _diagnostics: &Diagnostics) -> Play {
        if let Some(play) = forced_play(hand) {
            return play;
        }
        let card = *hand
            .choose(&mut self.rng)
            .expect("A player always holds two cards on their turn");

        let mut play = Play::untargeted(card);
        if card.needs_target() {
            let unprotected: Vec<usize> = observer
                .opponents()
                .filter(|(_, belief)| !belief.protected)
                .map(|(seat, _)| seat)
                .collect();
            let mut targets = if unprotected.is_empty() {
                observer.opponents().map(|(seat, _)| seat).collect()
            } else {
                unprotected
            };
            if card.may_target_self() {
                targets.push(observer.seat());
            }
            play.target = targets.choose(&mut self.rng).copied();
        }
        if card == CardType::Guard {
            play.challenge = CardType::ALL[1..].choose(&mut self.rng).copied();
        }
        play
    }
}
