use loveletter::{CardType, Diagnostics, Play};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::baseline::kept_card;
use crate::ranking::{best_opponent, Prefer};
use crate::{forced_play, BaselinePolicy, Observer, Policy};

/// Like [`BaselinePolicy`], but when the deck is about to run out, uses a
/// Prince or the King to end up with a better card than the baseline would
/// keep.
pub struct EndgamePolicy {
    baseline: BaselinePolicy,
    rng: StdRng,
}

impl EndgamePolicy {
    pub fn new(mut rng: StdRng) -> Self {
        let baseline = BaselinePolicy::new(StdRng::seed_from_u64(rng.gen()));
        Self { baseline, rng }
    }

    fn in_endgame(observer: &Observer) -> bool {
        observer.deck_remaining() <= observer.num_players()
    }
}

impl Policy for EndgamePolicy {
    fn choose_play(&mut self, hand: &[CardType], observer: &Observer, diagnostics: &Diagnostics) -> Play {
        let choice = self.baseline.choose(hand, observer, diagnostics);
        if forced_play(hand).is_some() || !Self::in_endgame(observer) {
            return choice.play;
        }

        let kept = kept_card(hand, choice.play.card).map_or(0.0, |card| f64::from(card.rank()));
        let mut best: Option<(f64, Play)> = None;
        let mut consider = |value: f64, play: Play| {
            if value > kept && best.map_or(true, |(v, _)| value > v) {
                best = Some((value, play));
            }
        };

        if let Some(other) = kept_card(hand, CardType::Prince) {
            // Discarding the Princess would end the round for us
            if other != CardType::Princess && !observer.unseen().is_empty() {
                consider(
                    observer.unseen().expected_value(),
                    Play::targeted(CardType::Prince, observer.seat()),
                );
            }
        }
        if hand.contains(&CardType::King) {
            let candidate = best_opponent(observer, &mut self.rng, Prefer::Highest, |b| {
                b.expected_value()
            });
            if let Some(candidate) = candidate.filter(|c| !c.protected) {
                consider(candidate.metric, Play::targeted(CardType::King, candidate.seat));
            }
        }

        match best {
            Some((value, play)) => {
                diagnostics.emit(
                    "ai",
                    format_args!("Endgame: {} should leave a card worth {:.2}", play, value),
                );
                play
            }
            None => choice.play,
        }
    }
}

#[cfg(test)]
mod tests {
    use loveletter::PlayEvent;

    use super::*;
    use CardType::*;

    /// Player 1 was seen holding the Princess, and we hold a Prince and the King.
    fn observer_facing_princess() -> Observer {
        let mut event = PlayEvent::new(0, Priest);
        event.public.target = Some(1);
        event.actor.revealed = Some(Princess);

        let mut observer = Observer::new(0, 2);
        observer.start_round(Priest);
        observer.report_draw(Prince);
        observer.report_play(&event.view_for(0));
        observer.report_draw(King);
        observer
    }

    #[test]
    fn swaps_for_a_better_card_at_the_end() {
        let mut observer = observer_facing_princess();
        observer.set_deck_remaining(2);
        let mut policy = EndgamePolicy::new(StdRng::seed_from_u64(9));
        let play = policy.choose_play(&[Prince, King], &observer, &Diagnostics::all());
        assert_eq!(play, Play::targeted(King, 1));
    }

    #[test]
    fn plays_like_the_baseline_before_the_end() {
        let observer = observer_facing_princess();
        assert!(observer.deck_remaining() > 2);
        let mut policy = EndgamePolicy::new(StdRng::seed_from_u64(9));
        let play = policy.choose_play(&[Prince, King], &observer, &Diagnostics::disabled());
        assert_eq!(play, Play::targeted(Prince, 1));
    }

    /// We hold two Princes after player 1 has shown low cards.
    fn observer_with_two_princes(low_cards_seen: &[CardType]) -> Observer {
        let mut observer = Observer::new(0, 2);
        observer.start_round(Prince);
        for &card in low_cards_seen {
            let mut event = PlayEvent::new(1, card);
            if card.needs_target() {
                event.public.target = Some(0);
            }
            if card == Guard {
                event.public.challenge = Some(Princess);
            }
            observer.report_play(&event.view_for(0));
        }
        observer.report_draw(Prince);
        observer.set_deck_remaining(2);
        observer
    }

    #[test]
    fn redraws_when_the_deck_holds_better_cards() {
        let observer = observer_with_two_princes(&[
            Handmaiden, Handmaiden, Guard, Guard, Guard, Guard, Priest, Priest, Baron, Baron,
        ]);
        assert!(observer.unseen().expected_value() > f64::from(Prince.rank()));
        for seed in 0..10 {
            let mut policy = EndgamePolicy::new(StdRng::seed_from_u64(seed));
            let play = policy.choose_play(&[Prince, Prince], &observer, &Diagnostics::disabled());
            assert_eq!(play, Play::targeted(Prince, 0));
        }
    }

    #[test]
    fn does_not_redraw_into_a_worse_card() {
        let observer = observer_with_two_princes(&[]);
        assert!(observer.unseen().expected_value() <= f64::from(Prince.rank()));
        for seed in 0..10 {
            let mut policy = EndgamePolicy::new(StdRng::seed_from_u64(seed));
            let play = policy.choose_play(&[Prince, Prince], &observer, &Diagnostics::disabled());
            assert_eq!(play, Play::targeted(Prince, 1));
        }
    }

    #[test]
    fn keeps_a_strong_card() {
        let mut observer = Observer::new(0, 2);
        observer.start_round(Princess);
        observer.report_draw(Prince);
        observer.set_deck_remaining(1);
        let mut policy = EndgamePolicy::new(StdRng::seed_from_u64(1));
        let play = policy.choose_play(&[Princess, Prince], &observer, &Diagnostics::disabled());
        assert_eq!(play, Play::targeted(Prince, 1));
    }
}
