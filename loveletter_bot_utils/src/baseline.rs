use loveletter::{BeliefState, CardType, Diagnostics, Play};
use rand::rngs::StdRng;

use crate::ranking::{best_opponent, Prefer};
use crate::{forced_play, Observer, Policy};

/// A play along with how sure the policy is about its outcome, when that
/// makes sense for the card.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Choice {
    pub play: Play,
    pub confidence: Option<f64>,
}

/// Always plays the lower card and aims it using the beliefs:
///
/// * Guard: at the opponent whose card is most certain, naming that card
/// * Priest: at the opponent whose card is least certain
/// * Baron: at the opponent most likely to hold less than the kept card
/// * Prince and King: at the opponent with the highest expected card
pub struct BaselinePolicy {
    rng: StdRng,
}

impl BaselinePolicy {
    pub fn new(rng: StdRng) -> Self {
        Self { rng }
    }

    pub(crate) fn choose(
        &mut self,
        hand: &[CardType],
        observer: &Observer,
        diagnostics: &Diagnostics,
    ) -> Choice {
        if let Some(play) = forced_play(hand) {
            diagnostics.emit("ai", "Forced to play the Countess");
            return Choice {
                play,
                confidence: None,
            };
        }

        let card = hand.iter().copied().min().unwrap_or(CardType::Guard);
        let kept = kept_card(hand, card).unwrap_or(card);

        match card {
            CardType::Guard => {
                let certainty = |belief: &BeliefState| {
                    belief
                        .most_likely(Some(CardType::Guard))
                        .map_or(0.0, |(_, certainty)| certainty)
                };
                let Some(candidate) =
                    best_opponent(observer, &mut self.rng, Prefer::Highest, certainty)
                else {
                    return self.no_target(card, observer);
                };
                let (guess, certainty) = observer
                    .hand_belief(candidate.seat)
                    .most_likely(Some(CardType::Guard))
                    .or_else(|| observer.unseen().most_likely(Some(CardType::Guard)))
                    .unwrap_or((CardType::Priest, 0.0));
                diagnostics.emit(
                    "ai",
                    format_args!(
                        "Player {} has a {:.0}% chance of holding {}",
                        candidate.seat + 1,
                        certainty * 100.0,
                        guess
                    ),
                );
                Choice {
                    play: Play::guard(candidate.seat, guess),
                    confidence: Some(certainty),
                }
            }
            CardType::Priest => {
                let certainty = |belief: &BeliefState| {
                    belief.most_likely(None).map_or(0.0, |(_, certainty)| certainty)
                };
                match best_opponent(observer, &mut self.rng, Prefer::Lowest, certainty) {
                    Some(candidate) => {
                        diagnostics.emit(
                            "ai",
                            format_args!(
                                "Looking at player {}, known with {:.0}% certainty",
                                candidate.seat + 1,
                                candidate.metric * 100.0
                            ),
                        );
                        Choice {
                            play: Play::targeted(card, candidate.seat),
                            confidence: Some(candidate.metric),
                        }
                    }
                    None => self.no_target(card, observer),
                }
            }
            CardType::Baron => {
                let below = |belief: &BeliefState| belief.probability_below(kept);
                match best_opponent(observer, &mut self.rng, Prefer::Highest, below) {
                    Some(candidate) => {
                        diagnostics.emit(
                            "ai",
                            format_args!(
                                "{} beats player {} with {:.0}% probability",
                                kept,
                                candidate.seat + 1,
                                candidate.metric * 100.0
                            ),
                        );
                        Choice {
                            play: Play::targeted(card, candidate.seat),
                            confidence: Some(candidate.metric),
                        }
                    }
                    None => self.no_target(card, observer),
                }
            }
            CardType::Prince | CardType::King => {
                match best_opponent(observer, &mut self.rng, Prefer::Highest, |b| b.expected_value()) {
                    Some(candidate) => {
                        diagnostics.emit(
                            "ai",
                            format_args!(
                                "Player {} is expected to hold {:.2}",
                                candidate.seat + 1,
                                candidate.metric
                            ),
                        );
                        Choice {
                            play: Play::targeted(card, candidate.seat),
                            confidence: None,
                        }
                    }
                    None => self.no_target(card, observer),
                }
            }
            _ => Choice {
                play: Play::untargeted(card),
                confidence: None,
            },
        }
    }

    /// Every opponent is out, which only happens after the round ended.
    fn no_target(&mut self, card: CardType, observer: &Observer) -> Choice {
        let mut play = Play::untargeted(card);
        if card.may_target_self() {
            play.target = Some(observer.seat());
        }
        Choice {
            play,
            confidence: None,
        }
    }
}

impl Policy for BaselinePolicy {
    fn choose_play(&mut self, hand: &[CardType], observer: &Observer, diagnostics: &Diagnostics) -> Play {
        self.choose(hand, observer, diagnostics).play
    }
}

/// The card left in hand after playing `played`.
pub(crate) fn kept_card(hand: &[CardType], played: CardType) -> Option<CardType> {
    let pos = hand.iter().position(|&c| c == played)?;
    hand.iter()
        .enumerate()
        .find(|&(i, _)| i != pos)
        .map(|(_, &card)| card)
}
