use loveletter::{CardType, Diagnostics, Play};
use rand::rngs::StdRng;

use crate::{BaselinePolicy, Observer, Policy};

/// Like [`BaselinePolicy`], but hides behind the Handmaiden instead of
/// making an information play it is not sure about.
pub struct CautiousPolicy {
    baseline: BaselinePolicy,
}

impl CautiousPolicy {
    pub fn new(rng: StdRng) -> Self {
        Self {
            baseline: BaselinePolicy::new(rng),
        }
    }
}

impl Policy for CautiousPolicy {
    fn choose_play(&mut self, hand: &[CardType], observer: &Observer, diagnostics: &Diagnostics) -> Play {
        let choice = self.baseline.choose(hand, observer, diagnostics);
        let informational = matches!(
            choice.play.card,
            CardType::Guard | CardType::Priest | CardType::Baron
        );
        let sure = choice.confidence.map_or(false, |confidence| confidence >= 1.0);
        if informational && !sure && hand.contains(&CardType::Handmaiden) {
            diagnostics.emit(
                "ai",
                format_args!("Not sure enough to play {}, hiding instead", choice.play.card),
            );
            return Play::untargeted(CardType::Handmaiden);
        }
        choice.play
    }
}
