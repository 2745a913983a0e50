use loveletter::BeliefState;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::Observer;

/// An opponent considered as a target, with the metric it was ranked by.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Candidate {
    pub seat: usize,
    pub metric: f64,
    pub protected: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Prefer {
    Highest,
    Lowest,
}

/// Orders the opponents still in the round as targets, best first.
///
/// Protected opponents always come last. Among the rest, the preferred
/// metric decides, then the higher match score, then chance.
pub fn rank_opponents<R, F>(observer: &Observer, rng: &mut R, prefer: Prefer, metric: F) -> Vec<Candidate>
where
    R: Rng + ?Sized,
    F: Fn(&BeliefState) -> f64,
{
    let mut candidates: Vec<(Candidate, u32)> = observer
        .opponents()
        .map(|(seat, belief)| {
            let candidate = Candidate {
                seat,
                metric: metric(&belief.hand),
                protected: belief.protected,
            };
            (candidate, belief.score)
        })
        .collect();
    candidates.shuffle(rng);
    // Stable, so the shuffle breaks the remaining ties
    candidates.sort_by(|(a, a_score), (b, b_score)| {
        a.protected
            .cmp(&b.protected)
            .then_with(|| match prefer {
                Prefer::Highest => b.metric.total_cmp(&a.metric),
                Prefer::Lowest => a.metric.total_cmp(&b.metric),
            })
            .then_with(|| b_score.cmp(a_score))
    });
    candidates.into_iter().map(|(candidate, _)| candidate).collect()
}

pub fn best_opponent<R, F>(observer: &Observer, rng: &mut R, prefer: Prefer, metric: F) -> Option<Candidate>
where
    R: Rng + ?Sized,
    F: Fn(&BeliefState) -> f64,
{
    rank_opponents(observer, rng, prefer, metric).into_iter().next()
}
