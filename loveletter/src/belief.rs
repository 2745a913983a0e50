use std::ops::RangeBounds;

use serde::{Deserialize, Serialize};

use crate::{CardType, NUM_CARD_TYPES};

/// How many copies of each card type could still be in an unresolved pool,
/// e.g. one opponent's hand or the undrawn deck.
///
/// Probabilities are derived from the counts, so an empty belief state is a
/// valid value that simply carries no information: every certainty and the
/// expected value are 0.
///
/// ```
/// use loveletter::{BeliefState, CardType};
/// let mut belief = BeliefState::full();
/// belief.clear(Some(CardType::Guard), ..=CardType::Baron);
/// // Priests and Barons are gone, everything else is left
/// assert_eq!(belief.total(), 12);
/// assert_eq!(belief.most_likely(None), Some((CardType::Guard, 5.0 / 12.0)));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BeliefState {
    counts: [u8; NUM_CARD_TYPES],
}

impl BeliefState {
    /// A pool that contains nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The composition of a full deck.
    pub fn full() -> Self {
        let mut counts = [0; NUM_CARD_TYPES];
        for card in CardType::ALL {
            counts[card.index()] = card.start_count();
        }
        Self { counts }
    }

    /// A pool that is known to be exactly one card.
    pub fn single(card: CardType) -> Self {
        let mut belief = Self::empty();
        belief.add(card);
        belief
    }

    pub fn count(&self, card: CardType) -> u8 {
        self.counts[card.index()]
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().map(|&c| u32::from(c)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    pub fn contains(&self, card: CardType) -> bool {
        self.count(card) > 0
    }

    /// True if `card` is the only type left in the pool.
    pub fn is_certain(&self, card: CardType) -> bool {
        self.contains(card) && u32::from(self.count(card)) == self.total()
    }

    pub fn add(&mut self, card: CardType) {
        self.counts[card.index()] = self.counts[card.index()].saturating_add(1);
    }

    /// Removes one copy of `card`. Does nothing if there is none left.
    pub fn remove(&mut self, card: CardType) {
        let count = &mut self.counts[card.index()];
        *count = count.saturating_sub(1);
    }

    /// Rules out a single type entirely.
    pub fn rule_out(&mut self, card: CardType) {
        self.counts[card.index()] = 0;
    }

    /// Keeps only `card`, zeroing every other type.
    ///
    /// If `card` had already been ruled out, it is put back with a count
    /// of 1: the caller has observed it, which beats anything inferred.
    pub fn narrow(&mut self, card: CardType) {
        let keep = self.count(card).max(1);
        self.counts = [0; NUM_CARD_TYPES];
        self.counts[card.index()] = keep;
    }

    /// Zeroes every type whose rank lies `within` the range, except `exclude`.
    pub fn clear<R: RangeBounds<CardType>>(&mut self, exclude: Option<CardType>, within: R) {
        for card in CardType::ALL {
            if within.contains(&card) && Some(card) != exclude {
                self.counts[card.index()] = 0;
            }
        }
    }

    /// Takes the larger count of each type, for a pool that may be either of two.
    pub fn merge_max(&mut self, other: &BeliefState) {
        for (mine, theirs) in self.counts.iter_mut().zip(other.counts) {
            *mine = (*mine).max(theirs);
        }
    }

    /// Fraction of the pool that is `card`, or 0 for an empty pool.
    pub fn certainty(&self, card: CardType) -> f64 {
        match self.total() {
            0 => 0.0,
            total => f64::from(self.count(card)) / f64::from(total),
        }
    }

    /// The type with the highest certainty, ignoring `exclude`.
    ///
    /// Types are scanned from the highest rank down and only a strictly
    /// higher certainty replaces the current pick, so ties go to the higher
    /// rank. Returns `None` if no candidate has a nonzero certainty.
    pub fn most_likely(&self, exclude: Option<CardType>) -> Option<(CardType, f64)> {
        let mut best: Option<(CardType, f64)> = None;
        for card in CardType::ALL.into_iter().rev() {
            if Some(card) == exclude {
                continue;
            }
            let certainty = self.certainty(card);
            if certainty > best.map_or(0.0, |(_, c)| c) {
                best = Some((card, certainty));
            }
        }
        best
    }

    /// The type with the lowest nonzero certainty, ignoring `exclude`.
    ///
    /// Scanned from the lowest rank up, so ties go to the lower rank. When
    /// nothing is left, the lowest non-excluded type is returned with
    /// certainty 0.
    pub fn least_likely(&self, exclude: Option<CardType>) -> (CardType, f64) {
        let mut best: Option<(CardType, f64)> = None;
        let mut fallback = None;
        for card in CardType::ALL {
            if Some(card) == exclude {
                continue;
            }
            fallback.get_or_insert(card);
            let certainty = self.certainty(card);
            if certainty > 0.0 && certainty < best.map_or(f64::INFINITY, |(_, c)| c) {
                best = Some((card, certainty));
            }
        }
        // At least seven types are never excluded
        best.unwrap_or((fallback.unwrap_or(CardType::Guard), 0.0))
    }

    /// Probability that the pool's card ranks strictly below `card`.
    pub fn probability_below(&self, card: CardType) -> f64 {
        CardType::ALL
            .into_iter()
            .take_while(|&c| c < card)
            .map(|c| self.certainty(c))
            .sum()
    }

    /// Mean rank of the pool, or 0 for an empty pool.
    pub fn expected_value(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            total => {
                let weighted: u32 = CardType::ALL
                    .into_iter()
                    .map(|c| u32::from(c.rank()) * u32::from(self.count(c)))
                    .sum();
                f64::from(weighted) / f64::from(total)
            }
        }
    }

    /// Iterates over the types with a nonzero count.
    pub fn iter(&self) -> impl Iterator<Item = (CardType, u8)> + '_ {
        CardType::ALL
            .into_iter()
            .map(|c| (c, self.count(c)))
            .filter(|&(_, n)| n > 0)
    }
}

impl std::fmt::Display for BeliefState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (card, count) in self.iter() {
            if !first {
                write!(f, " ")?;
            }
            first = false;
            write!(f, "{}:{}", card, count)?;
        }
        Ok(())
    }
}
