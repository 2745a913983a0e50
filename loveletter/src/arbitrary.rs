use crate::{BeliefState, CardType};

impl quickcheck::Arbitrary for CardType {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        *g.choose(&CardType::ALL).unwrap()
    }
}

/// Any sub-pool of a full deck, including the empty one.
impl quickcheck::Arbitrary for BeliefState {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        let mut belief = BeliefState::empty();
        for card in CardType::ALL {
            let copies = u8::arbitrary(g) % (card.start_count() + 1);
            for _ in 0..copies {
                belief.add(card);
            }
        }
        belief
    }
}
