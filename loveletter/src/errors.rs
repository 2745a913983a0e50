use crate::CardType;

/// The error type for [`Table::execute_play()`](crate::Table::execute_play).
///
/// None of these are fatal: the judge asks the player again.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IllegalPlay {
    CardNotInHand { card: CardType },
    MustPlayCountess,
    MissingTarget,
    TargetOutOfRange { target: usize },
    TargetIsSelf,
    TargetEliminated { target: usize },
    TargetProtected { target: usize },
    MissingChallenge,
    ChallengedGuard,
}

impl std::error::Error for IllegalPlay {}

impl std::fmt::Display for IllegalPlay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalPlay::CardNotInHand { card } => {
                write!(f, "Tried to play {}, which is not in the player's hand", card)
            }
            IllegalPlay::MustPlayCountess => write!(
                f,
                "The Countess must be played when holding the King or a Prince"
            ),
            IllegalPlay::MissingTarget => write!(f, "This card needs a target player"),
            IllegalPlay::TargetOutOfRange { target } => {
                write!(f, "There is no player {}", target + 1)
            }
            IllegalPlay::TargetIsSelf => write!(f, "Only a Prince may be played on oneself"),
            IllegalPlay::TargetEliminated { target } => {
                write!(f, "Player {} is already out of the round", target + 1)
            }
            IllegalPlay::TargetProtected { target } => write!(
                f,
                "Player {} is protected by the Handmaiden, and there is another target",
                target + 1
            ),
            IllegalPlay::MissingChallenge => write!(f, "A Guard must name a card"),
            IllegalPlay::ChallengedGuard => write!(f, "A Guard may not name the Guard"),
        }
    }
}
