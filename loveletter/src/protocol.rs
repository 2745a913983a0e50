use serde::{Deserialize, Serialize};

use crate::CardType;

/// A card an agent wants to play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Play {
    pub card: CardType,
    /// The seat of the targeted player. Required for the Guard, Priest,
    /// Baron, Prince and King, ignored otherwise.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub target: Option<usize>,
    /// The card named by a Guard. Ignored for other cards.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub challenge: Option<CardType>,
}

impl Play {
    pub fn untargeted(card: CardType) -> Self {
        Self {
            card,
            target: None,
            challenge: None,
        }
    }

    pub fn targeted(card: CardType, target: usize) -> Self {
        Self {
            card,
            target: Some(target),
            challenge: None,
        }
    }

    pub fn guard(target: usize, challenge: CardType) -> Self {
        Self {
            card: CardType::Guard,
            target: Some(target),
            challenge: Some(challenge),
        }
    }
}

impl std::fmt::Display for Play {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.card)?;
        if let Some(target) = self.target {
            write!(f, " on player {}", target + 1)?;
        }
        if let Some(challenge) = self.challenge {
            write!(f, " naming {}", challenge)?;
        }
        Ok(())
    }
}

/// The part of a played card that every player sees.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicEvent {
    /// Who played the card.
    pub actor: usize,
    pub card: CardType,
    pub target: Option<usize>,
    /// The card named by a Guard.
    pub challenge: Option<CardType>,
    /// A card that was discarded face-up as an effect of this play, i.e.
    /// the card of a player eliminated by a Guard or Baron, or the card
    /// discarded because of a Prince.
    pub discarded: Option<CardType>,
    pub eliminated: Option<usize>,
}

/// What only the acting player learns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorPrivate {
    /// The target's card, seen with a Priest or Baron, or received with a King.
    pub revealed: Option<CardType>,
}

/// What only the targeted player learns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetPrivate {
    /// The actor's card, seen in a Baron comparison or received with a King.
    pub revealed: Option<CardType>,
    /// The replacement card drawn after discarding because of a Prince.
    pub new_card: Option<CardType>,
}

/// The complete record of one play, as known to the judge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayEvent {
    pub public: PublicEvent,
    pub actor: ActorPrivate,
    pub target: TargetPrivate,
}

/// The private channel an agent gets to see, if any.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "channel", rename_all = "lowercase")]
pub enum PrivateView {
    None,
    Actor(ActorPrivate),
    Target(TargetPrivate),
}

/// A [`PlayEvent`] filtered for one recipient.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventView {
    pub public: PublicEvent,
    pub private: PrivateView,
}

impl PlayEvent {
    pub fn new(actor: usize, card: CardType) -> Self {
        Self {
            public: PublicEvent {
                actor,
                card,
                target: None,
                challenge: None,
                discarded: None,
                eliminated: None,
            },
            actor: ActorPrivate::default(),
            target: TargetPrivate::default(),
        }
    }

    /// The view of this play for the player in `seat`.
    ///
    /// The actor gets the actor channel and the target the target channel.
    /// A Prince played on oneself only carries target information, so in
    /// that case the target channel wins. Nobody ever gets both.
    pub fn view_for(&self, seat: usize) -> EventView {
        let private = if self.public.target == Some(seat) {
            PrivateView::Target(self.target)
        } else if self.public.actor == seat {
            PrivateView::Actor(self.actor)
        } else {
            PrivateView::None
        };
        EventView {
            public: self.public,
            private,
        }
    }
}

impl EventView {
    /// The card revealed to the recipient through its private channel.
    pub fn revealed(&self) -> Option<CardType> {
        match self.private {
            PrivateView::None => None,
            PrivateView::Actor(ActorPrivate { revealed }) => revealed,
            PrivateView::Target(TargetPrivate { revealed, .. }) => revealed,
        }
    }

    /// The replacement card drawn by the recipient after a Prince.
    pub fn new_card(&self) -> Option<CardType> {
        match self.private {
            PrivateView::Target(TargetPrivate { new_card, .. }) => new_card,
            _ => None,
        }
    }
}

/// A participant in a match, driven by the judge.
///
/// The judge calls these strictly in turn order and waits for every call to
/// return, so implementations may block (e.g. on user input).
pub trait Agent {
    /// A new match starts; forget scores.
    fn start_game(&mut self);
    /// A new round starts and this is the dealt card.
    fn start_round(&mut self, card: CardType);
    /// It is this agent's turn and it drew `card`.
    fn report_draw(&mut self, card: CardType);
    /// Somebody (possibly this agent) played a card.
    fn report_play(&mut self, event: &EventView);
    /// Choose which of the two held cards to play.
    ///
    /// May be called again for the same turn if the previous answer was not
    /// a legal play.
    fn get_play(&mut self) -> Play;
    /// The round is over. `final_hands` has `None` for eliminated players.
    fn end_round(&mut self, final_hands: &[Option<CardType>], winner: Option<usize>);
    fn end_game(&mut self, winner: usize);
}
