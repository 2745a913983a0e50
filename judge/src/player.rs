use loveletter::{Agent, CardType, Diagnostics, EventView, Play};
use loveletter_bot_utils::{
    BaselinePolicy, CautiousPolicy, EndgamePolicy, ObservingAgent, RandomPolicy,
};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// The built-in agents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AgentKind {
    Baseline,
    Cautious,
    Endgame,
    Random,
}

impl AgentKind {
    pub fn build(
        self,
        seat: usize,
        num_players: usize,
        rng: StdRng,
        diagnostics: Diagnostics,
    ) -> Box<dyn Agent> {
        match self {
            AgentKind::Baseline => Box::new(ObservingAgent::new(
                seat,
                num_players,
                BaselinePolicy::new(rng),
                diagnostics,
            )),
            AgentKind::Cautious => Box::new(ObservingAgent::new(
                seat,
                num_players,
                CautiousPolicy::new(rng),
                diagnostics,
            )),
            AgentKind::Endgame => Box::new(ObservingAgent::new(
                seat,
                num_players,
                EndgamePolicy::new(rng),
                diagnostics,
            )),
            AgentKind::Random => Box::new(ObservingAgent::new(
                seat,
                num_players,
                RandomPolicy::new(rng),
                diagnostics,
            )),
        }
    }
}

impl std::fmt::Display for AgentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            AgentKind::Baseline => "baseline",
            AgentKind::Cautious => "cautious",
            AgentKind::Endgame => "endgame",
            AgentKind::Random => "random",
        };
        write!(f, "{}", name)
    }
}

/// An agent in a seat, with every call to it traced.
pub struct Player {
    pub name: String,
    agent: Box<dyn Agent>,
}

impl Player {
    pub fn new(name: impl Into<String>, agent: Box<dyn Agent>) -> Self {
        Self {
            name: name.into(),
            agent,
        }
    }

    pub fn start_game(&mut self) {
        trace!(player = &self.name, "Starting game");
        self.agent.start_game();
    }

    pub fn start_round(&mut self, card: CardType) {
        trace!(player = &self.name, %card, "Dealt card");
        self.agent.start_round(card);
    }

    pub fn report_draw(&mut self, card: CardType) {
        trace!(player = &self.name, %card, "Drew card");
        self.agent.report_draw(card);
    }

    pub fn report_play(&mut self, event: &EventView) {
        trace!(player = &self.name, ?event, "Reporting play");
        self.agent.report_play(event);
    }

    pub fn get_play(&mut self) -> Play {
        let play = self.agent.get_play();
        trace!(player = &self.name, %play, "Received play");
        play
    }

    pub fn end_round(&mut self, final_hands: &[Option<CardType>], winner: Option<usize>) {
        trace!(player = &self.name, ?final_hands, ?winner, "Ending round");
        self.agent.end_round(final_hands, winner);
    }

    pub fn end_game(&mut self, winner: usize) {
        trace!(player = &self.name, winner, "Ending game");
        self.agent.end_game(winner);
    }
}
