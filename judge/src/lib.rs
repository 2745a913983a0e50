mod game;
mod player;
mod recording;
pub use game::*;
pub use player::*;
pub use recording::*;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Match settings, optionally loaded from a JSON file. Missing fields take
/// their default value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Rounds a player has to win to win the match.
    pub target_score: u32,
    /// Consecutive illegal plays after which a match is aborted.
    pub max_invalid_plays: usize,
    /// Agents in seat order, used when none are given on the command line.
    pub agents: Vec<AgentKind>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target_score: 4,
            max_invalid_plays: 10,
            agents: Vec::new(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Could not open config file '{}'", path.display()))?;
        let config = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Invalid config file '{}'", path.display()))?;
        Ok(config)
    }
}
