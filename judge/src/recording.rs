use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::game::{MatchResult, RoundResult};

/// Writes every match to its own JSON file, `match_000001.json` and so on.
pub struct Recorder {
    num: usize,
    directory: PathBuf,
    rounds: Vec<RoundResult>,
}

impl Recorder {
    pub fn new(directory: PathBuf) -> anyhow::Result<Self> {
        if !directory.is_dir() {
            anyhow::bail!("Directory '{}' does not exist", directory.display());
        }
        Ok(Self {
            num: 1,
            directory,
            rounds: Vec::new(),
        })
    }

    pub fn store_round(&mut self, round: RoundResult) {
        self.rounds.push(round);
    }

    /// Writes the stored rounds together with the result and starts over.
    pub fn write_match_recording(
        &mut self,
        players: &[String],
        result: &MatchResult,
    ) -> anyhow::Result<()> {
        let recording = MatchRecording {
            players: players.to_vec(),
            result: result.clone(),
            rounds: std::mem::take(&mut self.rounds),
        };
        let filepath = self.directory.join(format!("match_{:0>6}.json", self.num));
        let mut writer = BufWriter::new(File::create(filepath)?);
        serde_json::to_writer_pretty(&mut writer, &recording)?;
        writeln!(writer)?;
        writer.flush()?;
        self.num += 1;
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecording {
    pub players: Vec<String>,
    pub result: MatchResult,
    pub rounds: Vec<RoundResult>,
}

#[cfg(test)]
mod tests {
    use loveletter::Diagnostics;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::{play_match, AgentKind, Config, Player};

    #[test]
    fn missing_directory_is_rejected() {
        assert!(Recorder::new(PathBuf::from("/nonexistent/recordings")).is_err());
    }

    #[test]
    fn matches_are_written_in_order() {
        let directory = std::env::temp_dir().join(format!("loveletter_recording_{}", std::process::id()));
        std::fs::create_dir_all(&directory).unwrap();

        let mut recorder = Some(Recorder::new(directory.clone()).unwrap());
        let mut rng = StdRng::seed_from_u64(12);
        let mut players: Vec<Player> = (0..3)
            .map(|seat| {
                let agent = AgentKind::Random.build(seat, 3, StdRng::seed_from_u64(seat as u64), Diagnostics::disabled());
                Player::new(format!("random {}", seat + 1), agent)
            })
            .collect();
        let config = Config {
            target_score: 1,
            ..Config::default()
        };
        for _ in 0..2 {
            play_match(&mut rng, &mut players, &config, &Diagnostics::disabled(), &mut recorder).unwrap();
        }

        let second = std::fs::read_to_string(directory.join("match_000002.json")).unwrap();
        let recording: MatchRecording = serde_json::from_str(&second).unwrap();
        assert_eq!(recording.players.len(), 3);
        assert_eq!(recording.rounds.len(), recording.result.rounds);
        let last = recording.rounds.last().unwrap();
        assert_eq!(last.winner, Some(recording.result.winner));
        assert!(!last.events.is_empty());
        assert!(directory.join("match_000001.json").is_file());

        std::fs::remove_dir_all(&directory).unwrap();
    }
}
