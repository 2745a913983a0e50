use std::path::PathBuf;

use clap::Parser;
use judge::{play_match, AgentKind, Config, Player, Recorder};
use loveletter::{Diagnostics, DIAGNOSTICS_TARGET, MAX_PLAYERS, MIN_PLAYERS};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
struct Args {
    /// The agents to seat, in order. Taken from the config file if omitted
    #[clap(value_enum, num_args(0..=4), value_delimiter = ' ')]
    agents: Vec<AgentKind>,

    /// How many matches to play
    #[arg(short, long, default_value_t = 100)]
    num_matches: usize,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Rounds needed to win a match, overriding the config file
    #[arg(short, long)]
    target_score: Option<u32>,

    /// Path to a JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Record every match as a JSON file into this directory
    #[arg(short, long)]
    record_matches_to_directory: Option<PathBuf>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,

    /// Diagnostic zones to show, e.g. "judge", "ai" or "all". They are
    /// shown regardless of the log level
    #[arg(short = 'z', long, value_delimiter = ',')]
    zones: Vec<String>,
}

struct MatchScore {
    wins: Vec<usize>,
    rounds: usize,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level, !args.zones.is_empty());

    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(target_score) = args.target_score {
        config.target_score = target_score;
    }
    let agents = if args.agents.is_empty() {
        config.agents.clone()
    } else {
        args.agents.clone()
    };
    if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&agents.len()) {
        anyhow::bail!(
            "Name {} to {} agents, on the command line or in the config file",
            MIN_PLAYERS,
            MAX_PLAYERS
        );
    }

    // Get a random seed
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let mut recorder = if let Some(dir_path) = args.record_matches_to_directory {
        Some(Recorder::new(dir_path)?)
    } else {
        None
    };

    let diagnostics = Diagnostics::with_zones(args.zones);
    let mut players: Vec<Player> = agents
        .iter()
        .enumerate()
        .map(|(seat, kind)| {
            let agent_rng = StdRng::seed_from_u64(rng.gen());
            let agent = kind.build(seat, agents.len(), agent_rng, diagnostics.clone());
            Player::new(format!("{} {}", kind, seat + 1), agent)
        })
        .collect();

    let mut score = MatchScore {
        wins: vec![0; players.len()],
        rounds: 0,
    };
    for match_idx in 0..args.num_matches {
        let result = play_match(&mut rng, &mut players, &config, &diagnostics, &mut recorder)?;
        debug!(winner = players[result.winner].name, match_idx, rounds = result.rounds);
        score.wins[result.winner] += 1;
        score.rounds += result.rounds;
    }

    print_results(&players, &score, args.num_matches);
    Ok(())
}

fn print_results(players: &[Player], score: &MatchScore, num_matches: usize) {
    println!("\nResults after {} matches ({} rounds):\n", num_matches, score.rounds);
    for (player, &wins) in players.iter().zip(&score.wins) {
        let percentage = if num_matches == 0 {
            0.0
        } else {
            wins as f32 / num_matches as f32 * 100.0
        };
        println!(" {:19} | {:6} wins | {:5.1}%", player.name, wins, percentage);
    }
}

fn initialize_logging(level: LevelFilter, show_diagnostics: bool) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().event_format(format))
        .with(log_filter(level, show_diagnostics))
        .init();
}

/// Diagnostic lines are emitted at debug level and only for the zones asked
/// for, so those are let through whatever the level.
fn log_filter(level: LevelFilter, show_diagnostics: bool) -> Targets {
    let filter = Targets::new().with_default(level);
    if show_diagnostics {
        filter.with_target(DIAGNOSTICS_TARGET, LevelFilter::DEBUG.max(level))
    } else {
        filter
    }
}

#[cfg(test)]
mod tests {
    use tracing::Level;

    use super::*;

    #[test]
    fn zones_are_shown_at_the_default_level() {
        let filter = log_filter(LevelFilter::INFO, true);
        assert!(filter.would_enable(DIAGNOSTICS_TARGET, &Level::DEBUG));
        assert!(!filter.would_enable("judge::game", &Level::DEBUG));
        assert!(filter.would_enable("judge::game", &Level::INFO));
    }

    #[test]
    fn no_zones_keep_the_level() {
        let filter = log_filter(LevelFilter::INFO, false);
        assert!(!filter.would_enable(DIAGNOSTICS_TARGET, &Level::DEBUG));
        let filter = log_filter(LevelFilter::TRACE, true);
        assert!(filter.would_enable(DIAGNOSTICS_TARGET, &Level::TRACE));
    }
}
