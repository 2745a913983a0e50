use loveletter::{round_winner, CardType, Deck, Diagnostics, PlayEvent, Table, MAX_PLAYERS, MIN_PLAYERS};
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::player::Player;
use crate::recording::Recorder;
use crate::Config;

/// What happened in one round, in the judge's full view.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    pub start_player: usize,
    pub events: Vec<PlayEvent>,
    /// The card of every player at the end, `None` for those who were out.
    pub final_hands: Vec<Option<CardType>>,
    pub winner: Option<usize>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub winner: usize,
    pub scores: Vec<u32>,
    pub rounds: usize,
}

/// Plays rounds until somebody reaches the target score.
///
/// Returns an error when an agent keeps making illegal plays, or when the
/// recording cannot be written.
pub fn play_match(
    rng: &mut StdRng,
    players: &mut [Player],
    config: &Config,
    diagnostics: &Diagnostics,
    recorder: &mut Option<Recorder>,
) -> anyhow::Result<MatchResult> {
    if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&players.len()) {
        anyhow::bail!(
            "A match needs {} to {} players, got {}",
            MIN_PLAYERS,
            MAX_PLAYERS,
            players.len()
        );
    }
    if config.target_score == 0 {
        anyhow::bail!("The target score must be at least 1");
    }

    let mut table = Table::new(players.len());
    for player in players.iter_mut() {
        player.start_game();
    }

    // Randomly pick who starts the first round
    let mut start_player = rng.gen_range(0..players.len());
    let mut rounds = 0;
    let winner = loop {
        let deck = Deck::shuffled(rng);
        let round = play_round(&mut table, deck, players, start_player, config, diagnostics)?;
        rounds += 1;
        let winner = round.winner;
        if let Some(rec) = recorder {
            rec.store_round(round);
        }
        if let Some(winner) = winner {
            start_player = winner;
            if table.players[winner].score >= config.target_score {
                break winner;
            }
        }
    };

    let scores: Vec<u32> = table.players.iter().map(|p| p.score).collect();
    debug!(winner = players[winner].name, rounds, ?scores, "Match over");
    for player in players.iter_mut() {
        player.end_game(winner);
    }

    let result = MatchResult {
        winner,
        scores,
        rounds,
    };
    if let Some(rec) = recorder {
        let names: Vec<String> = players.iter().map(|p| p.name.clone()).collect();
        rec.write_match_recording(&names, &result)?;
    }
    Ok(result)
}

/// Deals `deck` and plays one round starting with `start_player`. The
/// winner's score on `table` is incremented.
pub fn play_round(
    table: &mut Table,
    deck: Deck,
    players: &mut [Player],
    start_player: usize,
    config: &Config,
    diagnostics: &Diagnostics,
) -> anyhow::Result<RoundResult> {
    debug_assert_eq!(table.num_players(), players.len());
    let dealt = table.start_round(deck);
    diagnostics.emit("judge", format_args!("Dealt {:?}", dealt));
    for (player, card) in players.iter_mut().zip(dealt) {
        player.start_round(card);
    }

    let mut events = Vec::new();
    let mut seat = start_player;
    while table.round_continues() {
        let drawn = table
            .begin_turn(seat)
            .ok_or_else(|| anyhow::anyhow!("The deck ran out during the round"))?;
        diagnostics.emit(
            "judge",
            format_args!("{} draws {}", players[seat].name, drawn),
        );
        players[seat].report_draw(drawn);

        let event = take_turn(table, &mut players[seat], seat, config, diagnostics)?;
        for (recipient, player) in players.iter_mut().enumerate() {
            player.report_play(&event.view_for(recipient));
        }
        events.push(event);
        seat = table.next_in_round(seat);
    }

    let final_hands = table.final_hands();
    let winner = round_winner(&final_hands);
    if let Some(winner) = winner {
        table.players[winner].score += 1;
    }
    match winner {
        Some(winner) => diagnostics.emit(
            "judge",
            format_args!("{} wins the round with {:?}", players[winner].name, final_hands),
        ),
        None => diagnostics.emit(
            "judge",
            format_args!("Nobody wins the round: {:?}", final_hands),
        ),
    }
    for player in players.iter_mut() {
        player.end_round(&final_hands, winner);
    }

    Ok(RoundResult {
        start_player,
        events,
        final_hands,
        winner,
    })
}

/// Asks for plays until one is legal and resolves it.
fn take_turn(
    table: &mut Table,
    player: &mut Player,
    seat: usize,
    config: &Config,
    diagnostics: &Diagnostics,
) -> anyhow::Result<PlayEvent> {
    let mut rejected = 0;
    loop {
        let play = player.get_play();
        match table.execute_play(seat, play) {
            Ok(event) => {
                diagnostics.emit("judge", format_args!("{} plays {}", player.name, play));
                return Ok(event);
            }
            Err(err) => {
                rejected += 1;
                warn!(player = &player.name, %play, %err, "Illegal play");
                diagnostics.emit(
                    "judge",
                    format_args!("{} tried to play {}: {}", player.name, play, err),
                );
                if rejected >= config.max_invalid_plays {
                    anyhow::bail!(
                        "{} made {} illegal plays in a row, the last one was {}: {}",
                        player.name,
                        rejected,
                        play,
                        err
                    );
                }
            }
        }
    }
}
