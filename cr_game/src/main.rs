//! Ring card game runner.
//!
//! Obtains a player count and a pack (from a file, or generated), runs the
//! ring simulation, and writes per-player and per-deck output files.

use std::{
    fs,
    io::{self, BufRead, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Error};
use card_ring::{
    GameConfig, GameOutcome, Pack, Ring,
    game::{DEFAULT_WAIT_TIMEOUT_MS, entities::fmt_hand},
};
use log::info;
use pico_args::Arguments;

const HELP: &str = "\
Run a ring card game simulation

USAGE:
  cr_game [OPTIONS]

OPTIONS:
  --players    N           Number of players                   [default: prompt]
  --pack       PATH        Pack file with 8n values, one per line  [default: prompt]
  --timeout-ms MS          Deck wait timeout in milliseconds   [default: 200]
  --out-dir    DIR         Directory for output files          [default: .]

FLAGS:
  --generate               Generate a random pack instead of reading one
  -h, --help               Print help information
";

struct Args {
    players: Option<usize>,
    pack: Option<PathBuf>,
    generate: bool,
    timeout_ms: u64,
    out_dir: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let args = Args {
        players: pargs.opt_value_from_str("--players")?,
        pack: pargs.opt_value_from_str("--pack")?,
        generate: pargs.contains("--generate"),
        timeout_ms: pargs
            .opt_value_from_str("--timeout-ms")?
            .unwrap_or(DEFAULT_WAIT_TIMEOUT_MS),
        out_dir: pargs
            .opt_value_from_str("--out-dir")?
            .unwrap_or_else(|| PathBuf::from(".")),
    };

    env_logger::builder().format_target(false).init();

    let stdin = io::stdin();
    let mut input = stdin.lock();

    let players = match args.players {
        Some(players) if players > 0 => players,
        Some(_) => anyhow::bail!("player amount must be larger than 0"),
        None => prompt_players(&mut input)?,
    };

    let pack = if args.generate {
        Pack::generate(players)?
    } else if let Some(path) = &args.pack {
        Pack::read_from(path, players)
            .with_context(|| format!("invalid pack file {}", path.display()))?
    } else {
        prompt_pack(players, &mut input)?
    };

    let config = GameConfig {
        players,
        wait_timeout_ms: args.timeout_ms,
    };
    let ring = Ring::new(&config, &pack)?;

    info!("starting a {players}-player game");
    let outcome = ring.run().await;

    let winner = outcome
        .winner
        .context("game finished without a declared winner")?;
    write_outputs(&args.out_dir, &outcome)?;
    println!("player {winner} wins");
    Ok(())
}

/// Prompts until a positive player count is entered.
fn prompt_players(input: &mut impl BufRead) -> Result<usize, Error> {
    loop {
        print!("Enter player amount: ");
        io::stdout().flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            anyhow::bail!("ran out of input while waiting for a player amount");
        }
        match line.trim().parse::<usize>() {
            Ok(players) if players > 0 => return Ok(players),
            Ok(_) => println!("Player amount must be larger than 0"),
            Err(_) => println!("Player amount must be an integer"),
        }
    }
}

/// Prompts until a path to a valid pack file is entered.
fn prompt_pack(players: usize, input: &mut impl BufRead) -> Result<Pack, Error> {
    loop {
        print!("Enter pack path: ");
        io::stdout().flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            anyhow::bail!("ran out of input while waiting for a pack path");
        }
        match Pack::read_from(line.trim(), players) {
            Ok(pack) => return Ok(pack),
            Err(err) => println!("{err}"),
        }
    }
}

/// Renders the outcome the way the original game reported itself: one
/// `playerN_output.txt` per player with that player's moves, and one
/// `deckN_output.txt` per deck with its final contents.
fn write_outputs(dir: &Path, outcome: &GameOutcome) -> Result<(), Error> {
    fs::create_dir_all(dir)?;

    for (number, hand) in &outcome.hands {
        let mut content = String::new();
        for event in outcome.events.iter().filter(|e| e.player() == *number) {
            content.push_str(&event.to_string());
            content.push('\n');
        }
        content.push_str(&format!(
            "player {number} final hand is {}\n",
            fmt_hand(hand)
        ));
        fs::write(dir.join(format!("player{number}_output.txt")), content)?;
    }

    for (number, cards) in &outcome.decks {
        let rendering = cards
            .iter()
            .map(|card| card.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        fs::write(
            dir.join(format!("deck{number}_output.txt")),
            format!("deck{number} contains {rendering}\n"),
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use card_ring::{Card, GameEvent};

    #[test]
    fn prompt_reprompts_until_the_amount_is_valid() {
        let mut input = io::Cursor::new("1.2\nasd\n0\n2\n");
        assert_eq!(prompt_players(&mut input).unwrap(), 2);
    }

    #[test]
    fn prompt_fails_cleanly_on_exhausted_input() {
        let mut input = io::Cursor::new("nope\n");
        assert!(prompt_players(&mut input).is_err());
    }

    #[test]
    fn outputs_route_events_to_their_players() {
        let dir = tempfile::tempdir().unwrap();
        let outcome = GameOutcome {
            winner: Some(1),
            hands: vec![(1, [Card(1); 4]), (2, [Card(3); 4])],
            decks: vec![(1, vec![Card(5), Card(6)]), (2, vec![])],
            events: vec![
                GameEvent::Win { player: 1 },
                GameEvent::LossNotified {
                    player: 2,
                    winner: 1,
                },
            ],
        };

        write_outputs(dir.path(), &outcome).unwrap();

        let player1 = fs::read_to_string(dir.path().join("player1_output.txt")).unwrap();
        assert!(player1.contains("player 1 wins"));
        assert!(player1.contains("player 1 final hand is 1 1 1 1"));
        assert!(!player1.contains("informed"));

        let player2 = fs::read_to_string(dir.path().join("player2_output.txt")).unwrap();
        assert!(player2.contains("player 1 has informed player 2 that player 1 has won"));

        let deck1 = fs::read_to_string(dir.path().join("deck1_output.txt")).unwrap();
        assert_eq!(deck1, "deck1 contains 5 6\n");
    }
}
