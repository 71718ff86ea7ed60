use std::io::{self, Write};

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use log::info;

use tictactoe_ai::{AiPolicy, BoardSize, Difficulty, Mark, MatchSession, MatchStatus};

/// Tic-tac-toe in the terminal. X moves first; against the computer you play X.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Board side length; a full row, column or diagonal wins
    #[arg(short, long, default_value_t = 3, value_parser = clap::value_parser!(u8).range(3..=4))]
    size: u8,

    /// Opponent: another human, or the computer at a difficulty
    #[arg(short, long, value_enum, default_value_t = Mode::Hard)]
    mode: Mode,

    /// Seed for the computer's random choices
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Mode {
    Pvp,
    Easy,
    Medium,
    Hard,
}

impl Mode {
    fn difficulty(self) -> Option<Difficulty> {
        match self {
            Mode::Pvp => None,
            Mode::Easy => Some(Difficulty::Easy),
            Mode::Medium => Some(Difficulty::Medium),
            Mode::Hard => Some(Difficulty::Hard),
        }
    }
}

enum Command {
    Place(usize, usize),
    Undo,
    Quit,
}

fn parse_command(input: &str) -> Result<Command> {
    let mut parts = input.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some("q"), None, None) => Ok(Command::Quit),
        (Some("u"), None, None) => Ok(Command::Undo),
        (Some(row), Some(col), None) => {
            let row = row.parse().with_context(|| format!("bad row {row:?}"))?;
            let col = col.parse().with_context(|| format!("bad column {col:?}"))?;
            Ok(Command::Place(row, col))
        }
        _ => bail!("expected \"row col\", \"u\" or \"q\""),
    }
}

/// Reads one line; `None` on end of input.
fn prompt(message: &str) -> Result<Option<String>> {
    print!("{message}");
    io::stdout().flush()?;
    let mut input = String::new();
    if io::stdin().read_line(&mut input)? == 0 {
        return Ok(None);
    }
    Ok(Some(input.trim().to_string()))
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let size = match args.size {
        3 => BoardSize::Three,
        _ => BoardSize::Four,
    };
    let mut session = MatchSession::new(size);
    let mut ai = args.mode.difficulty().map(|difficulty| match args.seed {
        Some(seed) => AiPolicy::seeded(difficulty, seed),
        None => AiPolicy::new(difficulty),
    });
    info!("starting {:?} on a {}x{} board", args.mode, args.size, args.size);

    loop {
        println!("{}", session);

        if session.status().is_over() {
            match session.status() {
                MatchStatus::Won(mark) => {
                    let line = session.winning_line().unwrap_or_default();
                    println!("Player {} wins along {:?}!", mark, line);
                }
                _ => println!("It's a draw!"),
            }
            println!("{}", session.tally());

            match prompt("r to restart, q to quit: ")?.as_deref() {
                Some("r") => {
                    session.reset();
                    continue;
                }
                _ => break,
            }
        }

        if let Some(policy) = ai.as_mut() {
            if session.to_move() == Mark::O {
                session.play_ai_move(policy)?;
                continue;
            }
        }

        let message = format!(
            "Player {}, enter row and column (u to undo, q to quit): ",
            session.to_move()
        );
        let Some(input) = prompt(&message)? else {
            break;
        };
        match parse_command(&input) {
            Ok(Command::Quit) => break,
            Ok(Command::Undo) => {
                // Against the computer, take back its reply as well.
                let count = if ai.is_some() { 2 } else { 1 };
                if session.undo(count) == 0 {
                    println!("Nothing to undo.");
                }
            }
            Ok(Command::Place(row, col)) => {
                if let Err(err) = session.apply_move(row, col) {
                    println!("Invalid move: {err}");
                }
            }
            Err(err) => println!("{err:#}"),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command() {
        assert!(matches!(parse_command("1 2"), Ok(Command::Place(1, 2))));
        assert!(matches!(parse_command("  0   0 "), Ok(Command::Place(0, 0))));
        assert!(matches!(parse_command("u"), Ok(Command::Undo)));
        assert!(matches!(parse_command("q"), Ok(Command::Quit)));
        assert!(parse_command("1").is_err());
        assert!(parse_command("a 2").is_err());
        assert!(parse_command("1 2 3").is_err());
    }

    #[test]
    fn test_args() {
        let args = Args::try_parse_from([
            "tictactoe", "--size", "4", "--mode", "medium", "--seed", "3",
        ])
        .unwrap();
        assert_eq!(args.size, 4);
        assert_eq!(args.mode, Mode::Medium);
        assert_eq!(args.seed, Some(3));

        assert!(Args::try_parse_from(["tictactoe", "--size", "5"]).is_err());
        assert_eq!(Mode::Pvp.difficulty(), None);
    }
}
