use std::io::{self, BufRead, Write};

use chess_rules::config::AppConfig;
use chess_rules::engine::{Game, GameStatus, Move, Position};

fn main() {
    let config = AppConfig::from_env();

    // Initialize tracing (structured logging).
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.as_str().into()),
        )
        .with_writer(io::stderr)
        .init();

    let mut game = match &config.starting_fen {
        Some(fen) => match Game::from_fen(fen) {
            Ok(game) => game,
            Err(e) => {
                eprintln!("Invalid CHESS_START_FEN: {e}");
                std::process::exit(1);
            }
        },
        None => Game::new(),
    };

    tracing::info!("chess-rules v{} ready", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(&mut game, &config) {
        eprintln!("I/O error: {e}");
        std::process::exit(1);
    }
}

/// Read commands from stdin until EOF, `quit`, or the game ends.
fn run(game: &mut Game, config: &AppConfig) -> io::Result<()> {
    let stdin = io::stdin();
    let mut out = io::stdout().lock();

    writeln!(out, "{}", game.board())?;
    write!(out, "{} to move> ", game.team_turn())?;
    out.flush()?;

    for line in stdin.lock().lines() {
        let line = line?;
        let mut words = line.split_whitespace();
        match (words.next(), words.next()) {
            (None, _) => {}
            (Some("quit"), _) => break,
            (Some("board"), _) => writeln!(out, "{}", game.board())?,
            (Some("moves"), Some(square)) => match square.parse::<Position>() {
                Ok(pos) => match game.legal_moves(pos) {
                    Some(moves) => {
                        let list: Vec<String> = moves.iter().map(Move::to_string).collect();
                        writeln!(out, "{}", list.join(" "))?;
                    }
                    None => writeln!(out, "no piece on {pos}")?,
                },
                Err(e) => eprintln!("{e}"),
            },
            (Some(text), _) => match Move::from_coordinate(text).and_then(|mv| game.make_move(mv)) {
                Ok(()) => {
                    if config.show_board {
                        writeln!(out, "{}", game.board())?;
                    }
                    let status = game.status();
                    match status {
                        GameStatus::Active => {}
                        GameStatus::Check => writeln!(out, "{} is in check", game.team_turn())?,
                        GameStatus::Checkmate => {
                            writeln!(out, "checkmate: {} wins", !game.team_turn())?;
                        }
                        GameStatus::Stalemate => writeln!(out, "stalemate")?,
                    }
                    if status.is_game_over() {
                        return Ok(());
                    }
                }
                Err(e) => eprintln!("{e}"),
            },
        }
        write!(out, "{} to move> ", game.team_turn())?;
        out.flush()?;
    }
    Ok(())
}
