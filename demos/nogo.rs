//! Plays one game of 9x9 NoGo between the MCTS player (black) and the random player (white).
//!
//! Usage: `cargo run --example nogo -- "<black args>" "<white args>"`, for example
//! `cargo run --example nogo -- "T=2000 exp=0.5" "seed=11"`. Set `RUST_LOG=nogo_mcts=debug` to
//! see search statistics.

use nogo_mcts::agent::{Agent, MctsPlayer, RandomPlayer};
use nogo_mcts::board::{Board, Color};
use nogo_mcts::boards::nogo::NoGoBoard;
use nogo_mcts::error::Error;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut cli = std::env::args().skip(1);
    let black_args = cli.next().unwrap_or_default();
    let white_args = cli.next().unwrap_or_default();

    let mut mcts = MctsPlayer::new(&format!("role=black {black_args}"))?;
    let mut random = RandomPlayer::new(&format!("role=white {white_args}"))?;
    let black: &mut dyn Agent<NoGoBoard> = &mut mcts;
    let white: &mut dyn Agent<NoGoBoard> = &mut random;
    let mut board = NoGoBoard::default();

    black.open_episode("");
    white.open_episode("");

    let mut side = Color::Black;
    let mut turn = 0;
    let winner = loop {
        let agent = match side {
            Color::Black => &mut *black,
            Color::White => &mut *white,
        };
        let Some(placement) = agent.take_action(&board) else {
            break side.opponent();
        };
        if !board.place(placement).is_legal() {
            println!("{} played an illegal placement {placement}", agent.name());
            break side.opponent();
        }

        turn += 1;
        println!("turn {turn}: {} plays {placement}\n{board}", agent.name());
        side = side.opponent();
    };

    black.close_episode("");
    white.close_episode("");
    println!("{winner} wins after {turn} placements");
    Ok(())
}
