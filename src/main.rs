mod board;
mod error;
mod game;
mod logger;
mod obstacles;
mod point;
mod score;
mod snake;
mod term;

use std::path::Path;

use anyhow::Context;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    logger::init_logger(Path::new(logger::LOG_FILE));

    let mut game = game::SnakeGame::new();
    // The raw session inside restores the terminal on every exit path
    game.run().context("snake game failed")?;

    Ok(())
}
