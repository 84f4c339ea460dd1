use std::{
    io::{stdin, BufRead},
    path::Path,
    thread::sleep,
    time::{SystemTime, UNIX_EPOCH},
};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::{rngs::StdRng, SeedableRng};
use tracing::{error, info, warn};

use crate::board::Board;
use crate::error::GameError;
use crate::obstacles::Obstacles;
use crate::score::{self, RecordOutcome, ScoreStore};
use crate::snake::{Direction::{self, *}, Snake, StepOutcome};
use crate::term::{self, RawSession};

pub const FIELD_SIZE_FILE: &str = "field_size.txt";
pub const OBSTACLES_FILE: &str = "obstacles.txt";
pub const SCORES_FILE: &str = "scores.txt";

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Turn(Direction),
    TogglePause,
    Quit,
    Ignore,
}

/// How a round of play ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundEnd {
    /// `frame` is the last board drawn, kept for after the alternate screen is gone.
    GameOver { score: i32, frame: Vec<String> },
    Quit,
}

pub struct SnakeGame {
    board: Board,
    obstacles: Obstacles,
    scores: ScoreStore,
    rng: StdRng,
    paused: bool,
}

impl SnakeGame {
    /// Load the board and obstacles from the working directory.
    pub fn new() -> Self {
        let board = Board::load(Path::new(FIELD_SIZE_FILE));
        let obstacles = Obstacles::load(Path::new(OBSTACLES_FILE), &board);
        Self::with_setup(board, obstacles, ScoreStore::new(SCORES_FILE), time_seed())
    }

    pub fn with_setup(board: Board, obstacles: Obstacles, scores: ScoreStore, seed: u64) -> Self {
        SnakeGame {
            board,
            obstacles,
            scores,
            rng: StdRng::seed_from_u64(seed),
            paused: false,
        }
    }

    pub fn run(&mut self) -> Result<(), GameError> {
        let name = term::prompt_line("Enter your name: ")?;
        info!(name = %name, width = self.board.width(), height = self.board.height(), "starting game");

        let (score, frame) = match self.play()? {
            RoundEnd::GameOver { score, frame } => (score, frame),
            RoundEnd::Quit => {
                info!("game abandoned");
                return Ok(());
            }
        };

        self.save_score(&name, score);
        print!("{}", game_over_text(&frame, score));

        // Wait for the player to acknowledge before asking anything else.
        let mut line = String::new();
        stdin().lock().read_line(&mut line)?;

        let choice = term::prompt_line("Do you want to see the top scores? (y/n): ")?;
        if choice.trim_start().starts_with(|c: char| c.eq_ignore_ascii_case(&'y')) {
            self.show_scores();
        }

        Ok(())
    }

    /// One round inside a raw session. The terminal is restored before this returns.
    pub fn play(&mut self) -> Result<RoundEnd, GameError> {
        let mut session = RawSession::start()?;
        let mut snake = Snake::new(&self.board, &self.obstacles, &mut self.rng);
        self.paused = false;

        session.draw(&snake, &self.board, &self.obstacles)?;

        loop {
            let mut request = None;

            if let Some(key_ev) = session.poll_key()? {
                match key_action(&key_ev) {
                    KeyAction::Turn(dir) => request = Some(dir),
                    KeyAction::TogglePause => self.toggle_pause(&mut session)?,
                    KeyAction::Quit => return Ok(RoundEnd::Quit),
                    KeyAction::Ignore => {}
                }
            }

            if self.paused {
                sleep(snake.tick_interval());
                continue;
            }

            let outcome = snake.step(&self.board, &self.obstacles, request, &mut self.rng);
            session.draw(&snake, &self.board, &self.obstacles)?;

            if let StepOutcome::GameOver(reason) = outcome {
                info!(?reason, length = snake.len(), "round over");
                return Ok(RoundEnd::GameOver {
                    score: snake.len() as i32,
                    frame: term::render_rows(&snake, &self.board, &self.obstacles),
                });
            }

            sleep(snake.tick_interval());
        }
    }

    fn toggle_pause(&mut self, session: &mut RawSession) -> Result<(), GameError> {
        self.paused = !self.paused;
        let status = if self.paused { "Paused, Esc to resume" } else { "" };
        session.show_status(&self.board, &[status])?;
        Ok(())
    }

    fn save_score(&self, name: &str, score: i32) {
        let path = self.scores.path().display();
        match self.scores.record(name, score) {
            Ok(RecordOutcome::Saved) => {}
            Ok(RecordOutcome::TableFull) => warn!(%path, score, "score table full, score dropped"),
            Err(err) => error!(%path, %err, "could not save score"),
        }
    }

    fn show_scores(&self) {
        match self.scores.list() {
            Ok(entries) => print!("{}", score::format_report(&entries)),
            Err(err) => {
                error!(%err, "could not read scores");
                print!("{}", score::format_report(&[]));
            }
        }
    }
}

pub fn key_action(ev: &KeyEvent) -> KeyAction {
    match ev {
        KeyEvent { code: KeyCode::Char('c'), modifiers } if modifiers.contains(KeyModifiers::CONTROL) => {
            KeyAction::Quit
        }
        KeyEvent { code, modifiers: _ } => match code {
            KeyCode::Char('w') | KeyCode::Up => KeyAction::Turn(Up),
            KeyCode::Char('a') | KeyCode::Left => KeyAction::Turn(Left),
            KeyCode::Char('s') | KeyCode::Down => KeyAction::Turn(Down),
            KeyCode::Char('d') | KeyCode::Right => KeyAction::Turn(Right),
            KeyCode::Esc => KeyAction::TogglePause,
            _ => KeyAction::Ignore,
        },
    }
}

/// The final board in cooked mode, followed by the game-over line.
fn game_over_text(frame: &[String], score: i32) -> String {
    let mut text = String::new();
    for row in frame {
        text.push_str(row);
        text.push('\n');
    }
    text.push_str(&format!("Length: {}\n", score));
    text.push_str("Game Over!\n");
    text
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}
