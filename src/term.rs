use std::{
    io::{self, stdin, stdout, BufRead, Stdout, Write},
    time::Duration,
};

use crossterm::event::{poll, read, Event, KeyEvent};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue, style, terminal};
use tracing::error;

use crate::board::Board;
use crate::obstacles::Obstacles;
use crate::point::Point;
use crate::snake::Snake;

pub const BORDER_CHAR: char = '#';
pub const FOOD_CHAR: char = '*';
pub const SNAKE_BODY_CHAR: char = 'O';
pub const OBSTACLE_CHAR: char = 'X';
pub const EMPTY_CHAR: char = ' ';

/// Raw mode plus alternate screen for the length of a game.
/// Dropping the session puts the terminal back the way it was.
pub struct RawSession {
    stdout: Stdout,
}

impl RawSession {
    pub fn start() -> crossterm::Result<Self> {
        terminal::enable_raw_mode()?;
        // From here on, Drop restores whatever was already switched.
        let mut session = RawSession { stdout: stdout() };
        execute!(session.stdout, EnterAlternateScreen, cursor::Hide, cursor::DisableBlinking)?;
        Ok(session)
    }

    /// At most one pending key press, without waiting.
    pub fn poll_key(&self) -> crossterm::Result<Option<KeyEvent>> {
        while poll(Duration::from_millis(0))? {
            if let Event::Key(ev) = read()? {
                return Ok(Some(ev));
            }
        }
        Ok(None)
    }

    pub fn draw(&mut self, snake: &Snake, board: &Board, obstacles: &Obstacles) -> crossterm::Result<()> {
        queue!(self.stdout, terminal::Clear(ClearType::All))?;
        for (y, row) in render_rows(snake, board, obstacles).iter().enumerate() {
            queue!(self.stdout, cursor::MoveTo(0, y as u16), style::Print(row))?;
        }
        let status = format!(
            "Length: {}  Speed: {}  Heading: {:?}",
            snake.len(),
            snake.speed(),
            snake.direction()
        );
        queue!(self.stdout, cursor::MoveTo(0, board.height() as u16), style::Print(status))?;
        self.flush()
    }

    /// Writes `lines` under the status row, one per row.
    pub fn show_status(&mut self, board: &Board, lines: &[&str]) -> crossterm::Result<()> {
        let top = board.height() as u16 + 1;
        for (i, line) in lines.iter().enumerate() {
            queue!(
                self.stdout,
                cursor::MoveTo(0, top + i as u16),
                terminal::Clear(ClearType::CurrentLine),
                style::Print(line)
            )?;
        }
        self.flush()
    }

    fn flush(&mut self) -> crossterm::Result<()> {
        self.stdout.flush()?;
        Ok(())
    }
}

impl Drop for RawSession {
    fn drop(&mut self) {
        if let Err(err) = execute!(self.stdout, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen) {
            error!(%err, "failed to leave alternate screen");
        }
        if let Err(err) = terminal::disable_raw_mode() {
            error!(%err, "failed to disable raw mode");
        }
    }
}

/// The board as text, one string per row, one glyph per cell.
pub fn render_rows(snake: &Snake, board: &Board, obstacles: &Obstacles) -> Vec<String> {
    (0..board.height())
        .map(|y| {
            (0..board.width())
                .map(|x| cell_char(Point::new(x, y), snake, board, obstacles))
                .collect()
        })
        .collect()
}

fn cell_char(p: Point, snake: &Snake, board: &Board, obstacles: &Obstacles) -> char {
    if board.is_border(p) {
        BORDER_CHAR
    } else if p == snake.food() {
        FOOD_CHAR
    } else if snake.occupies(p) {
        SNAKE_BODY_CHAR
    } else if obstacles.contains(p) {
        OBSTACLE_CHAR
    } else {
        EMPTY_CHAR
    }
}

/// Print `prompt` and read one line from stdin, without the line ending.
/// Only meant for cooked mode, outside a `RawSession`.
pub fn prompt_line(prompt: &str) -> io::Result<String> {
    let mut out = stdout();
    write!(out, "{}", prompt)?;
    out.flush()?;

    let mut line = String::new();
    stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(&['\r', '\n'][..]).to_string())
}
