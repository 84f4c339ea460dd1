use std::{fs, path::Path};

use tracing::{info, warn};

use crate::error::BoardError;
use crate::point::Point;

pub const DEFAULT_WIDTH: i32 = 20;
pub const DEFAULT_HEIGHT: i32 = 20;
/// Smallest board that still has an interior cell.
pub const MIN_SIDE: i32 = 3;
/// Largest side a terminal can reasonably show.
pub const MAX_SIDE: i32 = 200;

/// Playing field dimensions, border ring included.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Board {
    width: i32,
    height: i32,
}

impl Board {
    pub fn new(width: i32, height: i32) -> Result<Self, BoardError> {
        if width < MIN_SIDE || height < MIN_SIDE {
            return Err(BoardError::TooSmall { width, height, min: MIN_SIDE });
        }
        if width > MAX_SIDE || height > MAX_SIDE {
            return Err(BoardError::TooLarge { width, height, max: MAX_SIDE });
        }
        Ok(Board { width, height })
    }

    /// Read `width height` from `path`. Anything unusable falls back to the default board.
    pub fn load(path: &Path) -> Self {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                info!(path = %path.display(), %err, "no board size file, using default board");
                return Self::default();
            }
        };

        match Self::parse(&content) {
            Some(Ok(board)) => {
                info!(width = board.width, height = board.height, "board size loaded");
                board
            }
            Some(Err(err)) => {
                warn!(path = %path.display(), %err, "invalid board size, using default board");
                Self::default()
            }
            None => {
                warn!(path = %path.display(), "malformed board size file, using default board");
                Self::default()
            }
        }
    }

    /// `None` when the text does not start with two integers.
    fn parse(content: &str) -> Option<Result<Self, BoardError>> {
        let mut tokens = content.split_whitespace().map(str::parse::<i32>);
        let width = tokens.next()?.ok()?;
        let height = tokens.next()?.ok()?;
        Some(Self::new(width, height))
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2, self.height / 2)
    }

    pub fn is_border(&self, p: Point) -> bool {
        p.x == 0 || p.y == 0 || p.x == self.width - 1 || p.y == self.height - 1
    }

    /// Strictly inside the border ring.
    pub fn is_interior(&self, p: Point) -> bool {
        p.x > 0 && p.x < self.width - 1 && p.y > 0 && p.y < self.height - 1
    }

    /// All interior cells, row-major.
    pub fn interior(&self) -> impl Iterator<Item = Point> + '_ {
        (1..self.height - 1).flat_map(move |y| (1..self.width - 1).map(move |x| Point::new(x, y)))
    }
}

impl Default for Board {
    fn default() -> Self {
        Board { width: DEFAULT_WIDTH, height: DEFAULT_HEIGHT }
    }
}
