use std::{fs, path::Path, slice};

use tracing::{debug, info, warn};

use crate::board::Board;
use crate::point::Point;

pub const MAX_OBSTACLES: usize = 100;

/// Static walls inside the board. Every point is an interior cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Obstacles {
    points: Vec<Point>,
}

impl Obstacles {
    pub fn new() -> Self {
        Obstacles { points: Vec::new() }
    }

    /// Load obstacles from `path`. A missing or unreadable file yields no obstacles.
    pub fn load(path: &Path, board: &Board) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => {
                let obstacles = Self::parse(&content, board);
                if obstacles.is_empty() {
                    warn!(path = %path.display(), "obstacle file has no usable obstacles");
                } else {
                    info!(path = %path.display(), count = obstacles.len(), "obstacles loaded");
                }
                obstacles
            }
            Err(err) => {
                info!(path = %path.display(), %err, "no obstacle file, playing without obstacles");
                Self::new()
            }
        }
    }

    /// Parse whitespace separated `x y` pairs, keeping interior points only.
    pub fn parse(content: &str, board: &Board) -> Self {
        let mut points = Vec::new();
        let mut tokens = content.split_whitespace();

        while let (Some(x), Some(y)) = (tokens.next(), tokens.next()) {
            if points.len() == MAX_OBSTACLES {
                warn!(max = MAX_OBSTACLES, "too many obstacles, ignoring the rest");
                break;
            }

            let p = match (x.parse(), y.parse()) {
                (Ok(x), Ok(y)) => Point::new(x, y),
                _ => {
                    debug!(x, y, "skipping malformed obstacle");
                    continue;
                }
            };

            if board.is_interior(p) {
                points.push(p);
            } else {
                debug!(x = p.x, y = p.y, "skipping obstacle outside the playing field");
            }
        }

        Obstacles { points }
    }

    pub fn contains(&self, p: Point) -> bool {
        self.points.contains(&p)
    }

    #[cfg(test)]
    pub fn iter(&self) -> slice::Iter<'_, Point> {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
