use std::{collections::VecDeque, time::Duration};

use rand::{seq::IteratorRandom, Rng};
use tracing::{debug, info, warn};

use crate::board::Board;
use crate::error::CapacityError;
use crate::obstacles::Obstacles;
use crate::point::Point;
use Direction::*;
use EndReason::*;

pub const MAX_SNAKE_LENGTH: usize = 100;
pub const INITIAL_SPEED: u32 = 10;
pub const MIN_SPEED: u32 = 1;
/// Sleep per speed unit between two ticks.
pub const SPEED_UNIT: Duration = Duration::from_millis(50);
/// Random draws tried before scanning the whole board for a free cell.
const FOOD_ATTEMPTS: usize = 32;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EndReason {
    Wall,
    SelfCollision,
    Obstacle,
    /// The body hit its capacity and could not grow.
    CapacityReached,
    /// No free cell left for the next food.
    BoardFull,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Continue { ate: bool },
    GameOver(EndReason),
}

/// Snake segments, head first, never longer than `MAX_SNAKE_LENGTH`.
#[derive(Debug, Clone)]
struct Body {
    segments: VecDeque<Point>,
}

impl Body {
    fn new(head: Point) -> Self {
        let mut segments = VecDeque::with_capacity(MAX_SNAKE_LENGTH);
        segments.push_front(head);
        Body { segments }
    }

    fn push_head(&mut self, head: Point) -> Result<(), CapacityError> {
        if self.segments.len() == MAX_SNAKE_LENGTH {
            return Err(CapacityError { capacity: MAX_SNAKE_LENGTH });
        }
        self.segments.push_front(head);
        Ok(())
    }

    /// Moves every segment one place back; the old tail is dropped.
    fn advance(&mut self, head: Point) {
        self.segments.pop_back();
        self.segments.push_front(head);
    }
}

pub struct Snake {
    body: Body,
    food: Point,
    speed: u32,
    direction: Direction,
    ended: Option<EndReason>,
}

impl Snake {
    /// A one-segment snake in the middle of the board, heading up.
    pub fn new(board: &Board, obstacles: &Obstacles, rng: &mut impl Rng) -> Self {
        let mut snake = Snake {
            body: Body::new(board.center()),
            food: board.center(),
            speed: INITIAL_SPEED,
            direction: Up,
            ended: None,
        };

        snake.food = snake.generate_food(board, obstacles, rng).unwrap_or_else(|| {
            let food = random_interior(board, rng);
            warn!(x = food.x, y = food.y, "no free cell for the first food, placing it anyway");
            food
        });
        snake
    }

    /// A random interior cell not covered by the snake or an obstacle.
    pub fn generate_food(
        &self,
        board: &Board,
        obstacles: &Obstacles,
        rng: &mut impl Rng,
    ) -> Option<Point> {
        let is_free = |p: Point| !self.occupies(p) && !obstacles.contains(p);

        for _ in 0..FOOD_ATTEMPTS {
            let p = random_interior(board, rng);
            if is_free(p) {
                return Some(p);
            }
        }

        // Crowded board: pick among whatever is left.
        board.interior().filter(|p| is_free(*p)).choose(rng)
    }

    pub fn set_direction(&mut self, new_direction: Direction) {
        if new_direction != self.direction.opposite() {
            self.direction = new_direction;
        }
    }

    /// Advance the game by one tick.
    pub fn step(
        &mut self,
        board: &Board,
        obstacles: &Obstacles,
        request: Option<Direction>,
        rng: &mut impl Rng,
    ) -> StepOutcome {
        if let Some(reason) = self.ended {
            return StepOutcome::GameOver(reason);
        }

        if let Some(dir) = request {
            self.set_direction(dir);
        }

        let next_head = self.head().step(self.direction);

        let crash = if !board.is_interior(next_head) {
            Some(Wall)
        } else if self.occupies(next_head) {
            Some(SelfCollision)
        } else if obstacles.contains(next_head) {
            Some(Obstacle)
        } else {
            None
        };
        if let Some(reason) = crash {
            return self.end(reason);
        }

        if next_head != self.food {
            self.body.advance(next_head);
            return StepOutcome::Continue { ate: false };
        }

        if let Err(err) = self.body.push_head(next_head) {
            warn!(%err, "snake cannot grow any longer");
            return self.end(CapacityReached);
        }

        if self.len() % 2 == 0 {
            self.speed = self.speed.saturating_sub(1).max(MIN_SPEED);
        }
        debug!(length = self.len(), speed = self.speed, "food eaten");

        match self.generate_food(board, obstacles, rng) {
            Some(food) => {
                self.food = food;
                StepOutcome::Continue { ate: true }
            }
            None => self.end(BoardFull),
        }
    }

    fn end(&mut self, reason: EndReason) -> StepOutcome {
        info!(?reason, length = self.len(), "game over");
        self.ended = Some(reason);
        StepOutcome::GameOver(reason)
    }

    pub fn occupies(&self, p: Point) -> bool {
        self.body.segments.contains(&p)
    }

    pub fn head(&self) -> Point {
        self.body.segments[0]
    }

    /// Segments from head to tail.
    #[cfg(test)]
    pub fn body(&self) -> impl Iterator<Item = Point> + '_ {
        self.body.segments.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.body.segments.len()
    }

    pub fn food(&self) -> Point {
        self.food
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[cfg(test)]
    pub fn is_over(&self) -> bool {
        self.ended.is_some()
    }

    /// How long the shell waits before the next tick.
    pub fn tick_interval(&self) -> Duration {
        SPEED_UNIT * self.speed
    }
}

fn random_interior(board: &Board, rng: &mut impl Rng) -> Point {
    Point::new(
        rng.gen_range(1..=board.width() - 2),
        rng.gen_range(1..=board.height() - 2),
    )
}
