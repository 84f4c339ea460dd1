use crate::snake::Direction::{self, *};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }

    /// The neighbouring cell one step towards `direction`. Rows grow downwards.
    pub fn step(self, direction: Direction) -> Point {
        match direction {
            Up => Point::new(self.x, self.y - 1),
            Down => Point::new(self.x, self.y + 1),
            Left => Point::new(self.x - 1, self.y),
            Right => Point::new(self.x + 1, self.y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_moves_one_cell() {
        let p = Point::new(10, 10);
        assert_eq!(p.step(Up), Point::new(10, 9));
        assert_eq!(p.step(Down), Point::new(10, 11));
        assert_eq!(p.step(Left), Point::new(9, 10));
        assert_eq!(p.step(Right), Point::new(11, 10));
    }
}
