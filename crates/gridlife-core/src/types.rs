//! Core type definitions shared by the engines.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Relative displacement on the grid as `(delta_row, delta_col)`.
pub type Offset = (i32, i32);

pub const NORTH: Offset = (-1, 0);
pub const EAST: Offset = (0, 1);
pub const SOUTH: Offset = (1, 0);
pub const WEST: Offset = (0, -1);
pub const NORTH_EAST: Offset = (-1, 1);
pub const SOUTH_EAST: Offset = (1, 1);
pub const SOUTH_WEST: Offset = (1, -1);
pub const NORTH_WEST: Offset = (-1, -1);

/// Von Neumann neighborhood, clockwise from north.
pub const CARDINAL_POINTS: [Offset; 4] = [NORTH, EAST, SOUTH, WEST];

/// Moore neighborhood, clockwise from north.
pub const WIND_ROSE: [Offset; 8] = [
    NORTH, NORTH_EAST, EAST, SOUTH_EAST, SOUTH, SOUTH_WEST, WEST, NORTH_WEST,
];

/// How neighbor lookups treat the grid edges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Boundary {
    /// Edges wrap around on both axes
    Toroidal,
    /// Cells past an edge do not exist
    Bounded,
}

impl Boundary {
    pub fn is_toroidal(self) -> bool {
        matches!(self, Boundary::Toroidal)
    }
}

/// Heading of the snake
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn to_delta(self) -> Offset {
        match self {
            Direction::Up => NORTH,
            Direction::Down => SOUTH,
            Direction::Left => WEST,
            Direction::Right => EAST,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn is_opposite(self, other: Direction) -> bool {
        self.opposite() == other
    }

    /// Quarter turn counter-clockwise.
    pub fn rotated_left(self) -> Self {
        match self {
            Direction::Up => Direction::Left,
            Direction::Left => Direction::Down,
            Direction::Down => Direction::Right,
            Direction::Right => Direction::Up,
        }
    }

    /// Quarter turn clockwise.
    pub fn rotated_right(self) -> Self {
        match self {
            Direction::Up => Direction::Right,
            Direction::Right => Direction::Down,
            Direction::Down => Direction::Left,
            Direction::Left => Direction::Up,
        }
    }

    pub fn all() -> [Direction; 4] {
        [Direction::Up, Direction::Right, Direction::Down, Direction::Left]
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "Up",
            Direction::Down => "Down",
            Direction::Left => "Left",
            Direction::Right => "Right",
        };
        f.write_str(name)
    }
}
