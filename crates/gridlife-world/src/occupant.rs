//! What a cell can hold.

use crate::grid::Ground;
use crate::human::Human;
use gridlife_core::Direction;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One cell of the snake, or the food it chases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub is_head: bool,
    pub is_dead: bool,
    pub is_food: bool,
    /// Heading shown by the renderer; movement uses the engine's own heading.
    pub direction: Direction,
}

impl Segment {
    pub fn head(direction: Direction) -> Self {
        Self {
            is_head: true,
            is_dead: false,
            is_food: false,
            direction,
        }
    }

    pub fn body(direction: Direction) -> Self {
        Self {
            is_head: false,
            ..Self::head(direction)
        }
    }

    pub fn food() -> Self {
        Self {
            is_head: false,
            is_dead: false,
            is_food: true,
            direction: Direction::Right,
        }
    }

    /// Dead copy keeping the head flag and direction
    pub fn killed(&self) -> Self {
        Self {
            is_dead: true,
            ..*self
        }
    }
}

/// Content of a grid cell
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Occupant {
    #[default]
    Empty,
    Entity(Human),
    SnakeSegment(Segment),
}

impl Occupant {
    pub fn is_empty(&self) -> bool {
        matches!(self, Occupant::Empty)
    }

    pub fn is_entity(&self) -> bool {
        matches!(self, Occupant::Entity(_))
    }

    /// Snake body or head, dead or alive; food does not count.
    pub fn is_snake(&self) -> bool {
        matches!(self, Occupant::SnakeSegment(s) if !s.is_food)
    }

    pub fn is_food(&self) -> bool {
        matches!(self, Occupant::SnakeSegment(s) if s.is_food)
    }

    pub fn as_human(&self) -> Option<&Human> {
        match self {
            Occupant::Entity(human) => Some(human),
            _ => None,
        }
    }

    pub fn as_human_mut(&mut self) -> Option<&mut Human> {
        match self {
            Occupant::Entity(human) => Some(human),
            _ => None,
        }
    }

    pub fn as_segment(&self) -> Option<&Segment> {
        match self {
            Occupant::SnakeSegment(segment) => Some(segment),
            _ => None,
        }
    }

    pub fn as_segment_mut(&mut self) -> Option<&mut Segment> {
        match self {
            Occupant::SnakeSegment(segment) => Some(segment),
            _ => None,
        }
    }

    /// Single character used by text renderers
    pub fn glyph(&self) -> char {
        match self {
            Occupant::Empty => '.',
            Occupant::Entity(_) => 'H',
            Occupant::SnakeSegment(s) if s.is_food => '*',
            Occupant::SnakeSegment(s) => match (s.is_head, s.is_dead) {
                (true, false) => '@',
                (false, false) => 'o',
                (true, true) => 'X',
                (false, true) => 'x',
            },
        }
    }
}

impl Ground for Occupant {
    fn ground() -> Self {
        Occupant::Empty
    }

    fn is_ground(&self) -> bool {
        self.is_empty()
    }
}

impl From<Human> for Occupant {
    fn from(human: Human) -> Self {
        Occupant::Entity(human)
    }
}

impl From<Segment> for Occupant {
    fn from(segment: Segment) -> Self {
        Occupant::SnakeSegment(segment)
    }
}

impl fmt::Display for Occupant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}
