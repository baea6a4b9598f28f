//! Simulation engines.
//!
//! This crate implements the generic 2D grid, the occupants that live on it,
//! and the two automata built on top: an aging Game of Life and Snake.

pub mod grid;
pub mod human;
pub mod occupant;
pub mod conway;
pub mod snake;
pub mod automaton;
pub mod render;

pub use grid::{Grid, Ground};
pub use human::{Census, Human};
pub use occupant::{Occupant, Segment};
pub use conway::{ConwayEngine, StepSummary};
pub use snake::{DeathCause, SnakeEngine};
pub use automaton::Automaton;
