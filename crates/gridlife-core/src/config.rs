//! Configuration types for the engines and the runner.

use crate::{Boundary, Direction, Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Conway engine parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConwayConfig {
    /// Number of grid rows
    pub rows: usize,
    /// Number of grid columns
    pub cols: usize,
    /// Random seed for reproducibility
    pub seed: u64,
    /// Age past which natural death becomes possible (`None` disables it)
    pub life_expectancy: Option<u32>,
    /// Share of cells seeded by random population (0.0 to 1.0)
    pub initial_density: f64,
}

impl Default for ConwayConfig {
    fn default() -> Self {
        Self {
            rows: 40,
            cols: 40,
            seed: 0,
            life_expectancy: Some(50),
            initial_density: 0.1,
        }
    }
}

impl ConwayConfig {
    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(Error::InvalidConfig(format!(
                "conway grid must not be empty, got {}x{}",
                self.rows, self.cols
            )));
        }
        if !(0.0..=1.0).contains(&self.initial_density) {
            return Err(Error::InvalidConfig(format!(
                "initial density {} outside [0, 1]",
                self.initial_density
            )));
        }
        Ok(())
    }
}

/// Snake engine parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SnakeConfig {
    pub rows: usize,
    pub cols: usize,
    pub seed: u64,
    /// Whether the head wraps around the edges or dies on them
    pub boundary: Boundary,
    /// Heading after every reset
    pub initial_direction: Direction,
    /// Segments laid out on reset, head included
    pub initial_length: usize,
}

impl Default for SnakeConfig {
    fn default() -> Self {
        Self {
            rows: 40,
            cols: 40,
            seed: 0,
            boundary: Boundary::Bounded,
            initial_direction: Direction::Right,
            initial_length: 3,
        }
    }
}

impl SnakeConfig {
    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(Error::InvalidConfig(format!(
                "snake grid must not be empty, got {}x{}",
                self.rows, self.cols
            )));
        }
        if self.initial_length == 0 {
            return Err(Error::InvalidConfig(
                "snake needs at least a head".to_string(),
            ));
        }
        // Room for the snake plus one food cell.
        if self.initial_length >= self.rows * self.cols {
            return Err(Error::InvalidConfig(format!(
                "{}x{} grid cannot hold a snake of length {} and its food",
                self.rows, self.cols, self.initial_length
            )));
        }
        Ok(())
    }
}

/// Which automaton the runner drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Conway,
    Snake,
}

/// Headless runner configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    pub mode: Mode,
    /// Delay between two steps (milliseconds); defaults depend on the mode
    pub step_delay_ms: Option<u64>,
    /// Stop after this many steps
    pub max_steps: Option<u64>,
    /// Let the runner steer the snake toward the food
    pub autopilot: bool,
    pub conway: ConwayConfig,
    pub snake: SnakeConfig,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Conway,
            step_delay_ms: None,
            max_steps: None,
            autopilot: true,
            conway: ConwayConfig::default(),
            snake: SnakeConfig::default(),
        }
    }
}

impl RunnerConfig {
    pub const CONWAY_STEP_DELAY_MS: u64 = 500;
    pub const SNAKE_STEP_DELAY_MS: u64 = 150;

    pub fn step_delay_ms(&self) -> u64 {
        self.step_delay_ms.unwrap_or(match self.mode {
            Mode::Conway => Self::CONWAY_STEP_DELAY_MS,
            Mode::Snake => Self::SNAKE_STEP_DELAY_MS,
        })
    }

    /// Read a JSON config file, falling back to defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config: RunnerConfig = match path {
            Some(path) => {
                debug!(path = %path.display(), "Loading runner config");
                let raw = std::fs::read_to_string(path)?;
                serde_json::from_str(&raw)?
            }
            None => RunnerConfig::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.step_delay_ms == Some(0) {
            return Err(Error::InvalidConfig(
                "step delay must be positive".to_string(),
            ));
        }
        match self.mode {
            Mode::Conway => self.conway.validate(),
            Mode::Snake => self.snake.validate(),
        }
    }
}
