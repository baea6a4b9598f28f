//! Common surface the driver uses to run whichever engine is active.

use crate::conway::ConwayEngine;
use crate::grid::Grid;
use crate::occupant::Occupant;
use crate::snake::SnakeEngine;
use gridlife_core::Result;

pub trait Automaton {
    fn label(&self) -> &'static str;

    /// Advance one step. `Ok(false)` means the step had no effect.
    fn advance(&mut self) -> Result<bool>;

    fn grid(&self) -> &Grid<Occupant>;

    fn reset(&mut self) -> Result<()>;

    /// One-line status for a heads-up display
    fn status(&self) -> String;

    /// Whether further steps can still change anything
    fn is_finished(&self) -> bool {
        false
    }
}

impl Automaton for ConwayEngine {
    fn label(&self) -> &'static str {
        "conway"
    }

    fn advance(&mut self) -> Result<bool> {
        self.step().map(|_| true)
    }

    fn grid(&self) -> &Grid<Occupant> {
        ConwayEngine::grid(self)
    }

    fn reset(&mut self) -> Result<()> {
        ConwayEngine::reset(self);
        Ok(())
    }

    fn status(&self) -> String {
        format!(
            "step {} | population {}",
            self.step_count(),
            self.population()
        )
    }
}

impl Automaton for SnakeEngine {
    fn label(&self) -> &'static str {
        "snake"
    }

    fn advance(&mut self) -> Result<bool> {
        self.step()
    }

    fn grid(&self) -> &Grid<Occupant> {
        SnakeEngine::grid(self)
    }

    fn reset(&mut self) -> Result<()> {
        SnakeEngine::reset(self)
    }

    fn status(&self) -> String {
        let state = match self.death_cause() {
            Some(cause) => format!("game over ({:?})", cause),
            None if self.is_running() => "running".to_string(),
            None => "paused".to_string(),
        };
        format!(
            "score {} | length {} | heading {} | {}",
            self.score(),
            self.len(),
            self.direction(),
            state
        )
    }

    fn is_finished(&self) -> bool {
        self.is_game_over()
    }
}
