//! Snake game on a grid of occupants.

use crate::grid::Grid;
use crate::occupant::{Occupant, Segment};
use gridlife_core::{Direction, Error, Result, SnakeConfig};
use rand_chacha::ChaCha8Rng;
use rand::SeedableRng;
use std::collections::VecDeque;
use tracing::{debug, info, warn};

/// Why the game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeathCause {
    Wall,
    SelfCollision,
}

/// Snake state machine: idle, running, or over.
///
/// `segments` lists occupied cell indices from head to tail. `step` only has
/// an effect while running and not over; once over, everything stays frozen
/// for inspection until `reset`.
pub struct SnakeEngine {
    grid: Grid<Occupant>,
    segments: VecDeque<usize>,
    direction: Direction,
    food: Option<usize>,
    running: bool,
    death: Option<DeathCause>,
    score: u64,
    config: SnakeConfig,
    rng: ChaCha8Rng,
}

impl SnakeEngine {
    pub fn new(config: SnakeConfig) -> Result<Self> {
        config.validate()?;
        let mut engine = Self {
            grid: Grid::new(config.rows, config.cols),
            segments: VecDeque::with_capacity(config.initial_length),
            direction: config.initial_direction,
            food: None,
            running: false,
            death: None,
            score: 0,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
        };
        engine.lay_out_snake()?;
        engine.place_food()?;
        Ok(engine)
    }

    pub fn grid(&self) -> &Grid<Occupant> {
        &self.grid
    }

    pub fn config(&self) -> &SnakeConfig {
        &self.config
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Occupied cells, head first
    pub fn segments(&self) -> &VecDeque<usize> {
        &self.segments
    }

    pub fn head(&self) -> Option<usize> {
        self.segments.front().copied()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn food_index(&self) -> Option<usize> {
        self.food
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_game_over(&self) -> bool {
        self.death.is_some()
    }

    pub fn death_cause(&self) -> Option<DeathCause> {
        self.death
    }

    /// Head in the middle row, a quarter of the way along the columns, with
    /// the body trailing away from the heading. Shifted inwards when the
    /// body would not fit.
    fn lay_out_snake(&mut self) -> Result<()> {
        let rows = self.grid.rows() as i64;
        let cols = self.grid.cols() as i64;
        let (dr, dc) = self.direction.to_delta();
        let (dr, dc) = (i64::from(dr), i64::from(dc));
        let span = self.config.initial_length as i64 - 1;

        // Body cells sit at head - i * delta for i in 0..=span.
        let row_range = (span * dr).max(0)..=(rows - 1 + (span * dr).min(0));
        let col_range = (span * dc).max(0)..=(cols - 1 + (span * dc).min(0));
        if row_range.is_empty() || col_range.is_empty() {
            return Err(Error::InvalidConfig(format!(
                "snake of length {} does not fit a {}x{} grid heading {}",
                self.config.initial_length, rows, cols, self.direction
            )));
        }

        let head_row = (rows / 2).clamp(*row_range.start(), *row_range.end());
        let head_col = (cols / 4).clamp(*col_range.start(), *col_range.end());

        for i in 0..=span {
            let index = self
                .grid
                .index_of((head_row - i * dr) as usize, (head_col - i * dc) as usize)?;
            let segment = if i == 0 {
                Segment::head(self.direction)
            } else {
                Segment::body(self.direction)
            };
            self.grid.set_cell(index, segment.into())?;
            self.segments.push_back(index);
        }

        Ok(())
    }

    /// Put food on a uniformly chosen empty cell.
    fn place_food(&mut self) -> Result<usize> {
        let index = match self.grid.random_free_cell(&mut self.rng) {
            Ok(index) => index,
            Err(err) => {
                warn!(length = self.segments.len(), "No free cell left for food");
                return Err(err);
            }
        };
        self.grid.set_cell(index, Segment::food().into())?;
        self.food = Some(index);
        debug!(food = index, "Food placed");
        Ok(index)
    }

    /// Move the food onto a chosen empty cell. Returns `false` if the cell is
    /// taken.
    pub fn place_food_at(&mut self, index: usize) -> Result<bool> {
        if self.food == Some(index) {
            return Ok(true);
        }
        if !self.grid.is_free(index)? {
            return Ok(false);
        }
        if let Some(old) = self.food.take() {
            self.grid.set_cell(old, Occupant::Empty)?;
        }
        self.grid.set_cell(index, Segment::food().into())?;
        self.food = Some(index);
        Ok(true)
    }

    /// Start or pause the game. Has no effect once the game is over. Returns
    /// whether the game is running afterwards.
    pub fn toggle_running(&mut self) -> bool {
        if !self.is_game_over() {
            self.running = !self.running;
            debug!(running = self.running, "Toggled snake");
        }
        self.running
    }

    /// Change heading unless it would reverse the snake onto itself.
    /// Returns whether the heading was accepted.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        if direction.is_opposite(self.direction) {
            debug!(current = %self.direction, requested = %direction, "Rejected reversal");
            return false;
        }
        self.direction = direction;
        self.sync_head_direction();
        true
    }

    pub fn rotate_left(&mut self) {
        self.direction = self.direction.rotated_left();
        self.sync_head_direction();
    }

    pub fn rotate_right(&mut self) {
        self.direction = self.direction.rotated_right();
        self.sync_head_direction();
    }

    /// Copy the heading onto the head occupant for renderers.
    fn sync_head_direction(&mut self) {
        if let Some(head) = self.head() {
            if let Ok(cell) = self.grid.get_cell_mut(head) {
                if let Some(segment) = cell.as_segment_mut() {
                    segment.direction = self.direction;
                }
            }
        }
    }

    /// Advance the snake one cell.
    ///
    /// Returns `Ok(false)` when idle, over, or when this move ends the game.
    /// If the snake eats and no cell is left for new food, the move is kept
    /// and `Error::NoFreePlacement` is returned.
    pub fn step(&mut self) -> Result<bool> {
        if !self.running || self.is_game_over() {
            return Ok(false);
        }
        let Some(head) = self.head() else {
            return Ok(false);
        };

        let (row, col) = self.grid.coords_of(head)?;
        let target = self.grid.neighbor_index(
            row,
            col,
            self.direction.to_delta(),
            self.config.boundary,
        )?;
        let Some(target) = target else {
            self.kill(DeathCause::Wall)?;
            return Ok(false);
        };

        // The tail is about to move away, so running into it is allowed.
        let body_len = self.segments.len() - 1;
        if self.segments.iter().take(body_len).any(|&s| s == target) {
            self.kill(DeathCause::SelfCollision)?;
            return Ok(false);
        }

        if let Some(segment) = self.grid.get_cell_mut(head)?.as_segment_mut() {
            segment.is_head = false;
        }

        if self.food == Some(target) {
            self.grid.set_cell(target, Occupant::Empty)?;
            self.food = None;
            self.score += 1;
            self.segments.push_front(target);
            self.grid.set_cell(target, Segment::head(self.direction).into())?;
            info!(score = self.score, length = self.segments.len(), "Snake ate food");
            self.place_food()?;
        } else {
            if let Some(tail) = self.segments.pop_back() {
                self.grid.set_cell(tail, Occupant::Empty)?;
            }
            self.segments.push_front(target);
            self.grid.set_cell(target, Segment::head(self.direction).into())?;
        }

        debug!(head = target, direction = %self.direction, score = self.score, "Snake moved");
        Ok(true)
    }

    /// Swap every segment for its dead counterpart and end the game.
    fn kill(&mut self, cause: DeathCause) -> Result<()> {
        for &index in &self.segments {
            let cell = self.grid.get_cell_mut(index)?;
            if let Some(dead) = cell.as_segment().map(Segment::killed) {
                *cell = dead.into();
            }
        }
        self.death = Some(cause);
        info!(?cause, score = self.score, length = self.segments.len(), "Game over");
        Ok(())
    }

    /// Back to the initial idle state with a fresh snake and food.
    pub fn reset(&mut self) -> Result<()> {
        self.grid.clear();
        self.segments.clear();
        self.food = None;
        self.score = 0;
        self.direction = self.config.initial_direction;
        self.death = None;
        self.running = false;
        self.lay_out_snake()?;
        self.place_food()?;
        info!("Snake game reset");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridlife_core::Boundary;

    fn engine(rows: usize, cols: usize, boundary: Boundary) -> SnakeEngine {
        SnakeEngine::new(SnakeConfig {
            rows,
            cols,
            seed: 9,
            boundary,
            ..Default::default()
        })
        .unwrap()
    }

    fn index(engine: &SnakeEngine, row: usize, col: usize) -> usize {
        engine.grid().index_of(row, col).unwrap()
    }

    /// Park the food somewhere the test path never visits.
    fn park_food(engine: &mut SnakeEngine, row: usize, col: usize) {
        let target = index(engine, row, col);
        assert!(engine.place_food_at(target).unwrap());
    }

    fn assert_consistent(engine: &SnakeEngine) {
        let segments: Vec<usize> = engine.segments().iter().copied().collect();
        let mut unique = segments.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), segments.len(), "duplicate segment");

        for (i, &s) in segments.iter().enumerate() {
            let segment = engine.grid().get_cell(s).unwrap().as_segment().copied().unwrap();
            assert!(!segment.is_food);
            assert_eq!(segment.is_head, i == 0);
        }
        assert_eq!(engine.grid().count_matching(Occupant::is_snake), segments.len());

        if let Some(food) = engine.food_index() {
            assert!(!segments.contains(&food));
            assert!(engine.grid().get_cell(food).unwrap().is_food());
        }
        assert!(engine.grid().count_matching(Occupant::is_food) <= 1);
    }

    #[test]
    fn test_initial_layout() {
        let engine = engine(10, 10, Boundary::Bounded);
        let expected: Vec<usize> = vec![index(&engine, 5, 2), index(&engine, 5, 1), index(&engine, 5, 0)];
        assert_eq!(engine.segments().iter().copied().collect::<Vec<_>>(), expected);
        assert_eq!(engine.direction(), Direction::Right);
        assert!(!engine.is_running());
        assert!(!engine.is_game_over());
        assert_eq!(engine.score(), 0);
        assert_consistent(&engine);
    }

    #[test]
    fn test_layout_shifts_inward_for_other_headings() {
        let engine = SnakeEngine::new(SnakeConfig {
            rows: 6,
            cols: 6,
            initial_direction: Direction::Up,
            initial_length: 4,
            ..Default::default()
        })
        .unwrap();
        let cells: Vec<(usize, usize)> = engine
            .segments()
            .iter()
            .map(|&s| engine.grid().coords_of(s).unwrap())
            .collect();
        assert_eq!(cells, vec![(2, 1), (3, 1), (4, 1), (5, 1)]);
        assert_consistent(&engine);
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut engine = engine(10, 10, Boundary::Bounded);
        park_food(&mut engine, 5, 3);
        engine.toggle_running();
        assert!(engine.step().unwrap());
        assert_eq!(engine.score(), 1);
        engine.set_direction(Direction::Up);

        engine.reset().unwrap();
        assert_eq!(engine.len(), 3);
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.direction(), Direction::Right);
        assert!(!engine.is_game_over());
        assert!(!engine.is_running());
        assert_eq!(engine.grid().count_matching(Occupant::is_food), 1);
        assert_consistent(&engine);
    }

    #[test]
    fn test_step_requires_running() {
        let mut engine = engine(10, 10, Boundary::Bounded);
        let before = engine.segments().clone();
        assert!(!engine.step().unwrap());
        assert_eq!(engine.segments(), &before);

        assert!(engine.toggle_running());
        park_food(&mut engine, 0, 9);
        assert!(engine.step().unwrap());
        assert!(!engine.toggle_running());
        let paused = engine.segments().clone();
        assert!(!engine.step().unwrap());
        assert_eq!(engine.segments(), &paused);
    }

    #[test]
    fn test_plain_move_keeps_length() {
        let mut engine = engine(10, 10, Boundary::Bounded);
        park_food(&mut engine, 0, 9);
        engine.toggle_running();

        assert!(engine.step().unwrap());
        let cells: Vec<usize> = engine.segments().iter().copied().collect();
        assert_eq!(cells, vec![index(&engine, 5, 3), index(&engine, 5, 2), index(&engine, 5, 1)]);
        assert!(engine.grid().get_cell(index(&engine, 5, 0)).unwrap().is_empty());
        assert_consistent(&engine);
    }

    #[test]
    fn test_eating_grows_and_scores() {
        let mut engine = engine(10, 10, Boundary::Bounded);
        park_food(&mut engine, 5, 3);
        engine.toggle_running();

        assert!(engine.step().unwrap());
        assert_eq!(engine.score(), 1);
        assert_eq!(engine.len(), 4);
        assert_eq!(engine.head(), Some(index(&engine, 5, 3)));
        let food = engine.food_index().unwrap();
        assert!(!engine.segments().contains(&food));
        assert_consistent(&engine);

        park_food(&mut engine, 0, 9);
        assert!(engine.step().unwrap());
        assert_eq!(engine.len(), 4);
        assert_eq!(engine.score(), 1);
        assert_consistent(&engine);
    }

    #[test]
    fn test_wall_collision_kills_snake() {
        let mut engine = engine(10, 10, Boundary::Bounded);
        park_food(&mut engine, 9, 9);
        engine.toggle_running();

        assert!(engine.set_direction(Direction::Up));
        assert!(engine.step().unwrap());
        assert!(engine.set_direction(Direction::Left));
        assert!(engine.step().unwrap());
        assert!(engine.step().unwrap());
        assert_eq!(engine.head(), Some(index(&engine, 4, 0)));

        let before = engine.segments().clone();
        assert!(!engine.step().unwrap());
        assert!(engine.is_game_over());
        assert_eq!(engine.death_cause(), Some(DeathCause::Wall));
        assert_eq!(engine.segments(), &before);

        for (i, &s) in before.iter().enumerate() {
            let segment = engine.grid().get_cell(s).unwrap().as_segment().copied().unwrap();
            assert!(segment.is_dead);
            assert_eq!(segment.is_head, i == 0);
        }

        assert!(!engine.step().unwrap());
        assert_eq!(engine.segments(), &before);
        assert!(engine.toggle_running());
    }

    #[test]
    fn test_toroidal_grid_wraps_instead_of_dying() {
        let mut engine = engine(10, 10, Boundary::Toroidal);
        park_food(&mut engine, 9, 9);
        engine.toggle_running();
        assert!(engine.set_direction(Direction::Up));
        for _ in 0..6 {
            assert!(engine.step().unwrap());
        }
        assert_eq!(engine.head(), Some(index(&engine, 9, 2)));
        assert!(!engine.is_game_over());
        assert_consistent(&engine);
    }

    #[test]
    fn test_self_collision() {
        let mut engine = SnakeEngine::new(SnakeConfig {
            rows: 10,
            cols: 10,
            initial_length: 5,
            ..Default::default()
        })
        .unwrap();
        park_food(&mut engine, 0, 0);
        engine.toggle_running();

        // Head (5,4); curl down, left, then up into the body.
        assert!(engine.set_direction(Direction::Down));
        assert!(engine.step().unwrap());
        assert!(engine.set_direction(Direction::Left));
        assert!(engine.step().unwrap());
        assert!(engine.set_direction(Direction::Up));
        assert!(!engine.step().unwrap());
        assert_eq!(engine.death_cause(), Some(DeathCause::SelfCollision));
        assert_eq!(engine.len(), 5);
    }

    #[test]
    fn test_moving_into_vacating_tail_is_allowed() {
        let mut engine = SnakeEngine::new(SnakeConfig {
            rows: 10,
            cols: 10,
            initial_length: 4,
            ..Default::default()
        })
        .unwrap();
        park_food(&mut engine, 0, 0);
        engine.toggle_running();

        // Head starts at (5,3). After down then left the snake forms a 2x2
        // square whose tail sits right above the head.
        assert!(engine.set_direction(Direction::Down));
        assert!(engine.step().unwrap());
        assert!(engine.set_direction(Direction::Left));
        assert!(engine.step().unwrap());
        assert_eq!(engine.head(), Some(index(&engine, 6, 2)));
        assert_eq!(engine.segments().back(), Some(&index(&engine, 5, 2)));

        assert!(engine.set_direction(Direction::Up));
        assert!(engine.step().unwrap());
        assert!(!engine.is_game_over());
        assert_eq!(engine.head(), Some(index(&engine, 5, 2)));
        assert_eq!(engine.len(), 4);
        assert_consistent(&engine);
    }

    #[test]
    fn test_reversal_is_rejected() {
        let mut engine = engine(10, 10, Boundary::Bounded);
        assert!(!engine.set_direction(Direction::Left));
        assert_eq!(engine.direction(), Direction::Right);

        assert!(engine.set_direction(Direction::Down));
        let head = engine.head().unwrap();
        let shown = engine.grid().get_cell(head).unwrap().as_segment().unwrap().direction;
        assert_eq!(shown, Direction::Down);
        assert!(!engine.set_direction(Direction::Up));
        assert_eq!(engine.direction(), Direction::Down);
    }

    #[test]
    fn test_rotations_follow_head() {
        let mut engine = engine(10, 10, Boundary::Bounded);
        engine.rotate_left();
        assert_eq!(engine.direction(), Direction::Up);
        engine.rotate_right();
        engine.rotate_right();
        assert_eq!(engine.direction(), Direction::Down);
        let head = engine.head().unwrap();
        let shown = engine.grid().get_cell(head).unwrap().as_segment().unwrap().direction;
        assert_eq!(shown, Direction::Down);
    }

    #[test]
    fn test_filling_the_grid_reports_no_free_placement() {
        let mut engine = SnakeEngine::new(SnakeConfig {
            rows: 1,
            cols: 5,
            initial_length: 3,
            ..Default::default()
        })
        .unwrap();
        // Row: body body head _ _
        park_food(&mut engine, 0, 3);
        engine.toggle_running();
        assert!(engine.step().unwrap());
        assert_eq!(engine.food_index(), Some(index(&engine, 0, 4)));

        let result = engine.step();
        assert!(matches!(result, Err(Error::NoFreePlacement)));
        assert_eq!(engine.len(), 5);
        assert_eq!(engine.score(), 2);
        assert_eq!(engine.food_index(), None);
    }

    #[test]
    fn test_place_food_at_rejects_occupied_cells() {
        let mut engine = engine(10, 10, Boundary::Bounded);
        let head = engine.head().unwrap();
        assert!(!engine.place_food_at(head).unwrap());
        assert!(engine.place_food_at(index(&engine, 0, 0)).unwrap());
        assert!(engine.place_food_at(index(&engine, 0, 1)).unwrap());
        assert_eq!(engine.grid().count_matching(Occupant::is_food), 1);
        assert!(engine.place_food_at(1000).is_err());
    }
}
