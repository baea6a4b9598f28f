//! Game of Life with aging inhabitants.

use crate::grid::Grid;
use crate::human::{Census, Human};
use crate::occupant::Occupant;
use gridlife_core::{Boundary, ConwayConfig, Error, Result, WIND_ROSE};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use rand::SeedableRng;
use tracing::{debug, info, instrument};

/// What a single step changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepSummary {
    pub births: usize,
    /// Deaths from under- or overpopulation
    pub deaths: usize,
    /// Deaths from old age
    pub natural_deaths: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Change {
    Born,
    Die,
}

pub struct ConwayEngine {
    grid: Grid<Occupant>,
    census: Census,
    config: ConwayConfig,
    rng: ChaCha8Rng,
    step_count: u64,
}

impl ConwayEngine {
    pub fn new(config: ConwayConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            grid: Grid::new(config.rows, config.cols),
            census: Census::new(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
            step_count: 0,
        })
    }

    pub fn grid(&self) -> &Grid<Occupant> {
        &self.grid
    }

    pub fn config(&self) -> &ConwayConfig {
        &self.config
    }

    pub fn census(&self) -> &Census {
        &self.census
    }

    pub fn census_mut(&mut self) -> &mut Census {
        &mut self.census
    }

    /// Number of completed steps since creation or the last reset
    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    pub fn population(&self) -> usize {
        self.grid.count_matching(Occupant::is_entity)
    }

    /// A fresh default inhabitant using the configured life expectancy
    pub fn spawn_entity(&mut self) -> Human {
        self.census
            .spawn_default()
            .with_life_expectancy(self.config.life_expectancy)
    }

    /// Place `human` on an empty cell. Returns `false` if the cell is taken.
    pub fn born(&mut self, index: usize, human: Human) -> Result<bool> {
        self.grid.born(index, Occupant::Entity(human))
    }

    /// Empty an occupied cell. Returns `false` if it was already empty.
    pub fn die(&mut self, index: usize) -> Result<bool> {
        self.grid.die(index)
    }

    /// Flip a cell between empty and a default inhabitant. Returns whether
    /// the cell is occupied afterwards.
    pub fn toggle(&mut self, index: usize) -> Result<bool> {
        if self.grid.is_free(index)? {
            let human = self.spawn_entity();
            self.born(index, human)
        } else {
            self.die(index)?;
            Ok(false)
        }
    }

    /// Try `density * cells` births on uniformly drawn cells; draws landing
    /// on an occupied cell are lost. Returns the number of births.
    pub fn populate_random(&mut self, density: f64) -> Result<usize> {
        if !(0.0..=1.0).contains(&density) {
            return Err(Error::InvalidConfig(format!(
                "density {} outside [0, 1]",
                density
            )));
        }

        let len = self.grid.len();
        let attempts = (density * len as f64) as usize;
        let mut births = 0;

        for _ in 0..attempts {
            let index = self.rng.gen_range(0..len);
            if self.grid.is_free(index)? {
                let human = self.spawn_entity();
                if self.born(index, human)? {
                    births += 1;
                }
            }
        }

        debug!(attempts, births, "Populated grid at random");
        Ok(births)
    }

    /// Advance one generation.
    ///
    /// Every inhabitant ages, then old ones may die naturally, then the
    /// birth/survival rules run against the occupancy at the start of the
    /// step. All changes are applied together once every cell is decided.
    #[instrument(skip(self), fields(step = self.step_count))]
    pub fn step(&mut self) -> Result<StepSummary> {
        let mut natural = vec![false; self.grid.len()];
        for (index, occupant) in self.grid.iter_mut() {
            if let Occupant::Entity(human) = occupant {
                human.ageing(1);
                let chance = human.natural_death_chance();
                if chance > 0.0 && self.rng.gen::<f64>() < chance {
                    natural[index] = true;
                }
            }
        }

        let mut summary = StepSummary::default();
        let mut changes = Vec::new();

        for (index, &dies_of_age) in natural.iter().enumerate() {
            if dies_of_age {
                changes.push((index, Change::Die));
                summary.natural_deaths += 1;
                continue;
            }

            let (row, col) = self.grid.coords_of(index)?;
            let neighbors = self.grid.count_neighbors(
                row,
                col,
                &WIND_ROSE,
                Boundary::Bounded,
                Occupant::is_entity,
            )?;

            match (self.grid.get_cell(index)?.is_entity(), neighbors) {
                (true, n) if !(2..=3).contains(&n) => {
                    changes.push((index, Change::Die));
                    summary.deaths += 1;
                }
                (false, 3) => {
                    changes.push((index, Change::Born));
                    summary.births += 1;
                }
                _ => {}
            }
        }

        for (index, change) in changes {
            match change {
                Change::Born => {
                    let human = self.spawn_entity();
                    self.grid.set_cell(index, Occupant::Entity(human))?;
                }
                Change::Die => {
                    self.grid.set_cell(index, Occupant::Empty)?;
                }
            }
        }

        self.step_count += 1;
        debug!(
            births = summary.births,
            deaths = summary.deaths,
            natural_deaths = summary.natural_deaths,
            population = self.population(),
            "Generation complete"
        );

        Ok(summary)
    }

    /// Empty every cell and restart the step counter. The census is kept.
    pub fn reset(&mut self) {
        self.grid.clear();
        self.step_count = 0;
        info!("Conway grid reset");
    }
}
