//! Aging entities for the Game of Life.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// An aging inhabitant of a Conway cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Human {
    full_name: String,
    nationality: String,
    greetings: String,
    majority: u32,
    age: u32,
    life_expectancy: Option<u32>,
}

impl Human {
    /// Age past which natural death becomes possible
    pub const LIFE_EXPECTANCY: u32 = 50;
    pub const MAJORITY: u32 = 18;

    fn new(first_names: &[&str], last_name: &str, alpha_code2: &str, greetings: &str) -> Self {
        let mut parts: Vec<&str> = first_names.to_vec();
        parts.push(last_name);

        Self {
            full_name: parts.join(" "),
            nationality: alpha_code2.to_uppercase(),
            greetings: greetings.to_string(),
            majority: Self::MAJORITY,
            age: 0,
            life_expectancy: Some(Self::LIFE_EXPECTANCY),
        }
    }

    /// Replace the life expectancy; `None` disables natural death.
    pub fn with_life_expectancy(mut self, life_expectancy: Option<u32>) -> Self {
        self.life_expectancy = life_expectancy;
        self
    }

    pub fn with_majority(mut self, majority: u32) -> Self {
        self.majority = majority;
        self
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn nationality(&self) -> &str {
        &self.nationality
    }

    pub fn greetings(&self) -> &str {
        &self.greetings
    }

    pub fn majority(&self) -> u32 {
        self.majority
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn life_expectancy(&self) -> Option<u32> {
        self.life_expectancy
    }

    pub fn ageing(&mut self, years: u32) {
        self.age = self.age.saturating_add(years);
    }

    pub fn is_adult(&self) -> bool {
        self.age >= self.majority
    }

    /// Probability of dying of old age this step: zero up to the life
    /// expectancy, then one percent per extra year.
    pub fn natural_death_chance(&self) -> f64 {
        match self.life_expectancy {
            Some(limit) if self.age > limit => f64::from(self.age - limit) / 100.0,
            _ => 0.0,
        }
    }

    pub fn info(&self) -> String {
        let status = if self.is_adult() { "adult" } else { "minor" };
        format!(
            "Identity: {} - Nationality: {} - Age: {} years ({})",
            self.full_name, self.nationality, self.age, status
        )
    }

    /// What this human says, depending on how old they are.
    pub fn shout<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        match self.age {
            0 => "Ouin ouin".to_string(),
            1 => "Areuh baba gaga".to_string(),
            2 => {
                let mut babbling: Vec<char> = self.greetings.chars().collect();
                babbling.shuffle(rng);
                babbling.into_iter().collect()
            }
            3 => self.greetings.clone(),
            _ => format!(
                "My name is {} and my nationality is {}. {}!",
                self.full_name,
                self.nationality.to_lowercase(),
                self.greetings
            ),
        }
    }
}

/// Counts the humans created through it.
///
/// The counter lives with whoever owns the census (an engine or a test) and
/// only moves through [`Census::spawn`] and [`Census::reset_counters`].
#[derive(Debug, Clone, Default)]
pub struct Census {
    created: u64,
}

impl Census {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(
        &mut self,
        first_names: &[&str],
        last_name: &str,
        alpha_code2: &str,
        greetings: &str,
    ) -> Human {
        self.created += 1;
        Human::new(first_names, last_name, alpha_code2, greetings)
    }

    /// The anonymous inhabitant born by the Game of Life rules
    pub fn spawn_default(&mut self) -> Human {
        self.spawn(&["Conway"], "Being", "XX", "Hello")
    }

    pub fn created(&self) -> u64 {
        self.created
    }

    pub fn reset_counters(&mut self) {
        self.created = 0;
    }
}
