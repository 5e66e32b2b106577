//! The predator: target selection, pursuit and capture.

use crate::error::{require_positive, ConfigError, SimulationError};
use crate::geometry::{distance, squared_distance, Position};
use crate::population::Population;
use crate::prey::{Prey, PreyId};
use serde::{Deserialize, Serialize};

/// The single pursuing unit
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Predator {
    position: Position,
    step_size: f64,
    sated: bool,
}

impl Predator {
    /// Create a predator at the origin
    pub fn new(step_size: f64) -> Result<Self, ConfigError> {
        Self::at(Position::ORIGIN, step_size)
    }

    /// Create a predator at an arbitrary position
    pub fn at(position: Position, step_size: f64) -> Result<Self, ConfigError> {
        Ok(Self {
            position,
            step_size: require_positive("predator.step_size", step_size)?,
            sated: false,
        })
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn step_size(&self) -> f64 {
        self.step_size
    }

    /// Whether the predator captured a prey during its last `act`
    pub fn is_sated(&self) -> bool {
        self.sated
    }

    /// Nearest live prey. Equidistant prey resolve to the lowest id.
    pub fn select_target<'a>(&self, population: &'a Population) -> Result<&'a Prey, SimulationError> {
        let mut best: Option<(&Prey, f64)> = None;
        for prey in population.live() {
            let d2 = squared_distance(self.position, prey.position());
            // strict `<` keeps the earliest of equidistant prey
            if best.map_or(true, |(_, best_d2)| d2 < best_d2) {
                best = Some((prey, d2));
            }
        }

        best.map(|(prey, _)| prey).ok_or_else(|| {
            SimulationError::InvalidState("target selection with no live prey".to_string())
        })
    }

    /// Move one full step toward `target`
    pub fn step_toward(&mut self, target: Position) -> Result<(), SimulationError> {
        let d = distance(self.position, target);
        if d == 0.0 {
            return Err(SimulationError::InvalidState(
                "predator step toward a target at its own position".to_string(),
            ));
        }

        self.position = self.position.offset_toward(target, d, self.step_size);
        Ok(())
    }

    /// Act for one round: capture the nearest prey if it is within one step,
    /// otherwise chase it. Returns the target's id either way.
    pub fn act(&mut self, population: &mut Population, round: u32) -> Result<PreyId, SimulationError> {
        self.sated = false;

        let target = self.select_target(population)?;
        let (target_id, target_pos) = (target.id(), target.position());
        let d = distance(self.position, target_pos);

        if d <= self.step_size {
            let last_position = population.capture(target_id, round)?;
            self.position = last_position;
            self.sated = true;
            log::info!(
                "Round {}: predator captured prey {} at ({:.3}, {:.3})",
                round,
                target_id,
                last_position.x,
                last_position.y
            );
        } else {
            self.step_toward(target_pos)?;
            log::debug!(
                "Round {}: predator chasing prey {} (distance {:.3})",
                round,
                target_id,
                d
            );
        }

        Ok(target_id)
    }
}
