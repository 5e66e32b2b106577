//! Prey population stored as an arena of slots.
//!
//! Slots are never compacted: a captured prey leaves a tombstone behind so
//! that ids stay valid as indices for the whole run.

use crate::error::{require_positive, ConfigError, SimulationError};
use crate::geometry::Position;
use crate::prey::{Prey, PreyId};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Contents of one population slot
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Slot {
    Alive(Prey),
    /// Tombstone left by a capture
    Captured {
        id: PreyId,
        last_position: Position,
        round: u32,
    },
}

impl Slot {
    pub fn is_alive(&self) -> bool {
        matches!(self, Slot::Alive(_))
    }

    pub fn prey(&self) -> Option<&Prey> {
        match self {
            Slot::Alive(prey) => Some(prey),
            Slot::Captured { .. } => None,
        }
    }
}

/// Ordered prey population
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Population {
    slots: Vec<Slot>,
}

impl Population {
    /// Spawn `count` prey uniformly in `[-limit, limit]²`
    pub fn spawn<R: Rng + ?Sized>(
        count: usize,
        step_size: f64,
        limit: f64,
        rng: &mut R,
    ) -> Result<Self, ConfigError> {
        require_positive("prey.step_size", step_size)?;
        let slots = (0..count)
            .map(|id| Prey::spawn(id, limit, step_size, rng).map(Slot::Alive))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { slots })
    }

    /// Build a population with fixed starting positions, ids in iteration order
    pub fn from_positions<I>(positions: I, step_size: f64) -> Result<Self, ConfigError>
    where
        I: IntoIterator,
        I::Item: Into<Position>,
    {
        let slots = positions
            .into_iter()
            .enumerate()
            .map(|(id, pos)| Prey::new(id, pos.into(), step_size).map(Slot::Alive))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { slots })
    }

    /// Total number of slots, captured ones included
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn get(&self, id: PreyId) -> Option<&Slot> {
        self.slots.get(id)
    }

    /// Live prey in id order
    pub fn live(&self) -> impl Iterator<Item = &Prey> {
        self.slots.iter().filter_map(Slot::prey)
    }

    pub fn alive_count(&self) -> usize {
        self.live().count()
    }

    /// True when no live prey remain
    pub fn is_exhausted(&self) -> bool {
        !self.slots.iter().any(Slot::is_alive)
    }

    /// Ids of captured prey, ascending
    pub fn captured_ids(&self) -> Vec<PreyId> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| !slot.is_alive())
            .map(|(id, _)| id)
            .collect()
    }

    /// Position of every slot; `None` for captured prey
    pub fn positions(&self) -> Vec<Option<Position>> {
        self.slots
            .iter()
            .map(|slot| slot.prey().map(Prey::position))
            .collect()
    }

    /// Move every live prey once, in id order
    pub fn move_all<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for slot in &mut self.slots {
            if let Slot::Alive(prey) = slot {
                prey.move_step(rng);
            }
        }
    }

    /// Replace a live prey with a tombstone, returning its last position
    pub fn capture(&mut self, id: PreyId, round: u32) -> Result<Position, SimulationError> {
        let slot = self.slots.get_mut(id).ok_or_else(|| {
            SimulationError::InvalidState(format!("no prey with id {}", id))
        })?;

        let last_position = match slot {
            Slot::Alive(prey) => prey.position(),
            Slot::Captured { round: when, .. } => {
                return Err(SimulationError::InvalidState(format!(
                    "prey {} was already captured in round {}",
                    id, when
                )));
            }
        };

        *slot = Slot::Captured {
            id,
            last_position,
            round,
        };
        Ok(last_position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn three() -> Population {
        Population::from_positions([(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)], 0.5).unwrap()
    }

    #[test]
    fn test_spawn_population() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let pop = Population::spawn(15, 0.5, 10.0, &mut rng).unwrap();

        assert_eq!(pop.len(), 15);
        assert_eq!(pop.alive_count(), 15);
        for (idx, prey) in pop.live().enumerate() {
            assert_eq!(prey.id(), idx);
        }
    }

    #[test]
    fn test_spawn_rejects_bad_values() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert!(Population::spawn(5, 0.0, 10.0, &mut rng).is_err());
        assert!(Population::spawn(5, 0.5, -1.0, &mut rng).is_err());
    }

    #[test]
    fn test_capture_leaves_tombstone() {
        let mut pop = three();
        let pos = pop.capture(1, 4).unwrap();

        assert_eq!(pos, Position::new(1.0, 1.0));
        assert_eq!(pop.len(), 3);
        assert_eq!(pop.alive_count(), 2);
        assert_eq!(pop.captured_ids(), vec![1]);
        assert_eq!(
            pop.get(1),
            Some(&Slot::Captured {
                id: 1,
                last_position: Position::new(1.0, 1.0),
                round: 4
            })
        );
        assert_eq!(
            pop.positions(),
            vec![Some(Position::new(0.0, 0.0)), None, Some(Position::new(2.0, 2.0))]
        );
        let ids: Vec<_> = pop.live().map(Prey::id).collect();
        assert_eq!(ids, vec![0, 2]);
    }

    #[test]
    fn test_double_capture_is_invalid_state() {
        let mut pop = three();
        pop.capture(0, 1).unwrap();
        assert!(matches!(pop.capture(0, 2), Err(SimulationError::InvalidState(_))));
        assert!(matches!(pop.capture(9, 2), Err(SimulationError::InvalidState(_))));
    }

    #[test]
    fn test_move_all_skips_tombstones() {
        let mut pop = three();
        pop.capture(2, 1).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        pop.move_all(&mut rng);

        assert_eq!(pop.positions()[2], None);
        assert_ne!(pop.positions()[0], Some(Position::new(0.0, 0.0)));
        assert!(!pop.is_exhausted());

        pop.capture(0, 2).unwrap();
        pop.capture(1, 3).unwrap();
        assert!(pop.is_exhausted());
    }
}
