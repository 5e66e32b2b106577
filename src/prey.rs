//! Prey units and their random walk.

use crate::error::{require_positive, ConfigError};
use crate::geometry::Position;
use rand::distributions::{Distribution, Standard};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Stable prey identifier (its slot in the population)
pub type PreyId = usize;

/// Largest spawn limit whose `[-limit, limit]` span is still a finite `f64`
pub const MAX_SPAWN_LIMIT: f64 = f64::MAX / 2.0;

/// Check a spawn limit is positive and its span fits in an `f64`
pub fn check_spawn_limit(limit: f64) -> Result<f64, ConfigError> {
    let limit = require_positive("prey.spawn_limit", limit)?;
    if limit > MAX_SPAWN_LIMIT {
        return Err(ConfigError::new(
            "prey.spawn_limit",
            "must not exceed half of the largest finite f64",
            limit,
        ));
    }
    Ok(limit)
}

/// One of the four axis-aligned moves a prey can make
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Self::Left, Self::Right, Self::Up, Self::Down];

    /// Unit offset `(dx, dy)` for this direction
    pub fn delta(self) -> (f64, f64) {
        match self {
            Self::Left => (-1.0, 0.0),
            Self::Right => (1.0, 0.0),
            Self::Up => (0.0, 1.0),
            Self::Down => (0.0, -1.0),
        }
    }
}

impl Distribution<Direction> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Direction {
        Direction::ALL[rng.gen_range(0..Direction::ALL.len())]
    }
}

/// A prey unit
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Prey {
    id: PreyId,
    position: Position,
    step_size: f64,
}

impl Prey {
    pub fn new(id: PreyId, position: Position, step_size: f64) -> Result<Self, ConfigError> {
        let step_size = require_positive("prey.step_size", step_size)?;
        Ok(Self {
            id,
            position,
            step_size,
        })
    }

    /// Create a prey at a uniformly random position in `[-limit, limit]²`
    pub fn spawn<R: Rng + ?Sized>(
        id: PreyId,
        limit: f64,
        step_size: f64,
        rng: &mut R,
    ) -> Result<Self, ConfigError> {
        let limit = check_spawn_limit(limit)?;
        let x = rng.gen_range(-limit..=limit);
        let y = rng.gen_range(-limit..=limit);
        Self::new(id, Position::new(x, y), step_size)
    }

    pub fn id(&self) -> PreyId {
        self.id
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn step_size(&self) -> f64 {
        self.step_size
    }

    /// Take one random step left, right, up or down
    pub fn move_step<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Direction {
        let direction: Direction = rng.gen();
        self.apply(direction);
        direction
    }

    /// Move one step in a given direction
    pub fn apply(&mut self, direction: Direction) {
        let (dx, dy) = direction.delta();
        self.position = self
            .position
            .translated(dx * self.step_size, dy * self.step_size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_prey_rejects_bad_step() {
        assert!(Prey::new(0, Position::ORIGIN, 0.0).is_err());
        assert!(Prey::new(0, Position::ORIGIN, -0.5).is_err());
        assert!(Prey::new(0, Position::ORIGIN, f64::NAN).is_err());
    }

    #[test]
    fn test_apply_directions() {
        let mut prey = Prey::new(3, Position::new(1.0, 1.0), 0.5).unwrap();
        prey.apply(Direction::Left);
        assert_eq!(prey.position(), Position::new(0.5, 1.0));
        prey.apply(Direction::Up);
        assert_eq!(prey.position(), Position::new(0.5, 1.5));
        prey.apply(Direction::Right);
        prey.apply(Direction::Down);
        assert_eq!(prey.position(), Position::new(1.0, 1.0));
        assert_eq!(prey.id(), 3);
    }

    #[test]
    fn test_move_changes_one_coordinate_by_step() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for &step in &[0.1, 0.5, 1.0, 3.75] {
            let mut prey = Prey::new(0, Position::new(2.0, -3.0), step).unwrap();
            for _ in 0..200 {
                let before = prey.position();
                prey.move_step(&mut rng);
                let after = prey.position();

                let dx = (after.x - before.x).abs();
                let dy = (after.y - before.y).abs();
                assert!(
                    (dx == 0.0 && (dy - step).abs() < 1e-9) || (dy == 0.0 && (dx - step).abs() < 1e-9),
                    "moved by ({}, {}) with step {}",
                    dx,
                    dy,
                    step
                );
            }
        }
    }

    #[test]
    fn test_directions_roughly_uniform() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut counts = [0usize; 4];
        for _ in 0..4000 {
            let dir: Direction = rng.gen();
            let idx = Direction::ALL.iter().position(|&d| d == dir).unwrap();
            counts[idx] += 1;
        }
        for count in counts {
            assert!(count > 850 && count < 1150, "counts: {:?}", counts);
        }
    }

    #[test]
    fn test_spawn_within_limit() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for id in 0..500 {
            let prey = Prey::spawn(id, 10.0, 0.5, &mut rng).unwrap();
            let p = prey.position();
            assert!(p.x >= -10.0 && p.x <= 10.0);
            assert!(p.y >= -10.0 && p.y <= 10.0);
        }
        assert!(Prey::spawn(0, 0.0, 0.5, &mut rng).is_err());
    }

    #[test]
    fn test_spawn_limit_overflowing_span_rejected() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let err = Prey::spawn(0, f64::MAX, 0.5, &mut rng).unwrap_err();
        assert_eq!(err.parameter, "prey.spawn_limit");

        let prey = Prey::spawn(0, MAX_SPAWN_LIMIT, 0.5, &mut rng).unwrap();
        assert!(prey.position().x.is_finite() && prey.position().y.is_finite());
    }
}
