//! # pursuit
//!
//! Discrete-time predator/prey pursuit on the plane.
//!
//! A herd of prey random-walk in axis-aligned steps while a single predator
//! chases the nearest one, capturing it once it is within one step. A run
//! ends when every prey has been captured or the round limit is reached.
//!
//! ## Quick Start
//!
//! ```rust
//! use pursuit::{Config, Simulation};
//!
//! let mut config = Config::default();
//! config.prey.count = 5;
//! config.simulation.max_rounds = 20;
//!
//! let mut sim = Simulation::new_with_seed(config, 42).unwrap();
//! let reason = sim.run().unwrap();
//!
//! println!("Stopped after {} rounds: {}", sim.round, reason);
//! println!("Alive prey: {}", sim.alive_count());
//! ```
//!
//! ## Checkpoints
//!
//! ```rust,no_run
//! use pursuit::{Config, Simulation};
//! use pursuit::checkpoint::Checkpoint;
//!
//! let mut sim = Simulation::new_with_seed(Config::default(), 7).unwrap();
//! sim.step().unwrap();
//!
//! sim.create_checkpoint().save("checkpoint.bin").unwrap();
//! let restored = Simulation::from_checkpoint(Checkpoint::load("checkpoint.bin").unwrap());
//! ```

pub mod checkpoint;
pub mod config;
pub mod error;
pub mod export;
pub mod geometry;
pub mod population;
pub mod predator;
pub mod prey;
pub mod record;
pub mod simulation;

// Re-export main types
pub use config::Config;
pub use error::{ConfigError, SimulationError};
pub use geometry::{distance, squared_distance, Position};
pub use population::{Population, Slot};
pub use predator::Predator;
pub use prey::{Direction, Prey, PreyId};
pub use record::{RoundHistory, RoundRecord};
pub use simulation::{Simulation, Status, TerminationReason};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_quick_simulation() {
        let mut config = Config::default();
        config.simulation.max_rounds = 100;

        let mut sim = Simulation::new(config).unwrap();
        sim.run().unwrap();

        assert!(sim.is_terminated());
        assert!(sim.round <= 100);
    }
}
