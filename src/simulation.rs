//! Simulation engine - the round loop.

use crate::checkpoint::Checkpoint;
use crate::config::Config;
use crate::error::SimulationError;
use crate::population::Population;
use crate::predator::Predator;
use crate::record::{RoundHistory, RoundRecord};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerminationReason {
    AllCaptured,
    RoundLimitReached,
}

impl fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllCaptured => write!(f, "all prey captured"),
            Self::RoundLimitReached => write!(f, "round limit reached"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Running,
    Terminated(TerminationReason),
}

/// The pursuit simulation
pub struct Simulation {
    pub population: Population,
    pub predator: Predator,

    /// Rounds completed so far
    pub round: u32,
    pub config: Config,
    pub history: RoundHistory,

    status: Status,

    // Random number generator (seeded for reproducibility)
    rng: ChaCha8Rng,
    seed: u64,
}

impl Simulation {
    /// Create a simulation with the given configuration.
    ///
    /// Uses `config.simulation.seed` when set, a random seed otherwise.
    pub fn new(config: Config) -> Result<Self, SimulationError> {
        let seed = config
            .simulation
            .seed
            .unwrap_or_else(|| rand::thread_rng().gen());
        Self::new_with_seed(config, seed)
    }

    /// Create a simulation with a specific seed for reproducibility
    pub fn new_with_seed(config: Config, seed: u64) -> Result<Self, SimulationError> {
        config.validate()?;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let population = Population::spawn(
            config.prey.count,
            config.prey.step_size,
            config.prey.spawn_limit,
            &mut rng,
        )?;
        Self::assemble(config, population, rng, seed)
    }

    /// Create a simulation over a prepared population.
    ///
    /// `config.prey` spawning values are not used; the predator still starts
    /// at the origin.
    pub fn with_population(
        config: Config,
        population: Population,
        seed: u64,
    ) -> Result<Self, SimulationError> {
        config.validate()?;
        Self::assemble(config, population, ChaCha8Rng::seed_from_u64(seed), seed)
    }

    fn assemble(
        config: Config,
        population: Population,
        rng: ChaCha8Rng,
        seed: u64,
    ) -> Result<Self, SimulationError> {
        let predator = Predator::new(config.predator.step_size)?;
        log::info!(
            "Simulation created: {} prey, {} max rounds, seed {}",
            population.len(),
            config.simulation.max_rounds,
            seed
        );

        Ok(Self {
            population,
            predator,
            round: 0,
            config,
            history: RoundHistory::new(),
            status: Status::Running,
            rng,
            seed,
        })
    }

    /// Restore a simulation from a checkpoint, RNG stream included
    pub fn from_checkpoint(checkpoint: Checkpoint) -> Self {
        Self {
            population: checkpoint.population,
            predator: checkpoint.predator,
            round: checkpoint.round,
            config: checkpoint.config,
            history: checkpoint.history,
            status: checkpoint.status,
            rng: checkpoint.rng,
            seed: checkpoint.random_seed,
        }
    }

    /// Create checkpoint of current state
    pub fn create_checkpoint(&self) -> Checkpoint {
        Checkpoint::new(
            self.round,
            self.config.clone(),
            self.population.clone(),
            self.predator.clone(),
            self.history.clone(),
            self.status,
            self.rng.clone(),
            self.seed,
        )
    }

    /// Run one round.
    ///
    /// Returns the round's record, or `None` when the simulation has already
    /// terminated (including the case where no live prey remain).
    pub fn step(&mut self) -> Result<Option<RoundRecord>, SimulationError> {
        if self.is_terminated() {
            return Ok(None);
        }
        if self.population.is_exhausted() {
            self.terminate(TerminationReason::AllCaptured);
            return Ok(None);
        }
        if self.round >= self.config.simulation.max_rounds {
            self.terminate(TerminationReason::RoundLimitReached);
            return Ok(None);
        }

        let round = self.round + 1;

        // Phase 1: all live prey move, in id order
        self.population.move_all(&mut self.rng);

        // Phase 2: predator acts once
        let target = self.predator.act(&mut self.population, round)?;
        self.round = round;

        // Phase 3: record
        let record = RoundRecord {
            round,
            predator: self.predator.position(),
            prey: self.population.positions(),
            alive: self.population.alive_count(),
            target,
            captured: self.predator.is_sated(),
        };
        self.history.record(record.clone());

        // Phase 4: termination
        if record.alive == 0 {
            self.terminate(TerminationReason::AllCaptured);
        } else if round >= self.config.simulation.max_rounds {
            self.terminate(TerminationReason::RoundLimitReached);
        }

        Ok(Some(record))
    }

    /// Run until termination
    pub fn run(&mut self) -> Result<TerminationReason, SimulationError> {
        self.run_with_callback(|_, _| {})
    }

    /// Run until termination, calling `callback` after every completed round
    pub fn run_with_callback<F>(&mut self, mut callback: F) -> Result<TerminationReason, SimulationError>
    where
        F: FnMut(&Simulation, &RoundRecord),
    {
        loop {
            match self.step()? {
                Some(record) => callback(&*self, &record),
                None => break,
            }
        }

        self.termination_reason().ok_or_else(|| {
            SimulationError::InvalidState("round loop exited while still running".to_string())
        })
    }

    /// Raise the round limit by `extra` rounds, reopening a run that stopped
    /// at the previous limit
    pub fn extend_round_limit(&mut self, extra: u32) {
        self.config.simulation.max_rounds = self.round.saturating_add(extra);
        if extra > 0 && self.status == Status::Terminated(TerminationReason::RoundLimitReached) {
            self.status = Status::Running;
        }
    }

    fn terminate(&mut self, reason: TerminationReason) {
        log::info!("Simulation terminated after {} rounds: {}", self.round, reason);
        self.status = Status::Terminated(reason);
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_terminated(&self) -> bool {
        matches!(self.status, Status::Terminated(_))
    }

    pub fn termination_reason(&self) -> Option<TerminationReason> {
        match self.status {
            Status::Running => None,
            Status::Terminated(reason) => Some(reason),
        }
    }

    /// Number of live prey
    pub fn alive_count(&self) -> usize {
        self.population.alive_count()
    }

    /// Get seed for reproducibility
    pub fn seed(&self) -> u64 {
        self.seed
    }
}
