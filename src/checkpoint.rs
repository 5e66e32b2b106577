//! Checkpoint system for saving and loading simulation state.

use crate::config::Config;
use crate::population::Population;
use crate::predator::Predator;
use crate::record::RoundHistory;
use crate::simulation::Status;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

const MAGIC: &[u8; 4] = b"PRSU";

/// Complete simulation state for checkpointing
#[derive(Clone, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Version for compatibility checking
    pub version: u32,
    /// Rounds completed
    pub round: u32,
    pub config: Config,
    pub population: Population,
    pub predator: Predator,
    pub history: RoundHistory,
    pub status: Status,
    /// RNG mid-stream, so a resumed run continues the same sequence
    pub rng: ChaCha8Rng,
    /// Seed the run started from
    pub random_seed: u64,
}

impl Checkpoint {
    /// Current checkpoint version
    pub const VERSION: u32 = 1;

    #[allow(clippy::too_many_arguments)]
    pub fn new(
        round: u32,
        config: Config,
        population: Population,
        predator: Predator,
        history: RoundHistory,
        status: Status,
        rng: ChaCha8Rng,
        random_seed: u64,
    ) -> Self {
        Self {
            version: Self::VERSION,
            round,
            config,
            population,
            predator,
            history,
            status,
            rng,
            random_seed,
        }
    }

    /// Save checkpoint to binary file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), CheckpointError> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);

        writer.write_all(MAGIC)?;
        bincode::serialize_into(&mut writer, self)?;
        writer.flush()?;

        Ok(())
    }

    /// Load checkpoint from binary file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CheckpointError> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);

        let mut magic = [0u8; 4];
        reader.read_exact(&mut magic)?;
        if &magic != MAGIC {
            return Err(CheckpointError::BadMagic(magic));
        }

        let mut buffer = Vec::new();
        reader.read_to_end(&mut buffer)?;
        let checkpoint: Checkpoint = bincode::deserialize(&buffer)?;

        if checkpoint.version != Self::VERSION {
            return Err(CheckpointError::UnsupportedVersion(checkpoint.version));
        }

        Ok(checkpoint)
    }

    /// Get approximate size in bytes
    pub fn size_bytes(&self) -> usize {
        bincode::serialized_size(self).unwrap_or(0) as usize + MAGIC.len()
    }
}

/// Errors that can occur during checkpoint operations
#[derive(Debug)]
pub enum CheckpointError {
    Io(std::io::Error),
    Encoding(bincode::Error),
    /// File does not start with the checkpoint magic bytes
    BadMagic([u8; 4]),
    /// Written by an incompatible checkpoint version
    UnsupportedVersion(u32),
    /// Directory holds no checkpoint to resume from
    NotFound(PathBuf),
}

impl std::fmt::Display for CheckpointError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "checkpoint I/O failed: {}", e),
            Self::Encoding(e) => write!(f, "checkpoint encoding failed: {}", e),
            Self::BadMagic(found) => write!(f, "not a pursuit checkpoint (magic {:?})", found),
            Self::UnsupportedVersion(found) => write!(
                f,
                "checkpoint version {} is not supported (expected {})",
                found,
                Checkpoint::VERSION
            ),
            Self::NotFound(dir) => write!(f, "no checkpoint found in {:?}", dir),
        }
    }
}

impl std::error::Error for CheckpointError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Encoding(e) => Some(&**e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CheckpointError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<bincode::Error> for CheckpointError {
    fn from(e: bincode::Error) -> Self {
        Self::Encoding(e)
    }
}

const PERIODIC_PREFIX: &str = "checkpoint_";
const FINAL_NAME: &str = "checkpoint_final.bin";

/// Round encoded in a periodic checkpoint file name (`checkpoint_00000042.bin`)
fn periodic_round(name: &str) -> Option<u32> {
    name.strip_prefix(PERIODIC_PREFIX)?
        .strip_suffix(".bin")?
        .parse()
        .ok()
}

/// Saves checkpoints every `interval` rounds and prunes old ones
pub struct CheckpointManager {
    pub base_dir: PathBuf,
    /// Rounds between checkpoints, 0 disables saving
    pub interval: u32,
    /// Maximum periodic checkpoints to keep
    pub max_checkpoints: usize,
    last_checkpoint: u32,
}

impl CheckpointManager {
    pub fn new<P: Into<PathBuf>>(base_dir: P, interval: u32, max_checkpoints: usize) -> Self {
        Self {
            base_dir: base_dir.into(),
            interval,
            max_checkpoints,
            last_checkpoint: 0,
        }
    }

    /// Check if a checkpoint should be saved after `round`
    pub fn should_save(&self, round: u32) -> bool {
        self.interval > 0 && round > 0 && round % self.interval == 0 && round != self.last_checkpoint
    }

    pub fn checkpoint_path(&self, round: u32) -> PathBuf {
        self.base_dir.join(format!("{}{:08}.bin", PERIODIC_PREFIX, round))
    }

    /// Where the end-of-run checkpoint goes
    pub fn final_path(&self) -> PathBuf {
        self.base_dir.join(FINAL_NAME)
    }

    /// Save a periodic checkpoint, then prune beyond `max_checkpoints`
    pub fn save(&mut self, checkpoint: &Checkpoint) -> Result<PathBuf, CheckpointError> {
        std::fs::create_dir_all(&self.base_dir)?;
        let path = self.checkpoint_path(checkpoint.round);
        checkpoint.save(&path)?;
        self.last_checkpoint = checkpoint.round;

        let mut saved = self.periodic_checkpoints()?;
        let excess = saved.len().saturating_sub(self.max_checkpoints);
        for (_, old) in saved.drain(..excess) {
            std::fs::remove_file(old)?;
        }

        Ok(path)
    }

    /// Periodic checkpoints in the directory, oldest round first
    fn periodic_checkpoints(&self) -> Result<Vec<(u32, PathBuf)>, CheckpointError> {
        let mut found: Vec<(u32, PathBuf)> = std::fs::read_dir(&self.base_dir)?
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let round = periodic_round(&entry.file_name().to_string_lossy())?;
                Some((round, entry.path()))
            })
            .collect();
        found.sort_by_key(|(round, _)| *round);
        Ok(found)
    }

    /// Periodic checkpoint with the highest round
    pub fn find_latest(&self) -> Option<PathBuf> {
        self.periodic_checkpoints().ok()?.pop().map(|(_, path)| path)
    }

    /// Resolve a resume location: a file is used as is, a directory yields
    /// its final checkpoint or else its latest periodic one
    pub fn locate<P: AsRef<Path>>(path: P) -> Result<PathBuf, CheckpointError> {
        let path = path.as_ref();
        if !path.is_dir() {
            return Ok(path.to_path_buf());
        }

        let manager = Self::new(path, 0, 0);
        let final_path = manager.final_path();
        if final_path.is_file() {
            return Ok(final_path);
        }
        manager
            .find_latest()
            .ok_or_else(|| CheckpointError::NotFound(path.to_path_buf()))
    }
}
