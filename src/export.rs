//! Export of round-by-round results for analysis in external tools.
//!
//! Readers of the wolf/sheep layout need this renaming:
//!
//! | wolf/sheep layout  | here               |
//! |--------------------|--------------------|
//! | `pos.json`         | `positions.json`   |
//! | `wolf_pos`         | `predator_pos`     |
//! | `sheep_pos`        | `prey_pos`         |
//! | `alive_sheep_no`   | `alive_prey_no`    |
//!
//! `round_no` is unchanged and a `null` entry in `prey_pos` still marks a
//! captured prey. Both file names can be set with `output.positions_file`
//! and `output.alive_file`.

use crate::record::RoundHistory;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Result, Write};
use std::path::Path;

/// One round as written to the positions file
#[derive(Serialize)]
struct PositionsEntry {
    round_no: u32,
    predator_pos: [f64; 2],
    prey_pos: Vec<Option<[f64; 2]>>,
}

/// Write every round's positions as a pretty-printed JSON array
pub fn export_positions_json<P: AsRef<Path>>(history: &RoundHistory, path: P) -> Result<()> {
    let entries: Vec<PositionsEntry> = history
        .records
        .iter()
        .map(|r| PositionsEntry {
            round_no: r.round,
            predator_pos: r.predator.to_array(),
            prey_pos: r.prey.iter().map(|p| p.map(|p| p.to_array())).collect(),
        })
        .collect();

    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, &entries)?;
    writeln!(writer)?;
    writer.flush()
}

/// Write the alive count of every round as CSV
pub fn export_alive_csv<P: AsRef<Path>>(history: &RoundHistory, path: P) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);

    writeln!(writer, "round_no,alive_prey_no")?;
    for (round, alive) in history.alive_series() {
        writeln!(writer, "{},{}", round, alive)?;
    }

    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Position;
    use crate::record::RoundRecord;

    fn history() -> RoundHistory {
        let mut history = RoundHistory::new();
        history.record(RoundRecord {
            round: 1,
            predator: Position::new(1.0, 0.0),
            prey: vec![Some(Position::new(2.5, -1.0)), Some(Position::new(9.0, 9.0))],
            alive: 2,
            target: 0,
            captured: false,
        });
        history.record(RoundRecord {
            round: 2,
            predator: Position::new(2.5, -1.0),
            prey: vec![None, Some(Position::new(9.0, 9.5))],
            alive: 1,
            target: 0,
            captured: true,
        });
        history
    }

    fn temp_file(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("pursuit_{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_positions_json_layout() {
        let path = temp_file("positions.json");
        export_positions_json(&history(), &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        let rounds = value.as_array().unwrap();

        assert_eq!(rounds.len(), 2);
        assert_eq!(rounds[0]["round_no"], 1);
        assert_eq!(rounds[0]["predator_pos"], serde_json::json!([1.0, 0.0]));
        assert_eq!(rounds[1]["prey_pos"], serde_json::json!([null, [9.0, 9.5]]));

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_positions_entry_keys() {
        let path = temp_file("positions_keys.json");
        export_positions_json(&history(), &path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        for entry in value.as_array().unwrap() {
            let mut keys: Vec<&str> = entry.as_object().unwrap().keys().map(String::as_str).collect();
            keys.sort_unstable();
            assert_eq!(keys, ["predator_pos", "prey_pos", "round_no"]);
        }

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_alive_csv() {
        let path = temp_file("alive.csv");
        export_alive_csv(&history(), &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "round_no,alive_prey_no\n1,2\n2,1\n");

        std::fs::remove_file(&path).ok();
    }
}
