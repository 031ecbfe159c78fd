//! JSON export of a run

use crate::error::{Error, Result};
use crate::prune::TrainReport;
use std::fs;
use std::path::Path;

/// Write `report` (every epoch record plus the best one) as pretty JSON.
pub fn write_records<P: AsRef<Path>>(path: P, report: &TrainReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report)
        .map_err(|e| Error::Serialization(format!("Failed to encode records: {e}")))?;
    fs::write(path, json)?;
    Ok(())
}

/// Read a report written by [`write_records`].
pub fn read_records<P: AsRef<Path>>(path: P) -> Result<TrainReport> {
    let json = fs::read_to_string(path)?;
    serde_json::from_str(&json)
        .map_err(|e| Error::Serialization(format!("Failed to decode records: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prune::EpochRecord;
    use crate::train::Evaluation;

    #[test]
    fn test_write_then_read() {
        let record = EpochRecord {
            epoch: 0,
            active: 10,
            upper_bound: 20,
            train: Evaluation { loss: 0.5, accuracy: 0.75 },
            test: Evaluation { loss: 0.625, accuracy: 0.5 },
            heldback: Evaluation { loss: 0.5, accuracy: 0.75 },
            keep_fraction: Some(0.4),
            zeta: None,
        };
        let report = TrainReport {
            strategy: "occam".to_string(),
            upper_bound: 20,
            best: record.clone(),
            records: vec![record],
        };

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.json");
        write_records(&path, &report).unwrap();
        assert_eq!(read_records(&path).unwrap(), report);
    }

    #[test]
    fn test_read_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "not json").unwrap();
        assert!(matches!(read_records(&path), Err(Error::Serialization(_))));
    }
}
