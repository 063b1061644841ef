use thiserror::Error;

use crate::StationId;

#[derive(Error, Debug)]
pub enum Error {
    #[error("No usable track geometry to measure metro segment {from} -> {to}")]
    NoTrackGeometry { from: StationId, to: StationId },
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Snapshot parse error: {0}")]
    SnapshotError(#[from] serde_json::Error),
}
