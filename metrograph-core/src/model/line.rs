use serde::{Deserialize, Serialize};

use crate::StationId;

/// Ordered service line over canonical station ids.
///
/// Adjacent entries are physically connected; the sequence always has
/// at least two entries. Lines are keyed externally by their short
/// identifier (`ref` tag, or name when no `ref` exists).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    pub name: String,
    pub stations: Vec<StationId>,
}
