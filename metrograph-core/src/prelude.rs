//! Convenience re-exports for downstream consumers.

pub use crate::config::{NetworkAssumptions, WALK_LINK_THRESHOLD_M, seconds_per_meter};
pub use crate::diagnostics::{BuildDiagnostics, RouteOutcome};
pub use crate::loading::{NetworkBuild, RailSnapshot, build_network};
pub use crate::{Error, StationId};
pub use crate::model::{EdgeMode, GraphEdge, Line, RailGraph, Station, WalkGraph};
