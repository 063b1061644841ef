//! Derives a weighted, directed, multimodal graph of a metropolitan
//! rail network from a frozen geospatial snapshot.
//!
//! The pipeline deduplicates raw point features into canonical
//! stations, assembles route relations into ordered lines, measures
//! metro segments by projecting both endpoints onto the track geometry
//! nearest the first one, and admits walking connections between
//! nearby stations whenever walking cannot possibly be slower than an
//! optimistic train trip. [`build_network`] is the single entry point;
//! it consumes a [`RailSnapshot`] and returns the graph together with
//! a diagnostics report of everything the build skipped or fell back
//! on.

pub mod config;
pub mod diagnostics;
mod error;
pub mod geometry;
pub mod loading;
pub mod model;
pub mod prelude;
mod routing;

pub use config::{NetworkAssumptions, WALK_LINK_THRESHOLD_M, seconds_per_meter};
pub use diagnostics::BuildDiagnostics;
pub use error::Error;
pub use loading::{NetworkBuild, RailSnapshot, build_network};
pub use model::{EdgeMode, GraphEdge, Line, RailGraph, Station, WalkGraph};

/// Dense station identifier assigned in first-seen order, `0..N`.
pub type StationId = usize;
