//! Build-quality reporting for the skip-on-error pipeline stages.
//!
//! Every condition the build absorbs silently is counted here instead
//! of being discarded, so data quality is observable without
//! re-deriving it from the output graph.

use serde::Serialize;

/// What became of a single route feature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RouteOutcome {
    Included {
        source_id: i64,
        line_id: String,
        resolved: usize,
        /// Membership entries that did not map to a known station and
        /// were dropped from the sequence.
        dropped_members: usize,
    },
    SkippedNoIdentifier {
        source_id: i64,
    },
    SkippedMalformedMembers {
        source_id: i64,
        line_id: String,
    },
    SkippedTooShort {
        source_id: i64,
        line_id: String,
        resolved: usize,
    },
}

/// Station registry counters.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct RegistryStats {
    pub features: usize,
    /// Later occurrences of an already-seen source id.
    pub duplicates: usize,
    /// Non-point geometries collapsed to their centroid.
    pub centroid_fallbacks: usize,
    /// Stations that received a `station_<id>` placeholder name.
    pub synthesized_names: usize,
    /// Features whose geometry yielded no usable coordinate at all.
    pub dropped_geometries: usize,
}

/// Pedestrian network assembly counters.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct PedestrianStats {
    pub nodes: usize,
    pub edges: usize,
    pub duplicate_nodes: usize,
    /// Edges referencing unknown nodes or carrying non-finite/negative lengths.
    pub dropped_edges: usize,
}

/// Walking-connection scan counters over all station pairs.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct WalkLinkStats {
    /// Unordered station pairs enumerated.
    pub pairs: usize,
    /// Pairs past the great-circle prefilter threshold.
    pub beyond_threshold: usize,
    /// Pairs with at least one station lacking a pedestrian anchor.
    pub unanchored: usize,
    /// Pairs whose anchors connect only beyond the admissibility
    /// horizon, or not at all.
    pub no_path: usize,
    /// Pairs routed successfully but rejected by the admissibility rule.
    pub rejected: usize,
    pub linked: usize,
}

impl WalkLinkStats {
    pub(crate) fn merged(self, other: &Self) -> Self {
        Self {
            pairs: self.pairs + other.pairs,
            beyond_threshold: self.beyond_threshold + other.beyond_threshold,
            unanchored: self.unanchored + other.unanchored,
            no_path: self.no_path + other.no_path,
            rejected: self.rejected + other.rejected,
            linked: self.linked + other.linked,
        }
    }
}

/// Everything the build skipped or fell back on.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BuildDiagnostics {
    pub registry: RegistryStats,
    pub routes: Vec<RouteOutcome>,
    /// Track features without a usable linear geometry.
    pub discarded_tracks: usize,
    pub pedestrian: PedestrianStats,
    pub walk: WalkLinkStats,
}

impl BuildDiagnostics {
    pub fn lines_included(&self) -> usize {
        self.routes
            .iter()
            .filter(|outcome| matches!(outcome, RouteOutcome::Included { .. }))
            .count()
    }

    pub fn routes_skipped(&self) -> usize {
        self.routes.len() - self.lines_included()
    }
}
