//! Line-topology assembly from route relations.

use hashbrown::HashMap;
use log::debug;

use crate::StationId;
use crate::diagnostics::RouteOutcome;
use crate::loading::snapshot::RouteFeature;
use crate::model::{Line, Station};

/// Resolve each route's ordered membership list into a named line.
///
/// Members that do not map to a known station are dropped from the
/// sequence rather than treated as gaps, which can join two physically
/// non-adjacent stations. That is a documented property of the source
/// data handling, not something to repair here.
pub(crate) fn assemble_lines(
    routes: &[RouteFeature],
    stations: &[Station],
) -> (HashMap<String, Line>, Vec<RouteOutcome>) {
    let source_to_station: HashMap<i64, StationId> = stations
        .iter()
        .map(|station| (station.source_id, station.station_id))
        .collect();

    let mut lines: HashMap<String, Line> = HashMap::new();
    let mut outcomes = Vec::with_capacity(routes.len());

    for route in routes {
        // Short ref code preferred; display name only as fallback
        let Some(line_id) = route.ref_tag.clone().or_else(|| route.name.clone()) else {
            debug!("route {}: no usable identifier, skipped", route.source_id);
            outcomes.push(RouteOutcome::SkippedNoIdentifier {
                source_id: route.source_id,
            });
            continue;
        };

        let Some(members) = &route.members else {
            debug!("route {}: membership list absent or malformed", route.source_id);
            outcomes.push(RouteOutcome::SkippedMalformedMembers {
                source_id: route.source_id,
                line_id,
            });
            continue;
        };

        let resolved: Vec<StationId> = members
            .iter()
            .filter_map(|member| source_to_station.get(&member.ref_id).copied())
            .collect();
        let dropped_members = members.len() - resolved.len();

        if resolved.len() < 2 {
            outcomes.push(RouteOutcome::SkippedTooShort {
                source_id: route.source_id,
                line_id,
                resolved: resolved.len(),
            });
            continue;
        }

        let name = route.name.clone().unwrap_or_else(|| line_id.clone());
        outcomes.push(RouteOutcome::Included {
            source_id: route.source_id,
            line_id: line_id.clone(),
            resolved: resolved.len(),
            dropped_members,
        });
        // Duplicate identifiers overwrite; snapshot order decides
        lines.insert(
            line_id,
            Line {
                name,
                stations: resolved,
            },
        );
    }

    (lines, outcomes)
}
