//! Result serialization: tabular station list, line definitions, and
//! the graph in its round-trip and visual forms.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::Context;
use geojson::{Feature, FeatureCollection, Geometry, Value};
use serde_json::{Map, json};

use metrograph_core::{GraphEdge, Line, RailGraph, Station};

/// `station_id,source_id,name,lat,lon` rows in id order.
pub fn write_station_table(path: &Path, stations: &[Station]) -> anyhow::Result<()> {
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("creating {}", path.display()))?;
    for station in stations {
        writer.serialize(station)?;
    }
    writer.flush()?;
    Ok(())
}

/// `line_id -> {name, stations}` with keys in sorted order so reruns
/// produce byte-identical files.
pub fn write_lines<'a>(
    path: &Path,
    lines: impl IntoIterator<Item = (&'a String, &'a Line)>,
) -> anyhow::Result<()> {
    let ordered: BTreeMap<&String, &Line> = lines.into_iter().collect();
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), &ordered)?;
    Ok(())
}

/// The round-trip form of the graph.
pub fn write_graph(path: &Path, graph: &RailGraph) -> anyhow::Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    serde_json::to_writer(BufWriter::new(file), graph)?;
    Ok(())
}

/// Stations as point features and edges as two-point line segments,
/// for dropping straight into a map viewer.
pub fn write_graph_geojson(path: &Path, graph: &RailGraph) -> anyhow::Result<()> {
    let mut features: Vec<Feature> = graph.stations().iter().map(station_feature).collect();
    for edge in graph.edges() {
        features.push(edge_feature(graph, edge)?);
    }

    let collection = FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    };
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    serde_json::to_writer(BufWriter::new(file), &collection)?;
    Ok(())
}

fn station_feature(station: &Station) -> Feature {
    let mut properties = Map::new();
    properties.insert("station_id".to_owned(), json!(station.station_id));
    properties.insert("name".to_owned(), json!(station.name));

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::Point(vec![station.lon, station.lat]))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

fn edge_feature(graph: &RailGraph, edge: &GraphEdge) -> anyhow::Result<Feature> {
    let from = graph
        .station(edge.from)
        .with_context(|| format!("edge references unknown station {}", edge.from))?;
    let to = graph
        .station(edge.to)
        .with_context(|| format!("edge references unknown station {}", edge.to))?;

    let mut properties = Map::new();
    properties.insert("mode".to_owned(), serde_json::to_value(edge.mode)?);
    properties.insert("line".to_owned(), json!(edge.line));
    properties.insert("distance_m".to_owned(), json!(edge.distance_m));
    properties.insert("time_s".to_owned(), json!(edge.time_s));

    Ok(Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::LineString(vec![
            vec![from.lon, from.lat],
            vec![to.lon, to.lat],
        ]))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    })
}
