//! Data model for the derived rail network graph.

pub mod graph;
pub mod line;
pub mod station;
pub mod walk;

pub use graph::{EdgeMode, GraphEdge, RailGraph};
pub use line::Line;
pub use station::Station;
pub use walk::{WalkEdge, WalkGraph, WalkNode};
