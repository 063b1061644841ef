//! Pedestrian routability network

pub mod components;
pub mod network;

pub use components::{WalkEdge, WalkNode};
pub use network::{IndexedPoint, WalkGraph};
