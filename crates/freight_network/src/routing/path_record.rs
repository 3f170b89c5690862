use serde::Serialize;

use crate::{
    link_id::{LinkId, format_path},
    routing::shortest_paths::PathEntry,
    types::{Distance, NodeId},
};

/// One output row per (origin, destination, gauge).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathRecord {
    pub id_od: String,
    pub origin: NodeId,
    pub destination: NodeId,
    /// Missing when the destination cannot be reached.
    pub distance: Option<Distance>,
    pub path: Option<String>,
    pub gauge: String,
}

impl PathRecord {
    pub fn new(origin: NodeId, destination: NodeId, entry: &PathEntry, gauge: &str) -> Self {
        PathRecord {
            id_od: LinkId::new(origin, destination).to_string(),
            origin,
            destination,
            distance: entry.is_reachable().then_some(entry.distance()),
            path: entry.path().map(format_path),
            gauge: gauge.to_owned(),
        }
    }
}
