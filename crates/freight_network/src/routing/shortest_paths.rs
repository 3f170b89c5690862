use crate::{
    error::{NetworkError, NetworkResult},
    routing::path_record::PathRecord,
    types::{Distance, NodeId},
};

/// Distance and node sequence between an origin and a destination.
///
/// Self-pairs have a zero distance and no path. Unreachable pairs have an
/// infinite distance and no path.
#[derive(Debug, Clone, PartialEq)]
pub struct PathEntry {
    distance: Distance,
    path: Option<Vec<NodeId>>,
}

impl PathEntry {
    pub(crate) fn new(distance: Distance, path: Vec<NodeId>) -> Self {
        PathEntry {
            distance,
            path: Some(path),
        }
    }

    pub(crate) fn self_pair() -> Self {
        PathEntry {
            distance: 0.0,
            path: None,
        }
    }

    pub(crate) fn unreachable() -> Self {
        PathEntry {
            distance: Distance::INFINITY,
            path: None,
        }
    }

    pub fn distance(&self) -> Distance {
        self.distance
    }

    pub fn path(&self) -> Option<&[NodeId]> {
        self.path.as_deref()
    }

    pub fn is_reachable(&self) -> bool {
        self.distance.is_finite()
    }

    pub fn is_self_pair(&self) -> bool {
        self.distance == 0.0 && self.path.is_none()
    }
}

/// All-pairs result for one gauge, indexed by origin then destination.
#[derive(Debug, Clone)]
pub struct ShortestPaths {
    gauge: String,
    nodes: Vec<NodeId>,
    entries: Vec<Vec<PathEntry>>,
}

impl ShortestPaths {
    pub(crate) fn new(gauge: &str, nodes: Vec<NodeId>, entries: Vec<Vec<PathEntry>>) -> Self {
        debug_assert_eq!(nodes.len(), entries.len());
        ShortestPaths {
            gauge: gauge.to_owned(),
            nodes,
            entries,
        }
    }

    pub fn gauge(&self) -> &str {
        &self.gauge
    }

    /// Origins and destinations, ascending.
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    fn index(&self, node: NodeId) -> NetworkResult<usize> {
        self.nodes
            .binary_search(&node)
            .map_err(|_| NetworkError::UnknownNode {
                node,
                gauge: self.gauge.clone(),
            })
    }

    pub fn entry(&self, origin: NodeId, destination: NodeId) -> NetworkResult<&PathEntry> {
        let from = self.index(origin)?;
        let to = self.index(destination)?;
        Ok(&self.entries[from][to])
    }

    /// Shortest distance, infinite when `destination` cannot be reached.
    pub fn distance(&self, origin: NodeId, destination: NodeId) -> NetworkResult<Distance> {
        Ok(self.entry(origin, destination)?.distance())
    }

    /// Nodes from `origin` to `destination`, `None` for a self-pair.
    pub fn path(&self, origin: NodeId, destination: NodeId) -> NetworkResult<Option<&[NodeId]>> {
        let entry = self.entry(origin, destination)?;

        if !entry.is_reachable() {
            return Err(NetworkError::UnreachablePair {
                origin,
                destination,
                gauge: self.gauge.clone(),
            });
        }

        Ok(entry.path())
    }

    /// Every pair, origins then destinations in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, NodeId, &PathEntry)> + '_ {
        self.entries.iter().enumerate().flat_map(move |(from, row)| {
            row.iter()
                .enumerate()
                .map(move |(to, entry)| (self.nodes[from], self.nodes[to], entry))
        })
    }

    pub fn total_paths(&self) -> usize {
        self.nodes.len() * self.nodes.len()
    }

    pub fn unreachable_pairs(&self) -> usize {
        self.iter().filter(|(_, _, entry)| !entry.is_reachable()).count()
    }

    pub fn records(&self) -> Vec<PathRecord> {
        self.iter()
            .map(|(origin, destination, entry)| {
                PathRecord::new(origin, destination, entry, &self.gauge)
            })
            .collect()
    }
}
