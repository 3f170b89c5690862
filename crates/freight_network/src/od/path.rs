use std::fmt;

use tracing::warn;

use crate::{
    error::{NetworkError, NetworkResult},
    link::transport_link::TransportLink,
    link_id::{LinkId, parse_path, path_links},
    od::links_table::LinksTable,
    types::{Distance, NODE_SEPARATOR, NodeId},
};

/// Route of an OD pair over the links of one gauge.
///
/// The id is stored in its canonical form while the path nodes and links
/// keep the order the path string is written in.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    id: LinkId,
    path: Option<String>,
    gauge: Option<String>,
    path_nodes: Option<Vec<NodeId>>,
    links: Vec<LinkId>,
}

impl Path {
    pub fn new(id: &str, path: &str, gauge: &str) -> NetworkResult<Self> {
        let mut route = Self::undeclared(id)?;
        route.set_path(path, gauge)?;
        Ok(route)
    }

    /// Path of an OD pair that has not been routed yet.
    pub(crate) fn undeclared(id: &str) -> NetworkResult<Self> {
        Ok(Path {
            id: id.parse::<LinkId>()?.canonical(),
            path: None,
            gauge: None,
            path_nodes: None,
            links: Vec::new(),
        })
    }

    pub fn id(&self) -> LinkId {
        self.id
    }

    /// Endpoints in ascending order.
    pub fn nodes(&self) -> [NodeId; 2] {
        self.id.nodes()
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn gauge(&self) -> Option<&str> {
        self.gauge.as_deref()
    }

    pub fn path_nodes(&self) -> Option<&[NodeId]> {
        self.path_nodes.as_deref()
    }

    pub fn links(&self) -> &[LinkId] {
        &self.links
    }

    /// Origin and destination are the same node.
    pub fn is_intrazone(&self) -> bool {
        self.id.a() == self.id.b()
    }

    /// Assigns a path written as zero-padded nodes joined by `-`.
    ///
    /// A path that runs between other nodes than the OD pair is refused and
    /// the current path is kept. Any other string (such as "no path") is
    /// kept as declared but without nodes to run over.
    pub fn set_path(&mut self, path: &str, gauge: &str) -> NetworkResult<()> {
        let path_nodes = if self.is_intrazone() {
            None
        } else {
            let nodes = parse_path(path);
            if nodes.is_none() && path.contains(NODE_SEPARATOR) {
                warn!("OD {}: cannot read path {:?}", self.id, path);
            }
            nodes
        };

        if let Some(nodes) = &path_nodes {
            self.check_endpoints(nodes, path)?;
        }

        self.path = Some(path.to_owned());
        self.gauge = Some(gauge.to_owned());
        self.links = path_nodes.as_deref().map(path_links).unwrap_or_default();
        self.path_nodes = path_nodes;

        Ok(())
    }

    fn check_endpoints(&self, nodes: &[NodeId], path: &str) -> NetworkResult<()> {
        let endpoints = match (nodes.first(), nodes.last()) {
            (Some(&first), Some(&last)) => LinkId::new(first, last).canonical(),
            _ => self.id,
        };

        if endpoints != self.id {
            return Err(NetworkError::PathMismatch {
                od: self.id.to_string(),
                path: path.to_owned(),
            });
        }

        Ok(())
    }

    /// A path was set, even a "not found" one.
    pub fn has_declared_path(&self) -> bool {
        matches!((&self.path, &self.gauge), (Some(path), Some(gauge)) if !path.is_empty() && !gauge.is_empty())
    }

    /// The path can actually be run over the network.
    pub fn has_railway_path(&self) -> bool {
        self.has_declared_path()
            && self
                .path
                .as_deref()
                .is_some_and(|path| path.contains(NODE_SEPARATOR))
    }

    /// Sums the current distance of every link along the path, in its gauge.
    ///
    /// Only intrazone pairs have a distance without path nodes.
    pub fn calc_distance<L: TransportLink>(&self, links: &LinksTable<L>) -> NetworkResult<Distance> {
        if self.is_intrazone() {
            return Ok(0.0);
        }
        if self.path_nodes.is_none() {
            return Err(NetworkError::MissingPath {
                od: self.id.to_string(),
            });
        }

        let gauge = self.gauge.as_deref().unwrap_or_default();

        self.links
            .iter()
            .try_fold(0.0, |distance, &id| -> NetworkResult<Distance> {
                Ok(distance + links.find(id, gauge)?.distance())
            })
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "OD: {:<10} Path: {:<70} Gauge: {}",
            self.id.to_string(),
            self.path.as_deref().unwrap_or_default(),
            self.gauge.as_deref().unwrap_or_default()
        )
    }
}
