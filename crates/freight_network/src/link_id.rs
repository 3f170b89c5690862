use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    error::{NetworkError, NetworkResult},
    types::{NODE_SEPARATOR, NodeId},
};

/// Identity of a pair of nodes written as `"A-B"`.
///
/// The endpoints keep the order they were written in. Use [`LinkId::canonical`]
/// to get the order-independent "safe" form used for OD pairs and link lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LinkId {
    a: NodeId,
    b: NodeId,
}

impl LinkId {
    pub const fn new(a: NodeId, b: NodeId) -> Self {
        Self { a, b }
    }

    pub fn a(&self) -> NodeId {
        self.a
    }

    pub fn b(&self) -> NodeId {
        self.b
    }

    pub fn nodes(&self) -> [NodeId; 2] {
        [self.a, self.b]
    }

    pub fn canonical(&self) -> Self {
        if self.a <= self.b {
            *self
        } else {
            self.reversed()
        }
    }

    pub fn reversed(&self) -> Self {
        Self {
            a: self.b,
            b: self.a,
        }
    }

    pub fn is_canonical(&self) -> bool {
        self.a <= self.b
    }

    /// Both ids join the same two nodes, whatever their orientation.
    pub fn same_pair(&self, other: &LinkId) -> bool {
        self.canonical() == other.canonical()
    }
}

impl fmt::Display for LinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.a, NODE_SEPARATOR, self.b)
    }
}

impl FromStr for LinkId {
    type Err = NetworkError;

    fn from_str(id: &str) -> Result<Self, Self::Err> {
        let malformed = |reason: &str| NetworkError::MalformedLinkRecord {
            id: id.to_owned(),
            reason: reason.to_owned(),
        };

        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(malformed("empty id"));
        }

        let mut parts = trimmed.split(NODE_SEPARATOR);
        let (Some(a), Some(b), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(malformed("expected exactly two nodes"));
        };

        let a = a
            .trim()
            .parse::<NodeId>()
            .map_err(|_| malformed("first node is not an integer"))?;
        let b = b
            .trim()
            .parse::<NodeId>()
            .map_err(|_| malformed("second node is not an integer"))?;

        Ok(LinkId { a, b })
    }
}

/// Rewrites an id with its lowest node first: `"50-10"` becomes `"10-50"`.
pub fn safe_id(id: &str) -> NetworkResult<String> {
    Ok(id.parse::<LinkId>()?.canonical().to_string())
}

/// Renders a node sequence the way path strings are stored: `068-069-070`.
pub fn format_path(nodes: &[NodeId]) -> String {
    nodes
        .iter()
        .map(|node| format!("{node:03}"))
        .collect::<Vec<_>>()
        .join(&NODE_SEPARATOR.to_string())
}

/// Parses a path string into its nodes, in the order they are written.
///
/// Strings without a separator ("not found" markers and the like) or with a
/// non-integer part have no nodes.
pub fn parse_path(path: &str) -> Option<Vec<NodeId>> {
    if !path.contains(NODE_SEPARATOR) {
        return None;
    }

    path.split(NODE_SEPARATOR)
        .map(|node| node.trim().parse::<NodeId>().ok())
        .collect()
}

/// Consecutive node pairs of a path, in traversal order.
pub fn path_links(nodes: &[NodeId]) -> Vec<LinkId> {
    nodes
        .windows(2)
        .map(|pair| LinkId::new(pair[0], pair[1]))
        .collect()
}
