use crate::types::Distance;

/// Half of an undirected link as seen from one of its nodes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphEdge {
    adj_node: usize,
    weight: Distance,
}

impl GraphEdge {
    pub(crate) fn new(adj_node: usize, weight: Distance) -> Self {
        GraphEdge { adj_node, weight }
    }

    /// Dense index of the node at the other end, see [`super::gauge_graph::GaugeGraph::node_at`].
    #[inline(always)]
    pub fn adj_node(&self) -> usize {
        self.adj_node
    }

    #[inline(always)]
    pub fn weight(&self) -> Distance {
        self.weight
    }
}
