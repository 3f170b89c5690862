use fxhash::FxHashMap;
use tracing::warn;

use crate::{
    error::NetworkResult,
    graph::{graph_edge::GraphEdge, link_record::LinkRecord, restrictions::Restrictions},
    link_id::LinkId,
    types::{Distance, NodeId},
};

/// Undirected, weighted adjacency structure of a single gauge.
///
/// Nodes are stored in ascending id order and addressed internally by their
/// dense index, so iterating indexes visits nodes in ascending id order.
/// Graphs of different gauges never share anything, even when their node ids
/// coincide.
#[derive(Debug, Clone, Default)]
pub struct GaugeGraph {
    nodes: Vec<NodeId>,
    node_index: FxHashMap<NodeId, usize>,
    adjacency_list: Vec<Vec<GraphEdge>>,
    link_count: usize,
}

impl GaugeGraph {
    /// Builds the graph from link records, failing on the first malformed one.
    pub fn build<'a, I>(records: I) -> NetworkResult<Self>
    where
        I: IntoIterator<Item = &'a LinkRecord>,
    {
        let links = records
            .into_iter()
            .map(LinkRecord::parse)
            .collect::<NetworkResult<Vec<_>>>()?;

        Ok(Self::from_links(&links))
    }

    fn from_links(links: &[(LinkId, Distance)]) -> Self {
        let mut nodes: Vec<NodeId> = links.iter().flat_map(|(id, _)| id.nodes()).collect();
        nodes.sort_unstable();
        nodes.dedup();

        Self::from_nodes_and_links(nodes, links.iter().copied())
    }

    fn from_nodes_and_links(
        nodes: Vec<NodeId>,
        links: impl Iterator<Item = (LinkId, Distance)>,
    ) -> Self {
        let node_index = nodes
            .iter()
            .enumerate()
            .map(|(index, &node)| (node, index))
            .collect::<FxHashMap<_, _>>();

        let mut graph = GaugeGraph {
            adjacency_list: vec![vec![]; nodes.len()],
            nodes,
            node_index,
            link_count: 0,
        };

        for (id, distance) in links {
            graph.add_link(id, distance);
        }

        graph
    }

    fn add_link(&mut self, id: LinkId, distance: Distance) {
        let from = self.node_index[&id.a()];
        let to = self.node_index[&id.b()];

        let forward = GraphEdge::new(to, distance);
        if self.adjacency_list[from].contains(&forward) {
            warn!("Link {} with distance {} is repeated", id, distance);
            return;
        }

        self.adjacency_list[from].push(forward);
        if from != to {
            self.adjacency_list[to].push(GraphEdge::new(from, distance));
        }
        self.link_count += 1;
    }

    /// Copy of the graph without restricted nodes and without any link
    /// that is restricted or touches a restricted node.
    pub fn restricted(&self, restrictions: &Restrictions) -> GaugeGraph {
        if restrictions.is_empty() {
            return self.clone();
        }

        let nodes = self
            .nodes
            .iter()
            .copied()
            .filter(|&node| !restrictions.is_node_restricted(node))
            .collect::<Vec<_>>();

        let links = self.links().filter(|(id, _)| !restrictions.is_link_restricted(id.a(), id.b()));

        Self::from_nodes_and_links(nodes, links)
    }

    /// Every link once, oriented from the lower node index.
    pub fn links(&self) -> impl Iterator<Item = (LinkId, Distance)> + '_ {
        self.adjacency_list
            .iter()
            .enumerate()
            .flat_map(move |(index, edges)| {
                edges
                    .iter()
                    .filter(move |edge| edge.adj_node() >= index)
                    .map(move |edge| {
                        (
                            LinkId::new(self.nodes[index], self.nodes[edge.adj_node()]),
                            edge.weight(),
                        )
                    })
            })
    }

    /// Nodes in ascending order.
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn contains_node(&self, node: NodeId) -> bool {
        self.node_index.contains_key(&node)
    }

    /// Neighbors of `node` with the length of the link reaching them. Unknown
    /// nodes have no neighbors.
    pub fn neighbors(&self, node: NodeId) -> impl Iterator<Item = (NodeId, Distance)> + '_ {
        self.node_index
            .get(&node)
            .map(|&index| self.adjacency_list[index].as_slice())
            .unwrap_or(&[])
            .iter()
            .map(|edge| (self.nodes[edge.adj_node()], edge.weight()))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn link_count(&self) -> usize {
        self.link_count
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline(always)]
    pub(crate) fn node_edges(&self, index: usize) -> &[GraphEdge] {
        &self.adjacency_list[index]
    }

    #[inline(always)]
    pub(crate) fn node_at(&self, index: usize) -> NodeId {
        self.nodes[index]
    }

    #[inline(always)]
    pub(crate) fn index_of(&self, node: NodeId) -> Option<usize> {
        self.node_index.get(&node).copied()
    }
}

#[cfg(test)]
mod tests {
    use crate::{error::NetworkError, test_utils::test_graph::records};

    use super::*;

    #[test]
    fn test_build_adds_links_both_ways() {
        let graph = GaugeGraph::build(&records(&[("1-2", 10.0), ("3-2", 5.0)])).unwrap();

        assert_eq!(graph.nodes(), &[1, 2, 3]);
        assert_eq!(graph.link_count(), 2);

        let mut neighbors = graph.neighbors(2).collect::<Vec<_>>();
        neighbors.sort_by_key(|(node, _)| *node);
        assert_eq!(neighbors, vec![(1, 10.0), (3, 5.0)]);
        assert_eq!(graph.neighbors(3).collect::<Vec<_>>(), vec![(2, 5.0)]);
    }

    #[test]
    fn test_nodes_are_sorted_numerically() {
        let graph = GaugeGraph::build(&records(&[("100-20", 1.0), ("3-100", 1.0)])).unwrap();
        assert_eq!(graph.nodes(), &[3, 20, 100]);
    }

    #[test]
    fn test_repeated_link_is_added_once() {
        let graph = GaugeGraph::build(&records(&[("1-2", 10.0), ("2-1", 10.0)])).unwrap();
        assert_eq!(graph.link_count(), 1);
        assert_eq!(graph.neighbors(1).count(), 1);
    }

    #[test]
    fn test_malformed_record_fails_the_build() {
        let result = GaugeGraph::build(&records(&[("1-2", 10.0), ("2-x", 5.0)]));
        assert!(matches!(
            result,
            Err(NetworkError::MalformedLinkRecord { .. })
        ));
    }

    #[test]
    fn test_unknown_node_has_no_neighbors() {
        let graph = GaugeGraph::build(&records(&[("1-2", 10.0)])).unwrap();
        assert!(!graph.contains_node(7));
        assert_eq!(graph.neighbors(7).count(), 0);
    }

    #[test]
    fn test_restricted_graph() {
        let graph = GaugeGraph::build(&records(&[("1-2", 1.0), ("2-3", 1.0), ("3-4", 1.0), ("1-4", 9.0)]))
            .unwrap();

        let restricted = graph.restricted(
            &Restrictions::new()
                .with_node(2)
                .with_link(LinkId::new(4, 3)),
        );

        assert_eq!(restricted.nodes(), &[1, 3, 4]);
        assert_eq!(restricted.link_count(), 1);
        assert_eq!(restricted.neighbors(1).collect::<Vec<_>>(), vec![(4, 9.0)]);
        assert_eq!(restricted.neighbors(3).count(), 0);

        // The source graph is left untouched
        assert_eq!(graph.link_count(), 4);
    }
}
