use std::{cmp::Ordering, collections::BinaryHeap};

use crate::{
    graph::gauge_graph::GaugeGraph,
    types::{Distance, NodeId},
};

const INVALID_NODE: usize = usize::MAX;

#[derive(Copy, Clone, Debug)]
struct HeapItem {
    node: usize,
    distance: Distance,
}

impl PartialEq for HeapItem {
    fn eq(&self, other: &HeapItem) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HeapItem {}

impl PartialOrd for HeapItem {
    fn partial_cmp(&self, other: &HeapItem) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapItem {
    fn cmp(&self, other: &Self) -> Ordering {
        // Flip both keys to make this a min-heap: shortest distance first,
        // lowest node index (= lowest node id) on ties.
        other
            .distance
            .total_cmp(&self.distance)
            .then_with(|| other.node.cmp(&self.node))
    }
}

#[derive(Clone, Copy)]
struct NodeData {
    distance: Distance,
    settled: bool,
    parent: usize,
}

impl NodeData {
    fn new() -> Self {
        NodeData {
            distance: Distance::INFINITY,
            settled: false,
            parent: INVALID_NODE,
        }
    }
}

/// Single-source Dijkstra over a [`GaugeGraph`].
///
/// The search state is reused between runs so a sweep over every origin of a
/// graph only allocates once.
pub struct Dijkstra {
    heap: BinaryHeap<HeapItem>,
    data: Vec<NodeData>,
}

impl Dijkstra {
    pub fn new(graph: &GaugeGraph) -> Self {
        Dijkstra {
            heap: BinaryHeap::with_capacity(graph.node_count()),
            data: vec![NodeData::new(); graph.node_count()],
        }
    }

    fn init(&mut self, graph: &GaugeGraph, origin: usize) {
        self.heap.clear();
        self.data.clear();
        self.data.resize(graph.node_count(), NodeData::new());

        self.data[origin].distance = 0.0;
        self.heap.push(HeapItem {
            node: origin,
            distance: 0.0,
        });
    }

    /// Settles every node reachable from `origin` (a dense node index).
    pub fn calc_tree(&mut self, graph: &GaugeGraph, origin: usize) -> ShortestPathTree {
        self.init(graph, origin);

        while let Some(HeapItem { node, distance }) = self.heap.pop() {
            if self.data[node].settled {
                continue;
            }

            // Stale heap entry, a shorter one was pushed afterwards
            if distance > self.data[node].distance {
                continue;
            }

            for edge in graph.node_edges(node) {
                let adj_node = edge.adj_node();
                if self.data[adj_node].settled {
                    continue;
                }

                let next_distance = distance + edge.weight();
                if next_distance < self.data[adj_node].distance {
                    self.data[adj_node].distance = next_distance;
                    self.data[adj_node].parent = node;
                    self.heap.push(HeapItem {
                        node: adj_node,
                        distance: next_distance,
                    });
                }
            }

            self.data[node].settled = true;
        }

        ShortestPathTree {
            origin,
            distances: self.data.iter().map(|data| data.distance).collect(),
            parents: self.data.iter().map(|data| data.parent).collect(),
        }
    }
}

/// Distances and parent pointers of one Dijkstra run.
pub struct ShortestPathTree {
    origin: usize,
    distances: Vec<Distance>,
    parents: Vec<usize>,
}

impl ShortestPathTree {
    pub fn origin(&self) -> usize {
        self.origin
    }

    /// Distance to `target`, infinite when it cannot be reached.
    pub fn distance(&self, target: usize) -> Distance {
        self.distances[target]
    }

    pub fn is_reachable(&self, target: usize) -> bool {
        self.distances[target].is_finite()
    }

    /// Nodes from the root of the tree to `target`, both included.
    pub fn build_path(&self, graph: &GaugeGraph, target: usize) -> Option<Vec<NodeId>> {
        if !self.is_reachable(target) {
            return None;
        }

        let mut path = Vec::with_capacity(16);
        let mut node = target;
        path.push(graph.node_at(node));

        while self.parents[node] != INVALID_NODE {
            node = self.parents[node];
            path.push(graph.node_at(node));
        }

        path.reverse();
        Some(path)
    }
}
