use rayon::iter::{IntoParallelIterator, ParallelIterator};
use tracing::{debug, info, warn};

use crate::{
    graph::gauge_graph::GaugeGraph,
    params::{PathSearchParams, Threads},
    routing::{
        dijkstra::{Dijkstra, ShortestPathTree},
        shortest_paths::{PathEntry, ShortestPaths},
    },
    timer_debug,
    types::NodeId,
};

/// Computes every origin/destination pair of a gauge by running one
/// single-source Dijkstra per origin.
#[derive(Debug, Clone, Default)]
pub struct ShortestPathEngine {
    params: PathSearchParams,
}

impl ShortestPathEngine {
    pub fn new(params: PathSearchParams) -> Self {
        ShortestPathEngine { params }
    }

    pub fn all_pairs(&self, gauge: &str, graph: &GaugeGraph) -> ShortestPaths {
        let node_count = graph.node_count();
        info!("{}: {} paths will be calculated", gauge, node_count * node_count);

        let entries = timer_debug!("all pairs shortest paths", {
            match self.params.threads {
                Threads::Single => Self::sequential_rows(graph),
                ref threads => Self::parallel_rows(graph, threads.number_of_threads()),
            }
        });

        let paths = ShortestPaths::new(gauge, graph.nodes().to_vec(), entries);

        let unreachable = paths.unreachable_pairs();
        if unreachable > 0 {
            warn!("{}: {} pairs have no path", gauge, unreachable);
        }

        paths
    }

    fn sequential_rows(graph: &GaugeGraph) -> Vec<Vec<PathEntry>> {
        let mut dijkstra = Dijkstra::new(graph);
        let node_count = graph.node_count();

        (0..node_count)
            .map(|origin| {
                let row = Self::row(graph, &dijkstra.calc_tree(graph, origin));
                debug!(
                    "{} paths calculated from {} total paths",
                    (origin + 1) * node_count,
                    node_count * node_count
                );
                row
            })
            .collect()
    }

    fn parallel_rows(graph: &GaugeGraph, num_threads: usize) -> Vec<Vec<PathEntry>> {
        let pool = match rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build()
        {
            Ok(pool) => pool,
            Err(error) => {
                warn!("Cannot build thread pool, falling back to one thread: {}", error);
                return Self::sequential_rows(graph);
            }
        };

        pool.install(|| {
            (0..graph.node_count())
                .into_par_iter()
                .map_init(
                    || Dijkstra::new(graph),
                    |dijkstra, origin| Self::row(graph, &dijkstra.calc_tree(graph, origin)),
                )
                .collect()
        })
    }

    /// Shortest path between two nodes, `None` when the graph lacks either
    /// of them.
    pub fn single_pair(
        &self,
        graph: &GaugeGraph,
        origin: NodeId,
        destination: NodeId,
    ) -> Option<PathEntry> {
        let origin = graph.index_of(origin)?;
        let target = graph.index_of(destination)?;

        if origin == target {
            return Some(PathEntry::self_pair());
        }

        let tree = Dijkstra::new(graph).calc_tree(graph, origin);
        Some(Self::entry(graph, &tree, target))
    }

    fn row(graph: &GaugeGraph, tree: &ShortestPathTree) -> Vec<PathEntry> {
        (0..graph.node_count())
            .map(|target| {
                if target == tree.origin() {
                    PathEntry::self_pair()
                } else {
                    Self::entry(graph, tree, target)
                }
            })
            .collect()
    }

    fn entry(graph: &GaugeGraph, tree: &ShortestPathTree, target: usize) -> PathEntry {
        match tree.build_path(graph, target) {
            Some(mut path) => {
                // Paths always start with the queried origin
                path[0] = graph.node_at(tree.origin());
                PathEntry::new(tree.distance(target), path)
            }
            None => PathEntry::unreachable(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        error::NetworkError,
        test_utils::test_graph::{lettered_graph_one, records},
    };

    use super::*;

    #[test]
    fn test_all_pairs_prefers_detour() {
        let graph = GaugeGraph::build(&records(&[("1-2", 10.0), ("2-3", 10.0), ("1-3", 30.0), ("3-4", 5.0)]))
            .unwrap();
        let paths = ShortestPathEngine::default().all_pairs("ancha", &graph);

        assert_eq!(paths.distance(1, 3).unwrap(), 20.0);
        assert_eq!(paths.path(1, 3).unwrap(), Some(&[1, 2, 3][..]));
        assert_eq!(paths.path(3, 1).unwrap(), Some(&[3, 2, 1][..]));
        assert_eq!(paths.distance(4, 1).unwrap(), 25.0);
        assert_eq!(paths.total_paths(), 16);
    }

    #[test]
    fn test_self_pairs() {
        let graph = lettered_graph_one();
        let paths = ShortestPathEngine::default().all_pairs("unica", &graph);

        for &node in graph.nodes() {
            let entry = paths.entry(node, node).unwrap();
            assert_eq!(entry.distance(), 0.0);
            assert_eq!(entry.path(), None);
            assert!(entry.is_self_pair());
        }
    }

    #[test]
    fn test_paths_start_at_origin_and_end_at_destination() {
        let graph = lettered_graph_one();
        let paths = ShortestPathEngine::default().all_pairs("unica", &graph);

        for (origin, destination, entry) in paths.iter() {
            if origin == destination {
                continue;
            }
            let path = entry.path().unwrap();
            assert_eq!(path[0], origin);
            assert_eq!(*path.last().unwrap(), destination);
            assert!(entry.distance() >= 0.0);
        }
    }

    #[test]
    fn test_triangle_inequality() {
        let graph = lettered_graph_one();
        let paths = ShortestPathEngine::default().all_pairs("unica", &graph);

        for &a in graph.nodes() {
            for &b in graph.nodes() {
                for &c in graph.nodes() {
                    let direct = paths.distance(a, c).unwrap();
                    let through = paths.distance(a, b).unwrap() + paths.distance(b, c).unwrap();
                    assert!(direct <= through + 1e-9, "{a}->{c} through {b}");
                }
            }
        }
    }

    #[test]
    fn test_disconnected_graph_keeps_computing() {
        let graph = GaugeGraph::build(&records(&[("1-2", 1.0), ("3-4", 2.0)])).unwrap();
        let paths = ShortestPathEngine::default().all_pairs("angosta", &graph);

        assert!(paths.distance(1, 3).unwrap().is_infinite());
        assert!(matches!(
            paths.path(1, 3),
            Err(NetworkError::UnreachablePair {
                origin: 1,
                destination: 3,
                ..
            })
        ));
        assert_eq!(paths.distance(3, 4).unwrap(), 2.0);
        assert_eq!(paths.unreachable_pairs(), 8);
    }

    #[test]
    fn test_unknown_node() {
        let graph = GaugeGraph::build(&records(&[("1-2", 1.0)])).unwrap();
        let paths = ShortestPathEngine::default().all_pairs("ancha", &graph);

        assert!(matches!(
            paths.distance(1, 9),
            Err(NetworkError::UnknownNode { node: 9, .. })
        ));
    }

    #[test]
    fn test_parallel_sweep_matches_sequential() {
        let graph = lettered_graph_one();
        let sequential = ShortestPathEngine::default().all_pairs("unica", &graph);
        let parallel = ShortestPathEngine::new(PathSearchParams {
            threads: Threads::Multi(3),
        })
        .all_pairs("unica", &graph);

        assert_eq!(
            sequential.iter().collect::<Vec<_>>(),
            parallel.iter().collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_single_pair() {
        let graph = lettered_graph_one();
        let engine = ShortestPathEngine::default();

        let entry = engine.single_pair(&graph, 1, 26).unwrap();
        assert_eq!(entry.distance(), 13.0);
        assert_eq!(entry.path(), Some(&[1, 3, 2, 4, 5, 26][..]));

        assert!(engine.single_pair(&graph, 4, 4).unwrap().is_self_pair());
        assert_eq!(engine.single_pair(&graph, 1, 99), None);
    }

    #[test]
    fn test_records() {
        let graph = GaugeGraph::build(&records(&[("68-69", 100.0), ("69-70", 200.0)])).unwrap();
        let paths = ShortestPathEngine::default().all_pairs("ancha", &graph);
        let records = paths.records();

        assert_eq!(records.len(), 9);

        let record = &records[2];
        assert_eq!(record.id_od, "68-70");
        assert_eq!(record.distance, Some(300.0));
        assert_eq!(record.path.as_deref(), Some("068-069-070"));
        assert_eq!(record.gauge, "ancha");

        assert_eq!(records[0].path, None);
        assert_eq!(records[0].distance, Some(0.0));
    }
}
