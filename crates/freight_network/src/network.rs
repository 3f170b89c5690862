use fxhash::FxHashMap;
use tracing::{info, warn};

use crate::{
    error::{NetworkError, NetworkResult},
    graph::{
        gauge_graph::GaugeGraph,
        link_record::{GaugeLinkRecord, LinkRecord},
        restrictions::Restrictions,
    },
    params::PathSearchParams,
    routing::{
        path_record::PathRecord,
        shortest_path_engine::ShortestPathEngine,
        shortest_paths::{PathEntry, ShortestPaths},
    },
    timer_debug,
    types::NodeId,
};

/// Shortest path between two nodes over one gauge.
#[derive(Debug, Clone, PartialEq)]
pub struct GaugePath {
    pub gauge: String,
    pub entry: PathEntry,
}

/// Network made of isolated gauges. Paths never change gauge, so each gauge
/// is searched on its own graph.
#[derive(Debug, Clone, Default)]
pub struct Network {
    gauge_names: Vec<String>,
    graphs: FxHashMap<String, GaugeGraph>,
    paths: FxHashMap<String, ShortestPaths>,
}

impl Network {
    pub fn new<I, S>(gauge_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Network {
            gauge_names: gauge_names.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Builds every gauge from a table mixing them, keeping gauges in the
    /// order they first appear.
    pub fn from_records<I>(records: I) -> NetworkResult<Self>
    where
        I: IntoIterator<Item = GaugeLinkRecord>,
    {
        let mut gauges: Vec<(String, Vec<LinkRecord>)> = Vec::new();

        for record in records {
            let (gauge, record) = record.into_parts();
            match gauges.iter_mut().find(|(name, _)| *name == gauge) {
                Some((_, gauge_records)) => gauge_records.push(record),
                None => gauges.push((gauge, vec![record])),
            }
        }

        let mut network = Network::new(gauges.iter().map(|(gauge, _)| gauge.clone()));
        for (gauge, gauge_records) in &gauges {
            network.add_graph(gauge, gauge_records)?;
        }

        Ok(network)
    }

    /// Builds the graph of a gauge, replacing any previous one and its paths.
    pub fn add_graph(&mut self, gauge: &str, records: &[LinkRecord]) -> NetworkResult<()> {
        let graph = GaugeGraph::build(records)?;
        info!(
            "{}: graph with {} nodes and {} links",
            gauge,
            graph.node_count(),
            graph.link_count()
        );

        if !self.gauge_names.iter().any(|name| name == gauge) {
            self.gauge_names.push(gauge.to_owned());
        }

        if self.graphs.insert(gauge.to_owned(), graph).is_some() {
            warn!("{}: graph replaced", gauge);
            self.paths.remove(gauge);
        }

        Ok(())
    }

    pub fn gauge_names(&self) -> &[String] {
        &self.gauge_names
    }

    pub fn graph(&self, gauge: &str) -> NetworkResult<&GaugeGraph> {
        self.graphs
            .get(gauge)
            .ok_or_else(|| NetworkError::UnknownGauge(gauge.to_owned()))
    }

    /// Finds the shortest paths between every pair of nodes, gauge by gauge.
    ///
    /// Restricted nodes and links are left out of the search without
    /// touching the stored graphs.
    pub fn calculate_paths(
        &mut self,
        params: &PathSearchParams,
        restrictions: &Restrictions,
    ) -> NetworkResult<()> {
        // Every gauge needs a graph before any paths are replaced
        let graphs = self
            .gauge_names
            .iter()
            .map(|gauge| Ok((gauge, self.graph(gauge)?)))
            .collect::<NetworkResult<Vec<_>>>()?;

        let engine = ShortestPathEngine::new(params.clone());

        let paths = timer_debug!("all gauges", {
            graphs
                .into_iter()
                .map(|(gauge, graph)| {
                    let paths = timer_debug!(gauge, {
                        engine.all_pairs(gauge, &graph.restricted(restrictions))
                    });
                    (gauge.clone(), paths)
                })
                .collect::<Vec<_>>()
        });

        self.paths.extend(paths);

        Ok(())
    }

    /// Shortest path between two nodes on every gauge holding both of them.
    pub fn find_shortest_path(
        &self,
        origin: NodeId,
        destination: NodeId,
        restrictions: &Restrictions,
    ) -> NetworkResult<Vec<GaugePath>> {
        let engine = ShortestPathEngine::default();
        let mut paths = Vec::new();

        for gauge in &self.gauge_names {
            let graph = self.graph(gauge)?.restricted(restrictions);

            if let Some(entry) = engine.single_pair(&graph, origin, destination) {
                paths.push(GaugePath {
                    gauge: gauge.clone(),
                    entry,
                });
            }
        }

        Ok(paths)
    }

    /// Paths of a gauge, once calculated.
    pub fn paths(&self, gauge: &str) -> NetworkResult<&ShortestPaths> {
        self.paths
            .get(gauge)
            .ok_or_else(|| NetworkError::UnknownGauge(gauge.to_owned()))
    }

    /// One row per calculated pair, gauge by gauge.
    pub fn path_records(&self) -> Vec<PathRecord> {
        self.gauge_names
            .iter()
            .filter_map(|gauge| self.paths.get(gauge))
            .flat_map(ShortestPaths::records)
            .collect()
    }

    /// Number of pairs of a gauge, self-pairs included.
    pub fn total_paths(&self, gauge: &str) -> NetworkResult<usize> {
        let node_count = self.graph(gauge)?.node_count();
        Ok(node_count * node_count)
    }
}
