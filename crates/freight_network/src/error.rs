use thiserror::Error;

use crate::types::NodeId;

#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("Malformed link record {id:?}: {reason}")]
    MalformedLinkRecord { id: String, reason: String },
    #[error("Link {link} has no {requested} tons of regroupable idle capacity ({available} available)")]
    InsufficientIdleCapacity {
        link: String,
        requested: f64,
        available: f64,
    },
    #[error("Link {link} cannot take {amount} tons of idle capacity")]
    InvalidCapacityAmount { link: String, amount: f64 },
    #[error("Link {link} is missing for gauge {gauge}")]
    UnknownLink { link: String, gauge: String },
    #[error("No path between {origin} and {destination} for gauge {gauge}")]
    UnreachablePair {
        origin: NodeId,
        destination: NodeId,
        gauge: String,
    },
    #[error("Path {path:?} does not join the nodes of OD {od}")]
    PathMismatch { od: String, path: String },
    #[error("OD {od} has no path over the network")]
    MissingPath { od: String },
    #[error("Node {node} is not part of the {gauge} graph")]
    UnknownNode { node: NodeId, gauge: String },
    #[error("Gauge {0} has not been loaded")]
    UnknownGauge(String),
    #[error("Cannot remove {requested} tons, only {available} stored")]
    InsufficientTons { requested: f64, available: f64 },
    #[error("OD pairs are different: {0} != {1}")]
    DerivationMismatch(String, String),
    #[error("Parameter {parameter} is not set on link {link}")]
    MissingParameter {
        link: String,
        parameter: &'static str,
    },
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),
    #[error("Failed to read parameters")]
    Config(#[from] serde_json::Error),
}

pub type NetworkResult<T> = Result<T, NetworkError>;
