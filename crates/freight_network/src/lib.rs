pub mod error;
pub mod graph;
pub mod link;
pub mod link_id;
pub mod network;
pub mod od;
pub mod params;
pub mod routing;
pub mod types;
mod utils;

#[cfg(test)]
pub(crate) mod test_utils;
