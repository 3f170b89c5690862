pub mod gauge_graph;
pub mod graph_edge;
pub mod link_record;
pub mod restrictions;
