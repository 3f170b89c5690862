pub mod dijkstra;
pub mod path_record;
pub mod shortest_path_engine;
pub mod shortest_paths;
