pub mod links_table;
pub mod od_pair;
pub mod path;
