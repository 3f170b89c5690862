pub mod base_link;
pub mod railway_link;
pub mod rolling_stock;
pub mod tons;
pub mod transport_link;
