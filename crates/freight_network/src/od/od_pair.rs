use std::fmt;

use crate::{
    error::{NetworkError, NetworkResult},
    link::{tons::OdTons, transport_link::TransportLink},
    link_id::LinkId,
    od::{links_table::LinksTable, path::Path},
    types::{Category, Distance, NodeId, Tons},
};

/// Freight flow between two nodes, carried by one transport mode.
///
/// The same OD pair usually exists once per transport mode, and tons move
/// between them with [`Od::derive_ton`].
#[derive(Debug, Clone)]
pub struct Od {
    route: Path,
    category: Category,
    distance: Option<Distance>,
    tons: OdTons,
}

impl Od {
    pub fn new(id: &str, ton: Tons, path: &str, gauge: &str) -> NetworkResult<Self> {
        Ok(Od {
            route: Path::new(id, path, gauge)?,
            ..Self::without_path(id, ton)?
        })
    }

    /// OD pair waiting for a path to be assigned with [`Od::set_path`].
    pub fn without_path(id: &str, ton: Tons) -> NetworkResult<Self> {
        Ok(Od {
            route: Path::undeclared(id)?,
            category: 0,
            distance: None,
            tons: OdTons::new(ton),
        })
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn with_distance(mut self, distance: Distance) -> Self {
        self.distance = Some(distance);
        self
    }

    pub fn id(&self) -> LinkId {
        self.route.id()
    }

    /// Endpoints in ascending order.
    pub fn nodes(&self) -> [NodeId; 2] {
        self.route.nodes()
    }

    pub fn route(&self) -> &Path {
        &self.route
    }

    pub fn path(&self) -> Option<&str> {
        self.route.path()
    }

    pub fn gauge(&self) -> Option<&str> {
        self.route.gauge()
    }

    pub fn path_nodes(&self) -> Option<&[NodeId]> {
        self.route.path_nodes()
    }

    pub fn links(&self) -> &[LinkId] {
        self.route.links()
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// Distance as last computed or provided.
    pub fn distance(&self) -> Option<Distance> {
        self.distance
    }

    pub fn tons(&self) -> &OdTons {
        &self.tons
    }

    pub fn ton(&self) -> Tons {
        self.tons.total()
    }

    pub fn original_ton(&self) -> Tons {
        self.tons.original()
    }

    pub fn derived_ton(&self) -> Tons {
        self.tons.derived()
    }

    pub fn add_original_ton(&mut self, ton: Tons) {
        self.tons.add_original(ton);
    }

    /// Moves tons to the same OD pair of another transport mode. See
    /// [`OdTons::derive_to`].
    pub fn derive_ton(&mut self, other: &mut Od, coeff: f64) -> NetworkResult<(Tons, Tons)> {
        if self.id() != other.id() || self.category != other.category {
            return Err(NetworkError::DerivationMismatch(
                format!("{} ({})", self.id(), self.category),
                format!("{} ({})", other.id(), other.category),
            ));
        }

        self.tons.derive_to(&mut other.tons, coeff)
    }

    pub fn is_intrazone(&self) -> bool {
        self.route.is_intrazone()
    }

    pub fn set_path(&mut self, path: &str, gauge: &str) -> NetworkResult<()> {
        self.route.set_path(path, gauge)
    }

    pub fn has_declared_path(&self) -> bool {
        self.route.has_declared_path()
    }

    pub fn has_railway_path(&self) -> bool {
        self.route.has_railway_path()
    }

    /// Recomputes the distance from the links along the path and keeps it.
    pub fn calc_distance<L: TransportLink>(&mut self, links: &LinksTable<L>) -> NetworkResult<Distance> {
        let distance = self.route.calc_distance(links)?;
        self.distance = Some(distance);
        Ok(distance)
    }
}

impl fmt::Display for Od {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "OD: {:<10} Ton: {:<15.1} Path: {:<60} Gauge: {:<15} Distance: {}",
            self.id().to_string(),
            self.ton(),
            self.path().unwrap_or_default(),
            self.gauge().unwrap_or_default(),
            self.distance.map_or_else(String::new, |distance| format!("{distance:.1}"))
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::link::base_link::Link;

    use super::*;

    #[test]
    fn test_new_od() {
        let od = Od::new("70-68", 333906.0, "068-069-070", "ancha").unwrap();

        assert_eq!(od.nodes(), [68, 70]);
        assert_eq!(od.id().to_string(), "68-70");
        assert_eq!(od.path_nodes(), Some(&[68, 69, 70][..]));
        assert_eq!(
            od.links().iter().map(LinkId::to_string).collect::<Vec<_>>(),
            vec!["68-69", "69-70"]
        );
        assert_eq!(od.ton(), 333906.0);
        assert_eq!(od.distance(), None);
    }

    #[test]
    fn test_set_path() {
        let mut od = Od::without_path("1-3", 10.0).unwrap();
        assert!(!od.has_declared_path());
        assert!(od.links().is_empty());

        od.set_path("001-002-003", "ancha").unwrap();

        assert!(od.has_railway_path());
        assert_eq!(od.gauge(), Some("ancha"));
        assert_eq!(od.links(), &[LinkId::new(1, 2), LinkId::new(2, 3)]);
    }

    #[test]
    fn test_calc_distance_is_stored() {
        let links = LinksTable::from_iter([
            Link::new("1-2", 10.0, "ancha").unwrap(),
            Link::new("3-2", 15.5, "ancha").unwrap(),
        ]);
        let mut od = Od::new("1-3", 10.0, "001-002-003", "ancha")
            .unwrap()
            .with_distance(99.0);

        assert_eq!(od.calc_distance(&links).unwrap(), 25.5);
        assert_eq!(od.distance(), Some(25.5));
    }

    #[test]
    fn test_failed_calc_distance_keeps_previous() {
        let links: LinksTable<Link> = LinksTable::new();
        let mut od = Od::new("1-3", 10.0, "001-002-003", "ancha")
            .unwrap()
            .with_distance(99.0);

        assert!(od.calc_distance(&links).is_err());
        assert_eq!(od.distance(), Some(99.0));
    }

    #[test]
    fn test_od_without_path_has_no_distance() {
        let links = LinksTable::from_iter([Link::new("1-2", 10.0, "ancha").unwrap()]);
        let mut od = Od::without_path("1-2", 10.0).unwrap();

        assert!(matches!(
            od.calc_distance(&links),
            Err(NetworkError::MissingPath { .. })
        ));
        assert_eq!(od.distance(), None);

        od.set_path("no path", "ancha").unwrap();
        assert!(od.calc_distance(&links).is_err());
        assert_eq!(od.distance(), None);

        od.set_path("001-002", "ancha").unwrap();
        assert_eq!(od.calc_distance(&links).unwrap(), 10.0);
    }

    #[test]
    fn test_set_path_to_other_nodes_fails() {
        let mut od = Od::without_path("1-3", 10.0).unwrap();

        assert!(matches!(
            od.set_path("001-002", "ancha"),
            Err(NetworkError::PathMismatch { .. })
        ));
        assert!(!od.has_declared_path());
        assert!(od.links().is_empty());
    }

    #[test]
    fn test_derive_ton() {
        let mut railway = Od::new("5-9", 100.0, "005-009", "ancha").unwrap().with_category(2);
        let mut roadway = Od::new("9-5", 40.0, "005-009", "unica").unwrap().with_category(2);

        railway.derive_ton(&mut roadway, 0.25).unwrap();

        assert_eq!(railway.original_ton(), 75.0);
        assert_eq!(roadway.derived_ton(), 25.0);
        assert_eq!(roadway.ton(), 65.0);
    }

    #[test]
    fn test_derive_ton_between_different_pairs() {
        let mut railway = Od::new("5-9", 100.0, "005-009", "ancha").unwrap();
        let mut other_pair = Od::new("5-8", 40.0, "005-008", "unica").unwrap();
        let mut other_category = Od::new("5-9", 40.0, "005-009", "unica")
            .unwrap()
            .with_category(7);

        assert!(matches!(
            railway.derive_ton(&mut other_pair, 0.5),
            Err(NetworkError::DerivationMismatch(..))
        ));
        assert!(matches!(
            railway.derive_ton(&mut other_category, 0.5),
            Err(NetworkError::DerivationMismatch(..))
        ));
        assert_eq!(railway.ton(), 100.0);
    }

    #[test]
    fn test_intrazone_od() {
        let od = Od::new("12-12", 5.0, "012", "ancha").unwrap();
        assert!(od.is_intrazone());
        assert_eq!(od.path_nodes(), None);
    }
}
