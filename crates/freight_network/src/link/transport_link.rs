use crate::{
    link::{base_link::Link, tons::LinkTons},
    link_id::LinkId,
    types::{Distance, NodeId, Tons},
};

/// Capability shared by roadway and railway links.
pub trait TransportLink {
    fn base(&self) -> &Link;

    fn base_mut(&mut self) -> &mut Link;

    fn id(&self) -> LinkId {
        self.base().link_id()
    }

    fn gauge(&self) -> &str {
        self.base().gauge()
    }

    /// Endpoints in the order the id was written.
    fn nodes(&self) -> [NodeId; 2] {
        self.base().link_id().nodes()
    }

    fn distance(&self) -> Distance {
        self.base().distance()
    }

    fn tons(&self) -> &LinkTons {
        self.base().tons()
    }

    fn tons_mut(&mut self) -> &mut LinkTons {
        self.base_mut().tons_mut()
    }

    fn ton(&self) -> Tons {
        self.tons().total()
    }

    fn ton_km(&self) -> f64 {
        self.ton() * self.distance()
    }

    /// Ton-km approximated with the link's net-to-gross factor.
    fn gross_ton_km(&self) -> f64 {
        self.ton_km() * self.base().net_to_gross_factor()
    }

    fn reset(&mut self) {
        self.base_mut().reset();
    }
}
