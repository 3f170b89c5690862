use std::fmt;

use crate::{
    error::{NetworkError, NetworkResult},
    link::{tons::LinkTons, transport_link::TransportLink},
    link_id::LinkId,
    types::{Distance, TONS_SIGNIFICANCE},
};

/// Track category of a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackClass {
    /// Main line.
    A,
    /// Secondary line.
    B,
}

/// State shared by every link of a freight network. Roadway links use it
/// as is.
#[derive(Debug, Clone)]
pub struct Link {
    id: LinkId,
    gauge: String,
    distance: Distance,
    tons: LinkTons,
    main_track: Option<TrackClass>,
    eac_track: Option<f64>,
    maintenance: Option<f64>,
    net_to_gross_factor: f64,
}

pub type RoadwayLink = Link;

impl Link {
    /// Creates a link from an `"A-B"` id, keeping the written node order.
    pub fn new(id: &str, distance: Distance, gauge: &str) -> NetworkResult<Self> {
        let link_id = id.parse::<LinkId>()?;

        if !(distance.is_finite() && distance >= 0.0) {
            return Err(NetworkError::MalformedLinkRecord {
                id: id.to_owned(),
                reason: format!("invalid distance {distance}"),
            });
        }

        Ok(Link {
            id: link_id,
            gauge: gauge.to_owned(),
            distance,
            tons: LinkTons::default(),
            main_track: None,
            eac_track: None,
            maintenance: None,
            net_to_gross_factor: 1.0,
        })
    }

    pub fn link_id(&self) -> LinkId {
        self.id
    }

    pub fn gauge(&self) -> &str {
        &self.gauge
    }

    pub fn distance(&self) -> Distance {
        self.distance
    }

    pub fn tons(&self) -> &LinkTons {
        &self.tons
    }

    pub fn tons_mut(&mut self) -> &mut LinkTons {
        &mut self.tons
    }

    pub fn main_track(&self) -> Option<TrackClass> {
        self.main_track
    }

    pub fn set_main_track(&mut self, main_track: bool) {
        self.main_track = Some(if main_track { TrackClass::A } else { TrackClass::B });
    }

    pub fn eac_track(&self) -> Option<f64> {
        self.eac_track
    }

    pub fn set_eac_track(&mut self, eac_track: f64) {
        self.eac_track = Some(eac_track);
    }

    pub fn maintenance(&self) -> Option<f64> {
        self.maintenance
    }

    pub fn set_maintenance(&mut self, maintenance: f64) {
        self.maintenance = Some(maintenance);
    }

    pub fn net_to_gross_factor(&self) -> f64 {
        self.net_to_gross_factor
    }

    pub fn set_net_to_gross_factor(&mut self, factor: f64) {
        self.net_to_gross_factor = factor;
    }

    /// Clears track costs and drops tonnage noise. Capacity and tonnage
    /// stay in place.
    pub fn reset(&mut self) {
        self.eac_track = None;
        self.maintenance = None;
        self.tons.clean_insignificant(TONS_SIGNIFICANCE);
    }
}

impl TransportLink for Link {
    fn base(&self) -> &Link {
        self
    }

    fn base_mut(&mut self) -> &mut Link {
        self
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Link: {:<10} Distance: {:<12.1} Gauge: {:<8} Ton: {:.1}",
            self.id.to_string(),
            self.distance,
            self.gauge,
            self.tons.total()
        )
    }
}
