use serde::Deserialize;

use crate::{
    error::{NetworkError, NetworkResult},
    link_id::LinkId,
    types::Distance,
};

/// A row of a gauge link table: `"A-B"` and its length in kilometers.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LinkRecord {
    pub id: String,
    pub distance: Distance,
}

impl LinkRecord {
    pub fn new(id: impl Into<String>, distance: Distance) -> Self {
        LinkRecord {
            id: id.into(),
            distance,
        }
    }

    pub fn parse(&self) -> NetworkResult<(LinkId, Distance)> {
        let link_id = self.id.parse::<LinkId>()?;

        if !self.distance.is_finite() || self.distance < 0.0 {
            return Err(NetworkError::MalformedLinkRecord {
                id: self.id.clone(),
                reason: format!("distance {} is not a non-negative number", self.distance),
            });
        }

        Ok((link_id, self.distance))
    }
}

/// A link record tagged with the gauge it belongs to, as found in a table
/// mixing several gauges.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GaugeLinkRecord {
    pub id: String,
    pub distance: Distance,
    pub gauge: String,
}

impl GaugeLinkRecord {
    pub fn into_parts(self) -> (String, LinkRecord) {
        (
            self.gauge,
            LinkRecord {
                id: self.id,
                distance: self.distance,
            },
        )
    }
}
