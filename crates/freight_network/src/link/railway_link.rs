use std::fmt;

use crate::{
    error::{NetworkError, NetworkResult},
    link::{base_link::Link, rolling_stock::RollingStock, transport_link::TransportLink},
    types::{Distance, Tons},
};

/// Railway link keeping track of the idle capacity of the rolling stock
/// running on it.
///
/// Idle capacity is split in two pools: tons that can be regrouped (removed
/// by running fewer trains) and tons that cannot. The regroup pool never
/// goes below zero.
#[derive(Debug, Clone)]
pub struct RailwayLink {
    link: Link,
    idle_capacity_regroup: Tons,
    idle_capacity_no_regroup: Tons,
    turnout_freq: Option<f64>,
    turnout_freq_max_density: Option<f64>,
    eac_detour: Option<f64>,
}

impl RailwayLink {
    pub fn new(id: &str, distance: Distance, gauge: &str) -> NetworkResult<Self> {
        Ok(RailwayLink {
            link: Link::new(id, distance, gauge)?,
            idle_capacity_regroup: 0.0,
            idle_capacity_no_regroup: 0.0,
            turnout_freq: None,
            turnout_freq_max_density: None,
            eac_detour: None,
        })
    }

    /// Idle capacity in tons.
    pub fn idle_cap(&self) -> Tons {
        self.idle_capacity_regroup + self.idle_capacity_no_regroup
    }

    pub fn idle_cap_regroup(&self) -> Tons {
        self.idle_capacity_regroup
    }

    pub fn idle_cap_no_regroup(&self) -> Tons {
        self.idle_capacity_no_regroup
    }

    /// Idle capacity in ton-km.
    pub fn idle_cap_tk(&self) -> f64 {
        self.idle_cap() * self.distance()
    }

    pub fn idle_cap_regroup_tk(&self) -> f64 {
        self.idle_capacity_regroup * self.distance()
    }

    pub fn idle_cap_no_regroup_tk(&self) -> f64 {
        self.idle_capacity_no_regroup * self.distance()
    }

    pub fn add_idle_cap_regroup(&mut self, tons: Tons) -> NetworkResult<()> {
        self.check_amount(tons)?;
        self.idle_capacity_regroup += tons;
        Ok(())
    }

    pub fn add_idle_cap_no_regroup(&mut self, tons: Tons) -> NetworkResult<()> {
        self.check_amount(tons)?;
        self.idle_capacity_no_regroup += tons;
        Ok(())
    }

    /// Removes idle capacity from the regroup pool. Nothing changes when the
    /// pool holds less than `tons`.
    pub fn regroup(&mut self, tons: Tons) -> NetworkResult<()> {
        self.check_amount(tons)?;

        if tons > self.idle_capacity_regroup {
            return Err(NetworkError::InsufficientIdleCapacity {
                link: self.id().to_string(),
                requested: tons,
                available: self.idle_capacity_regroup,
            });
        }

        self.idle_capacity_regroup -= tons;
        Ok(())
    }

    /// Gives back capacity taken by [`RailwayLink::regroup`].
    pub fn revert_regroup(&mut self, tons: Tons) -> NetworkResult<()> {
        self.check_amount(tons)?;
        self.idle_capacity_regroup += tons;
        Ok(())
    }

    /// Gross ton-km computed from the trains needed to carry the current
    /// tons, or approximated with the net-to-gross factor without rolling
    /// stock.
    pub fn gross_ton_km_with(&self, rolling_stock: Option<&RollingStock>) -> f64 {
        match rolling_stock {
            Some(stock) => stock.gross_tons(self.ton(), self.idle_cap()) * self.distance(),
            None => self.gross_ton_km(),
        }
    }

    /// Number of detours needed on the link, not rounded.
    ///
    /// Turnouts are `turnout_freq` km apart until the gross density reaches
    /// `turnout_freq_max_density`, and proportionally closer above it.
    pub fn number_of_detours(&self) -> NetworkResult<f64> {
        let gross_tk = self.gross_ton_km();
        if gross_tk == 0.0 {
            return Ok(0.0);
        }

        let max_spacing = self.turnout_freq.ok_or_else(|| self.missing("turnout_freq"))?;
        let max_density = self
            .turnout_freq_max_density
            .ok_or_else(|| self.missing("turnout_freq_max_density"))?;

        let distance = self.distance();
        let density = gross_tk / distance;

        let spacing = if density < max_density {
            max_spacing
        } else {
            max_spacing / (density / max_density)
        };

        Ok(distance / spacing)
    }

    pub fn turnout_freq(&self) -> Option<f64> {
        self.turnout_freq
    }

    /// Maximum distance between turnouts, in km. Must be positive.
    pub fn set_turnout_freq(&mut self, turnout_freq: f64) -> NetworkResult<()> {
        self.turnout_freq = Some(self.check_positive("turnout_freq", turnout_freq)?);
        Ok(())
    }

    pub fn turnout_freq_max_density(&self) -> Option<f64> {
        self.turnout_freq_max_density
    }

    /// Gross density where turnouts start getting closer. Must be positive.
    pub fn set_turnout_max_density(&mut self, max_density: f64) -> NetworkResult<()> {
        self.turnout_freq_max_density =
            Some(self.check_positive("turnout_freq_max_density", max_density)?);
        Ok(())
    }

    pub fn eac_detour(&self) -> Option<f64> {
        self.eac_detour
    }

    pub fn set_eac_detour(&mut self, eac_detour: f64) {
        self.eac_detour = Some(eac_detour);
    }

    // Idle capacity pools only move by finite, non-negative amounts
    fn check_amount(&self, tons: Tons) -> NetworkResult<()> {
        if tons.is_finite() && tons >= 0.0 {
            Ok(())
        } else {
            Err(NetworkError::InvalidCapacityAmount {
                link: self.id().to_string(),
                amount: tons,
            })
        }
    }

    fn check_positive(&self, parameter: &str, value: f64) -> NetworkResult<f64> {
        if value.is_finite() && value > 0.0 {
            Ok(value)
        } else {
            Err(NetworkError::InvalidParameters(format!(
                "{parameter} of link {} must be positive, got {value}",
                self.id()
            )))
        }
    }

    fn missing(&self, parameter: &'static str) -> NetworkError {
        NetworkError::MissingParameter {
            link: self.id().to_string(),
            parameter,
        }
    }
}

impl TransportLink for RailwayLink {
    fn base(&self) -> &Link {
        &self.link
    }

    fn base_mut(&mut self) -> &mut Link {
        &mut self.link
    }
}

impl fmt::Display for RailwayLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Idle capacity: {:.1}", self.link, self.idle_cap())
    }
}
