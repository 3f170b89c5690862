use std::io::Read;

use serde::Deserialize;

use crate::{
    error::{NetworkError, NetworkResult},
    link::{railway_link::RailwayLink, rolling_stock::RollingStock, transport_link::TransportLink},
};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Threads {
    #[default]
    Single,
    Auto,
    Multi(usize),
}

impl Threads {
    pub fn number_of_threads(&self) -> usize {
        match self {
            Threads::Single => 1,
            Threads::Multi(num) => (*num).max(1),
            Threads::Auto => std::thread::available_parallelism().map_or(1, |n| n.get()),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct PathSearchParams {
    /// Origins of a gauge are swept on this many threads.
    pub threads: Threads,
}

fn default_net_to_gross_factor() -> f64 {
    1.0
}

/// Rolling stock and track parameters of a railway network.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RailwayParameters {
    /// Tons carried by a wagon.
    pub wagon_capacity: f64,
    /// Tare weight of a wagon, in tons.
    pub wagon_weight: f64,
    /// Tons hauled by a locomotive.
    pub locomotive_capacity: f64,
    /// Weight of a locomotive, in tons.
    pub locomotive_weight: f64,
    /// Maximum distance between turnouts on a single track, in km.
    pub turnout_freq: f64,
    /// Gross tons per km above which turnouts get closer to each other.
    pub turnout_freq_max_density: f64,
    #[serde(default = "default_net_to_gross_factor")]
    pub net_to_gross_factor: f64,
}

impl RailwayParameters {
    pub fn from_json(json: &str) -> NetworkResult<Self> {
        let params: RailwayParameters = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    pub fn from_reader<R: Read>(reader: R) -> NetworkResult<Self> {
        let params: RailwayParameters = serde_json::from_reader(reader)?;
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> NetworkResult<()> {
        let positive = [
            ("wagon_capacity", self.wagon_capacity),
            ("locomotive_capacity", self.locomotive_capacity),
            ("turnout_freq", self.turnout_freq),
            ("turnout_freq_max_density", self.turnout_freq_max_density),
            ("net_to_gross_factor", self.net_to_gross_factor),
        ];

        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(NetworkError::InvalidParameters(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }

        for (name, value) in [
            ("wagon_weight", self.wagon_weight),
            ("locomotive_weight", self.locomotive_weight),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(NetworkError::InvalidParameters(format!(
                    "{name} must not be negative, got {value}"
                )));
            }
        }

        Ok(())
    }

    pub fn rolling_stock(&self) -> RollingStock {
        RollingStock {
            wagon_capacity: self.wagon_capacity,
            wagon_weight: self.wagon_weight,
            locomotive_capacity: self.locomotive_capacity,
            locomotive_weight: self.locomotive_weight,
        }
    }

    /// Sets the detour and net-to-gross parameters of a link.
    pub fn apply_to(&self, link: &mut RailwayLink) -> NetworkResult<()> {
        link.set_turnout_freq(self.turnout_freq)?;
        link.set_turnout_max_density(self.turnout_freq_max_density)?;
        link.base_mut().set_net_to_gross_factor(self.net_to_gross_factor);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARAMS: &str = r#"{
        "wagon_capacity": 40.0,
        "wagon_weight": 20.0,
        "locomotive_capacity": 1200.0,
        "locomotive_weight": 100.0,
        "turnout_freq": 30.0,
        "turnout_freq_max_density": 1500000.0
    }"#;

    #[test]
    fn test_from_json() {
        let params = RailwayParameters::from_json(PARAMS).unwrap();

        assert_eq!(params.wagon_capacity, 40.0);
        assert_eq!(params.net_to_gross_factor, 1.0);
        assert_eq!(params.rolling_stock().locomotive_weight, 100.0);
    }

    #[test]
    fn test_from_reader() {
        let params = RailwayParameters::from_reader(PARAMS.as_bytes()).unwrap();
        assert_eq!(params.turnout_freq, 30.0);
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let json = PARAMS.replace("\"wagon_weight\"", "\"wagon_mass\"");
        assert!(matches!(
            RailwayParameters::from_json(&json),
            Err(NetworkError::Config(_))
        ));
    }

    #[test]
    fn test_invalid_values() {
        let json = PARAMS.replace("30.0", "0.0");
        assert!(matches!(
            RailwayParameters::from_json(&json),
            Err(NetworkError::InvalidParameters(_))
        ));

        let json = PARAMS.replace("20.0", "-1.0");
        assert!(matches!(
            RailwayParameters::from_json(&json),
            Err(NetworkError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_apply_to_link() {
        let params = RailwayParameters::from_json(PARAMS).unwrap();
        let mut link = RailwayLink::new("1-2", 100.0, "ancha").unwrap();

        params.apply_to(&mut link).unwrap();

        assert_eq!(link.turnout_freq(), Some(30.0));
        assert_eq!(link.turnout_freq_max_density(), Some(1_500_000.0));
    }

    #[test]
    fn test_threads() {
        assert_eq!(Threads::Single.number_of_threads(), 1);
        assert_eq!(Threads::Multi(4).number_of_threads(), 4);
        assert_eq!(Threads::Multi(0).number_of_threads(), 1);
        assert!(Threads::Auto.number_of_threads() >= 1);
    }
}
