/// Rolling stock used to turn net tons into gross tons on railway links.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RollingStock {
    pub wagon_capacity: f64,
    pub wagon_weight: f64,
    pub locomotive_capacity: f64,
    pub locomotive_weight: f64,
}

impl RollingStock {
    /// Gross tons of a train carrying `ton` with `idle_capacity` spare tons
    /// pulled by the same locomotives.
    pub fn gross_tons(&self, ton: f64, idle_capacity: f64) -> f64 {
        let wagons = ton / self.wagon_capacity;
        let locomotives = (ton + idle_capacity) / self.locomotive_capacity;

        wagons * self.wagon_weight + locomotives * self.locomotive_weight + ton
    }
}
