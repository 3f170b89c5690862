pub type NodeId = u32;
pub type Distance = f64;
pub type Tons = f64;
pub type Category = u32;

/// Separator between node ids in link ids, OD ids and path strings.
pub const NODE_SEPARATOR: char = '-';

/// Tons below this amount are treated as rounding noise.
pub const TONS_SIGNIFICANCE: Tons = 0.01;
