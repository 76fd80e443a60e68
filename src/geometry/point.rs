/// A point in hole-local raster space.
///
/// Coordinates stay floating point through rotation and translation and are
/// truncated only at draw time, so repeated transforms do not accumulate
/// rounding error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pt {
    pub x: f64,
    pub y: f64,
}

impl Pt {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance in pixels.
    pub fn dist(self, other: Pt) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn midpoint(self, other: Pt) -> Pt {
        Pt::new((self.x + other.x) * 0.5, (self.y + other.y) * 0.5)
    }
}
