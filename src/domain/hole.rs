/// A WGS84 coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// One golf hole as mapped in OSM: an ordered centerline of 2-4 waypoints.
///
/// The first waypoint marks the tee origin and the last the center of the
/// green; one or two interior waypoints mark dogleg bends. Holes with fewer
/// than two waypoints cannot be rendered and are rejected by the parser.
#[derive(Debug, Clone)]
pub struct Hole {
    /// Hole number from the `ref` tag. Kept as a string since courses use
    /// labels like "9a" for crossover holes.
    pub number: String,
    /// Par from the `par` tag (3, 4 or 5 on a regulation course).
    pub par: u8,
    /// Ordered centerline waypoints, tee first, green center last.
    pub waypoints: Vec<GeoPoint>,
}

impl Hole {
    pub fn green_center(&self) -> GeoPoint {
        *self.waypoints.last().expect("hole has at least two waypoints")
    }

    pub fn tee_origin(&self) -> GeoPoint {
        self.waypoints[0]
    }

    pub fn is_par_3(&self) -> bool {
        self.par == 3
    }
}
