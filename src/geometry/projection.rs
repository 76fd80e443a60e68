use crate::domain::GeoPoint;
use crate::error::BookError;
use crate::geometry::Pt;

/// Default target for the longer canvas dimension, in pixels.
pub const DEFAULT_SCALE: u32 = 3000;

/// Approximate length of a degree of latitude at the equator, in yards.
const LAT_DEGREE_EQUATOR_YDS: f64 = 120925.62;
/// A degree of latitude lengthens by roughly this many yards per degree of
/// latitude away from the equator.
const LAT_YDS_PER_DEGREE: f64 = 13.56;
/// Length of a degree of longitude at the equator, in yards.
const LON_DEGREE_EQUATOR_YDS: f64 = 69.172 * 5280.0 / 3.0;

/// Yard-length of one degree of latitude at the mean latitude of a box.
pub fn lat_degree_yards(south: f64, north: f64) -> f64 {
    let mean_lat = (south + north) / 2.0;
    LAT_DEGREE_EQUATOR_YDS + mean_lat.abs() * LAT_YDS_PER_DEGREE
}

/// Yard-length of one degree of longitude at the mean latitude of a box.
/// Shrinks with cos(latitude) since meridians converge toward the poles.
pub fn lon_degree_yards(south: f64, north: f64) -> f64 {
    let mean_lat = (south + north) / 2.0;
    LON_DEGREE_EQUATOR_YDS * mean_lat.to_radians().cos()
}

/// Geographic bounding box in degrees (south/west/north/east).
#[derive(Debug, Clone, Copy)]
pub struct GeoBounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl GeoBounds {
    pub fn new(south: f64, west: f64, north: f64, east: f64) -> Self {
        Self {
            south,
            west,
            north,
            east,
        }
    }

    /// Fold a point list into its bounding box.
    pub fn from_points(points: &[GeoPoint]) -> Option<Self> {
        let first = points.first()?;
        let mut b = GeoBounds::new(first.lat, first.lon, first.lat, first.lon);
        for p in points {
            b.south = b.south.min(p.lat);
            b.north = b.north.max(p.lat);
            b.west = b.west.min(p.lon);
            b.east = b.east.max(p.lon);
        }
        Some(b)
    }

    /// Expand the box by the given number of yards on every side, using the
    /// local degree-length factors.
    pub fn expand_yards(&self, yards: f64) -> GeoBounds {
        let extra_lat = yards / lat_degree_yards(self.south, self.north);
        let extra_lon = yards / lon_degree_yards(self.south, self.north);
        GeoBounds {
            south: self.south - extra_lat,
            west: self.west - extra_lon,
            north: self.north + extra_lat,
            east: self.east + extra_lon,
        }
    }

    /// Strict interior containment, matching the green-identification check.
    pub fn contains(&self, p: GeoPoint) -> bool {
        p.lat > self.south && p.lat < self.north && p.lon > self.west && p.lon < self.east
    }
}

/// Converts geographic coordinates within a bounding box to pixel
/// coordinates at a fixed output scale.
///
/// The canvas is sized so the longer geographic extent maps to `scale`
/// pixels with a uniform yards-per-pixel factor on both axes. Axes are
/// swapped relative to (lon, lat): pixel x tracks latitude and pixel y
/// tracks longitude, which is what lets a single rotation later orient any
/// hole bottom-to-top.
#[derive(Debug, Clone)]
pub struct Projector {
    bounds: GeoBounds,
    /// Canvas width in pixels (latitude axis).
    pub width: u32,
    /// Canvas height in pixels (longitude axis).
    pub height: u32,
    /// Yards per pixel, identical on both axes.
    pub ypp: f64,
}

impl Projector {
    /// Build a projector for a bounding box.
    ///
    /// Fails with `InvalidBounds` on a degenerate box (min >= max on either
    /// axis); for any valid box `ypp > 0` holds.
    pub fn new(bounds: GeoBounds, scale: u32) -> Result<Self, BookError> {
        if bounds.north <= bounds.south || bounds.east <= bounds.west {
            return Err(BookError::InvalidBounds(format!(
                "south {} / north {} and west {} / east {} must each be strictly ordered",
                bounds.south, bounds.north, bounds.west, bounds.east
            )));
        }

        let lat_dist = (bounds.north - bounds.south) * lat_degree_yards(bounds.south, bounds.north);
        let lon_dist = (bounds.east - bounds.west) * lon_degree_yards(bounds.south, bounds.north);

        let (width, height, ypp) = if lat_dist >= lon_dist {
            let height = ((lon_dist / lat_dist) * scale as f64) as u32;
            (scale, height, lat_dist / scale as f64)
        } else {
            let width = ((lat_dist / lon_dist) * scale as f64) as u32;
            (width, scale, lon_dist / scale as f64)
        };

        Ok(Self {
            bounds,
            width,
            height,
            ypp,
        })
    }

    /// Project a geographic point to a pixel point by linear interpolation
    /// within the bounding box, truncated to whole pixels.
    pub fn project(&self, p: GeoPoint) -> Pt {
        let b = &self.bounds;
        let x = (p.lat - b.south) / (b.north - b.south) * self.width as f64;
        let y = (p.lon - b.west) / (b.east - b.west) * self.height as f64;
        Pt::new(x.trunc(), y.trunc())
    }

    pub fn project_ring(&self, points: &[GeoPoint]) -> Vec<Pt> {
        points.iter().map(|&p| self.project(p)).collect()
    }

    /// Inverse interpolation, used to check projection round-trips.
    pub fn unproject(&self, p: Pt) -> GeoPoint {
        let b = &self.bounds;
        let lat = b.south + p.x / self.width as f64 * (b.north - b.south);
        let lon = b.west + p.y / self.height as f64 * (b.east - b.west);
        GeoPoint::new(lat, lon)
    }
}
