//! Relevance filtering: which mapped features belong on a hole's page.
//!
//! A hole only owns the features inside a corridor around its centerline,
//! and polygons near the line of play are kept at tighter widths than
//! far-off ones. All distances here are in pixels unless a name says yards.

use crate::domain::Feature;
use crate::geometry::{Pt, dist_to_line};

/// Corridor padding beyond the waypoint box, in yards.
const SIDE_PAD_YDS: f64 = 50.0;
const GREEN_PAD_YDS: f64 = 30.0;
const TEE_PAD_YDS: f64 = 10.0;
/// Widest corridor allowed before it is pulled back toward the waypoints.
const MAX_CORRIDOR_YDS: f64 = 125.0;
const REWIDEN_YDS: f64 = 15.0;

/// Banding: how far up the page a feature sits decides which width
/// threshold applies to it.
const NEAR_TEE_YDS: f64 = 75.0;
const SHORT_RANGE_YDS: f64 = 150.0;

/// Extra cut applied to tee boxes so a neighboring hole's tees are not
/// picked up. Measured up from the green end of the corridor.
const TEE_NEAR_GREEN_YDS: f64 = 90.0;
const TEE_LONG_HOLE_YDS: f64 = 140.0;

#[derive(Debug, Clone, Copy)]
pub struct Corridor {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Corridor {
    /// Builds the corridor box around the hole's waypoints. The page is
    /// oriented green-up, so small y is the green end and large y the tee
    /// end. An overly wide box is narrowed to a cap and then re-widened a
    /// little past the raw waypoint extent.
    pub fn around(waypoints: &[Pt], ypp: f64) -> Self {
        let raw_min_x = waypoints.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
        let raw_max_x = waypoints.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
        let min_y = waypoints.iter().map(|p| p.y).fold(f64::INFINITY, f64::min) - GREEN_PAD_YDS / ypp;
        let max_y = waypoints.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max) + TEE_PAD_YDS / ypp;

        let mut min_x = raw_min_x - SIDE_PAD_YDS / ypp;
        let mut max_x = raw_max_x + SIDE_PAD_YDS / ypp;
        let spread = (max_x - min_x) * ypp;
        if spread > MAX_CORRIDOR_YDS {
            let trim = (spread - MAX_CORRIDOR_YDS) / 2.0 / ypp;
            min_x += trim;
            max_x -= trim;
            min_x = min_x.min(raw_min_x - REWIDEN_YDS / ypp);
            max_x = max_x.max(raw_max_x + REWIDEN_YDS / ypp);
        }

        Corridor { min_x, min_y, max_x, max_y }
    }

    fn holds(&self, p: Pt, floor_y: f64) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y <= self.max_y && p.y >= floor_y
    }
}

pub struct FilterParams {
    pub ypp: f64,
    pub par: u8,
    /// Corridor width thresholds are fractions of this, in yards. `None`
    /// keeps everything inside the corridor box regardless of band.
    pub width: Option<f64>,
    pub small_factor: f64,
    pub med_factor: f64,
    /// Tee boxes get the extra near-green cut.
    pub tee_boxes: bool,
    /// Fairways are dropped whenever any vertex leaves the corridor.
    pub strict_vertices: bool,
}

/// Keeps the features that belong to this hole.
pub fn filter_features(waypoints: &[Pt], features: &[Feature], params: &FilterParams) -> Vec<Feature> {
    let corridor = Corridor::around(waypoints, params.ypp);
    let origin = waypoints[0];
    let green = *waypoints.last().unwrap_or(&origin);
    let midpoint = if waypoints.len() == 2 {
        origin.midpoint(green)
    } else {
        waypoints[1]
    };

    let tee_cut = if params.tee_boxes {
        let mut cut = TEE_NEAR_GREEN_YDS / params.ypp;
        if params.par >= 4 {
            cut += TEE_LONG_HOLE_YDS / params.ypp;
        }
        cut
    } else {
        0.0
    };
    let floor_y = corridor.min_y + tee_cut;

    let mut kept = Vec::new();
    for feature in features {
        if feature.points.is_empty() {
            continue;
        }
        let center = feature.centroid();
        if !corridor.holds(center, floor_y) {
            continue;
        }
        if params.strict_vertices
            && feature
                .points
                .iter()
                .any(|p| p.y > corridor.max_y || p.y < corridor.min_y)
        {
            continue;
        }

        let width = match params.width {
            Some(w) => w,
            None => {
                kept.push(feature.clone());
                continue;
            }
        };

        // Features near the tee must hug the line of play; further up the
        // hole the corridor widens. A par 3 is short enough that the wide
        // band applies everywhere.
        let up_the_hole = (corridor.max_y - center.y) * params.ypp;
        let threshold = if params.par == 3 {
            width
        } else if up_the_hole < NEAR_TEE_YDS {
            width * params.small_factor
        } else if up_the_hole < SHORT_RANGE_YDS {
            width * params.med_factor
        } else {
            width
        };

        let distance = if center.y < midpoint.y {
            dist_to_line(center, midpoint, green, params.ypp)
        } else {
            dist_to_line(center, midpoint, origin, params.ypp)
        };
        if distance < threshold {
            kept.push(feature.clone());
        }
    }
    kept
}
