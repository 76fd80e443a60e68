//! Per-hole data gathering: fetch the mapped features around a hole's
//! centerline and identify its green.

use crate::api::GolfSource;
use crate::domain::{FeatureKind, GeoPoint, Hole};
use crate::error::BookError;
use crate::geometry::{GeoBounds, Projector};
use crate::osm::{RawFeature, parse_features};

/// Search margin around the waypoint box, in yards.
const SEARCH_PAD_YDS: f64 = 50.0;

/// Everything needed to draw one hole, still in geographic coordinates.
#[derive(Debug)]
pub struct HoleData {
    pub projector: Projector,
    /// Every classified feature except the hole's own green.
    pub features: Vec<RawFeature>,
    pub green: Vec<GeoPoint>,
}

/// Fetches and classifies the features around `hole`. The hole's green is
/// the green polygon whose bounding box contains the last waypoint.
pub fn extract(
    hole: &Hole,
    source: &impl GolfSource,
    scale: u32,
) -> Result<HoleData, BookError> {
    let bounds = GeoBounds::from_points(&hole.waypoints)
        .ok_or_else(|| {
            BookError::InvalidBounds(format!("hole {} has no waypoints", hole.number))
        })?
        .expand_yards(SEARCH_PAD_YDS);
    let response = source.features_in(&bounds)?;
    let mut features = parse_features(&response);

    let center = hole.green_center();
    let green_at = features
        .iter()
        .position(|f| {
            f.kind == FeatureKind::Green
                && GeoBounds::from_points(&f.points)
                    .is_some_and(|b| b.contains(center))
        })
        .ok_or_else(|| BookError::GreenNotFound {
            hole: hole.number.clone(),
        })?;
    let green = features.swap_remove(green_at).points;
    // Neighboring greens would only clutter the page.
    features.retain(|f| f.kind != FeatureKind::Green);

    let projector = Projector::new(bounds, scale)?;
    Ok(HoleData { projector, features, green })
}
