use std::collections::HashMap;

use crate::api::OverpassResponse;
use crate::domain::{FeatureKind, GeoPoint, Hole};
use crate::error::BookError;

/// A classified geometry still in geographic coordinates; per-hole
/// projection to pixel space happens later, once the hole's canvas exists.
#[derive(Debug, Clone)]
pub struct RawFeature {
    pub kind: FeatureKind,
    pub points: Vec<GeoPoint>,
}

fn build_node_lookup(response: &OverpassResponse) -> HashMap<u64, GeoPoint> {
    response
        .elements
        .iter()
        .filter(|e| e.type_ == "node")
        .filter_map(|e| {
            let lat = e.lat?;
            let lon = e.lon?;
            Some((e.id, GeoPoint::new(lat, lon)))
        })
        .collect()
}

fn resolve_way_points(node_refs: &[u64], nodes: &HashMap<u64, GeoPoint>) -> Vec<GeoPoint> {
    node_refs
        .iter()
        .filter_map(|id| nodes.get(id).copied())
        .collect()
}

/// Parse `golf=hole` ways into [`Hole`] values.
///
/// Holes missing a number (`ref` tag), a parseable integer `par`, or a
/// usable centerline are reported as per-hole errors so the caller can log
/// the skip and continue with the batch.
pub fn parse_holes(response: &OverpassResponse) -> Vec<Result<Hole, BookError>> {
    let nodes = build_node_lookup(response);
    let mut holes = Vec::new();

    for element in &response.elements {
        if element.type_ != "way" || element.tag("golf") != Some("hole") {
            continue;
        }

        let number = match element.tag("ref") {
            Some(n) => n.to_string(),
            None => {
                holes.push(Err(BookError::MissingAttribute {
                    hole: format!("way {}", element.id),
                    attr: "hole number (ref tag)",
                }));
                continue;
            }
        };

        let par = match element.tag("par").and_then(|p| p.parse::<u8>().ok()) {
            Some(p) => p,
            None => {
                holes.push(Err(BookError::MissingAttribute {
                    hole: number,
                    attr: "par",
                }));
                continue;
            }
        };

        let waypoints = match &element.nodes {
            Some(refs) => resolve_way_points(refs, &nodes),
            None => Vec::new(),
        };
        if waypoints.len() < 2 {
            holes.push(Err(BookError::MissingAttribute {
                hole: number,
                attr: "centerline waypoints",
            }));
            continue;
        }

        holes.push(Ok(Hole {
            number,
            par,
            waypoints,
        }));
    }

    holes
}

/// Classify every way and node in a feature query response.
///
/// Ways run through the ordered tag table in [`FeatureKind::from_tags`];
/// the only node feature that matters is an individual tree. Unrecognized
/// or untagged geometry is dropped silently.
pub fn parse_features(response: &OverpassResponse) -> Vec<RawFeature> {
    let nodes = build_node_lookup(response);
    let mut features = Vec::new();

    for element in &response.elements {
        if element.type_ == "way" {
            // Hole centerlines come through the same query but are not
            // drawable features.
            if element.tag("golf") == Some("hole") {
                continue;
            }
            let Some(kind) = FeatureKind::from_tags(|key| element.tag(key)) else {
                continue;
            };
            let Some(refs) = &element.nodes else { continue };
            let points = resolve_way_points(refs, &nodes);
            if points.is_empty() {
                continue;
            }
            features.push(RawFeature { kind, points });
        } else if element.type_ == "node" && element.tag("natural") == Some("tree") {
            if let (Some(lat), Some(lon)) = (element.lat, element.lon) {
                features.push(RawFeature {
                    kind: FeatureKind::Tree,
                    points: vec![GeoPoint::new(lat, lon)],
                });
            }
        }
    }

    features
}
