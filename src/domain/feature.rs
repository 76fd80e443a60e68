use crate::geometry::Pt;

/// Closed set of feature categories drawn on a yardage page.
///
/// Raw OSM tags are folded into this enum by [`FeatureKind::from_tags`] so
/// that everything downstream (filtering, drawing, annotation) can match
/// exhaustively instead of chasing tag strings around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureKind {
    Fairway,
    TeeBox,
    Green,
    Sand,
    Water,
    Woods,
    Tree,
}

/// Ordered (tag key, tag value) -> category mapping. Explicit `golf=` values
/// take precedence over the natural/landuse fallbacks, so a pond tagged both
/// `golf=water_hazard` and `natural=water` classifies as a hazard.
const TAG_CATEGORIES: &[(&str, &str, FeatureKind)] = &[
    ("golf", "bunker", FeatureKind::Sand),
    ("golf", "tee", FeatureKind::TeeBox),
    ("golf", "fairway", FeatureKind::Fairway),
    ("golf", "green", FeatureKind::Green),
    ("golf", "water_hazard", FeatureKind::Water),
    ("golf", "lateral_water_hazard", FeatureKind::Water),
    ("natural", "water", FeatureKind::Water),
    ("natural", "wood", FeatureKind::Woods),
    ("landuse", "forest", FeatureKind::Woods),
    ("natural", "tree", FeatureKind::Tree),
];

impl FeatureKind {
    /// Classify a tag set into a category, or `None` to drop the geometry.
    pub fn from_tags<'a>(mut get: impl FnMut(&str) -> Option<&'a str>) -> Option<FeatureKind> {
        for &(key, value, kind) in TAG_CATEGORIES {
            if get(key) == Some(value) {
                return Some(kind);
            }
        }
        None
    }
}

/// A classified geometry in hole-local pixel space: a polygon ring for area
/// features, a single point for trees.
#[derive(Debug, Clone)]
pub struct Feature {
    pub kind: FeatureKind,
    pub points: Vec<Pt>,
}

impl Feature {
    pub fn new(kind: FeatureKind, points: Vec<Pt>) -> Self {
        Self { kind, points }
    }

    /// Vertex-mean centroid. The relevance filter keys off this, so it
    /// deliberately matches the plain mean rather than an area-weighted one.
    pub fn centroid(&self) -> Pt {
        let n = self.points.len() as f64;
        let (sx, sy) = self
            .points
            .iter()
            .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
        Pt::new(sx / n, sy / n)
    }

    pub fn map_points(&self, f: impl Fn(Pt) -> Pt) -> Feature {
        Feature {
            kind: self.kind,
            points: self.points.iter().map(|&p| f(p)).collect(),
        }
    }
}

/// Per-hole, per-category feature grouping.
///
/// Each pipeline stage (categorized, rotated, filtered) produces a fresh set
/// via [`FeatureSet::map_points`] or the filter; sets are never mutated in
/// place once built.
#[derive(Debug, Clone, Default)]
pub struct FeatureSet {
    pub fairways: Vec<Feature>,
    pub tee_boxes: Vec<Feature>,
    pub greens: Vec<Feature>,
    pub sand: Vec<Feature>,
    pub water: Vec<Feature>,
    pub woods: Vec<Feature>,
    pub trees: Vec<Feature>,
}

impl FeatureSet {
    pub fn push(&mut self, feature: Feature) {
        match feature.kind {
            FeatureKind::Fairway => self.fairways.push(feature),
            FeatureKind::TeeBox => self.tee_boxes.push(feature),
            FeatureKind::Green => self.greens.push(feature),
            FeatureKind::Sand => self.sand.push(feature),
            FeatureKind::Water => self.water.push(feature),
            FeatureKind::Woods => self.woods.push(feature),
            FeatureKind::Tree => self.trees.push(feature),
        }
    }

    /// Apply a point transform to every feature, producing a new set.
    pub fn map_points(&self, f: impl Fn(Pt) -> Pt + Copy) -> FeatureSet {
        let map = |list: &Vec<Feature>| list.iter().map(|ft| ft.map_points(f)).collect();
        FeatureSet {
            fairways: map(&self.fairways),
            tee_boxes: map(&self.tee_boxes),
            greens: map(&self.greens),
            sand: map(&self.sand),
            water: map(&self.water),
            woods: map(&self.woods),
            trees: map(&self.trees),
        }
    }
}
