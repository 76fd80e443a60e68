use crate::geometry::Pt;

/// Axis-aligned bounding box in pixel space.
///
/// `EMPTY` is the identity for [`PixelBounds::merge`], so a set of feature
/// boxes can be combined with a plain fold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelBounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl PixelBounds {
    pub const EMPTY: PixelBounds = PixelBounds {
        min_x: f64::INFINITY,
        min_y: f64::INFINITY,
        max_x: f64::NEG_INFINITY,
        max_y: f64::NEG_INFINITY,
    };

    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Pt>) -> PixelBounds {
        points
            .into_iter()
            .fold(PixelBounds::EMPTY, |b, &p| b.include(p))
    }

    pub fn include(self, p: Pt) -> PixelBounds {
        PixelBounds {
            min_x: self.min_x.min(p.x),
            min_y: self.min_y.min(p.y),
            max_x: self.max_x.max(p.x),
            max_y: self.max_y.max(p.y),
        }
    }

    pub fn merge(self, other: PixelBounds) -> PixelBounds {
        PixelBounds {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_points() {
        let pts = [Pt::new(1.0, 5.0), Pt::new(-2.0, 3.0), Pt::new(4.0, -1.0)];
        let b = PixelBounds::from_points(&pts);
        assert_eq!(b.min_x, -2.0);
        assert_eq!(b.max_x, 4.0);
        assert_eq!(b.min_y, -1.0);
        assert_eq!(b.max_y, 5.0);
    }

    #[test]
    fn test_empty_is_merge_identity() {
        let b = PixelBounds::from_points(&[Pt::new(2.0, 2.0), Pt::new(3.0, 7.0)]);
        assert_eq!(PixelBounds::EMPTY.merge(b), b);
        assert_eq!(b.merge(PixelBounds::EMPTY), b);
        assert!(PixelBounds::EMPTY.is_empty());
    }

    #[test]
    fn test_merge_unions() {
        let a = PixelBounds::from_points(&[Pt::new(0.0, 0.0), Pt::new(1.0, 1.0)]);
        let b = PixelBounds::from_points(&[Pt::new(5.0, -3.0)]);
        let m = a.merge(b);
        assert_eq!(m.max_x, 5.0);
        assert_eq!(m.min_y, -3.0);
        assert_eq!(m.width(), 5.0);
        assert_eq!(m.height(), 4.0);
    }
}
