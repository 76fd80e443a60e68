//! Point-to-line and line-circle helpers used by the relevance filter and
//! the annotation engine. All inputs are pixel coordinates; distances that
//! mean something to a golfer are returned in yards via the `ypp` factor.

use crate::geometry::Pt;

/// Distance between two pixel points in yards.
pub fn yards(a: Pt, b: Pt, ypp: f64) -> f64 {
    a.dist(b) * ypp
}

/// Perpendicular distance in yards from `p` to the infinite line through
/// `l1` and `l2`.
pub fn dist_to_line(p: Pt, l1: Pt, l2: Pt, ypp: f64) -> f64 {
    let distance = if l1.x == l2.x {
        // Vertical line: distance is just the x offset.
        (l1.x - p.x).abs()
    } else {
        let slope = (l1.y - l2.y) / (l1.x - l2.x);
        let intercept = l1.y - slope * l1.x;
        // ax + by + c = 0 with a = -slope, b = 1, c = -intercept
        let (a, b, c) = (-slope, 1.0, -intercept);
        (a * p.x + b * p.y + c).abs() / a.hypot(b)
    };
    distance * ypp
}

/// The x coordinate where the line through `a` and `b` crosses height `y`.
/// For a (near-)horizontal or vertical line this degenerates to `a.x`, which
/// is what the side test needs.
pub fn x_at_y(a: Pt, b: Pt, y: f64) -> f64 {
    if a.x == b.x {
        return a.x;
    }
    let slope = (a.y - b.y) / (a.x - b.x);
    if slope == 0.0 {
        return a.x;
    }
    let intercept = a.y - slope * a.x;
    (y - intercept) / slope
}

/// Whether `p` lies on the right-hand side of the line through `a` and `b`,
/// judged at the point's own height.
pub fn is_right_of(p: Pt, a: Pt, b: Pt) -> bool {
    p.x >= x_at_y(a, b, p.y)
}

/// Intersect the centerline segment `near..far` with the circle of radius
/// `radius_px` around `center`, preferring the solution that falls within
/// the segment.
///
/// `near` is the segment endpoint closer to the green; the arc renderer
/// walks segments outward so the wanted intersection normally sits between
/// the endpoints. Returns `None` when the circle misses the line entirely.
pub fn circle_segment_intersect(near: Pt, far: Pt, center: Pt, radius_px: f64) -> Option<Pt> {
    let dx = far.x - near.x;
    let dy = far.y - near.y;
    let ex = near.x - center.x;
    let ey = near.y - center.y;

    let a = dx * dx + dy * dy;
    let b = 2.0 * (ex * dx + ey * dy);
    let c = ex * ex + ey * ey - radius_px * radius_px;

    if a == 0.0 {
        return None;
    }
    let disc = b * b - 4.0 * a * c;
    if disc < 0.0 {
        return None;
    }

    let sqrt_disc = disc.sqrt();
    let t1 = (-b + sqrt_disc) / (2.0 * a);
    let t2 = (-b - sqrt_disc) / (2.0 * a);

    let t = if (0.0..=1.0).contains(&t1) { t1 } else { t2 };
    Some(Pt::new(near.x + t * dx, near.y + t * dy))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yards_scales_by_ypp() {
        let d = yards(Pt::new(0.0, 0.0), Pt::new(0.0, 100.0), 0.25);
        assert!((d - 25.0).abs() < 1e-12);
    }

    #[test]
    fn test_dist_to_vertical_line() {
        let d = dist_to_line(
            Pt::new(15.0, 50.0),
            Pt::new(10.0, 0.0),
            Pt::new(10.0, 100.0),
            1.0,
        );
        assert!((d - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_dist_to_sloped_line() {
        // 45 degree line y = x; point (0, 10) is 10/sqrt(2) away.
        let d = dist_to_line(
            Pt::new(0.0, 10.0),
            Pt::new(0.0, 0.0),
            Pt::new(10.0, 10.0),
            1.0,
        );
        assert!((d - 10.0 / 2f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_point_on_line_has_zero_distance() {
        let d = dist_to_line(
            Pt::new(5.0, 5.0),
            Pt::new(0.0, 0.0),
            Pt::new(10.0, 10.0),
            0.5,
        );
        assert!(d.abs() < 1e-12);
    }

    #[test]
    fn test_side_test() {
        let a = Pt::new(10.0, 0.0);
        let b = Pt::new(12.0, 100.0);
        assert!(is_right_of(Pt::new(30.0, 50.0), a, b));
        assert!(!is_right_of(Pt::new(2.0, 50.0), a, b));
    }

    #[test]
    fn test_side_test_vertical_line() {
        let a = Pt::new(10.0, 0.0);
        let b = Pt::new(10.0, 100.0);
        assert!(is_right_of(Pt::new(11.0, 50.0), a, b));
        assert!(!is_right_of(Pt::new(9.0, 50.0), a, b));
    }

    #[test]
    fn test_circle_segment_intersect_on_segment() {
        // Vertical segment from (0, 100) up to (0, 0), circle centered at the
        // near end with radius 40 -> intersection at (0, 60)... measuring
        // from center (0, 100) upward.
        let near = Pt::new(0.0, 100.0);
        let far = Pt::new(0.0, 0.0);
        let hit = circle_segment_intersect(near, far, near, 40.0).unwrap();
        assert!((hit.x - 0.0).abs() < 1e-9);
        assert!((hit.y - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_circle_segment_intersect_miss() {
        let near = Pt::new(0.0, 100.0);
        let far = Pt::new(0.0, 90.0);
        // Degenerate segment far from the circle center.
        assert!(circle_segment_intersect(near, far, Pt::new(500.0, 500.0), 10.0).is_none());
    }
}
