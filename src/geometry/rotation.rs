use crate::geometry::Pt;

/// Signed angle, in degrees within [0, 360), by which the canvas must be
/// rotated so the vector `from -> to` points straight up.
///
/// A single `atan2` over the direction vector covers all four quadrants:
/// pixel y grows downward, so "up" is the (0, -1) direction and the angle is
/// measured clockwise from it.
pub fn upright_angle(from: Pt, to: Pt) -> f64 {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let degrees = dx.atan2(-dy).to_degrees();
    if degrees < 0.0 { degrees + 360.0 } else { degrees }
}

/// Rotate a point about a center by the given angle in degrees.
pub fn rotate_about(p: Pt, center: Pt, angle_deg: f64) -> Pt {
    let theta = (-angle_deg).to_radians();
    let (sin, cos) = theta.sin_cos();
    let dx = p.x - center.x;
    let dy = p.y - center.y;
    Pt::new(
        dx * cos - dy * sin + center.x,
        dx * sin + dy * cos + center.y,
    )
}

/// A rotated canvas frame.
///
/// Rotating about the old canvas center generally pushes coordinates outside
/// the original dimensions, so the new canvas is sized to the bounding
/// rectangle of the rotated corner points and every coordinate is shifted so
/// the new minimum x/y map to pixel 0.
#[derive(Debug, Clone)]
pub struct Frame {
    center: Pt,
    angle: f64,
    min: Pt,
    /// Dimensions of the rotated canvas.
    pub width: u32,
    pub height: u32,
}

impl Frame {
    /// Build the frame for rotating a `width` x `height` canvas by `angle`
    /// degrees about its center.
    pub fn new(width: u32, height: u32, angle: f64) -> Frame {
        let center = Pt::new((width / 2) as f64, (height / 2) as f64);
        let corners = [
            Pt::new(0.0, 0.0),
            Pt::new(width as f64, 0.0),
            Pt::new(0.0, height as f64),
            Pt::new(width as f64, height as f64),
        ];

        let rotated: Vec<Pt> = corners
            .iter()
            .map(|&c| rotate_about(c, center, angle))
            .collect();
        let bounds = crate::geometry::PixelBounds::from_points(&rotated);

        Frame {
            center,
            angle,
            min: Pt::new(bounds.min_x, bounds.min_y),
            width: bounds.width().trunc() as u32,
            height: bounds.height().trunc() as u32,
        }
    }

    /// Rotate a point and translate it into the new canvas.
    pub fn apply(&self, p: Pt) -> Pt {
        let r = rotate_about(p, self.center, self.angle);
        Pt::new(r.x - self.min.x, r.y - self.min.y)
    }
}
