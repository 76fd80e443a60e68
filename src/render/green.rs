//! Close-up green page: a tight crop around the green with a three yard
//! reference grid laid over it.

use image::{Rgb, RgbImage, imageops};

use super::canvas::{Canvas, pad};
use crate::geometry::Pt;

const GRID_COLOR: Rgb<u8> = Rgb([140, 140, 140]);
/// Grid pitch in yards.
const GRID_PITCH_YDS: f64 = 3.0;
/// Crop margins around the green center, in yards. The extra room below
/// keeps the approach side visible.
const MARGIN_YDS: f64 = 30.0;
const BELOW_MARGIN_YDS: f64 = 39.0;

/// Crops the drawn canvas around the green and overlays the grid. The
/// grid is anchored on the green center, marked with a one yard square.
pub fn grid_detail(canvas: &mut Canvas, green_center: Pt) -> RgbImage {
    let ypp = canvas.ypp;
    let half_yd = 0.5 / ypp;

    // Center marker before cropping so clamping cannot shift it.
    let cx = green_center.x;
    let cy = green_center.y;
    for px in (cx - half_yd) as u32..=(cx + half_yd) as u32 {
        for py in (cy - half_yd) as u32..=(cy + half_yd) as u32 {
            if px < canvas.width() && py < canvas.height() {
                canvas.img.put_pixel(px, py, Rgb([0, 0, 0]));
            }
        }
    }

    let margin = MARGIN_YDS / ypp;
    let x0 = (cx - margin).max(0.0) as u32;
    let y0 = (cy - margin).max(0.0) as u32;
    let x1 = ((cx + margin) as u32).min(canvas.width());
    let y1 = ((cy + BELOW_MARGIN_YDS / ypp) as u32).min(canvas.height());
    let mut img =
        imageops::crop_imm(&canvas.img, x0, y0, x1.saturating_sub(x0).max(1), y1.saturating_sub(y0).max(1))
            .to_image();

    let thickness = if img.width() > 850 { 2 } else { 1 };
    let grid_x = cx - f64::from(x0);
    let grid_y = cy - f64::from(y0);
    let pitch = GRID_PITCH_YDS / ypp;

    draw_grid_lines(&mut img, grid_x, pitch, thickness, true);
    draw_grid_lines(&mut img, grid_y, pitch, thickness, false);

    pad(&img, thickness, thickness, thickness, thickness, GRID_COLOR)
}

/// Grid lines walk outward from the anchor in both directions so the
/// center always falls on a line crossing.
fn draw_grid_lines(img: &mut RgbImage, anchor: f64, pitch: f64, thickness: u32, vertical: bool) {
    let extent = if vertical { img.width() } else { img.height() };
    let mut offsets = Vec::new();
    let mut pos = anchor;
    while pos >= 0.0 {
        offsets.push(pos);
        pos -= pitch;
    }
    pos = anchor + pitch;
    while pos < f64::from(extent) {
        offsets.push(pos);
        pos += pitch;
    }

    for offset in offsets {
        let at = offset as u32;
        for t in 0..thickness {
            let line = at.saturating_add(t);
            if line >= extent {
                continue;
            }
            if vertical {
                for y in 0..img.height() {
                    img.put_pixel(line, y, GRID_COLOR);
                }
            } else {
                for x in 0..img.width() {
                    img.put_pixel(x, line, GRID_COLOR);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_is_anchored_on_green_center() {
        let mut canvas = Canvas::new(400, 400, 0.5, Rgb([255, 255, 255]));
        let out = grid_detail(&mut canvas, Pt { x: 200.0, y: 200.0 });
        // x0 = 200 - 60 = 140, border 1 px: the anchored vertical line
        // lands at 200 - 140 + 1 = 61.
        assert_eq!(*out.get_pixel(61, 5), GRID_COLOR);
        // Next line one pitch (6 px) away.
        assert_eq!(*out.get_pixel(67, 5), GRID_COLOR);
    }

    #[test]
    fn center_square_is_black() {
        let mut canvas = Canvas::new(400, 400, 0.5, Rgb([255, 255, 255]));
        let out = grid_detail(&mut canvas, Pt { x: 200.0, y: 200.0 });
        // The center pixel itself sits under a grid line; the corner of
        // the one yard square at (59, 59) in the crop survives.
        assert_eq!(*out.get_pixel(60, 60), Rgb([0, 0, 0]));
    }

    #[test]
    fn crop_covers_requested_margins() {
        let mut canvas = Canvas::new(1000, 1000, 0.5, Rgb([255, 255, 255]));
        let out = grid_detail(&mut canvas, Pt { x: 500.0, y: 500.0 });
        // 60 px each side horizontally, 60 above and 78 below, plus the
        // 1 px border all around.
        assert_eq!(out.width(), 122);
        assert_eq!(out.height(), 140);
    }

    #[test]
    fn crop_clamps_at_canvas_edge() {
        let mut canvas = Canvas::new(100, 100, 0.5, Rgb([255, 255, 255]));
        let out = grid_detail(&mut canvas, Pt { x: 10.0, y: 10.0 });
        assert!(out.width() <= 72);
        assert!(out.height() <= 90);
    }
}
