//! Filled-shape drawing for course features.

use image::Rgb;
use imageproc::drawing::{
    draw_filled_circle_mut, draw_hollow_circle_mut, draw_line_segment_mut, draw_polygon_mut,
};
use imageproc::point::Point;

use super::canvas::Canvas;
use crate::domain::Feature;
use crate::geometry::Pt;

const TREE_RADIUS: i32 = 50;
const TREE_STROKE: i32 = 6;

fn to_points(ring: &[Pt]) -> Vec<Point<i32>> {
    let mut pts: Vec<Point<i32>> = ring
        .iter()
        .map(|p| Point::new(p.x as i32, p.y as i32))
        .collect();
    // A ring that repeats its first vertex at the end cannot be handed to
    // the polygon rasterizer as-is.
    if pts.len() > 1 && pts.first() == pts.last() {
        pts.pop();
    }
    pts.dedup();
    pts
}

pub fn fill_polygon(canvas: &mut Canvas, ring: &[Pt], color: Rgb<u8>) {
    let pts = to_points(ring);
    if pts.len() < 3 {
        return;
    }
    draw_polygon_mut(&mut canvas.img, &pts, color);
}

pub fn fill_features(canvas: &mut Canvas, features: &[Feature], color: Rgb<u8>) {
    for feature in features {
        fill_polygon(canvas, &feature.points, color);
    }
}

/// Line segment with width, drawn as a stack of parallel one-pixel lines
/// offset along the segment normal.
pub fn thick_segment(canvas: &mut Canvas, a: Pt, b: Pt, thickness: u32, color: Rgb<u8>) {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len = (dx * dx + dy * dy).sqrt();
    if len == 0.0 {
        draw_filled_circle_mut(
            &mut canvas.img,
            (a.x as i32, a.y as i32),
            thickness as i32 / 2,
            color,
        );
        return;
    }
    let nx = -dy / len;
    let ny = dx / len;
    let half = (thickness.max(1) - 1) as f64 / 2.0;
    let mut offset = -half;
    while offset <= half + 1e-9 {
        draw_line_segment_mut(
            &mut canvas.img,
            ((a.x + nx * offset) as f32, (a.y + ny * offset) as f32),
            ((b.x + nx * offset) as f32, (b.y + ny * offset) as f32),
            color,
        );
        offset += 1.0;
    }
}

/// Polygon border. The ring is closed implicitly.
pub fn outline_polygon(canvas: &mut Canvas, ring: &[Pt], thickness: u32, color: Rgb<u8>) {
    if ring.len() < 2 {
        return;
    }
    let mut closed: Vec<Pt> = ring.to_vec();
    if closed.first().map(|p| (p.x, p.y)) != closed.last().map(|p| (p.x, p.y)) {
        closed.push(closed[0]);
    }
    for pair in closed.windows(2) {
        thick_segment(canvas, pair[0], pair[1], thickness, color);
    }
}

/// Map symbol for a lone tree: a circle with four straight and four
/// diagonal spokes through its center.
pub fn draw_tree(canvas: &mut Canvas, at: Pt, color: Rgb<u8>) {
    let (cx, cy) = (at.x as i32, at.y as i32);
    let half = TREE_STROKE / 2;
    for r in (TREE_RADIUS - half)..=(TREE_RADIUS + half) {
        draw_hollow_circle_mut(&mut canvas.img, (cx, cy), r, color);
    }
    let r = TREE_RADIUS as f64;
    let diag = r * std::f64::consts::FRAC_1_SQRT_2;
    let spokes = [
        (Pt { x: at.x - r, y: at.y }, Pt { x: at.x + r, y: at.y }),
        (Pt { x: at.x, y: at.y - r }, Pt { x: at.x, y: at.y + r }),
        (
            Pt { x: at.x - diag, y: at.y - diag },
            Pt { x: at.x + diag, y: at.y + diag },
        ),
        (
            Pt { x: at.x - diag, y: at.y + diag },
            Pt { x: at.x + diag, y: at.y - diag },
        ),
    ];
    for (a, b) in spokes {
        thick_segment(canvas, a, b, TREE_STROKE as u32, color);
    }
}
