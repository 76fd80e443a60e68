//! Yardage annotations drawn on top of the hole map: carry numbers over
//! hazards, distance-to-green markers, and range arcs across the fairway.
//!
//! The page is oriented green-up, so "toward the green" always means
//! smaller y here.

use image::Rgb;
use imageproc::drawing::draw_filled_circle_mut;

use super::canvas::Canvas;
use super::features::{fill_polygon, thick_segment};
use super::text::Labeler;
use crate::domain::Feature;
use crate::error::BookError;
use crate::geometry::{
    Pt, circle_segment_intersect, dist_to_line, is_right_of, upright_angle, x_at_y, yards,
};

/// Carries are only printed when the longest tee shot to reach them is
/// plausible for a tee ball.
const CARRY_DRAW_MIN_YDS: f64 = 185.0;
const CARRY_DRAW_MAX_YDS: f64 = 325.0;
/// Tighter band inside which a carry is also counted as confirmed.
const CARRY_CONFIRM_MIN_YDS: f64 = 215.0;
const CARRY_CONFIRM_MAX_YDS: f64 = 290.0;
/// A carry closer to the green than this is a lay-up number, not a carry.
const CARRY_GREEN_GAP_YDS: f64 = 40.0;

const CARRY_DEDUPE_YDS: f64 = 20.0;
const GREEN_DIST_DEDUPE_YDS: f64 = 15.0;
const LINE_OF_PLAY_YDS: f64 = 40.0;
const TREE_LINE_OF_PLAY_YDS: f64 = 25.0;
const GREEN_DIST_MIN_YDS: f64 = 40.0;
const GREEN_DIST_MAX_YDS: f64 = 305.0;
/// Fraction of the hole length past which a green distance stops being
/// useful from the tee.
const HOLE_FRACTION_CAP: f64 = 0.75;

const ARC_STEP_YDS: f64 = 50.0;
const ARC_LIMIT_YDS: f64 = 350.0;

/// Per-hole annotation context.
pub struct Annotator<'a> {
    pub labeler: &'a Labeler,
    pub color: Rgb<u8>,
    pub text_size: f64,
    pub meters: bool,
    pub hole: &'a str,
}

impl Annotator<'_> {
    /// Distances are measured in yards throughout; the unit switch only
    /// changes the printed number.
    pub fn format(&self, distance_yds: f64) -> String {
        let shown = if self.meters {
            distance_yds * 0.9144
        } else {
            distance_yds
        };
        format!("{}", shown as i64)
    }

    fn text_weight(&self) -> f64 {
        (self.text_size * 2.0).round().max(1.0)
    }
}

/// `right`/`left` count confirmed carries per side; `drawn` counts every
/// printed carry stack, confirmed or not.
#[derive(Debug, Default, Clone, Copy)]
pub struct CarryCounts {
    pub right: u32,
    pub left: u32,
    pub drawn: u32,
}

impl CarryCounts {
    pub fn confirmed(&self) -> u32 {
        self.right + self.left
    }
}

fn line_of_play(waypoints: &[Pt]) -> (Pt, Pt, Pt) {
    let origin = waypoints[0];
    let green = waypoints[waypoints.len() - 1];
    let midpoint = if waypoints.len() == 2 {
        origin.midpoint(green)
    } else {
        waypoints[1]
    };
    (origin, midpoint, green)
}

/// Vertex of each feature closest to the green end of the page.
fn green_side_vertices(features: &[Feature]) -> Vec<Pt> {
    features
        .iter()
        .filter_map(|f| {
            f.points
                .iter()
                .copied()
                .min_by(|a, b| a.y.total_cmp(&b.y))
        })
        .collect()
}

/// Vertex of each feature closest to the tee end of the page.
fn tee_side_vertices(features: &[Feature]) -> Vec<Pt> {
    features
        .iter()
        .filter_map(|f| {
            f.points
                .iter()
                .copied()
                .max_by(|a, b| a.y.total_cmp(&b.y))
        })
        .collect()
}

/// Picks the centerline segment a point should be measured against: the
/// upper half of the hole measures to the green leg, the lower half to
/// the tee leg.
fn segment_for(point: Pt, origin: Pt, midpoint: Pt, green: Pt) -> (Pt, Pt) {
    if point.y < midpoint.y {
        (midpoint, green)
    } else {
        (midpoint, origin)
    }
}

/// Centered label under a map point.
pub fn distance_text(canvas: &mut Canvas, ann: &Annotator<'_>, text: &str, at: Pt) {
    let width = ann.labeler.label_width(text, ann.text_size);
    let x = at.x - 0.5 * width;
    let y = at.y + 16.0 + 26.0 * ann.text_size;
    ann.labeler.draw(canvas, ann.color, x, y, ann.text_size, text);
}

fn triangle_marker(canvas: &mut Canvas, at: Pt, base: f64, color: Rgb<u8>) {
    let height = base * 3.0 / 5.0;
    let ring = [
        Pt { x: at.x, y: at.y - 2.0 * height / 3.0 },
        Pt { x: at.x - base / 2.0, y: at.y + height / 3.0 },
        Pt { x: at.x + base / 2.0, y: at.y + height / 3.0 },
    ];
    fill_polygon(canvas, &ring, color);
}

struct CarryOutcome {
    drawn: bool,
    confirmed: bool,
}

/// Stack of per-tee carry numbers beside one hazard point.
fn carry_group(
    canvas: &mut Canvas,
    ann: &Annotator<'_>,
    green: Pt,
    carry: Pt,
    tee_points: &[Pt],
    right_side: bool,
) -> CarryOutcome {
    if tee_points.is_empty() {
        return CarryOutcome { drawn: false, confirmed: false };
    }
    let mut distances: Vec<i64> = tee_points
        .iter()
        .map(|tee| yards(*tee, carry, canvas.ypp).round() as i64)
        .collect();
    distances.sort_unstable();
    let longest = *distances.last().unwrap_or(&0) as f64;
    if !(CARRY_DRAW_MIN_YDS..=CARRY_DRAW_MAX_YDS).contains(&longest) {
        return CarryOutcome { drawn: false, confirmed: false };
    }

    let ts = ann.text_size;
    let widest = distances
        .iter()
        .map(|d| ann.labeler.label_width(&ann.format(*d as f64), ts))
        .fold(0.0, f64::max);
    let x = if right_side {
        carry.x + 10.0 * (ts + 0.1) + 5.0
    } else {
        carry.x - 10.0 * (ts + 0.1) - widest
    };
    let y_step = 32.0 * ts;
    let mut y = carry.y - y_step * (distances.len() - 1) as f64 / 2.0 + 4.0;
    for d in &distances {
        ann.labeler
            .draw(canvas, ann.color, x, y, ts, &ann.format(*d as f64));
        y += y_step;
    }
    draw_filled_circle_mut(
        &mut canvas.img,
        (carry.x as i32, carry.y as i32),
        (6.5 + ts) as i32,
        ann.color,
    );
    for tee in tee_points {
        draw_filled_circle_mut(
            &mut canvas.img,
            (tee.x as i32, tee.y as i32),
            (3.0 + ts) as i32,
            ann.color,
        );
    }

    let to_green = yards(green, carry, canvas.ypp);
    let confirmed = to_green >= CARRY_GREEN_GAP_YDS
        && (CARRY_CONFIRM_MIN_YDS..=CARRY_CONFIRM_MAX_YDS).contains(&longest);
    CarryOutcome { drawn: true, confirmed }
}

/// Carry numbers over every hazard near the line of play.
pub fn carry_distances(
    canvas: &mut Canvas,
    ann: &Annotator<'_>,
    waypoints: &[Pt],
    tee_boxes: &[Feature],
    hazards: &[Feature],
) -> CarryCounts {
    let (origin, midpoint, green) = line_of_play(waypoints);
    let carry_pts = green_side_vertices(hazards);
    let tee_pts = tee_side_vertices(tee_boxes);
    let ypp = canvas.ypp;

    let mut counts = CarryCounts::default();
    let mut drawn: Vec<Pt> = Vec::new();
    for carry in carry_pts {
        if drawn.iter().any(|p| yards(*p, carry, ypp) < CARRY_DEDUPE_YDS) {
            continue;
        }
        let (a, b) = segment_for(carry, origin, midpoint, green);
        if dist_to_line(carry, a, b, ypp) > LINE_OF_PLAY_YDS {
            continue;
        }
        drawn.push(carry);
        let right_side = is_right_of(carry, a, b);
        let outcome = carry_group(canvas, ann, green, carry, &tee_pts, right_side);
        if outcome.drawn {
            counts.drawn += 1;
        }
        if outcome.confirmed {
            if right_side {
                counts.right += 1;
            } else {
                counts.left += 1;
            }
        }
    }
    counts
}

/// When no hazard produced a carry, a synthetic point on the centerline
/// still gives the player one tee-shot number. Placement depends on the
/// hole length.
pub fn fallback_carry(
    canvas: &mut Canvas,
    ann: &Annotator<'_>,
    waypoints: &[Pt],
    tee_boxes: &[Feature],
    counts: &CarryCounts,
) {
    if counts.confirmed() > 0 {
        return;
    }
    let (origin, midpoint, green) = line_of_play(waypoints);
    let ypp = canvas.ypp;
    let length = yards(origin, green, ypp);
    let y = if length < 380.0 {
        green.y + 95.0 / ypp
    } else if length < 430.0 {
        green.y + 145.0 / ypp
    } else if length < 480.0 {
        green.y + 195.0 / ypp
    } else {
        origin.y - 230.0 / ypp
    };

    let (a, b) = if midpoint.y > y {
        (midpoint, green)
    } else {
        (midpoint, origin)
    };
    let base_x = x_at_y(a, b, y);
    let (x, right_side) = if midpoint.x < green.x {
        (base_x - 20.0 / ypp, false)
    } else {
        (base_x + 20.0 / ypp, true)
    };
    let carry = Pt { x, y };
    let tee_pts = tee_side_vertices(tee_boxes);
    carry_group(canvas, ann, green, carry, &tee_pts, right_side);
}

/// Which feature edge a distance-to-green marker measures from, and the
/// caps that apply to it.
pub fn hazard_green_distances(
    canvas: &mut Canvas,
    ann: &Annotator<'_>,
    waypoints: &[Pt],
    features: &[Feature],
    par_3_tees: bool,
) {
    let (origin, midpoint, green) = line_of_play(waypoints);
    let ypp = canvas.ypp;
    let hole_length = yards(origin, green, ypp);
    let mut drawn: Vec<Pt> = Vec::new();
    for point in tee_side_vertices(features) {
        let distance = yards(point, green, ypp).round();
        if distance <= GREEN_DIST_MIN_YDS || distance > GREEN_DIST_MAX_YDS {
            continue;
        }
        if !par_3_tees && distance > HOLE_FRACTION_CAP * hole_length {
            continue;
        }
        if drawn.iter().any(|p| yards(*p, point, ypp) < GREEN_DIST_DEDUPE_YDS) {
            continue;
        }
        let (a, b) = segment_for(point, origin, midpoint, green);
        if dist_to_line(point, a, b, ypp) > LINE_OF_PLAY_YDS {
            continue;
        }
        drawn.push(point);
        triangle_marker(canvas, point, 8.0 + 8.0 * ann.text_size, ann.color);
        distance_text(canvas, ann, &ann.format(distance), point);
    }
}

/// Distance to the green from the far end of each fairway section.
pub fn fairway_green_distances(
    canvas: &mut Canvas,
    ann: &Annotator<'_>,
    waypoints: &[Pt],
    fairways: &[Feature],
) {
    let (origin, midpoint, green) = line_of_play(waypoints);
    let ypp = canvas.ypp;
    let hole_length = yards(origin, green, ypp);
    let mut drawn: Vec<Pt> = Vec::new();
    for point in green_side_vertices(fairways) {
        let distance = yards(point, green, ypp).round();
        if distance <= GREEN_DIST_MIN_YDS || distance > HOLE_FRACTION_CAP * hole_length {
            continue;
        }
        if drawn.iter().any(|p| yards(*p, point, ypp) < GREEN_DIST_DEDUPE_YDS) {
            continue;
        }
        let (a, b) = segment_for(point, origin, midpoint, green);
        if dist_to_line(point, a, b, ypp) > LINE_OF_PLAY_YDS {
            continue;
        }
        drawn.push(point);
        triangle_marker(canvas, point, 17.0 + 2.0 * ann.text_size, ann.color);
        distance_text(canvas, ann, &ann.format(distance), point);
    }
}

/// Tree distances sit beside the trunk with a short connector so the
/// number does not cover the symbol. Distances that almost coincide with
/// a range arc are suppressed.
pub fn tree_green_distances(
    canvas: &mut Canvas,
    ann: &Annotator<'_>,
    waypoints: &[Pt],
    trees: &[Feature],
) {
    let (origin, midpoint, green) = line_of_play(waypoints);
    let ypp = canvas.ypp;
    let hole_length = yards(origin, green, ypp);
    let mut drawn: Vec<Pt> = Vec::new();
    for tree in trees {
        let point = match tree.points.first() {
            Some(p) => *p,
            None => continue,
        };
        let distance = yards(point, green, ypp).round();
        if distance < GREEN_DIST_MIN_YDS || distance > HOLE_FRACTION_CAP * hole_length {
            continue;
        }
        let near_arc = distance % ARC_STEP_YDS;
        if near_arc < 5.0 || near_arc > 45.0 {
            continue;
        }
        if drawn.iter().any(|p| yards(*p, point, ypp) < GREEN_DIST_DEDUPE_YDS) {
            continue;
        }
        let (a, b) = segment_for(point, origin, midpoint, green);
        if dist_to_line(point, a, b, ypp) > TREE_LINE_OF_PLAY_YDS {
            continue;
        }
        drawn.push(point);

        let label = ann.format(distance);
        let (label_w, label_h) = ann.labeler.label_size(&label, ann.text_size);
        let draw_point = if is_right_of(point, a, b) {
            Pt { x: point.x - 75.0 - label_w, y: point.y }
        } else {
            Pt { x: point.x + 75.0, y: point.y }
        };
        thick_segment(canvas, point, draw_point, 3, ann.color);
        ann.labeler.draw(
            canvas,
            ann.color,
            draw_point.x + 2.0 * ann.text_weight(),
            draw_point.y + 0.5 * label_h,
            ann.text_size,
            &label,
        );
    }
}

/// Angular half-width of a range arc, in degrees. Closer arcs must span
/// wider angles to cover the same stretch of fairway.
fn arc_half_width(distance_yds: f64) -> f64 {
    match distance_yds as i64 {
        50 => 30.0,
        100 => 15.2,
        150 => 9.8,
        200 => 7.5,
        250 => 6.0,
        300 => 5.0,
        _ => 4.6,
    }
}

fn draw_arc(
    canvas: &mut Canvas,
    center: Pt,
    radius: f64,
    mid_angle_deg: f64,
    half_width_deg: f64,
    thickness: u32,
    color: Rgb<u8>,
) {
    let steps = ((2.0 * half_width_deg) / 0.5).ceil().max(1.0) as usize;
    let start = mid_angle_deg - half_width_deg;
    let step = 2.0 * half_width_deg / steps as f64;
    let point_at = |deg: f64| {
        let rad = deg.to_radians();
        Pt {
            x: center.x + radius * rad.cos(),
            y: center.y + radius * rad.sin(),
        }
    };
    let mut prev = point_at(start);
    for i in 1..=steps {
        let next = point_at(start + step * i as f64);
        thick_segment(canvas, prev, next, thickness, color);
        prev = next;
    }
}

/// Concentric 50-yard arcs centered on the green, each labeled where it
/// crosses the centerline. The centerline may bend at up to two
/// intermediate waypoints.
pub fn range_arcs(
    canvas: &mut Canvas,
    ann: &Annotator<'_>,
    waypoints: &[Pt],
) -> Result<(), BookError> {
    if waypoints.len() > 4 {
        return Err(BookError::TooManyWaypoints {
            hole: ann.hole.to_string(),
            count: waypoints.len(),
        });
    }
    let ypp = canvas.ypp;
    let origin = waypoints[0];
    let green = waypoints[waypoints.len() - 1];
    // Intermediate waypoints ordered from the green outward.
    let mids: Vec<Pt> = match waypoints.len() {
        2 => vec![origin.midpoint(green)],
        3 => vec![waypoints[1]],
        _ => vec![waypoints[2], waypoints[1]],
    };

    let total: f64 = waypoints
        .windows(2)
        .map(|pair| yards(pair[0], pair[1], ypp))
        .sum();
    let outermost_mid = *mids.last().unwrap_or(&origin);
    let outer_dist = yards(green, outermost_mid, ypp);
    let limit = ARC_LIMIT_YDS
        .min(outer_dist.max((0.6 * total).max(total - 200.0)));

    let mut segments: Vec<(Pt, Pt, f64)> = Vec::new();
    let mut inner = green;
    for mid in &mids {
        segments.push((inner, *mid, yards(green, *mid, ypp)));
        inner = *mid;
    }
    segments.push((inner, origin, limit));

    let mut distance = ARC_STEP_YDS;
    for (near, far, boundary) in segments {
        while distance < boundary {
            let radius = distance / ypp;
            if let Some(at) = circle_segment_intersect(near, far, green, radius) {
                let mid_angle = upright_angle(at, green) + 90.0;
                draw_arc(
                    canvas,
                    green,
                    radius,
                    mid_angle,
                    arc_half_width(distance),
                    2,
                    ann.color,
                );
                distance_text(canvas, ann, &ann.format(distance), at);
            }
            distance += ARC_STEP_YDS;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FeatureKind;

    const YPP: f64 = 0.5;

    fn canvas() -> Canvas {
        Canvas::new(1200, 1200, YPP, Rgb([44, 166, 94]))
    }

    fn labeler() -> Labeler {
        Labeler::Stroke(super::super::text::StrokeLabeler::default())
    }

    fn ann<'a>(labeler: &'a Labeler) -> Annotator<'a> {
        Annotator {
            labeler,
            color: Rgb([0, 0, 0]),
            text_size: 1.0,
            meters: false,
            hole: "1",
        }
    }

    fn square(kind: FeatureKind, cx: f64, cy: f64, half: f64) -> Feature {
        Feature {
            kind,
            points: vec![
                Pt { x: cx - half, y: cy - half },
                Pt { x: cx + half, y: cy - half },
                Pt { x: cx + half, y: cy + half },
                Pt { x: cx - half, y: cy + half },
            ],
        }
    }

    // Straight 500 px hole at ypp 0.5: 250 yards tee to green.
    fn waypoints() -> Vec<Pt> {
        vec![Pt { x: 600.0, y: 1100.0 }, Pt { x: 600.0, y: 600.0 }]
    }

    #[test]
    fn format_yards_and_meters() {
        let labeler = labeler();
        let mut a = ann(&labeler);
        assert_eq!(a.format(150.0), "150");
        a.meters = true;
        assert_eq!(a.format(150.0), "137");
    }

    #[test]
    fn carry_drawn_inside_band() {
        let mut c = canvas();
        let labeler = labeler();
        let a = ann(&labeler);
        // Bunker front edge 200 yards (400 px) from the tee vertex.
        let tee = square(FeatureKind::TeeBox, 600.0, 1090.0, 10.0);
        let bunker = square(FeatureKind::Sand, 620.0, 710.0, 10.0);
        let counts = carry_distances(&mut c, &a, &waypoints(), &[tee], &[bunker]);
        assert_eq!(counts.drawn, 1);
        assert_eq!(counts.confirmed(), 0);
    }

    #[test]
    fn short_carry_not_drawn() {
        let mut c = canvas();
        let labeler = labeler();
        let a = ann(&labeler);
        let tee = square(FeatureKind::TeeBox, 600.0, 1090.0, 10.0);
        // Front edge about 55 yards out: far below the drawable band.
        let bunker = square(FeatureKind::Sand, 620.0, 990.0, 10.0);
        let counts = carry_distances(&mut c, &a, &waypoints(), &[tee], &[bunker]);
        assert_eq!(counts.drawn, 0);
    }

    #[test]
    fn nearby_carries_dedupe() {
        let mut c = canvas();
        let labeler = labeler();
        let a = ann(&labeler);
        let tee = square(FeatureKind::TeeBox, 600.0, 1090.0, 10.0);
        let b1 = square(FeatureKind::Sand, 620.0, 710.0, 10.0);
        // Second front edge 10 yards from the first.
        let b2 = square(FeatureKind::Sand, 630.0, 726.0, 10.0);
        let counts = carry_distances(&mut c, &a, &waypoints(), &[tee], &[b1, b2]);
        assert_eq!(counts.drawn, 1);
    }

    #[test]
    fn far_offline_carry_skipped() {
        let mut c = canvas();
        let labeler = labeler();
        let a = ann(&labeler);
        let tee = square(FeatureKind::TeeBox, 600.0, 1090.0, 10.0);
        // 50 yards right of the centerline.
        let bunker = square(FeatureKind::Sand, 710.0, 710.0, 10.0);
        let counts = carry_distances(&mut c, &a, &waypoints(), &[tee], &[bunker]);
        assert_eq!(counts.drawn, 0);
    }

    #[test]
    fn confirmed_requires_tight_band_and_green_gap() {
        let mut c = canvas();
        let labeler = labeler();
        let a = ann(&labeler);
        let tee = square(FeatureKind::TeeBox, 600.0, 1090.0, 10.0);
        // 240 yards out, 55 yards short of the green.
        let bunker = square(FeatureKind::Sand, 610.0, 630.0, 10.0);
        let counts = carry_distances(&mut c, &a, &waypoints(), &[tee], &[bunker]);
        assert_eq!(counts.drawn, 1);
        assert_eq!(counts.confirmed(), 0);

        // Longer hole, carry 230 yards out and 45 yards short: confirmed.
        let mut c = canvas();
        let wp = vec![Pt { x: 600.0, y: 1150.0 }, Pt { x: 600.0, y: 600.0 }];
        let tee = square(FeatureKind::TeeBox, 600.0, 1140.0, 10.0);
        let bunker = square(FeatureKind::Sand, 610.0, 700.0, 10.0);
        let counts = carry_distances(&mut c, &a, &wp, &[tee], &[bunker]);
        assert_eq!(counts.confirmed(), 1);
        assert_eq!(counts.right, 1);
    }

    #[test]
    fn hazard_distance_marks_pixels() {
        let mut c = canvas();
        let labeler = labeler();
        let a = ann(&labeler);
        // Back edge 150 yards from the green on a 250 yard hole.
        let bunker = square(FeatureKind::Sand, 610.0, 890.0, 10.0);
        hazard_green_distances(&mut c, &a, &waypoints(), &[bunker], false);
        let marked = c.img.pixels().filter(|p| **p == Rgb([0, 0, 0])).count();
        assert!(marked > 0);
    }

    #[test]
    fn hazard_distance_respects_hole_fraction() {
        let mut c = canvas();
        let labeler = labeler();
        let a = ann(&labeler);
        // 210 yards from the green on a 250 yard hole: over three quarters.
        let bunker = square(FeatureKind::Sand, 610.0, 1010.0, 10.0);
        hazard_green_distances(&mut c, &a, &waypoints(), &[bunker.clone()], false);
        let marked = c.img.pixels().filter(|p| **p == Rgb([0, 0, 0])).count();
        assert_eq!(marked, 0);
        // Same point from a par 3 tee is printed.
        hazard_green_distances(&mut c, &a, &waypoints(), &[bunker], true);
        let marked = c.img.pixels().filter(|p| **p == Rgb([0, 0, 0])).count();
        assert!(marked > 0);
    }

    #[test]
    fn nearby_green_distances_dedupe() {
        let labeler = labeler();
        let a = ann(&labeler);
        // Back edges about 100 yards from the green, 6 yards apart.
        let b1 = square(FeatureKind::Sand, 610.0, 790.0, 10.0);
        let b2 = square(FeatureKind::Sand, 615.0, 780.0, 10.0);

        let mut pair = canvas();
        hazard_green_distances(&mut pair, &a, &waypoints(), &[b1.clone(), b2], false);
        let mut single = canvas();
        hazard_green_distances(&mut single, &a, &waypoints(), &[b1], false);
        assert!(pair.img.pixels().any(|p| *p == Rgb([0, 0, 0])));
        assert_eq!(pair.img.as_raw(), single.img.as_raw());
    }

    #[test]
    fn tree_distance_suppressed_near_arc() {
        let mut c = canvas();
        let labeler = labeler();
        let a = ann(&labeler);
        // Exactly 100 yards from the green: coincides with an arc.
        let tree = Feature {
            kind: FeatureKind::Tree,
            points: vec![Pt { x: 610.0, y: 800.0 }],
        };
        tree_green_distances(&mut c, &a, &waypoints(), &[tree]);
        let marked = c.img.pixels().filter(|p| **p == Rgb([0, 0, 0])).count();
        assert_eq!(marked, 0);

        // 115 yards: printed.
        let tree = Feature {
            kind: FeatureKind::Tree,
            points: vec![Pt { x: 610.0, y: 830.0 }],
        };
        tree_green_distances(&mut c, &a, &waypoints(), &[tree]);
        let marked = c.img.pixels().filter(|p| **p == Rgb([0, 0, 0])).count();
        assert!(marked > 0);
    }

    #[test]
    fn arcs_step_every_fifty_yards() {
        let mut c = canvas();
        let labeler = labeler();
        let a = ann(&labeler);
        range_arcs(&mut c, &a, &waypoints()).unwrap();
        // A 250 yard hole gets arcs at 50, 100 and 150 yards at least:
        // the 100 yard arc crosses the centerline 200 px above the green.
        let mut found = false;
        for y in 795..=805 {
            if *c.img.get_pixel(600, y) == Rgb([0, 0, 0]) {
                found = true;
            }
        }
        assert!(found);
    }

    #[test]
    fn too_many_waypoints_is_an_error() {
        let mut c = canvas();
        let labeler = labeler();
        let a = ann(&labeler);
        let wp = vec![
            Pt { x: 600.0, y: 1100.0 },
            Pt { x: 580.0, y: 1000.0 },
            Pt { x: 620.0, y: 900.0 },
            Pt { x: 580.0, y: 800.0 },
            Pt { x: 600.0, y: 600.0 },
        ];
        let err = range_arcs(&mut c, &a, &wp).unwrap_err();
        assert!(matches!(err, BookError::TooManyWaypoints { count: 5, .. }));
    }

    #[test]
    fn fallback_carry_skipped_when_carries_exist() {
        let mut c = canvas();
        let labeler = labeler();
        let a = ann(&labeler);
        let counts = CarryCounts { right: 1, left: 0, drawn: 1 };
        let before: Vec<u8> = c.img.as_raw().clone();
        fallback_carry(&mut c, &a, &waypoints(), &[], &counts);
        assert_eq!(*c.img.as_raw(), before);
    }
}
