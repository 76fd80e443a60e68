//! Run orchestration: fetch the holes in a bounding box and produce the
//! two pages (yardage and green detail) for each of them.

pub mod extract;
pub mod filter;

use std::collections::HashSet;
use std::fs;

use image::{Rgb, RgbImage};

use crate::api::GolfSource;
use crate::config::RunConfig;
use crate::domain::{Feature, FeatureSet, Hole};
use crate::error::BookError;
use crate::geometry::{Frame, Pt, upright_angle};
use crate::osm::parse_holes;
use crate::render::annotate::{self, Annotator};
use crate::render::canvas::{self, Canvas, PageWindow};
use crate::render::features as draw;
use crate::render::{Labeler, green};
use filter::{FilterParams, filter_features};

/// Margin color used to pad pages out to the final aspect ratio.
const PAGE_MARGIN: Rgb<u8> = Rgb([44, 166, 94]);

/// Trees are only worth drawing close to the line of play.
const TREE_FILTER_YDS: f64 = 25.0;

/// Grayscale palette of the green-detail page.
const DETAIL_BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const DETAIL_FAIRWAY: Rgb<u8> = Rgb([235, 235, 235]);
const DETAIL_TEE: Rgb<u8> = Rgb([195, 195, 195]);
const DETAIL_WOODS_WATER: Rgb<u8> = Rgb([180, 180, 180]);
const DETAIL_SAND: Rgb<u8> = Rgb([210, 210, 210]);
const DETAIL_OUTLINE: Rgb<u8> = Rgb([0, 0, 0]);

/// Label size scales linearly with the finished page height.
fn page_text_size(eventual_height: u32) -> f64 {
    (1.5 / 3000.0 * f64::from(eventual_height) * 100.0).round() / 100.0
}

#[derive(Debug, Default, Clone, Copy)]
pub struct RunSummary {
    /// Hole ways found in the bounding box, renderable or not.
    pub holes: usize,
    pub rendered: usize,
    pub skipped: usize,
}

/// Generates the yardage book for every hole in the configured box.
///
/// Per-hole problems (missing tags, no green, too many waypoints) are
/// logged and skip only the affected hole; a failed fetch aborts the run
/// since every remaining hole would hit the same wall.
pub fn generate(config: &RunConfig, source: &impl GolfSource) -> Result<RunSummary, BookError> {
    let labeler = Labeler::new(config.font.as_deref());
    if config.verbose && !labeler.is_ttf() {
        println!("No TTF font found, labels fall back to stroke digits");
    }

    let response = source.holes_in(&config.bounds)?;
    let holes = parse_holes(&response);

    let mkdir = |dir: &std::path::Path| {
        fs::create_dir_all(dir)
            .map_err(|e| BookError::Output(format!("cannot create {}: {e}", dir.display())))
    };
    mkdir(&config.output_dir)?;
    mkdir(&config.greens_dir)?;

    // The listing is read once up front; files appearing mid-run are only
    // tracked through the claimed-name list.
    let existing: HashSet<String> = fs::read_dir(&config.output_dir)
        .map_err(|e| {
            BookError::Output(format!("cannot read {}: {e}", config.output_dir.display()))
        })?
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .collect();

    let mut summary = RunSummary {
        holes: holes.len(),
        ..RunSummary::default()
    };
    let mut claimed: Vec<String> = Vec::new();

    for result in holes {
        let hole = match result {
            Ok(hole) => hole,
            Err(e) => {
                eprintln!("{e}");
                summary.skipped += 1;
                continue;
            }
        };
        println!("Hole {}  Par {}", hole.number, hole.par);

        let base = format!("hole_{}.png", hole.number);
        if !config.overwrite && existing.contains(&base) {
            println!("  {base} already exists, skipping");
            summary.skipped += 1;
            continue;
        }
        let file_name = claim_file_name(base, &mut claimed);

        match render_hole(&hole, source, config, &labeler, &file_name) {
            Ok(()) => summary.rendered += 1,
            Err(e @ BookError::DataFetch(_)) => return Err(e),
            Err(e) => {
                eprintln!("{e}");
                summary.skipped += 1;
            }
        }
    }

    Ok(summary)
}

/// Two holes with the same number in one run get numbered suffixes so the
/// second page does not overwrite the first.
fn claim_file_name(base: String, claimed: &mut Vec<String>) -> String {
    let mut name = base.clone();
    let mut counter = 2;
    while claimed.contains(&name) {
        let stem = base.strip_suffix(".png").unwrap_or(&base);
        name = format!("{stem}_{counter}.png");
        counter += 1;
    }
    claimed.push(name.clone());
    name
}

fn render_hole(
    hole: &Hole,
    source: &impl GolfSource,
    config: &RunConfig,
    labeler: &Labeler,
    file_name: &str,
) -> Result<(), BookError> {
    let data = extract::extract(hole, source, config.scale)?;
    let proj = &data.projector;

    let waypoints = proj.project_ring(&hole.waypoints);
    let green_ring = proj.project_ring(&data.green);
    let mut set = FeatureSet::default();
    for raw in &data.features {
        set.push(Feature::new(raw.kind, proj.project_ring(&raw.points)));
    }

    let page = yardage_page(hole, config, labeler, &set, &green_ring, &waypoints, proj)?;
    let out = config.output_dir.join(file_name);
    page.save(&out)
        .map_err(|e| BookError::Output(format!("{}: {e}", out.display())))?;
    if config.verbose {
        println!("  wrote {}", out.display());
    }

    let detail = green_page(hole, config, &set, &green_ring, &waypoints, proj);
    let out = config.greens_dir.join(file_name);
    detail
        .save(&out)
        .map_err(|e| BookError::Output(format!("{}: {e}", out.display())))?;
    if config.verbose {
        println!("  wrote {}", out.display());
    }
    Ok(())
}

fn apply_frame(frame: &Frame, points: &[Pt]) -> Vec<Pt> {
    points.iter().map(|&p| frame.apply(p)).collect()
}

/// The full-hole page: colored features, carry numbers, distance markers
/// and range arcs, oriented tee-at-bottom.
fn yardage_page(
    hole: &Hole,
    config: &RunConfig,
    labeler: &Labeler,
    set: &FeatureSet,
    green_ring: &[Pt],
    waypoints: &[Pt],
    proj: &crate::geometry::Projector,
) -> Result<RgbImage, BookError> {
    let ypp = proj.ypp;
    let angle = upright_angle(waypoints[0], waypoints[waypoints.len() - 1]);
    let frame = Frame::new(proj.width, proj.height, angle);
    let waypoints = apply_frame(&frame, waypoints);
    let green_ring = apply_frame(&frame, green_ring);
    let set = set.map_points(|p| frame.apply(p));

    let params = |width, tee_boxes, strict_vertices| FilterParams {
        ypp,
        par: hole.par,
        width,
        small_factor: config.small_factor,
        med_factor: config.med_factor,
        tee_boxes,
        strict_vertices,
    };
    let width = Some(config.filter_width);
    let fairways = filter_features(&waypoints, &set.fairways, &params(width, false, true));
    let tee_boxes = filter_features(&waypoints, &set.tee_boxes, &params(width, true, false));
    let sand = filter_features(&waypoints, &set.sand, &params(width, false, false));
    let water = filter_features(&waypoints, &set.water, &params(None, false, false));
    let woods = filter_features(&waypoints, &set.woods, &params(None, false, false));
    let trees = filter_features(&waypoints, &set.trees, &params(Some(TREE_FILTER_YDS), false, false));

    let palette = &config.palette;
    let mut canvas = Canvas::new(frame.width, frame.height, ypp, palette.background);
    draw::fill_features(&mut canvas, &woods, palette.trees);
    draw::fill_features(&mut canvas, &water, palette.water);
    draw::fill_features(&mut canvas, &fairways, palette.fairways);
    draw::fill_features(&mut canvas, &tee_boxes, palette.tee_boxes);
    draw::fill_polygon(&mut canvas, &green_ring, palette.greens);
    draw::fill_features(&mut canvas, &sand, palette.sand);
    if config.include_trees {
        for tree in &trees {
            if let Some(&at) = tree.points.first() {
                draw::draw_tree(&mut canvas, at, palette.trees);
            }
        }
    }

    // The crop window is fixed before annotating so label sizes can follow
    // the eventual page height.
    let drawn = FeatureSet {
        fairways: fairways.clone(),
        tee_boxes: tee_boxes.clone(),
        sand: sand.clone(),
        ..FeatureSet::default()
    };
    let window = PageWindow::around(&drawn, &green_ring, canvas.width(), canvas.height(), ypp);
    let ann = Annotator {
        labeler,
        color: palette.text,
        text_size: page_text_size(window.eventual_height),
        meters: config.meters,
        hole: &hole.number,
    };

    if hole.is_par_3() {
        // Short holes get tee-to-green numbers only; carries and arcs
        // would say nothing useful.
        annotate::hazard_green_distances(&mut canvas, &ann, &waypoints, &tee_boxes, true);
    } else {
        let mut counts = annotate::carry_distances(&mut canvas, &ann, &waypoints, &tee_boxes, &sand);
        let water_counts =
            annotate::carry_distances(&mut canvas, &ann, &waypoints, &tee_boxes, &water);
        counts.right += water_counts.right;
        counts.left += water_counts.left;
        counts.drawn += water_counts.drawn;
        annotate::fallback_carry(&mut canvas, &ann, &waypoints, &tee_boxes, &counts);
        if config.verbose {
            println!("  {} carries ({} confirmed)", counts.drawn, counts.confirmed());
        }

        annotate::hazard_green_distances(&mut canvas, &ann, &waypoints, &sand, false);
        annotate::hazard_green_distances(&mut canvas, &ann, &waypoints, &water, false);
        annotate::fairway_green_distances(&mut canvas, &ann, &waypoints, &fairways);
        if config.include_trees {
            annotate::tree_green_distances(&mut canvas, &ann, &waypoints, &trees);
        }
        annotate::range_arcs(&mut canvas, &ann, &waypoints)?;
    }

    let cropped = canvas::crop(&canvas.img, &window);
    Ok(canvas::enforce_aspect(&cropped, PAGE_MARGIN))
}

/// The close-up page: grayscale surroundings, the green in white with a
/// black outline, and the three yard grid. Oriented along the final
/// approach rather than the whole hole.
fn green_page(
    hole: &Hole,
    config: &RunConfig,
    set: &FeatureSet,
    green_ring: &[Pt],
    waypoints: &[Pt],
    proj: &crate::geometry::Projector,
) -> RgbImage {
    let ypp = proj.ypp;
    let n = waypoints.len();
    let angle = upright_angle(waypoints[n - 2], waypoints[n - 1]);
    let frame = Frame::new(proj.width, proj.height, angle);
    let waypoints = apply_frame(&frame, waypoints);
    let green_ring = apply_frame(&frame, green_ring);
    let set = set.map_points(|p| frame.apply(p));

    let params = |width, tee_boxes| FilterParams {
        ypp,
        par: hole.par,
        width,
        small_factor: config.small_factor,
        med_factor: config.med_factor,
        tee_boxes,
        strict_vertices: width.is_some() && !tee_boxes,
    };
    let width = Some(config.filter_width);
    let fairways = filter_features(&waypoints, &set.fairways, &params(width, false));
    let tee_boxes = filter_features(&waypoints, &set.tee_boxes, &params(width, true));
    let sand = filter_features(&waypoints, &set.sand, &params(None, false));
    let water = filter_features(&waypoints, &set.water, &params(None, false));
    let woods = filter_features(&waypoints, &set.woods, &params(None, false));

    let mut canvas = Canvas::new(frame.width, frame.height, ypp, DETAIL_BACKGROUND);
    draw::fill_features(&mut canvas, &woods, DETAIL_WOODS_WATER);
    draw::fill_features(&mut canvas, &water, DETAIL_WOODS_WATER);
    draw::fill_features(&mut canvas, &fairways, DETAIL_FAIRWAY);
    draw::fill_features(&mut canvas, &tee_boxes, DETAIL_TEE);
    draw::fill_features(&mut canvas, &sand, DETAIL_SAND);
    draw::fill_polygon(&mut canvas, &green_ring, DETAIL_BACKGROUND);
    draw::outline_polygon(&mut canvas, &green_ring, 2, DETAIL_OUTLINE);

    green::grid_detail(&mut canvas, waypoints[n - 1])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Element, GolfSource, OverpassResponse};
    use crate::config::Palette;
    use crate::geometry::GeoBounds;
    use std::collections::HashMap;

    struct StubSource {
        holes: Vec<Element>,
        features: Vec<Element>,
    }

    impl GolfSource for StubSource {
        fn holes_in(&self, _bounds: &GeoBounds) -> Result<OverpassResponse, BookError> {
            Ok(OverpassResponse {
                elements: self.holes.clone(),
            })
        }

        fn features_in(&self, _bounds: &GeoBounds) -> Result<OverpassResponse, BookError> {
            Ok(OverpassResponse {
                elements: self.features.clone(),
            })
        }
    }

    struct FailingSource;

    impl GolfSource for FailingSource {
        fn holes_in(&self, _bounds: &GeoBounds) -> Result<OverpassResponse, BookError> {
            Err(BookError::DataFetch("boom".into()))
        }

        fn features_in(&self, _bounds: &GeoBounds) -> Result<OverpassResponse, BookError> {
            Err(BookError::DataFetch("boom".into()))
        }
    }

    fn node(id: u64, lat: f64, lon: f64) -> Element {
        Element {
            type_: "node".into(),
            id,
            nodes: None,
            tags: None,
            lat: Some(lat),
            lon: Some(lon),
        }
    }

    fn way(id: u64, nodes: Vec<u64>, tags: &[(&str, &str)]) -> Element {
        Element {
            type_: "way".into(),
            id,
            nodes: Some(nodes),
            tags: Some(
                tags.iter()
                    .map(|&(k, v)| (k.to_string(), v.to_string()))
                    .collect::<HashMap<_, _>>(),
            ),
            lat: None,
            lon: None,
        }
    }

    /// A straight 360-ish yard hole with a green ring, one tee box and a
    /// greenside bunker, all within the search box.
    fn course() -> StubSource {
        let tee = (51.0000, 10.0000);
        let green = (51.0030, 10.0005);
        let holes = vec![
            node(1, tee.0, tee.1),
            node(2, green.0, green.1),
            way(10, vec![1, 2], &[("golf", "hole"), ("ref", "1"), ("par", "4")]),
        ];
        let d = 0.0002;
        let features = vec![
            node(1, tee.0, tee.1),
            node(2, green.0, green.1),
            node(20, green.0 - d, green.1 - d),
            node(21, green.0 + d, green.1 - d),
            node(22, green.0 + d, green.1 + d),
            node(23, green.0 - d, green.1 + d),
            way(30, vec![20, 21, 22, 23, 20], &[("golf", "green")]),
            node(24, tee.0 - d, tee.1 - d),
            node(25, tee.0 + d, tee.1 - d),
            node(26, tee.0 + d, tee.1 + d),
            node(27, tee.0 - d, tee.1 + d),
            way(31, vec![24, 25, 26, 27, 24], &[("golf", "tee")]),
            node(40, 51.0026, 10.0003),
            node(41, 51.0027, 10.0003),
            node(42, 51.0027, 10.0004),
            node(43, 51.0026, 10.0004),
            way(32, vec![40, 41, 42, 43, 40], &[("golf", "bunker")]),
        ];
        StubSource { holes, features }
    }

    fn config(dir: &std::path::Path) -> RunConfig {
        RunConfig {
            bounds: GeoBounds::new(50.999, 9.999, 51.004, 10.002),
            palette: Palette::default(),
            filter_width: 50.0,
            small_factor: 1.0,
            med_factor: 1.0,
            overwrite: false,
            include_trees: true,
            meters: false,
            scale: 800,
            output_dir: dir.join("output"),
            greens_dir: dir.join("greens"),
            font: None,
            verbose: false,
        }
    }

    #[test]
    fn empty_box_is_a_clean_run() {
        let dir = tempfile::tempdir().unwrap();
        let source = StubSource {
            holes: Vec::new(),
            features: Vec::new(),
        };
        let summary = generate(&config(dir.path()), &source).unwrap();
        assert_eq!(summary.holes, 0);
        assert_eq!(summary.rendered, 0);
        assert_eq!(summary.skipped, 0);
        assert!(dir.path().join("output").is_dir());
        assert!(dir.path().join("greens").is_dir());
    }

    #[test]
    fn renders_both_pages_for_a_hole() {
        let dir = tempfile::tempdir().unwrap();
        let summary = generate(&config(dir.path()), &course()).unwrap();
        assert_eq!(summary.holes, 1);
        assert_eq!(summary.rendered, 1);
        assert!(dir.path().join("output").join("hole_1.png").is_file());
        assert!(dir.path().join("greens").join("hole_1.png").is_file());
    }

    #[test]
    fn broken_hole_skipped_rest_rendered() {
        let dir = tempfile::tempdir().unwrap();
        let mut source = course();
        // A second hole way without a par tag.
        source
            .holes
            .push(way(11, vec![1, 2], &[("golf", "hole"), ("ref", "2")]));
        let summary = generate(&config(dir.path()), &source).unwrap();
        assert_eq!(summary.holes, 2);
        assert_eq!(summary.rendered, 1);
        assert_eq!(summary.skipped, 1);
    }

    #[test]
    fn existing_output_skipped_unless_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(dir.path());
        std::fs::create_dir_all(&cfg.output_dir).unwrap();
        std::fs::write(cfg.output_dir.join("hole_1.png"), b"sentinel").unwrap();

        let summary = generate(&cfg, &course()).unwrap();
        assert_eq!(summary.rendered, 0);
        assert_eq!(summary.skipped, 1);
        let contents = std::fs::read(cfg.output_dir.join("hole_1.png")).unwrap();
        assert_eq!(contents, b"sentinel");

        let cfg = RunConfig {
            overwrite: true,
            ..config(dir.path())
        };
        let summary = generate(&cfg, &course()).unwrap();
        assert_eq!(summary.rendered, 1);
        let contents = std::fs::read(cfg.output_dir.join("hole_1.png")).unwrap();
        assert_ne!(contents, b"sentinel");
    }

    #[test]
    fn duplicate_hole_numbers_get_suffixes() {
        let dir = tempfile::tempdir().unwrap();
        let mut source = course();
        source
            .holes
            .push(way(11, vec![1, 2], &[("golf", "hole"), ("ref", "1"), ("par", "4")]));
        let summary = generate(&config(dir.path()), &source).unwrap();
        assert_eq!(summary.rendered, 2);
        assert!(dir.path().join("output").join("hole_1.png").is_file());
        assert!(dir.path().join("output").join("hole_1_2.png").is_file());
    }

    #[test]
    fn fetch_failure_aborts() {
        let dir = tempfile::tempdir().unwrap();
        let err = generate(&config(dir.path()), &FailingSource).unwrap_err();
        assert!(matches!(err, BookError::DataFetch(_)));
    }

    #[test]
    fn claim_file_name_counts_up() {
        let mut claimed = Vec::new();
        assert_eq!(claim_file_name("hole_3.png".into(), &mut claimed), "hole_3.png");
        assert_eq!(claim_file_name("hole_3.png".into(), &mut claimed), "hole_3_2.png");
        assert_eq!(claim_file_name("hole_3.png".into(), &mut claimed), "hole_3_3.png");
    }

    #[test]
    fn text_size_tracks_page_height() {
        assert!((page_text_size(3000) - 1.5).abs() < 1e-9);
        assert!((page_text_size(1500) - 0.75).abs() < 1e-9);
    }
}
