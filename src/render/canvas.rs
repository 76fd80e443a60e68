//! Raster surface for a single page plus the page-shape bookkeeping.
//!
//! A page is drawn on a canvas sized by the rotation frame, then cut down
//! to a window around the hole and padded out to the fixed page aspect.

use image::{Rgb, RgbImage, imageops};

use crate::domain::FeatureSet;
use crate::geometry::PixelBounds;

/// Height over width of a finished page.
pub const PAGE_ASPECT: f64 = 2.83;

/// Owned drawing surface. Pixel distances on it convert to yards through
/// `ypp`; everything that draws on the page borrows this mutably.
pub struct Canvas {
    pub img: RgbImage,
    pub ypp: f64,
}

impl Canvas {
    pub fn new(width: u32, height: u32, ypp: f64, fill: Rgb<u8>) -> Self {
        Canvas {
            img: RgbImage::from_pixel(width.max(1), height.max(1), fill),
            ypp,
        }
    }

    pub fn width(&self) -> u32 {
        self.img.width()
    }

    pub fn height(&self) -> u32 {
        self.img.height()
    }
}

/// Crop window around the drawn hole, fixed before annotations so the
/// text size can be derived from the eventual page height.
#[derive(Debug, Clone, Copy)]
pub struct PageWindow {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
    /// Page height after the aspect padding that follows the crop.
    pub eventual_height: u32,
}

impl PageWindow {
    /// Picks the window from the bounds of the playable features. The green
    /// side gets a fixed margin, the tee side reaches past the back tee box.
    pub fn around(
        hole_area: &FeatureSet,
        green: &[crate::geometry::Pt],
        canvas_w: u32,
        canvas_h: u32,
        ypp: f64,
    ) -> Self {
        let mut bounds = PixelBounds::EMPTY;
        for group in [&hole_area.fairways, &hole_area.tee_boxes, &hole_area.sand] {
            for feature in group {
                bounds = bounds.merge(PixelBounds::from_points(&feature.points));
            }
        }
        bounds = bounds.merge(PixelBounds::from_points(green));

        let mut tee_bounds = PixelBounds::EMPTY;
        for feature in &hole_area.tee_boxes {
            tee_bounds = tee_bounds.merge(PixelBounds::from_points(&feature.points));
        }
        if tee_bounds.is_empty() {
            tee_bounds = bounds;
        }
        if bounds.is_empty() {
            return PageWindow {
                x0: 0,
                y0: 0,
                x1: canvas_w,
                y1: canvas_h,
                eventual_height: canvas_h,
            };
        }

        let x0 = ((bounds.min_x - 20.0 / ypp).max(0.0) as u32).min(canvas_w.saturating_sub(1));
        let y0 = ((bounds.min_y - 5.0 / ypp - 100.0).max(0.0) as u32).min(canvas_h.saturating_sub(1));
        let x1 = ((bounds.max_x + 20.0 / ypp + 100.0) as u32).min(canvas_w);
        let y1 = ((tee_bounds.max_y + 10.0 / ypp + 100.0) as u32).min(canvas_h);

        Self::widen_to_aspect(x0, y0, x1.max(x0 + 1), y1.max(y0 + 1), canvas_w, canvas_h)
    }

    /// First aspect pass. Grows the window toward the page shape where the
    /// canvas still has room, and records the height the finished page will
    /// have once the second pass pads the remainder.
    fn widen_to_aspect(x0: u32, y0: u32, x1: u32, y1: u32, canvas_w: u32, canvas_h: u32) -> Self {
        let w = (x1 - x0) as f64;
        let h = (y1 - y0) as f64;

        if h / w > PAGE_ASPECT {
            let new_w = (h / PAGE_ASPECT).ceil();
            let missing = new_w - w;
            let right = missing.min(130.0).min((canvas_w - x1) as f64).max(0.0);
            let left = (missing - right).min(x0 as f64).max(0.0);
            PageWindow {
                x0: x0 - left as u32,
                y0,
                x1: x1 + right as u32,
                y1,
                eventual_height: h as u32,
            }
        } else {
            let new_h = (PAGE_ASPECT * w).ceil();
            let half = (new_h - h) / 2.0;
            let top = half.min(y0 as f64).max(0.0);
            let bottom = half.min((canvas_h - y1) as f64).max(0.0);
            PageWindow {
                x0,
                y0: y0 - top as u32,
                x1,
                y1: y1 + bottom as u32,
                eventual_height: new_h as u32,
            }
        }
    }

    pub fn width(&self) -> u32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> u32 {
        self.y1 - self.y0
    }
}

/// Cuts the window out of the drawn canvas.
pub fn crop(img: &RgbImage, window: &PageWindow) -> RgbImage {
    imageops::crop_imm(img, window.x0, window.y0, window.width(), window.height()).to_image()
}

/// Pads an image on each side with a solid color.
pub fn pad(img: &RgbImage, top: u32, bottom: u32, left: u32, right: u32, fill: Rgb<u8>) -> RgbImage {
    if top == 0 && bottom == 0 && left == 0 && right == 0 {
        return img.clone();
    }
    let mut out = RgbImage::from_pixel(
        img.width() + left + right,
        img.height() + top + bottom,
        fill,
    );
    imageops::replace(&mut out, img, i64::from(left), i64::from(top));
    out
}

/// Second aspect pass, applied after cropping. Whatever the first pass
/// could not cover with real canvas is filled with the page margin color.
pub fn enforce_aspect(img: &RgbImage, fill: Rgb<u8>) -> RgbImage {
    let w = img.width() as f64;
    let h = img.height() as f64;
    if h / w > PAGE_ASPECT {
        let new_w = (h / PAGE_ASPECT).ceil();
        let missing = (new_w - w).max(0.0) as u32;
        let right = missing.min(130);
        let left = missing - right;
        pad(img, 0, 0, left, right, fill)
    } else {
        let new_h = (PAGE_ASPECT * w).ceil();
        let half = ((new_h - h).max(0.0) / 2.0) as u32;
        pad(img, half, half, 0, 0, fill)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Feature, FeatureKind};
    use crate::geometry::Pt;

    fn rect(kind: FeatureKind, x0: f64, y0: f64, x1: f64, y1: f64) -> Feature {
        Feature {
            kind,
            points: vec![
                Pt { x: x0, y: y0 },
                Pt { x: x1, y: y0 },
                Pt { x: x1, y: y1 },
                Pt { x: x0, y: y1 },
            ],
        }
    }

    #[test]
    fn pad_places_original_pixels() {
        let mut img = RgbImage::from_pixel(2, 2, Rgb([1, 2, 3]));
        img.put_pixel(0, 0, Rgb([9, 9, 9]));
        let out = pad(&img, 1, 0, 2, 0, Rgb([0, 0, 0]));
        assert_eq!(out.dimensions(), (4, 3));
        assert_eq!(*out.get_pixel(2, 1), Rgb([9, 9, 9]));
        assert_eq!(*out.get_pixel(0, 0), Rgb([0, 0, 0]));
    }

    #[test]
    fn enforce_aspect_reaches_page_ratio() {
        let img = RgbImage::from_pixel(100, 100, Rgb([0, 0, 0]));
        let out = enforce_aspect(&img, Rgb([44, 166, 94]));
        let ratio = out.height() as f64 / out.width() as f64;
        assert!((ratio - PAGE_ASPECT).abs() < 0.02, "ratio {ratio}");
    }

    #[test]
    fn enforce_aspect_caps_right_pad() {
        // Tall and narrow: width has to grow, at most 130 px on the right.
        let img = RgbImage::from_pixel(100, 1000, Rgb([0, 0, 0]));
        let out = enforce_aspect(&img, Rgb([44, 166, 94]));
        let new_w = (1000.0_f64 / PAGE_ASPECT).ceil() as u32;
        assert_eq!(out.width(), new_w);
        assert_eq!(out.height(), 1000);
    }

    #[test]
    fn window_falls_back_to_full_canvas_without_features() {
        let set = FeatureSet::default();
        let window = PageWindow::around(&set, &[], 300, 900, 0.5);
        assert_eq!((window.x0, window.y0), (0, 0));
        assert_eq!((window.x1, window.y1), (300, 900));
    }

    #[test]
    fn window_covers_features_with_margins() {
        let mut set = FeatureSet::default();
        set.push(rect(FeatureKind::Fairway, 400.0, 800.0, 600.0, 2000.0));
        set.push(rect(FeatureKind::TeeBox, 450.0, 2100.0, 550.0, 2200.0));
        let green = vec![Pt { x: 480.0, y: 600.0 }, Pt { x: 520.0, y: 700.0 }];
        let window = PageWindow::around(&set, &green, 3000, 3000, 0.5);
        assert!(window.x0 <= 360);
        assert!(window.y0 <= 495);
        assert!(window.x1 >= 740);
        assert!(window.y1 >= 2320);
        assert!(window.eventual_height >= window.height());
    }
}
