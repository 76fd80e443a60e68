//! Label drawing for yardage numbers.
//!
//! Labels use a TrueType font when one can be loaded, with a stroke-drawn
//! digit renderer as fallback so a missing font file never blocks a page.

use std::path::Path;

use ab_glyph::{FontVec, PxScale};
use image::Rgb;
use imageproc::drawing::{draw_text_mut, text_size};

use super::canvas::Canvas;
use super::features::thick_segment;
use crate::geometry::Pt;

/// Pixel height of a label per unit of text size.
const PX_PER_SIZE: f64 = 22.0;

pub struct TtfLabeler {
    font: FontVec,
}

impl TtfLabeler {
    pub fn load(font_path: &Path) -> Option<Self> {
        let data = std::fs::read(font_path).ok()?;
        let font = FontVec::try_from_vec(data).ok()?;
        Some(Self { font })
    }

    pub fn load_default() -> Option<Self> {
        let default_paths = [
            Path::new("fonts/DejaVuSans.ttf"),
            Path::new("./fonts/DejaVuSans.ttf"),
            Path::new("/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf"),
        ];
        for path in &default_paths {
            if path.exists()
                && let Some(labeler) = Self::load(path)
            {
                return Some(labeler);
            }
        }
        None
    }

    fn px(size: f64) -> PxScale {
        PxScale::from((size * PX_PER_SIZE) as f32)
    }

    pub fn label_size(&self, text: &str, size: f64) -> (f64, f64) {
        let (w, h) = text_size(Self::px(size), &self.font, text);
        (f64::from(w), f64::from(h))
    }

    pub fn draw(&self, canvas: &mut Canvas, color: Rgb<u8>, x: f64, y_baseline: f64, size: f64, text: &str) {
        let height = self.label_size(text, size).1;
        draw_text_mut(
            &mut canvas.img,
            color,
            x as i32,
            (y_baseline - height) as i32,
            Self::px(size),
            &self.font,
            text,
        );
    }
}

pub struct StrokeLabeler {
    pub char_width: f64,
    pub char_height: f64,
    pub char_spacing: f64,
}

impl Default for StrokeLabeler {
    fn default() -> Self {
        Self {
            char_width: 5.0,
            char_height: 7.0,
            char_spacing: 1.5,
        }
    }
}

impl StrokeLabeler {
    fn unit(size: f64) -> f64 {
        size * PX_PER_SIZE / 7.0
    }

    pub fn label_size(&self, text: &str, size: f64) -> (f64, f64) {
        let unit = Self::unit(size);
        let chars = text.chars().count();
        if chars == 0 {
            return (0.0, 0.0);
        }
        let width = chars as f64 * self.char_width + (chars - 1) as f64 * self.char_spacing;
        (width * unit, self.char_height * unit)
    }

    pub fn draw(&self, canvas: &mut Canvas, color: Rgb<u8>, x: f64, y_baseline: f64, size: f64, text: &str) {
        let unit = Self::unit(size);
        let thickness = (size * 2.0).round().max(1.0) as u32;
        let mut cursor_x = x;
        for ch in text.chars() {
            for stroke in char_strokes(ch) {
                // Stroke tables are y-up; the raster origin is top-left.
                let pts: Vec<Pt> = stroke
                    .iter()
                    .map(|&(sx, sy)| Pt {
                        x: cursor_x + sx * unit,
                        y: y_baseline - sy * unit,
                    })
                    .collect();
                for pair in pts.windows(2) {
                    thick_segment(canvas, pair[0], pair[1], thickness, color);
                }
            }
            cursor_x += (self.char_width + self.char_spacing) * unit;
        }
    }
}

pub enum Labeler {
    Ttf(TtfLabeler),
    Stroke(StrokeLabeler),
}

impl Labeler {
    pub fn new(font_path: Option<&Path>) -> Self {
        if let Some(path) = font_path
            && let Some(ttf) = TtfLabeler::load(path)
        {
            return Self::Ttf(ttf);
        }
        if let Some(ttf) = TtfLabeler::load_default() {
            return Self::Ttf(ttf);
        }
        Self::Stroke(StrokeLabeler::default())
    }

    pub fn label_size(&self, text: &str, size: f64) -> (f64, f64) {
        match self {
            Self::Ttf(ttf) => ttf.label_size(text, size),
            Self::Stroke(stroke) => stroke.label_size(text, size),
        }
    }

    pub fn label_width(&self, text: &str, size: f64) -> f64 {
        self.label_size(text, size).0
    }

    /// Draws `text` with its bottom-left corner at `(x, y_baseline)`.
    pub fn draw(&self, canvas: &mut Canvas, color: Rgb<u8>, x: f64, y_baseline: f64, size: f64, text: &str) {
        match self {
            Self::Ttf(ttf) => ttf.draw(canvas, color, x, y_baseline, size, text),
            Self::Stroke(stroke) => stroke.draw(canvas, color, x, y_baseline, size, text),
        }
    }

    pub fn is_ttf(&self) -> bool {
        matches!(self, Self::Ttf(_))
    }
}

fn char_strokes(ch: char) -> Vec<Vec<(f64, f64)>> {
    match ch {
        '0' => vec![
            vec![
                (1.0, 0.0),
                (0.0, 1.0),
                (0.0, 6.0),
                (1.0, 7.0),
                (4.0, 7.0),
                (5.0, 6.0),
                (5.0, 1.0),
                (4.0, 0.0),
                (1.0, 0.0),
            ],
            vec![(1.0, 1.0), (4.0, 6.0)],
        ],
        '1' => vec![
            vec![(1.0, 5.0), (2.5, 7.0), (2.5, 0.0)],
            vec![(1.0, 0.0), (4.0, 0.0)],
        ],
        '2' => vec![vec![
            (0.0, 6.0),
            (1.0, 7.0),
            (4.0, 7.0),
            (5.0, 6.0),
            (5.0, 4.5),
            (0.0, 0.0),
            (5.0, 0.0),
        ]],
        '3' => vec![
            vec![
                (0.0, 6.0),
                (1.0, 7.0),
                (4.0, 7.0),
                (5.0, 6.0),
                (5.0, 4.5),
                (4.0, 3.5),
                (2.0, 3.5),
            ],
            vec![
                (4.0, 3.5),
                (5.0, 2.5),
                (5.0, 1.0),
                (4.0, 0.0),
                (1.0, 0.0),
                (0.0, 1.0),
            ],
        ],
        '4' => vec![vec![(4.0, 0.0), (4.0, 7.0), (0.0, 2.5), (5.0, 2.5)]],
        '5' => vec![vec![
            (5.0, 7.0),
            (0.0, 7.0),
            (0.0, 4.0),
            (4.0, 4.0),
            (5.0, 3.0),
            (5.0, 1.0),
            (4.0, 0.0),
            (1.0, 0.0),
            (0.0, 1.0),
        ]],
        '6' => vec![vec![
            (4.0, 7.0),
            (1.0, 7.0),
            (0.0, 6.0),
            (0.0, 1.0),
            (1.0, 0.0),
            (4.0, 0.0),
            (5.0, 1.0),
            (5.0, 3.0),
            (4.0, 4.0),
            (0.0, 4.0),
        ]],
        '7' => vec![vec![(0.0, 7.0), (5.0, 7.0), (2.0, 0.0)]],
        '8' => vec![
            vec![
                (1.0, 3.5),
                (0.0, 4.5),
                (0.0, 6.0),
                (1.0, 7.0),
                (4.0, 7.0),
                (5.0, 6.0),
                (5.0, 4.5),
                (4.0, 3.5),
                (1.0, 3.5),
            ],
            vec![
                (1.0, 3.5),
                (0.0, 2.5),
                (0.0, 1.0),
                (1.0, 0.0),
                (4.0, 0.0),
                (5.0, 1.0),
                (5.0, 2.5),
                (4.0, 3.5),
            ],
        ],
        '9' => vec![vec![
            (1.0, 0.0),
            (4.0, 0.0),
            (5.0, 1.0),
            (5.0, 6.0),
            (4.0, 7.0),
            (1.0, 7.0),
            (0.0, 6.0),
            (0.0, 4.0),
            (1.0, 3.0),
            (5.0, 3.0),
        ]],
        ' ' => vec![],
        _ => vec![vec![
            (0.0, 0.0),
            (5.0, 0.0),
            (5.0, 7.0),
            (0.0, 7.0),
            (0.0, 0.0),
        ]],
    }
}
