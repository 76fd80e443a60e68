use image::Rgb;
use serde::Deserialize;
use std::path::PathBuf;

use crate::error::BookError;

/// Parse a `#RRGGBB` (or `RRGGBB`) hex color.
pub fn parse_hex_color(hex: &str) -> Result<Rgb<u8>, BookError> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(BookError::InvalidInput(format!(
            "color {hex:?} is not a 6-digit hex color"
        )));
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16);
    Ok(Rgb([
        channel(0..2).map_err(|e| BookError::InvalidInput(e.to_string()))?,
        channel(2..4).map_err(|e| BookError::InvalidInput(e.to_string()))?,
        channel(4..6).map_err(|e| BookError::InvalidInput(e.to_string()))?,
    ]))
}

/// Drawing colors for the yardage page, one per feature category plus
/// background and label text.
#[derive(Debug, Clone)]
pub struct Palette {
    pub fairways: Rgb<u8>,
    pub tee_boxes: Rgb<u8>,
    pub greens: Rgb<u8>,
    pub background: Rgb<u8>,
    pub trees: Rgb<u8>,
    pub water: Rgb<u8>,
    pub sand: Rgb<u8>,
    pub text: Rgb<u8>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            fairways: Rgb([0x85, 0xD8, 0x7E]),
            tee_boxes: Rgb([0x85, 0xD8, 0x7E]),
            greens: Rgb([0xA1, 0xF2, 0x9B]),
            background: Rgb([0x2C, 0xA6, 0x5E]),
            trees: Rgb([0x1C, 0x6B, 0x3D]),
            water: Rgb([0xBA, 0xFB, 0xEB]),
            sand: Rgb([0xFF, 0xEE, 0xA1]),
            text: Rgb([0x00, 0x00, 0x00]),
        }
    }
}

/// Hex color overrides as they appear in the config file.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ColorConfig {
    #[serde(default)]
    pub fairways: Option<String>,
    #[serde(default)]
    pub tee_boxes: Option<String>,
    #[serde(default)]
    pub greens: Option<String>,
    #[serde(default)]
    pub background: Option<String>,
    #[serde(default)]
    pub trees: Option<String>,
    #[serde(default)]
    pub water: Option<String>,
    #[serde(default)]
    pub sand: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

impl ColorConfig {
    pub fn into_palette(self) -> Result<Palette, BookError> {
        let mut palette = Palette::default();
        let apply = |slot: &mut Rgb<u8>, value: Option<String>| -> Result<(), BookError> {
            if let Some(hex) = value {
                *slot = parse_hex_color(&hex)?;
            }
            Ok(())
        };
        apply(&mut palette.fairways, self.fairways)?;
        apply(&mut palette.tee_boxes, self.tee_boxes)?;
        apply(&mut palette.greens, self.greens)?;
        apply(&mut palette.background, self.background)?;
        apply(&mut palette.trees, self.trees)?;
        apply(&mut palette.water, self.water)?;
        apply(&mut palette.sand, self.sand)?;
        apply(&mut palette.text, self.text)?;
        Ok(palette)
    }
}

fn default_hole_width() -> u32 {
    50
}
fn default_tee_width_percent() -> u32 {
    100
}
fn default_include_trees() -> bool {
    true
}
fn default_scale() -> u32 {
    crate::geometry::projection::DEFAULT_SCALE
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}
fn default_greens_dir() -> PathBuf {
    PathBuf::from("greens")
}

#[derive(Debug, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub south: Option<f64>,
    #[serde(default)]
    pub west: Option<f64>,
    #[serde(default)]
    pub north: Option<f64>,
    #[serde(default)]
    pub east: Option<f64>,
    #[serde(default = "default_hole_width")]
    pub hole_width: u32,
    #[serde(default = "default_tee_width_percent")]
    pub tee_width_percent: u32,
    #[serde(default)]
    pub overwrite: bool,
    #[serde(default = "default_include_trees")]
    pub include_trees: bool,
    #[serde(default)]
    pub meters: bool,
    #[serde(default = "default_scale")]
    pub scale: u32,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default = "default_greens_dir")]
    pub greens_dir: PathBuf,
    #[serde(default)]
    pub font: Option<PathBuf>,
    #[serde(default)]
    pub overpass_url: Option<String>,
    #[serde(default)]
    pub colors: Option<ColorConfig>,
    #[serde(default)]
    pub verbose: bool,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            south: None,
            west: None,
            north: None,
            east: None,
            hole_width: default_hole_width(),
            tee_width_percent: default_tee_width_percent(),
            overwrite: false,
            include_trees: default_include_trees(),
            meters: false,
            scale: default_scale(),
            output_dir: default_output_dir(),
            greens_dir: default_greens_dir(),
            font: None,
            overpass_url: None,
            colors: None,
            verbose: false,
        }
    }
}

impl FileConfig {
    pub fn load() -> Option<Self> {
        for path in get_config_paths() {
            if path.exists()
                && let Ok(contents) = std::fs::read_to_string(&path)
            {
                match toml::from_str(&contents) {
                    Ok(config) => return Some(config),
                    Err(e) => {
                        eprintln!("Warning: Failed to parse config file {:?}: {}", path, e);
                    }
                }
            }
        }
        None
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("fairbook.toml"));
    paths.push(PathBuf::from(".fairbook.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("fairbook").join("config.toml"));
        paths.push(config_dir.join("fairbook.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".fairbook.toml"));
        paths.push(home.join(".config").join("fairbook").join("config.toml"));
    }

    paths
}

/// Fully resolved run options: bounding box, palette, filter knobs, flags.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub bounds: crate::geometry::GeoBounds,
    pub palette: Palette,
    /// Half-width of the hole corridor used by the relevance filter, yards.
    pub filter_width: f64,
    /// Corridor tightening factor within 75 yards of the tee.
    pub small_factor: f64,
    /// Corridor tightening factor within 150 yards of the tee.
    pub med_factor: f64,
    pub overwrite: bool,
    pub include_trees: bool,
    pub meters: bool,
    pub scale: u32,
    pub output_dir: PathBuf,
    pub greens_dir: PathBuf,
    pub font: Option<PathBuf>,
    pub verbose: bool,
}

impl RunConfig {
    /// Derive the near-tee corridor factors from the 20-100% slider value.
    pub fn tee_factors(percent: u32) -> Result<(f64, f64), BookError> {
        if !(20..=100).contains(&percent) {
            return Err(BookError::InvalidInput(format!(
                "tee width percent must be between 20 and 100, got {percent}"
            )));
        }
        let small = percent as f64 / 100.0;
        let med = (small + 1.0) / 2.0;
        Ok((small, med))
    }
}
