use anyhow::{Context, Result, bail};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Instant;

use fairbook::api::OverpassSource;
use fairbook::book;
use fairbook::config::{ColorConfig, FileConfig, RunConfig};
use fairbook::geometry::GeoBounds;

/// Generate printable golf yardage books from OpenStreetMap data
///
/// Examples:
///   # Generate the book for a course's bounding box
///   fairbook --south 30.2286 --west -97.7114 --north 30.2448 --east -97.7018
///
///   # Narrower hole corridor, metric distances, overwrite existing pages
///   fairbook --south 30.2286 --west -97.7114 --north 30.2448 --east -97.7018 \
///       --hole-width 40 --meters --overwrite
///
///   # Use a config file
///   fairbook --config pebble.toml
#[derive(Parser, Debug)]
#[command(name = "fairbook")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to config file (optional, auto-searches fairbook.toml if not provided)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Southern latitude of the course bounding box
    #[arg(long, allow_hyphen_values = true)]
    south: Option<f64>,

    /// Western longitude of the course bounding box
    #[arg(long, allow_hyphen_values = true)]
    west: Option<f64>,

    /// Northern latitude of the course bounding box
    #[arg(long, allow_hyphen_values = true)]
    north: Option<f64>,

    /// Eastern longitude of the course bounding box
    #[arg(long, allow_hyphen_values = true)]
    east: Option<f64>,

    /// Half-width of the hole corridor in yards (how far off the line of
    /// play features are still drawn)
    #[arg(long, default_value = "50")]
    hole_width: u32,

    /// Corridor width near the tee as a percentage of --hole-width (20-100)
    #[arg(long, default_value = "100")]
    tee_width_percent: u32,

    /// Overwrite pages that already exist in the output directory
    #[arg(long)]
    overwrite: bool,

    /// Skip individually mapped trees
    #[arg(long)]
    no_trees: bool,

    /// Print distances in meters instead of yards
    #[arg(short = 'm', long)]
    meters: bool,

    /// Pixel size of the longer canvas dimension before cropping
    #[arg(long, default_value = "3000")]
    scale: u32,

    /// Directory for the yardage pages
    #[arg(short = 'o', long, default_value = "output")]
    output_dir: PathBuf,

    /// Directory for the green-detail pages
    #[arg(long, default_value = "greens")]
    greens_dir: PathBuf,

    /// Path to TTF font file for labels (defaults to fonts/DejaVuSans.ttf)
    #[arg(long)]
    font: Option<PathBuf>,

    /// Overpass API endpoint
    #[arg(long)]
    overpass_url: Option<String>,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let total_start = Instant::now();

    let file_config = if let Some(ref config_path) = args.config {
        if config_path.exists() {
            let contents = std::fs::read_to_string(config_path)
                .context(format!("Failed to read config file: {:?}", config_path))?;
            Some(toml::from_str(&contents).context("Failed to parse config file")?)
        } else {
            bail!("Config file not found: {:?}", config_path);
        }
    } else {
        FileConfig::load()
    };
    let file_config = file_config.unwrap_or_default();

    let south = args.south.or(file_config.south);
    let west = args.west.or(file_config.west);
    let north = args.north.or(file_config.north);
    let east = args.east.or(file_config.east);
    let (Some(south), Some(west), Some(north), Some(east)) = (south, west, north, east) else {
        bail!("Must provide the course bounding box: --south, --west, --north and --east");
    };
    if south >= north || west >= east {
        bail!(
            "Bounding box is inverted: south must be below north and west must be left of east"
        );
    }

    let hole_width = if args.hole_width != 50 {
        args.hole_width
    } else {
        file_config.hole_width
    };
    let tee_width_percent = if args.tee_width_percent != 100 {
        args.tee_width_percent
    } else {
        file_config.tee_width_percent
    };
    let scale = if args.scale != 3000 {
        args.scale
    } else {
        file_config.scale
    };
    if hole_width == 0 {
        bail!("--hole-width must be positive");
    }
    if scale < 500 {
        bail!("--scale below 500 produces pages too coarse to annotate");
    }
    let (small_factor, med_factor) =
        RunConfig::tee_factors(tee_width_percent).context("Invalid --tee-width-percent")?;

    let overwrite = args.overwrite || file_config.overwrite;
    let include_trees = !args.no_trees && file_config.include_trees;
    let meters = args.meters || file_config.meters;
    let verbose = args.verbose || file_config.verbose;
    let output_dir = if args.output_dir != PathBuf::from("output") {
        args.output_dir.clone()
    } else {
        file_config.output_dir.clone()
    };
    let greens_dir = if args.greens_dir != PathBuf::from("greens") {
        args.greens_dir.clone()
    } else {
        file_config.greens_dir.clone()
    };
    let font = args.font.clone().or(file_config.font.clone());
    let overpass_url = args
        .overpass_url
        .clone()
        .or(file_config.overpass_url.clone());

    let palette = file_config
        .colors
        .clone()
        .unwrap_or_else(ColorConfig::default)
        .into_palette()
        .context("Invalid color override in config file")?;

    let config = RunConfig {
        bounds: GeoBounds::new(south, west, north, east),
        palette,
        filter_width: f64::from(hole_width),
        small_factor,
        med_factor,
        overwrite,
        include_trees,
        meters,
        scale,
        output_dir,
        greens_dir,
        font,
        verbose,
    };

    println!("fairbook - Golf Yardage Book Generator");
    println!("======================================");
    println!();

    if verbose {
        println!("Configuration:");
        println!("  Bounding box: ({south}, {west}) - ({north}, {east})");
        println!("  Hole width: {hole_width} yds (near tee: {tee_width_percent}%)");
        println!("  Scale: {scale} px");
        println!("  Units: {}", if meters { "meters" } else { "yards" });
        println!(
            "  Trees: {}",
            if include_trees { "enabled" } else { "disabled" }
        );
        println!("  Output: {}", config.output_dir.display());
        println!("  Greens: {}", config.greens_dir.display());
        println!();
    }

    let source = match overpass_url {
        Some(ref url) => OverpassSource::with_url(url),
        None => OverpassSource::new(),
    }
    .context("Failed to create Overpass client")?;

    let spinner = create_spinner("Generating yardage book...");
    let summary = book::generate(&config, &source).context("Yardage book generation failed")?;
    spinner.finish_with_message(format!(
        "Found {} holes: {} rendered, {} skipped [{:.1}s]",
        summary.holes,
        summary.rendered,
        summary.skipped,
        total_start.elapsed().as_secs_f32()
    ));

    println!();
    println!("Output: {}", config.output_dir.display());
    println!("Greens: {}", config.greens_dir.display());

    Ok(())
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}
