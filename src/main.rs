// src/main.rs v4
//! Geo Viewer - image viewer, static panel and antenna form with egui

use clap::{Parser, Subcommand};
use geo_viewer::{config::ViewerConfig, graticule::Metapole};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "geo-viewer", version, about = "Image viewer with graticule overlay and antenna form")]
struct Cli {
    /// Configuration file (defaults to ~/.config/geo-viewer/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Pan and zoom an image, optionally with a graticule
    View {
        image: PathBuf,

        /// Show the graticule on startup
        #[arg(long)]
        grid: bool,

        /// Metapole latitude in degrees
        #[arg(long, allow_negative_numbers = true)]
        pole_lat: Option<f64>,

        /// Metapole longitude in degrees
        #[arg(long, allow_negative_numbers = true)]
        pole_lon: Option<f64>,

        /// Rotation of the meta prime meridian in degrees
        #[arg(long, allow_negative_numbers = true)]
        meta_meridian: Option<f64>,

        /// Stretch the image to the window instead of keeping its aspect ratio
        #[arg(long)]
        stretch: bool,

        /// Antenna file to read markers from
        #[arg(long)]
        antennas: Option<PathBuf>,
    },
    /// Show an image at a fixed position
    Panel { image: PathBuf },
    /// Record antennas to the antenna file
    Antennas {
        /// Antenna file to append to
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

/// Merge command line overrides into the loaded configuration
fn apply_overrides(config: &mut ViewerConfig, command: &Command) {
    match command {
        Command::View {
            grid,
            pole_lat,
            pole_lon,
            meta_meridian,
            stretch,
            antennas,
            ..
        } => {
            let metapole = Metapole::new(
                pole_lat.unwrap_or(config.metapole.latitude),
                pole_lon.unwrap_or(config.metapole.longitude),
                meta_meridian.unwrap_or(config.metapole.meta_meridian),
            );
            let show_grid = *grid || config.show_grid;
            config.update_grid(show_grid, metapole);
            if *stretch {
                config.keep_aspect = false;
            }
            if let Some(path) = antennas {
                config.update_antenna_file(path.clone());
            }
        }
        Command::Antennas { file: Some(path) } => config.update_antenna_file(path.clone()),
        Command::Antennas { file: None } | Command::Panel { .. } => {}
    }
}

fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("geo_viewer=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

#[cfg(not(feature = "gui"))]
fn main() {
    eprintln!("Error: This application requires the 'gui' feature.");
    eprintln!("Build with: cargo build --features gui");
    std::process::exit(1);
}

#[cfg(feature = "gui")]
fn main() -> anyhow::Result<()> {
    use anyhow::Context;
    use geo_viewer::{
        antenna::AntennaLog,
        display::{self, gui, LoadedImage},
    };
    use tracing::{info, warn};

    init_logging();
    let cli = Cli::parse();

    // Load configuration; overrides apply to this run only
    let saved_config = match cli.config {
        Some(ref path) => ViewerConfig::load_from(path),
        None => ViewerConfig::load(),
    }
    .unwrap_or_else(|e| {
        warn!("Using default configuration: {}", e);
        ViewerConfig::default()
    });
    let mut config = saved_config.clone();
    apply_overrides(&mut config, &cli.command);

    if !display::has_display() {
        warn!("No display detected (DISPLAY/WAYLAND_DISPLAY unset), the window may fail to open");
    }

    let window_size = config.window_size;
    let app = gui::GeoViewerApp::new(config.clone(), saved_config, cli.config.clone());

    let (app, title) = match cli.command {
        Command::View { ref image, .. } => {
            let loaded = LoadedImage::open(image)
                .with_context(|| format!("cannot open image {}", image.display()))?;
            info!("Starting viewer on {}", loaded.name);
            let viewer = gui::ImageViewer::new(
                loaded,
                config.keep_aspect,
                AntennaLog::new(config.antenna_file.clone()),
            )
            .with_grid(config.show_grid, config.metapole);
            (app.with_viewer(viewer), "Geo Viewer")
        }
        Command::Panel { ref image } => {
            let loaded = LoadedImage::open(image)
                .with_context(|| format!("cannot open image {}", image.display()))?;
            (app.with_panel(gui::StaticPanel::new(loaded, config.panel_offset)), "Image Panel")
        }
        Command::Antennas { .. } => {
            info!("Recording antennas to {}", config.antenna_file.display());
            (app, "Antennas")
        }
    };

    gui::run(app, title, window_size)?;

    Ok(())
}
