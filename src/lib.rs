// src/lib.rs
//! Geo Viewer Library
//!
//! Image viewing utilities: a pan/zoom viewport mapper, a generator for
//! rotated geographic graticules, named image markers and an append-only
//! antenna record file, plus the egui screens built on them.

pub mod antenna;
pub mod config;
pub mod display;
pub mod error;
pub mod graticule;
pub mod marker;
pub mod viewport;

// Re-export main types for convenience
pub use antenna::{Antenna, AntennaLog};
pub use config::ViewerConfig;
pub use error::{Result, ViewerError};
pub use graticule::{Graticule, Metapole};
pub use marker::{Marker, MarkerSet};
pub use viewport::{ImagePoint, ViewState, Viewport, WidgetSize, ZoomDirection};

#[cfg(feature = "gui")]
pub use display::gui::GeoViewerApp;
