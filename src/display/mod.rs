// src/display/mod.rs
//! Display modules: image loading shared by the GUI screens

#[cfg(feature = "gui")]
pub mod gui;

use crate::error::Result;
use std::path::Path;
use tracing::info;

/// Decoded image held as tightly packed RGBA8 rows
#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl LoadedImage {
    pub fn open(path: &Path) -> Result<Self> {
        let image = image::open(path)?;
        let rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();

        info!("Loaded {} ({}x{})", path.display(), width, height);

        Ok(Self {
            name: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "image".to_string()),
            width,
            height,
            rgba: rgba.into_raw(),
        })
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// Check if a graphical session is available
pub fn has_display() -> bool {
    cfg!(any(windows, target_os = "macos"))
        || std::env::var("DISPLAY").is_ok()
        || std::env::var("WAYLAND_DISPLAY").is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tiny.png");
        let mut img = image::RgbaImage::new(4, 2);
        img.put_pixel(3, 1, image::Rgba([255, 0, 0, 255]));
        img.save(&path).unwrap();

        let loaded = LoadedImage::open(&path).unwrap();
        assert_eq!(loaded.size(), (4, 2));
        assert_eq!(loaded.name, "tiny.png");
        assert_eq!(loaded.rgba.len(), 4 * 2 * 4);
        assert_eq!(&loaded.rgba[28..32], &[255, 0, 0, 255]);
    }

    #[test]
    fn test_open_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(LoadedImage::open(&dir.path().join("missing.png")).is_err());
    }
}
