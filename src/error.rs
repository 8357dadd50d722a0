// src/error.rs
//! Error types for the geo viewer

use std::fmt;

pub type Result<T> = std::result::Result<T, ViewerError>;

#[derive(Debug)]
pub enum ViewerError {
    Io(std::io::Error),
    Image(image::ImageError),
    Json(serde_json::Error),
    Parse(String),
    Validation(String),
    Gui(String),
    Other(String),
}

impl fmt::Display for ViewerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewerError::Io(e) => write!(f, "IO error: {}", e),
            ViewerError::Image(e) => write!(f, "Image error: {}", e),
            ViewerError::Json(e) => write!(f, "JSON error: {}", e),
            ViewerError::Parse(msg) => write!(f, "Parse error: {}", msg),
            ViewerError::Validation(msg) => write!(f, "Invalid input: {}", msg),
            ViewerError::Gui(msg) => write!(f, "GUI error: {}", msg),
            ViewerError::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for ViewerError {}

impl From<std::io::Error> for ViewerError {
    fn from(error: std::io::Error) -> Self {
        ViewerError::Io(error)
    }
}

impl From<image::ImageError> for ViewerError {
    fn from(error: image::ImageError) -> Self {
        ViewerError::Image(error)
    }
}

impl From<serde_json::Error> for ViewerError {
    fn from(error: serde_json::Error) -> Self {
        ViewerError::Json(error)
    }
}

#[cfg(feature = "gui")]
impl From<eframe::Error> for ViewerError {
    fn from(error: eframe::Error) -> Self {
        ViewerError::Gui(error.to_string())
    }
}
