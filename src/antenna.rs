// src/antenna.rs v1
//! Antenna records and their plain-text log file
//!
//! Each record is three lines: name, x, y. Records are only ever appended.

use crate::error::{Result, ViewerError};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, PartialEq)]
pub struct Antenna {
    pub name: String,
    pub x: f64,
    pub y: f64,
    // Coordinates as written to the log
    x_text: String,
    y_text: String,
}

impl Antenna {
    pub fn new(name: &str, x: f64, y: f64) -> Result<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ViewerError::Validation("antenna name is empty".to_string()));
        }
        if name.contains('\n') || name.contains('\r') {
            return Err(ViewerError::Validation("antenna name must be a single line".to_string()));
        }
        if !x.is_finite() || !y.is_finite() {
            return Err(ViewerError::Validation(format!(
                "coordinates of '{}' must be finite numbers",
                name
            )));
        }

        Ok(Self {
            name: name.to_string(),
            x,
            y,
            x_text: x.to_string(),
            y_text: y.to_string(),
        })
    }

    /// Build from the raw text of the entry form fields; the trimmed text is
    /// what gets recorded
    pub fn parse(name: &str, x: &str, y: &str) -> Result<Self> {
        let mut antenna = Self::new(name, parse_coordinate("X", x)?, parse_coordinate("Y", y)?)?;
        antenna.x_text = x.trim().to_string();
        antenna.y_text = y.trim().to_string();
        Ok(antenna)
    }

    pub fn x_text(&self) -> &str {
        &self.x_text
    }

    pub fn y_text(&self) -> &str {
        &self.y_text
    }

    fn to_record(&self) -> String {
        format!("{}\n{}\n{}\n", self.name, self.x_text, self.y_text)
    }
}

fn parse_coordinate(label: &str, text: &str) -> Result<f64> {
    text.trim()
        .parse::<f64>()
        .map_err(|_| ViewerError::Validation(format!("{} must be a number, got '{}'", label, text.trim())))
}

/// Append-only antenna file
#[derive(Debug, Clone)]
pub struct AntennaLog {
    path: PathBuf,
}

impl AntennaLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record, creating the file (and its directory) if needed
    pub fn append(&self, antenna: &Antenna) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(antenna.to_record().as_bytes())?;

        info!("Recorded antenna '{}' ({}, {}) in {}", antenna.name, antenna.x_text, antenna.y_text, self.path.display());
        Ok(())
    }

    /// Read back every record; a missing file holds no antennas
    pub fn load(&self) -> Result<Vec<Antenna>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let contents = std::fs::read_to_string(&self.path)?;
        parse_records(&contents)
    }
}

fn parse_records(contents: &str) -> Result<Vec<Antenna>> {
    let lines: Vec<&str> = contents.lines().collect();
    let mut antennas = Vec::with_capacity(lines.len() / 3);

    for (index, record) in lines.chunks(3).enumerate() {
        let first_line = index * 3 + 1;
        if record.len() < 3 {
            return Err(ViewerError::Parse(format!(
                "line {}: incomplete antenna record",
                first_line
            )));
        }

        if record[1].trim().parse::<f64>().is_err() {
            return Err(ViewerError::Parse(format!("line {}: invalid X '{}'", first_line + 1, record[1])));
        }
        if record[2].trim().parse::<f64>().is_err() {
            return Err(ViewerError::Parse(format!("line {}: invalid Y '{}'", first_line + 2, record[2])));
        }

        let antenna = Antenna::parse(record[0], record[1], record[2])
            .map_err(|e| ViewerError::Parse(format!("line {}: {}", first_line, e)))?;
        antennas.push(antenna);
    }

    Ok(antennas)
}
