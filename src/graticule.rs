// src/graticule.rs v1
//! Graticule generation for a rotated (oblique) geographic grid
//!
//! The image is assumed to be an equirectangular world map: x spans
//! longitudes -180..180 and y spans latitudes 90..-90. Grid lines are the
//! meridians of a frame whose pole (the metapole) may sit anywhere on the
//! globe; each meridian is sampled and projected into image pixels.

use crate::viewport::ImagePoint;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Spacing between meta-meridians, degrees
pub const LONGITUDE_STEP: i32 = 10;
/// Sampling step along each meta-meridian, degrees
pub const LATITUDE_STEP: i32 = 2;

/// Pole of the rotated frame, in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Metapole {
    pub latitude: f64,
    pub longitude: f64,
    /// Rotation of the meta prime meridian
    #[serde(default)]
    pub meta_meridian: f64,
}

impl Default for Metapole {
    fn default() -> Self {
        Self::new(90.0, 0.0, 0.0)
    }
}

impl Metapole {
    pub fn new(latitude: f64, longitude: f64, meta_meridian: f64) -> Self {
        Self {
            latitude,
            longitude,
            meta_meridian,
        }
    }

    /// True when the metapole coincides with the geographic north pole, in
    /// which case meta coordinates are used as-is.
    pub fn is_true_pole(&self) -> bool {
        self.latitude == 90.0 && self.longitude == 0.0
    }

    /// Geographic (latitude, longitude) of a point given in meta coordinates.
    /// Longitude is normalised into [-180, 180].
    pub fn to_geographic(&self, meta_lat: f64, meta_lon: f64) -> (f64, f64) {
        let (lat, lon) = if self.is_true_pole() {
            (meta_lat, meta_lon)
        } else {
            self.rotate(meta_lat, meta_lon)
        };

        let lon = if lon < -180.0 {
            lon + 360.0
        } else if lon > 180.0 {
            lon - 360.0
        } else {
            lon
        };

        (lat, lon)
    }

    fn rotate(&self, meta_lat: f64, meta_lon: f64) -> (f64, f64) {
        let fi0 = self.latitude.to_radians();
        let la0 = self.longitude.to_radians();
        let fic = meta_lat.to_radians();
        let lac = meta_lon.to_radians() - self.meta_meridian.to_radians();

        let sin_f = fi0.sin() * fic.sin() + fi0.cos() * fic.cos() * lac.cos();
        let f = sin_f.clamp(-1.0, 1.0).asin();

        let cos_dl = (fic.sin() - fi0.sin() * f.sin()) / fi0.cos() / f.cos();
        // 0/0 at the poles of either frame
        let cos_dl = if cos_dl.is_nan() { 1.0 } else { cos_dl.clamp(-1.0, 1.0) };

        let side = if lac.sin() > 0.0 { 1.0 } else { -1.0 };
        let l = la0 - cos_dl.acos() * side;

        (f.to_degrees(), l.to_degrees())
    }
}

/// Polylines of a graticule, in image pixel coordinates
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Graticule {
    lines: Vec<Vec<ImagePoint>>,
}

impl Graticule {
    /// Build the meta-meridians of `metapole` for an image of the given size.
    ///
    /// A meridian is split into a new line wherever two consecutive samples
    /// are more than 180 degrees of longitude apart, so nothing is drawn
    /// across the whole map at the date line.
    pub fn generate(metapole: &Metapole, image_width: u32, image_height: u32) -> Self {
        debug!(
            "Generating graticule for metapole {:.3}/{:.3} (meta-meridian {:.3})",
            metapole.latitude, metapole.longitude, metapole.meta_meridian
        );

        let mut lines = Vec::new();

        for meta_lon in (-180..=180).step_by(LONGITUDE_STEP as usize) {
            let mut line = Vec::new();
            let mut previous_lon: Option<f64> = None;

            for meta_lat in (-90..=90).step_by(LATITUDE_STEP as usize) {
                let (lat, lon) = metapole.to_geographic(meta_lat as f64, meta_lon as f64);

                if let Some(prev) = previous_lon {
                    if (prev - lon).abs() > 180.0 {
                        lines.push(std::mem::take(&mut line));
                    }
                }

                line.push(project(lat, lon, image_width, image_height));
                previous_lon = Some(lon);
            }

            lines.push(line);
        }

        Self { lines }
    }

    pub fn lines(&self) -> &[Vec<ImagePoint>] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn point_count(&self) -> usize {
        self.lines.iter().map(Vec::len).sum()
    }

    /// Consecutive point pairs of every line
    pub fn segments(&self) -> impl Iterator<Item = (ImagePoint, ImagePoint)> + '_ {
        self.lines
            .iter()
            .flat_map(|line| line.windows(2).map(|pair| (pair[0], pair[1])))
    }
}

/// Equirectangular projection of geographic degrees into image pixels
fn project(lat: f64, lon: f64, image_width: u32, image_height: u32) -> ImagePoint {
    let x = (lon + 180.0) * image_width as f64 / 360.0;
    let y = (90.0 - lat) * image_height as f64 / 180.0;
    ImagePoint::new(x as i32, y as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MERIDIANS: usize = 37;
    const SAMPLES: usize = 91;

    #[test]
    fn test_true_pole_is_plain_grid() {
        let grid = Graticule::generate(&Metapole::default(), 360, 180);

        assert_eq!(grid.lines().len(), MERIDIANS);
        assert!(grid.lines().iter().all(|line| line.len() == SAMPLES));

        let first = &grid.lines()[0];
        assert_eq!(first[0], ImagePoint::new(0, 180));
        assert_eq!(first[SAMPLES - 1], ImagePoint::new(0, 0));

        let last = &grid.lines()[MERIDIANS - 1];
        assert_eq!(last[0], ImagePoint::new(360, 180));
    }

    #[test]
    fn test_meta_north_pole_maps_to_metapole() {
        let pole = Metapole::new(30.0, 45.0, 0.0);
        let (lat, lon) = pole.to_geographic(90.0, 0.0);
        assert!((lat - 30.0).abs() < 1e-6, "lat was {}", lat);
        assert!((lon - 45.0).abs() < 1e-5, "lon was {}", lon);
    }

    #[test]
    fn test_longitudes_are_normalised() {
        let pole = Metapole::new(10.0, 170.0, 25.0);
        for meta_lon in (-180..=180).step_by(10) {
            for meta_lat in (-90..=90).step_by(2) {
                let (lat, lon) = pole.to_geographic(meta_lat as f64, meta_lon as f64);
                assert!(lat.is_finite() && lon.is_finite());
                assert!((-180.0..=180.0).contains(&lon), "lon {} out of range", lon);
                assert!((-90.0..=90.0).contains(&lat), "lat {} out of range", lat);
            }
        }
    }

    #[test]
    fn test_oblique_grid_splits_at_date_line() {
        let grid = Graticule::generate(&Metapole::new(0.0, 90.0, 0.0), 360, 180);

        assert!(grid.lines().len() > MERIDIANS);
        assert_eq!(grid.point_count(), MERIDIANS * SAMPLES);
    }

    #[test]
    fn test_no_segment_wraps_across_map() {
        let width = 720;
        let height = 360;
        let grid = Graticule::generate(&Metapole::new(40.0, -100.0, 15.0), width, height);

        for (a, b) in grid.segments() {
            assert!(
                (a.x - b.x).abs() <= width as i32 / 2 + 1,
                "segment {:?} -> {:?} wraps",
                a,
                b
            );
        }
    }

    #[test]
    fn test_points_stay_inside_image() {
        let grid = Graticule::generate(&Metapole::new(-25.0, 60.0, 0.0), 400, 200);
        for line in grid.lines() {
            for p in line {
                assert!((0..=400).contains(&p.x), "x {} outside", p.x);
                assert!((0..=200).contains(&p.y), "y {} outside", p.y);
            }
        }
    }

    #[test]
    fn test_segments_skip_single_point_lines() {
        let grid = Graticule {
            lines: vec![
                vec![ImagePoint::new(0, 0)],
                vec![ImagePoint::new(1, 1), ImagePoint::new(2, 2), ImagePoint::new(3, 3)],
            ],
        };
        assert_eq!(grid.segments().count(), 2);
    }
}
