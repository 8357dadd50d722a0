// src/marker.rs v1
//! Named markers placed on the image

use crate::viewport::{ImagePoint, Viewport, WidgetSize};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    pub id: String,
    pub position: ImagePoint,
}

/// Markers keyed by identifier, kept in insertion order
#[derive(Debug, Clone, Default)]
pub struct MarkerSet {
    markers: Vec<Marker>,
}

impl MarkerSet {
    pub fn new() -> Self {
        Self {
            markers: Vec::new(),
        }
    }

    /// Add a marker, or move it if the identifier already exists
    pub fn add(&mut self, id: &str, position: ImagePoint) {
        match self.markers.iter_mut().find(|m| m.id == id) {
            Some(marker) => marker.position = position,
            None => self.markers.push(Marker {
                id: id.to_string(),
                position,
            }),
        }
    }

    /// Remove the marker with the given identifier; false if there was none
    pub fn remove(&mut self, id: &str) -> bool {
        match self.markers.iter().position(|m| m.id == id) {
            Some(index) => {
                self.markers.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: &str) -> Option<ImagePoint> {
        self.markers.iter().find(|m| m.id == id).map(|m| m.position)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Marker> {
        self.markers.iter()
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn clear(&mut self) {
        self.markers.clear();
    }

    /// Markers whose widget position falls inside the widget, with that position
    pub fn visible(&self, viewport: &Viewport, widget: WidgetSize) -> Vec<(&Marker, (i32, i32))> {
        self.markers
            .iter()
            .map(|m| (m, viewport.widget_coord(m.position, widget)))
            .filter(|(_, (x, y))| Viewport::contains_widget(*x, *y, widget))
            .collect()
    }
}
