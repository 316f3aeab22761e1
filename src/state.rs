//! Viewport and selection state owned by the map view.

use crate::data::{MAX_ZOOM, MIN_ZOOM};

/// Zoom level and pan center of the map.
///
/// The center is `(longitude, latitude)` in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    zoom: u32,
    center: (f64, f64),
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            zoom: MIN_ZOOM,
            center: (0.0, 0.0),
        }
    }
}

impl Viewport {
    pub fn with_zoom(zoom: u32) -> Self {
        Self {
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
            ..Self::default()
        }
    }

    pub fn zoom(&self) -> u32 {
        self.zoom
    }

    pub fn center(&self) -> (f64, f64) {
        self.center
    }

    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom + 1).min(MAX_ZOOM);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = self.zoom.saturating_sub(1).max(MIN_ZOOM);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Move the center to `(lon, lat)`, clamped to the edges of the world.
    ///
    /// The map is translated, never rotated, so the center stops at the
    /// antimeridian instead of wrapping around it.
    pub fn set_center(&mut self, lon: f64, lat: f64) {
        if !lon.is_finite() || !lat.is_finite() {
            return;
        }
        self.center = (lon.clamp(-180.0, 180.0), lat.clamp(-90.0, 90.0));
    }

    pub fn pan_by(&mut self, dlon: f64, dlat: f64) {
        let (lon, lat) = self.center;
        self.set_center(lon + dlon, lat + dlat);
    }
}

/// Which country is selected and whether its panel is showing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    display_name: Option<String>,
    panel_open: bool,
}

impl Selection {
    pub fn select(&mut self, display_name: impl Into<String>) {
        self.display_name = Some(display_name.into());
        self.panel_open = true;
    }

    pub fn close(&mut self) {
        self.panel_open = false;
        self.display_name = None;
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    pub fn is_panel_open(&self) -> bool {
        self.panel_open
    }

    pub fn is_selected(&self, display_name: &str) -> bool {
        self.display_name.as_deref() == Some(display_name)
    }
}
