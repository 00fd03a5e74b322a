//! Configuration of the search map.
//!
//! Defaults reproduce the stock setup: OpenStreetMap tiles, the view centered on Bangkok at
//! zoom 13 and scroll-wheel zoom turned off.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::coordinate::Coordinate;
use crate::error::PinpointError;
use crate::search_map::DEFAULT_SEARCH_ZOOM;
use crate::view::ViewState;

/// Coordinate the map is centered on when it is first shown.
pub const DEFAULT_CENTER: Coordinate = Coordinate::new(13.811202, 100.504995);

/// Source of raster tiles with its attribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TileSource {
    /// Tile URL with `{z}`, `{x}`, `{y}` and optional `{s}` (subdomain) placeholders.
    pub url_template: String,
    /// Subdomains substituted for `{s}`.
    pub subdomains: Vec<String>,
    /// Highest z-level provided by the source. Levels `0..=max_zoom` are requested.
    pub max_zoom: u32,
    /// Attribution text.
    pub attribution: String,
    /// Link shown with the attribution.
    pub attribution_url: String,
}

impl Default for TileSource {
    fn default() -> Self {
        Self {
            url_template: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            subdomains: vec!["a".into(), "b".into(), "c".into()],
            max_zoom: 18,
            attribution: "© OpenStreetMap contributors".to_string(),
            attribution_url: "https://www.openstreetmap.org/copyright".to_string(),
        }
    }
}

impl TileSource {
    /// URL of the tile with the given index.
    ///
    /// Subdomains are rotated by tile index so that neighbouring tiles are requested from
    /// different hosts.
    ///
    /// ```
    /// use pinpoint::TileSource;
    ///
    /// let url = TileSource::default().tile_url(13, 6383, 3770).unwrap();
    /// assert_eq!(url, "https://b.tile.openstreetmap.org/13/6383/3770.png");
    /// ```
    pub fn tile_url(&self, z: u32, x: i64, y: i64) -> Result<String, PinpointError> {
        let subdomain = if self.subdomains.is_empty() {
            String::new()
        } else {
            let index = (x + y).rem_euclid(self.subdomains.len() as i64) as usize;
            self.subdomains[index].clone()
        };

        let vars: HashMap<String, String> = [
            ("s".to_string(), subdomain),
            ("z".to_string(), z.to_string()),
            ("x".to_string(), x.to_string()),
            ("y".to_string(), y.to_string()),
        ]
        .into_iter()
        .collect();

        Ok(strfmt::strfmt(&self.url_template, &vars)?)
    }

    /// Checks that the URL template can be expanded and names every tile index component.
    pub fn validate(&self) -> Result<(), PinpointError> {
        for placeholder in ["{z}", "{x}", "{y}"] {
            if !self.url_template.contains(placeholder) {
                return Err(PinpointError::TileTemplate(format!(
                    "'{}' has no {placeholder} placeholder",
                    self.url_template
                )));
            }
        }

        if self.url_template.contains("{s}") && self.subdomains.is_empty() {
            return Err(PinpointError::TileTemplate(format!(
                "'{}' uses {{s}}, but no subdomains are given",
                self.url_template
            )));
        }

        self.tile_url(0, 0, 0).map(|_| ())
    }
}

/// Appearance of the marker icon.
///
/// Offsets are in pixels. `anchor` is the point of the icon that is placed at the marker
/// position, measured from the top-left corner of the icon. `popup_anchor` is the point where the
/// popup is attached, measured from `anchor`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerIcon {
    /// Path of the icon image.
    pub url: String,
    /// Icon size, `[width, height]`.
    pub size: [u32; 2],
    /// Icon anchor, `[x, y]`.
    pub anchor: [i32; 2],
    /// Popup anchor relative to the icon anchor, `[x, y]`.
    pub popup_anchor: [i32; 2],
}

impl Default for MarkerIcon {
    fn default() -> Self {
        Self {
            url: "marker.png".to_string(),
            size: [32, 32],
            anchor: [16, 32],
            popup_anchor: [0, -32],
        }
    }
}

impl MarkerIcon {
    /// Footprint of a circle of the given diameter centered on the marker point.
    pub fn circle(diameter: u32) -> Self {
        let radius = (diameter / 2) as i32;
        Self {
            url: String::new(),
            size: [diameter, diameter],
            anchor: [radius, radius],
            popup_anchor: [0, -radius],
        }
    }

    /// The same icon drawn at a different size. Anchors are scaled along.
    pub fn scaled_to(&self, size: [u32; 2]) -> Self {
        let scale = |value: i32, axis: usize| {
            if self.size[axis] == 0 {
                value
            } else {
                (value as f64 * size[axis] as f64 / self.size[axis] as f64).round() as i32
            }
        };

        Self {
            url: self.url.clone(),
            size,
            anchor: [scale(self.anchor[0], 0), scale(self.anchor[1], 1)],
            popup_anchor: [scale(self.popup_anchor[0], 0), scale(self.popup_anchor[1], 1)],
        }
    }

    /// Anchor as a fraction of the icon size, `[0.5, 1.0]` for a pin whose tip is at the bottom
    /// center.
    pub fn anchor_fraction(&self) -> [f32; 2] {
        [
            self.anchor[0] as f32 / self.size[0] as f32,
            self.anchor[1] as f32 / self.size[1] as f32,
        ]
    }

    /// Checks that the icon has a non-zero size.
    pub fn validate(&self) -> Result<(), PinpointError> {
        if self.size.contains(&0) {
            return Err(PinpointError::MarkerIcon(format!(
                "size {:?} has a zero side",
                self.size
            )));
        }

        Ok(())
    }

    /// Returns true if the given pixel lies on the icon drawn for a marker at `marker_px`.
    pub fn hit(&self, marker_px: [f64; 2], px: [f64; 2]) -> bool {
        let left = marker_px[0] - self.anchor[0] as f64;
        let top = marker_px[1] - self.anchor[1] as f64;
        (left..=left + self.size[0] as f64).contains(&px[0])
            && (top..=top + self.size[1] as f64).contains(&px[1])
    }

    /// Pixel the popup is attached to for a marker at `marker_px`.
    pub fn popup_position(&self, marker_px: [f64; 2]) -> [f64; 2] {
        [
            marker_px[0] + self.popup_anchor[0] as f64,
            marker_px[1] + self.popup_anchor[1] as f64,
        ]
    }
}

/// Configuration of the search map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchMapConfig {
    /// View of the map when it is first shown.
    pub initial_view: ViewState,
    /// Zoom level the view is moved to after a search.
    pub search_zoom: u32,
    /// Whether the mouse wheel zooms the map.
    pub scroll_zoom: bool,
    /// Raster tile source.
    pub tile_source: TileSource,
    /// Marker icon.
    pub marker_icon: MarkerIcon,
}

impl Default for SearchMapConfig {
    fn default() -> Self {
        Self {
            initial_view: ViewState::new(DEFAULT_CENTER, DEFAULT_SEARCH_ZOOM),
            search_zoom: DEFAULT_SEARCH_ZOOM,
            scroll_zoom: false,
            tile_source: TileSource::default(),
            marker_icon: MarkerIcon::default(),
        }
    }
}

impl SearchMapConfig {
    /// Reads the configuration from JSON. Missing fields take default values.
    ///
    /// ```
    /// use pinpoint::SearchMapConfig;
    ///
    /// let config = SearchMapConfig::from_json(r#"{ "scroll_zoom": true }"#).unwrap();
    /// assert!(config.scroll_zoom);
    /// assert_eq!(config.search_zoom, 13);
    /// ```
    pub fn from_json(json: &str) -> Result<Self, PinpointError> {
        let config: Self = serde_json::from_str(json)?;
        config.tile_source.validate()?;
        config.marker_icon.validate()?;
        Ok(config)
    }

    /// Sets the initial view.
    pub fn with_initial_view(mut self, center: Coordinate, zoom: u32) -> Self {
        self.initial_view = ViewState::new(center, zoom);
        self
    }

    /// Sets the zoom level used after a search.
    pub fn with_search_zoom(mut self, zoom: u32) -> Self {
        self.search_zoom = zoom;
        self
    }

    /// Enables or disables mouse wheel zoom.
    pub fn with_scroll_zoom(mut self, enabled: bool) -> Self {
        self.scroll_zoom = enabled;
        self
    }

    /// Sets the tile source.
    pub fn with_tile_source(mut self, tile_source: TileSource) -> Self {
        self.tile_source = tile_source;
        self
    }

    /// Sets the marker icon.
    pub fn with_marker_icon(mut self, marker_icon: MarkerIcon) -> Self {
        self.marker_icon = marker_icon;
        self
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn defaults() {
        let config = SearchMapConfig::default();
        assert_eq!(config.initial_view.center, DEFAULT_CENTER);
        assert_eq!(config.initial_view.zoom, 13);
        assert_eq!(config.search_zoom, 13);
        assert!(!config.scroll_zoom);
        assert_eq!(config.marker_icon.size, [32, 32]);
        assert!(config.tile_source.validate().is_ok());
    }

    #[test]
    fn subdomains_rotate() {
        let source = TileSource::default();
        let hosts: Vec<_> = [(0, 0), (1, 0), (1, 1)]
            .into_iter()
            .map(|(x, y)| source.tile_url(3, x, y).unwrap())
            .collect();

        assert_eq!(
            hosts,
            vec![
                "https://a.tile.openstreetmap.org/3/0/0.png",
                "https://b.tile.openstreetmap.org/3/1/0.png",
                "https://c.tile.openstreetmap.org/3/1/1.png",
            ]
        );
    }

    #[test]
    fn template_without_subdomains() {
        let source = TileSource {
            url_template: "https://tile.openstreetmap.org/{z}/{x}/{y}.png".into(),
            subdomains: vec![],
            ..Default::default()
        };
        assert!(source.validate().is_ok());
        assert_eq!(
            source.tile_url(1, 1, 0).unwrap(),
            "https://tile.openstreetmap.org/1/1/0.png"
        );
    }

    #[test]
    fn template_missing_placeholder() {
        let source = TileSource {
            url_template: "https://tile.openstreetmap.org/{z}/{x}.png".into(),
            ..Default::default()
        };
        assert_matches!(source.validate(), Err(PinpointError::TileTemplate(_)));
    }

    #[test]
    fn template_with_unknown_placeholder() {
        let source = TileSource {
            url_template: "https://{host}/{z}/{x}/{y}.png".into(),
            ..Default::default()
        };
        assert_matches!(source.validate(), Err(PinpointError::TileTemplate(_)));
    }

    #[test]
    fn partial_json() {
        let config = SearchMapConfig::from_json(
            r#"{ "initial_view": { "center": { "lat": 1.5, "lng": 2.5 }, "zoom": 4 } }"#,
        )
        .unwrap();
        assert_eq!(config.initial_view.center, Coordinate::new(1.5, 2.5));
        assert_eq!(config.initial_view.zoom, 4);
        assert_eq!(config.tile_source, TileSource::default());
    }

    #[test]
    fn invalid_json() {
        assert_matches!(
            SearchMapConfig::from_json("{ scroll_zoom: }"),
            Err(PinpointError::Config(_))
        );
    }

    #[test]
    fn builder_setters() {
        let config = SearchMapConfig::default()
            .with_initial_view(Coordinate::new(0.0, 0.0), 2)
            .with_search_zoom(10)
            .with_scroll_zoom(true);
        assert_eq!(config.initial_view.zoom, 2);
        assert_eq!(config.search_zoom, 10);
        assert!(config.scroll_zoom);
    }

    #[test]
    fn icon_hit_box() {
        let icon = MarkerIcon::default();
        // The icon hangs above the marker point, centered horizontally.
        assert!(icon.hit([100.0, 100.0], [100.0, 90.0]));
        assert!(icon.hit([100.0, 100.0], [84.0, 68.0]));
        assert!(!icon.hit([100.0, 100.0], [100.0, 110.0]));
        assert!(!icon.hit([100.0, 100.0], [120.0, 90.0]));
        assert_eq!(icon.popup_position([100.0, 100.0]), [100.0, 68.0]);
        assert_eq!(icon.anchor_fraction(), [0.5, 1.0]);
    }

    #[test]
    fn circle_footprint_is_centered() {
        let icon = MarkerIcon::circle(16);
        assert!(icon.hit([100.0, 100.0], [100.0, 106.0]));
        assert!(icon.hit([100.0, 100.0], [100.0, 93.0]));
        assert!(!icon.hit([100.0, 100.0], [100.0, 80.0]));
        assert!(!icon.hit([100.0, 100.0], [100.0, 110.0]));
        assert_eq!(icon.popup_position([100.0, 100.0]), [100.0, 92.0]);
        assert_eq!(icon.anchor_fraction(), [0.5, 0.5]);
    }

    #[test]
    fn scaled_icon_keeps_relative_anchor() {
        let icon = MarkerIcon::default().scaled_to([64, 48]);
        assert_eq!(icon.size, [64, 48]);
        assert_eq!(icon.anchor, [32, 48]);
        assert_eq!(icon.popup_anchor, [0, -48]);
        assert_eq!(icon.anchor_fraction(), [0.5, 1.0]);
        assert_eq!(MarkerIcon::default().scaled_to([32, 32]), MarkerIcon::default());
    }

    #[test]
    fn zero_sized_icon_is_rejected() {
        assert_matches!(
            SearchMapConfig::from_json(r#"{ "marker_icon": { "size": [0, 32] } }"#),
            Err(PinpointError::MarkerIcon(_))
        );
    }
}
