//! Feature layer that renders pinpoint markers on a Galileo map.

use std::sync::Arc;

use galileo::decoded_image::DecodedImage;
use galileo::error::GalileoError;
use galileo::layer::{FeatureId, FeatureLayer};
use galileo::render::render_bundle::RenderBundle;
use galileo::symbol::{CirclePointSymbol, ImagePointSymbol, Symbol};
use galileo::Color;
use galileo_types::cartesian::{Point3, Vector2};
use galileo_types::geo::impls::GeoPoint2d;
use galileo_types::geo::{Crs, NewGeoPoint};
use galileo_types::geometry::Geom;
use galileo_types::geometry_type::GeoSpace2d;
use parking_lot::RwLock;
use pinpoint::{Coordinate, MarkerIcon, MarkerSet};

/// Galileo layer type used for markers.
pub type MarkerLayer = FeatureLayer<GeoPoint2d, GeoPoint2d, MarkerSymbol, GeoSpace2d>;

const MARKER_COLOR: Color = Color::rgba(37, 99, 235, 255);

/// Pin image used when the configured icon cannot be loaded. Matches the default 32x32 icon.
const BUNDLED_MARKER: &[u8] = include_bytes!("../assets/marker.png");

/// Symbol drawn for every marker.
pub enum MarkerSymbol {
    /// Icon image, scaled to the icon width.
    Image(ImagePointSymbol),
    /// Plain circle, used only if no icon image could be decoded.
    Circle(CirclePointSymbol),
}

impl<F> Symbol<F> for MarkerSymbol {
    fn render(
        &self,
        feature: &F,
        geometry: &Geom<Point3>,
        min_resolution: f64,
        bundle: &mut RenderBundle,
    ) {
        match self {
            MarkerSymbol::Image(symbol) => symbol.render(feature, geometry, min_resolution, bundle),
            MarkerSymbol::Circle(symbol) => {
                symbol.render(feature, geometry, min_resolution, bundle)
            }
        }
    }
}

impl MarkerSymbol {
    /// Loads the symbol for the icon.
    ///
    /// Returns the symbol together with the footprint it is drawn with, which is what clicks
    /// must be tested against.
    pub fn load(icon: &MarkerIcon) -> (Self, MarkerIcon) {
        if let Some(bytes) = read_icon(&icon.url) {
            match Self::image(&bytes, icon) {
                Ok(loaded) => return loaded,
                Err(err) => log::warn!("Cannot decode marker icon '{}': {err}", icon.url),
            }
        }

        match Self::image(BUNDLED_MARKER, icon) {
            Ok(loaded) => loaded,
            Err(err) => {
                log::warn!("Cannot decode bundled marker icon, drawing circles: {err}");
                Self::circle(icon)
            }
        }
    }

    /// Image symbol from encoded image bytes, scaled so that its width matches the icon.
    pub fn image(bytes: &[u8], icon: &MarkerIcon) -> Result<(Self, MarkerIcon), GalileoError> {
        icon.validate()
            .map_err(|err| GalileoError::Generic(err.to_string()))?;

        let decoded = DecodedImage::decode(bytes)?;
        let scale = icon.size[0] as f32 / decoded.width() as f32;
        let drawn_size = [
            icon.size[0],
            (decoded.height() as f32 * scale).round() as u32,
        ];
        if drawn_size != icon.size {
            log::debug!(
                "Marker image is {}x{}, drawn as {drawn_size:?}",
                decoded.width(),
                decoded.height()
            );
        }

        let [x, y] = icon.anchor_fraction();
        let symbol = ImagePointSymbol::from_bytes(bytes, Vector2::new(x, y), scale)?;

        Ok((Self::Image(symbol), icon.scaled_to(drawn_size)))
    }

    /// Circle with the diameter of the smaller icon side, centered on the marker point.
    pub fn circle(icon: &MarkerIcon) -> (Self, MarkerIcon) {
        let diameter = icon.size[0].min(icon.size[1]);
        (
            Self::Circle(CirclePointSymbol::new(MARKER_COLOR, diameter as f64)),
            MarkerIcon::circle(diameter),
        )
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn read_icon(path: &str) -> Option<Vec<u8>> {
    match std::fs::read(path) {
        Ok(bytes) => Some(bytes),
        Err(err) => {
            log::debug!("Marker icon '{path}' not read ({err}), using the bundled one");
            None
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn read_icon(_path: &str) -> Option<Vec<u8>> {
    None
}

/// Shared handle to the marker layer.
///
/// One copy of the layer is owned by the map, the handle keeps the other one to update the
/// features when the marker set changes.
pub struct MarkerLayerHandle {
    layer: Arc<RwLock<MarkerLayer>>,
    feature_ids: Vec<FeatureId>,
    footprint: MarkerIcon,
}

impl MarkerLayerHandle {
    /// Creates an empty marker layer drawing the given icon.
    pub fn new(icon: &MarkerIcon) -> Self {
        let (symbol, footprint) = MarkerSymbol::load(icon);
        Self::with_symbol(symbol, footprint)
    }

    /// Creates an empty marker layer with an already loaded symbol.
    pub fn with_symbol(symbol: MarkerSymbol, footprint: MarkerIcon) -> Self {
        let layer = FeatureLayer::new(vec![], symbol, Crs::WGS84);

        Self {
            layer: Arc::new(RwLock::new(layer)),
            feature_ids: Vec::new(),
            footprint,
        }
    }

    /// The layer to add to the map.
    pub fn layer(&self) -> Arc<RwLock<MarkerLayer>> {
        self.layer.clone()
    }

    /// Icon geometry as drawn on the map.
    pub fn icon(&self) -> &MarkerIcon {
        &self.footprint
    }

    /// Number of features currently in the layer.
    pub fn feature_count(&self) -> usize {
        self.feature_ids.len()
    }

    /// Replaces the features of the layer with the given markers.
    pub fn sync(&mut self, markers: &MarkerSet) {
        let mut layer = self.layer.write();

        for id in self.feature_ids.drain(..) {
            layer.features_mut().remove(id);
            layer.update_feature(id);
        }

        for marker in markers {
            let id = layer.features_mut().add(to_geo_point(marker.position));
            layer.update_feature(id);
            self.feature_ids.push(id);
        }

        log::trace!("Marker layer synced, {} features", self.feature_ids.len());
    }
}

pub(crate) fn to_geo_point(coordinate: Coordinate) -> GeoPoint2d {
    GeoPoint2d::latlon(coordinate.lat, coordinate.lng)
}
