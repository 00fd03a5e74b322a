//! [`MapWidget`] implementation on top of the Galileo egui widget.

use galileo::{Map, TileSchema};
use galileo_egui::EguiMapState;
use galileo_types::geo::GeoPoint;
use pinpoint::projection::{zoom_resolution, ScreenView};
use pinpoint::{Coordinate, MapWidget, MarkerIcon, MarkerSet};

use crate::layer::{to_geo_point, MarkerLayerHandle};

/// Galileo map shown in egui, together with the layer holding the markers.
pub struct GalileoMapWidget {
    state: EguiMapState,
    markers: MarkerLayerHandle,
    tile_schema: TileSchema,
}

impl GalileoMapWidget {
    /// Creates a new widget.
    ///
    /// `markers` must be the handle of a layer that was added to the map of `state`.
    pub fn new(state: EguiMapState, markers: MarkerLayerHandle, tile_schema: TileSchema) -> Self {
        Self {
            state,
            markers,
            tile_schema,
        }
    }

    /// The map.
    pub fn map(&self) -> &Map {
        self.state.map()
    }

    /// Draws the map into all the space available in `ui`.
    pub fn render(&mut self, ui: &mut egui::Ui) {
        self.state.render(ui);
    }

    /// Marker icon as it is drawn on the map.
    pub fn marker_icon(&self) -> &MarkerIcon {
        self.markers.icon()
    }

    /// Current view of the map in screen terms.
    pub fn screen_view(&self) -> Option<ScreenView> {
        screen_view(self.state.map())
    }
}

impl MapWidget for GalileoMapWidget {
    fn recenter(&mut self, center: Coordinate, zoom: u32) {
        recenter_map(self.state.map_mut(), center, zoom, &self.tile_schema);
    }

    fn recompute_layout(&mut self) {
        // The egui widget resizes its render target to the available space on every frame, so a
        // redraw is enough to pick up the final layout.
        self.state.request_redraw();
    }

    fn set_markers(&mut self, markers: &MarkerSet) {
        self.markers.sync(markers);
        self.state.map().redraw();
    }
}

/// Moves the view of the map to `center` at the resolution of the given z-level.
pub fn recenter_map(map: &mut Map, center: Coordinate, zoom: u32, tile_schema: &TileSchema) {
    let resolution = tile_schema
        .lod_resolution(zoom)
        .unwrap_or_else(|| zoom_resolution(zoom));
    let view = map
        .view()
        .with_position(&to_geo_point(center))
        .with_resolution(resolution);

    log::debug!("Moving map view to {center} at z-level {zoom}");
    map.set_view(view);
}

/// Center, resolution and size of the map view.
///
/// Returns `None` if the view position cannot be expressed in geographic coordinates.
pub fn screen_view(map: &Map) -> Option<ScreenView> {
    let view = map.view();
    let position = view.position()?;
    let size = view.size();

    Some(ScreenView {
        center: Coordinate::new(position.lat(), position.lon()),
        resolution: view.resolution(),
        size: [size.width(), size.height()],
    })
}
