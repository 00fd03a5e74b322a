use galileo::control::UserEventHandler;
use galileo::layer::raster_tile_layer::RasterTileLayerBuilder;
use galileo::tile_schema::TileIndex;
use galileo::{Map, MapBuilder, TileSchema};
use pinpoint::{PinpointError, SearchMapConfig};

use crate::app::SearchMapApp;
use crate::handlers::ScrollZoomLock;
use crate::layer::MarkerLayerHandle;
use crate::widget::GalileoMapWidget;

const TILE_CACHE_DIR: &str = ".tile_cache";

/// Map with the pieces the search map needs to drive it.
pub struct MapParts {
    /// The map with a tile layer and the marker layer.
    pub map: Map,
    /// Handle to the marker layer of the map.
    pub markers: MarkerLayerHandle,
    /// Tile schema of the base layer.
    pub tile_schema: TileSchema,
}

/// Creates the map described by the configuration: tile layer at the bottom, markers on top,
/// view at the initial center and zoom.
pub fn create_map(config: &SearchMapConfig) -> Result<MapParts, PinpointError> {
    config.tile_source.validate()?;
    config.marker_icon.validate()?;

    let tile_schema = TileSchema::web(config.tile_source.max_zoom + 1);
    let tile_source = config.tile_source.clone();
    let tile_layer = RasterTileLayerBuilder::new_rest(move |index: &TileIndex| {
        tile_source
            .tile_url(index.z, index.x as i64, index.y as i64)
            .unwrap_or_else(|err| {
                log::warn!("Cannot build url for tile {index:?}: {err}");
                String::new()
            })
    })
    .with_tile_schema(tile_schema.clone())
    .with_attribution(
        config.tile_source.attribution.clone(),
        config.tile_source.attribution_url.clone(),
    )
    .with_file_cache_checked(TILE_CACHE_DIR)
    .build()
    .map_err(|err| PinpointError::Map(err.to_string()))?;

    let markers = MarkerLayerHandle::new(&config.marker_icon);

    let center = config.initial_view.center;
    let map = MapBuilder::default()
        .with_latlon(center.lat, center.lng)
        .with_z_level(config.initial_view.zoom)
        .with_layer(tile_layer)
        .with_layer(markers.layer())
        .build();

    Ok(MapParts {
        map,
        markers,
        tile_schema,
    })
}

fn event_handlers(config: &SearchMapConfig) -> Vec<Box<dyn UserEventHandler>> {
    let mut handlers: Vec<Box<dyn UserEventHandler>> = Vec::new();
    if !config.scroll_zoom {
        handlers.push(Box::new(ScrollZoomLock));
    }

    handlers
}

/// Opens the search map. On native platforms this blocks until the window is closed.
pub fn run(config: SearchMapConfig) -> Result<(), PinpointError> {
    let MapParts {
        map,
        markers,
        tile_schema,
    } = create_map(&config)?;

    let builder = galileo_egui::InitBuilder::new(map).with_handlers(event_handlers(&config));

    #[cfg(not(target_arch = "wasm32"))]
    let builder = builder.with_native_options(eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_title("Search Map"),
        ..Default::default()
    });

    builder
        .with_app_builder(move |egui_map_state| {
            let widget = GalileoMapWidget::new(egui_map_state, markers, tile_schema);
            Box::new(SearchMapApp::new(widget, config))
        })
        .init()
        .map_err(|err| PinpointError::Ui(err.to_string()))
}
