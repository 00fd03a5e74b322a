//! Coordinate search map application built on [`pinpoint`], egui and the Galileo map engine.
//!
//! ```no_run
//! use pinpoint::SearchMapConfig;
//!
//! pinpoint_egui::run(SearchMapConfig::default()).expect("failed to start the search map");
//! ```

mod app;
mod handlers;
mod init;
mod layer;
mod widget;

pub use app::SearchMapApp;
pub use handlers::ScrollZoomLock;
pub use init::{create_map, run, MapParts};
pub use layer::{MarkerLayer, MarkerLayerHandle, MarkerSymbol};
pub use widget::{recenter_map, screen_view, GalileoMapWidget};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Entry point of the browser build.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn main() {
    console_error_panic_hook::set_once();

    if let Err(err) = run(pinpoint::SearchMapConfig::default()) {
        log::error!("{err}");
    }
}
