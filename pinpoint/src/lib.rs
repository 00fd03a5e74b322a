//! Pinpoint places a single marker on a map at a latitude/longitude typed by the user.
//!
//! The crate holds the state of a coordinate search map and nothing else. Rendering, tiling and
//! pan/zoom interaction belong to the map widget, which is driven through the [`MapWidget`]
//! trait. The `pinpoint-egui` crate implements it on top of the Galileo map engine.
//!
//! ```
//! use pinpoint::{Coordinate, CoordinateInput, MapWidget, MarkerSet, MarkerSlot, SearchMap};
//!
//! #[derive(Default)]
//! struct Widget {
//!     center: Option<(Coordinate, u32)>,
//! }
//!
//! impl MapWidget for Widget {
//!     fn recenter(&mut self, center: Coordinate, zoom: u32) {
//!         self.center = Some((center, zoom));
//!     }
//!     fn recompute_layout(&mut self) {}
//!     fn set_markers(&mut self, _markers: &MarkerSet) {}
//! }
//!
//! let mut map = SearchMap::new(CoordinateInput::new("13.811202", "100.504995"));
//! map.attach(Widget::default()).unwrap();
//!
//! map.search().unwrap();
//! assert_eq!(map.slot(), MarkerSlot::Placed(Coordinate::new(13.811202, 100.504995)));
//! assert_eq!(map.widget().unwrap().center, Some((Coordinate::new(13.811202, 100.504995), 13)));
//!
//! map.clear();
//! assert_eq!(map.slot(), MarkerSlot::Empty);
//! ```

#![warn(clippy::unwrap_used)]
#![warn(missing_docs)]

pub mod config;
mod coordinate;
pub mod error;
mod input;
pub mod marker;
mod panel;
pub mod popup;
pub mod projection;
mod search_map;
pub mod view;

pub use config::{MarkerIcon, SearchMapConfig, TileSource};
pub use coordinate::Coordinate;
pub use error::{CoordinateError, PinpointError};
pub use input::CoordinateInput;
pub use marker::{Marker, MarkerId, MarkerSet, MarkerSlot};
pub use panel::SearchPanel;
pub use popup::MarkerPopup;
pub use search_map::{SearchMap, DEFAULT_SEARCH_ZOOM};
pub use view::{MapWidget, ViewBinding, ViewState};
