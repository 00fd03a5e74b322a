//! State behind the search panel UI.

use crate::config::MarkerIcon;
use crate::coordinate::Coordinate;
use crate::error::{CoordinateError, PinpointError};
use crate::input::CoordinateInput;
use crate::popup::MarkerPopup;
use crate::projection::ScreenView;
use crate::search_map::SearchMap;
use crate::view::MapWidget;

/// Everything the search panel shows besides the map itself: the search map, the marker popup
/// and the error of the last search.
///
/// The UI forwards button presses and map clicks here and renders what it reads back.
#[derive(Debug)]
pub struct SearchPanel<W> {
    search_map: SearchMap<W>,
    popup: MarkerPopup,
    last_error: Option<CoordinateError>,
}

impl<W: MapWidget> SearchPanel<W> {
    /// Creates a panel around the search map.
    pub fn new(search_map: SearchMap<W>) -> Self {
        Self {
            search_map,
            popup: MarkerPopup::default(),
            last_error: None,
        }
    }

    /// The search map.
    pub fn search_map(&self) -> &SearchMap<W> {
        &self.search_map
    }

    /// Input buffers.
    pub fn input(&self) -> &CoordinateInput {
        self.search_map.input()
    }

    /// Input buffers.
    pub fn input_mut(&mut self) -> &mut CoordinateInput {
        self.search_map.input_mut()
    }

    /// Attaches the map widget.
    pub fn attach(&mut self, widget: W) -> Result<(), PinpointError> {
        self.search_map.attach(widget)
    }

    /// Map widget, if it is attached.
    pub fn widget(&self) -> Option<&W> {
        self.search_map.widget()
    }

    /// Map widget, if it is attached.
    pub fn widget_mut(&mut self) -> Option<&mut W> {
        self.search_map.widget_mut()
    }

    /// Error of the last search, shown until the next successful search or clear.
    pub fn last_error(&self) -> Option<&CoordinateError> {
        self.last_error.as_ref()
    }

    /// Marker popup.
    pub fn popup(&self) -> &MarkerPopup {
        &self.popup
    }

    /// Runs a search with the current input.
    pub fn search(&mut self) -> Option<Coordinate> {
        let result = self.search_map.search();
        self.popup.sync(self.search_map.markers());

        match result {
            Ok(coordinate) => {
                self.last_error = None;
                Some(coordinate)
            }
            Err(err) => {
                self.last_error = Some(err);
                None
            }
        }
    }

    /// Removes the marker and the error hint.
    pub fn clear(&mut self) {
        self.search_map.clear();
        self.last_error = None;
        self.popup.sync(self.search_map.markers());
    }

    /// Handles a click on the map at `px`, relative to the map's top-left corner.
    pub fn click(&mut self, view: &ScreenView, icon: &MarkerIcon, px: [f64; 2]) {
        self.popup
            .click(self.search_map.markers(), view, icon, px);
    }

    /// Text of the open popup and the pixel it is attached to.
    pub fn popup_placement(
        &self,
        view: &ScreenView,
        icon: &MarkerIcon,
    ) -> Option<(String, [f64; 2])> {
        self.popup.placement(view, icon)
    }
}
