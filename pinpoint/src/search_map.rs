use crate::coordinate::Coordinate;
use crate::error::{CoordinateError, PinpointError};
use crate::input::CoordinateInput;
use crate::marker::{Marker, MarkerId, MarkerSet, MarkerSlot};
use crate::view::{MapWidget, ViewBinding};

/// Zoom level the view is moved to after a successful search.
pub const DEFAULT_SEARCH_ZOOM: u32 = 13;

/// State of the coordinate search map: input buffers, markers and the map widget binding.
///
/// All state changes happen synchronously inside [`SearchMap::search`] and [`SearchMap::clear`].
/// Every change of the markers is pushed to the widget right away, so the widget always renders
/// the current marker set.
#[derive(Debug)]
pub struct SearchMap<W> {
    input: CoordinateInput,
    markers: MarkerSet,
    binding: ViewBinding<W>,
    search_zoom: u32,
}

impl<W: MapWidget> SearchMap<W> {
    /// Creates a search map with the given initial input and no markers.
    pub fn new(input: CoordinateInput) -> Self {
        Self {
            input,
            markers: MarkerSet::new(),
            binding: ViewBinding::new(),
            search_zoom: DEFAULT_SEARCH_ZOOM,
        }
    }

    /// Sets the zoom level used to show the search result.
    pub fn with_search_zoom(mut self, zoom: u32) -> Self {
        self.search_zoom = zoom;
        self
    }

    /// Input buffers.
    pub fn input(&self) -> &CoordinateInput {
        &self.input
    }

    /// Input buffers. Can be edited freely, nothing is validated until the next search.
    pub fn input_mut(&mut self) -> &mut CoordinateInput {
        &mut self.input
    }

    /// Markers currently on the map.
    pub fn markers(&self) -> &MarkerSet {
        &self.markers
    }

    /// State of the marker slot.
    pub fn slot(&self) -> MarkerSlot {
        self.markers.slot()
    }

    /// Zoom level used to show the search result.
    pub fn search_zoom(&self) -> u32 {
        self.search_zoom
    }

    /// Attaches the map widget once it is constructed.
    pub fn attach(&mut self, widget: W) -> Result<(), PinpointError> {
        self.binding
            .attach(widget, &self.markers)
            .map_err(|(err, _)| err)
    }

    /// Map widget, if it is attached.
    pub fn widget(&self) -> Option<&W> {
        self.binding.get()
    }

    /// Map widget, if it is attached.
    pub fn widget_mut(&mut self) -> Option<&mut W> {
        self.binding.get_mut()
    }

    /// Places the marker at the coordinate in the input buffers and moves the view to it.
    ///
    /// If the input is not a valid coordinate, nothing changes and the parse error is returned.
    pub fn search(&mut self) -> Result<Coordinate, CoordinateError> {
        let coordinate = match self.input.parse() {
            Ok(v) => v,
            Err(err) => {
                log::debug!("Search ignored: {err}");
                return Err(err);
            }
        };

        self.markers
            .replace(Marker::new(MarkerId::SEARCH, coordinate));

        if let Some(widget) = self.binding.get_mut() {
            widget.set_markers(&self.markers);
            widget.recenter(coordinate, self.search_zoom);
        }

        log::debug!("Marker placed at {coordinate}");
        Ok(coordinate)
    }

    /// Removes all markers. The view is left where it is.
    pub fn clear(&mut self) {
        self.markers.clear();
        if let Some(widget) = self.binding.get_mut() {
            widget.set_markers(&self.markers);
        }
    }
}
