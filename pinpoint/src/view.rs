//! Binding between the search map and the externally owned map widget.

use serde::{Deserialize, Serialize};

use crate::coordinate::Coordinate;
use crate::error::PinpointError;
use crate::marker::MarkerSet;

/// Center and zoom level of the map view.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    /// Center of the view.
    pub center: Coordinate,
    /// Zoom level (index of the level of detail in the web tile schema).
    pub zoom: u32,
}

impl ViewState {
    /// Creates a new view state.
    pub fn new(center: Coordinate, zoom: u32) -> Self {
        Self { center, zoom }
    }
}

/// Map widget driven by the search map.
///
/// The widget renders tiles and markers on its own. The search map only pushes the marker list
/// whenever it changes and asks the widget to move its view after a search.
pub trait MapWidget {
    /// Moves the view of the map to the given center and zoom level.
    fn recenter(&mut self, center: Coordinate, zoom: u32);
    /// Makes the widget recompute its size from the layout it is placed in.
    fn recompute_layout(&mut self);
    /// Replaces the set of markers rendered by the widget.
    fn set_markers(&mut self, markers: &MarkerSet);
}

impl<T: MapWidget + ?Sized> MapWidget for Box<T> {
    fn recenter(&mut self, center: Coordinate, zoom: u32) {
        (**self).recenter(center, zoom)
    }

    fn recompute_layout(&mut self) {
        (**self).recompute_layout()
    }

    fn set_markers(&mut self, markers: &MarkerSet) {
        (**self).set_markers(markers)
    }
}

/// Handle to a map widget that becomes available only after the widget is constructed.
///
/// The handle is assigned once. Attaching issues a single layout correction, because the widget
/// may have been created before its container reached the final size.
#[derive(Debug)]
pub struct ViewBinding<W> {
    widget: Option<W>,
}

impl<W> Default for ViewBinding<W> {
    fn default() -> Self {
        Self { widget: None }
    }
}

impl<W: MapWidget> ViewBinding<W> {
    /// Creates a binding without a widget.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches the widget and synchronizes it with the current markers.
    ///
    /// Returns the rejected widget back inside the error tuple if a widget was already attached.
    pub fn attach(&mut self, mut widget: W, markers: &MarkerSet) -> Result<(), (PinpointError, W)> {
        if self.widget.is_some() {
            return Err((PinpointError::AlreadyAttached, widget));
        }

        log::debug!("Map widget attached");
        widget.recompute_layout();
        widget.set_markers(markers);
        self.widget = Some(widget);

        Ok(())
    }

    /// Returns true if a widget is attached.
    pub fn is_attached(&self) -> bool {
        self.widget.is_some()
    }

    /// Attached widget.
    pub fn get(&self) -> Option<&W> {
        self.widget.as_ref()
    }

    /// Attached widget.
    pub fn get_mut(&mut self) -> Option<&mut W> {
        self.widget.as_mut()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::marker::{Marker, MarkerId};

    /// Calls received by [`RecordingWidget`].
    #[derive(Debug, Clone, PartialEq)]
    pub(crate) enum WidgetCall {
        Recenter(Coordinate, u32),
        RecomputeLayout,
        SetMarkers(Vec<Marker>),
    }

    #[derive(Debug, Default)]
    pub(crate) struct RecordingWidget {
        pub calls: Vec<WidgetCall>,
    }

    impl MapWidget for RecordingWidget {
        fn recenter(&mut self, center: Coordinate, zoom: u32) {
            self.calls.push(WidgetCall::Recenter(center, zoom));
        }

        fn recompute_layout(&mut self) {
            self.calls.push(WidgetCall::RecomputeLayout);
        }

        fn set_markers(&mut self, markers: &MarkerSet) {
            self.calls
                .push(WidgetCall::SetMarkers(markers.iter().copied().collect()));
        }
    }

    #[test]
    fn unattached_binding() {
        let binding = ViewBinding::<RecordingWidget>::new();
        assert!(!binding.is_attached());
        assert!(binding.get().is_none());
    }

    #[test]
    fn attach_corrects_layout_once() {
        let mut markers = MarkerSet::new();
        markers.replace(Marker::new(MarkerId::SEARCH, Coordinate::new(1.0, 2.0)));

        let mut binding = ViewBinding::new();
        binding
            .attach(RecordingWidget::default(), &markers)
            .unwrap();

        let widget = binding.get().unwrap();
        assert_eq!(
            widget.calls,
            vec![
                WidgetCall::RecomputeLayout,
                WidgetCall::SetMarkers(markers.iter().copied().collect()),
            ]
        );
    }

    #[test]
    fn second_attach_is_rejected() {
        let markers = MarkerSet::new();
        let mut binding = ViewBinding::new();
        binding
            .attach(RecordingWidget::default(), &markers)
            .unwrap();

        let second = RecordingWidget {
            calls: vec![WidgetCall::RecomputeLayout],
        };
        let result = binding.attach(second, &markers);
        assert_matches!(
            result,
            Err((PinpointError::AlreadyAttached, rejected)) if rejected.calls.len() == 1
        );

        let layout_calls = binding
            .get()
            .unwrap()
            .calls
            .iter()
            .filter(|call| **call == WidgetCall::RecomputeLayout)
            .count();
        assert_eq!(layout_calls, 1);
    }
}
