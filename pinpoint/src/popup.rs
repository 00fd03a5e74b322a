//! Popups attached to markers.

use crate::config::MarkerIcon;
use crate::marker::{Marker, MarkerSet};
use crate::projection::ScreenView;

/// Which marker popup is open, if any.
///
/// A click on a marker icon toggles its popup, a click anywhere else on the map closes it. The
/// popup closes by itself when its marker is removed or moved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkerPopup {
    open: Option<Marker>,
}

impl MarkerPopup {
    /// Marker whose popup is open.
    pub fn open_marker(&self) -> Option<&Marker> {
        self.open.as_ref()
    }

    /// Handles a click on the map at the pixel `px` (relative to the map's top-left corner).
    pub fn click(
        &mut self,
        markers: &MarkerSet,
        view: &ScreenView,
        icon: &MarkerIcon,
        px: [f64; 2],
    ) {
        // The last marker is drawn on top, so it gets the click.
        let clicked = markers
            .iter()
            .rev()
            .find(|marker| {
                view.to_screen(marker.position)
                    .is_some_and(|marker_px| icon.hit(marker_px, px))
            })
            .copied();

        self.open = match (clicked, self.open) {
            (Some(clicked), Some(open)) if clicked == open => None,
            (clicked, _) => clicked,
        };
    }

    /// Closes the popup if its marker is no longer in the set.
    pub fn sync(&mut self, markers: &MarkerSet) {
        if let Some(open) = self.open {
            if markers.get(open.id) != Some(&open) {
                self.open = None;
            }
        }
    }

    /// Text of the open popup and the pixel it is attached to.
    pub fn placement(&self, view: &ScreenView, icon: &MarkerIcon) -> Option<(String, [f64; 2])> {
        let marker = self.open.as_ref()?;
        let marker_px = view.to_screen(marker.position)?;
        Some((marker.position.popup_text(), icon.popup_position(marker_px)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinate::Coordinate;
    use crate::marker::MarkerId;
    use crate::projection::zoom_resolution;

    const CENTER: Coordinate = Coordinate::new(13.811202, 100.504995);

    fn view() -> ScreenView {
        ScreenView {
            center: CENTER,
            resolution: zoom_resolution(13),
            size: [800.0, 600.0],
        }
    }

    fn markers_at(position: Coordinate) -> MarkerSet {
        let mut markers = MarkerSet::new();
        markers.replace(Marker::new(MarkerId::SEARCH, position));
        markers
    }

    #[test]
    fn click_on_icon_toggles_popup() {
        let markers = markers_at(CENTER);
        let icon = MarkerIcon::default();
        let mut popup = MarkerPopup::default();

        popup.click(&markers, &view(), &icon, [400.0, 290.0]);
        assert_eq!(popup.open_marker().map(|m| m.position), Some(CENTER));

        popup.click(&markers, &view(), &icon, [400.0, 290.0]);
        assert!(popup.open_marker().is_none());
    }

    #[test]
    fn click_elsewhere_closes_popup() {
        let markers = markers_at(CENTER);
        let icon = MarkerIcon::default();
        let mut popup = MarkerPopup::default();

        popup.click(&markers, &view(), &icon, [400.0, 290.0]);
        popup.click(&markers, &view(), &icon, [10.0, 10.0]);
        assert!(popup.open_marker().is_none());
    }

    #[test]
    fn closes_when_marker_is_cleared_or_replaced() {
        let icon = MarkerIcon::default();
        let mut markers = markers_at(CENTER);
        let mut popup = MarkerPopup::default();
        popup.click(&markers, &view(), &icon, [400.0, 290.0]);

        popup.sync(&markers);
        assert!(popup.open_marker().is_some());

        markers.replace(Marker::new(MarkerId::SEARCH, Coordinate::new(1.0, 2.0)));
        popup.sync(&markers);
        assert!(popup.open_marker().is_none());

        let mut markers = markers_at(CENTER);
        popup.click(&markers, &view(), &icon, [400.0, 290.0]);
        markers.clear();
        popup.sync(&markers);
        assert!(popup.open_marker().is_none());
    }

    #[test]
    fn placement_above_the_icon() {
        let markers = markers_at(CENTER);
        let icon = MarkerIcon::default();
        let mut popup = MarkerPopup::default();
        assert!(popup.placement(&view(), &icon).is_none());

        popup.click(&markers, &view(), &icon, [400.0, 290.0]);
        let (text, px) = popup.placement(&view(), &icon).unwrap();
        assert_eq!(text, "Marker Position: [13.811202, 100.504995]");
        approx::assert_abs_diff_eq!(px[0], 400.0, epsilon = 1e-6);
        approx::assert_abs_diff_eq!(px[1], 268.0, epsilon = 1e-6);
    }
}
