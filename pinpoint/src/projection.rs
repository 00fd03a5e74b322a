//! Web Mercator math used to place overlays (popups) over the map.
//!
//! The map engine does its own projection. These helpers reproduce the same spherical Web
//! Mercator (EPSG:3857) so that UI elements drawn on top of the map line up with the features the
//! engine renders.

use crate::coordinate::Coordinate;

/// Semimajor axis of the WGS84 ellipsoid in meters.
pub const EARTH_RADIUS: f64 = 6_378_137.0;

/// Resolution (meters per pixel) of z-level 0 of the standard 256px web tile schema.
pub const TOP_RESOLUTION: f64 = 156_543.033_928_000_14;

/// Resolution of the given z-level of the standard web tile schema.
pub fn zoom_resolution(zoom: u32) -> f64 {
    TOP_RESOLUTION / 2f64.powi(zoom as i32)
}

/// Projects a coordinate into Web Mercator meters.
///
/// Returns `None` if the result is not finite.
pub fn project(coordinate: Coordinate) -> Option<[f64; 2]> {
    let x = EARTH_RADIUS * coordinate.lng.to_radians();
    let y = EARTH_RADIUS
        * (std::f64::consts::FRAC_PI_4 + coordinate.lat.to_radians() / 2.0)
            .tan()
            .ln();

    if x.is_finite() && y.is_finite() {
        Some([x, y])
    } else {
        None
    }
}

/// Inverse of [`project`].
pub fn unproject(point: [f64; 2]) -> Coordinate {
    let lat = std::f64::consts::FRAC_PI_2 - 2.0 * (-point[1] / EARTH_RADIUS).exp().atan();
    let lng = point[0] / EARTH_RADIUS;
    Coordinate::new(lat.to_degrees(), lng.to_degrees())
}

/// Screen parameters of a map view, enough to convert between coordinates and pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ScreenView {
    /// Coordinate shown in the center of the view.
    pub center: Coordinate,
    /// Meters per pixel.
    pub resolution: f64,
    /// View size in pixels, `[width, height]`.
    pub size: [f64; 2],
}

impl ScreenView {
    /// Pixel position of the coordinate relative to the top-left corner of the view.
    ///
    /// The position may lie outside of the view.
    pub fn to_screen(&self, coordinate: Coordinate) -> Option<[f64; 2]> {
        let [cx, cy] = project(self.center)?;
        let [x, y] = project(coordinate)?;

        Some([
            (x - cx) / self.resolution + self.size[0] / 2.0,
            (cy - y) / self.resolution + self.size[1] / 2.0,
        ])
    }

    /// Coordinate displayed at the given pixel.
    pub fn to_coordinate(&self, px: [f64; 2]) -> Option<Coordinate> {
        let [cx, cy] = project(self.center)?;
        let x = cx + (px[0] - self.size[0] / 2.0) * self.resolution;
        let y = cy - (px[1] - self.size[1] / 2.0) * self.resolution;
        Some(unproject([x, y]))
    }

    /// Returns true if the pixel is inside the view.
    pub fn contains(&self, px: [f64; 2]) -> bool {
        (0.0..=self.size[0]).contains(&px[0]) && (0.0..=self.size[1]).contains(&px[1])
    }
}
