use serde::{Deserialize, Serialize};

use crate::coordinate::Coordinate;
use crate::error::CoordinateError;

/// Text entered into the latitude and longitude fields.
///
/// Buffers accept any text; nothing is validated until [`CoordinateInput::parse`] is called.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoordinateInput {
    /// Latitude field content.
    pub lat: String,
    /// Longitude field content.
    pub lng: String,
}

impl CoordinateInput {
    /// Creates input buffers with the given content.
    pub fn new(lat: impl Into<String>, lng: impl Into<String>) -> Self {
        Self {
            lat: lat.into(),
            lng: lng.into(),
        }
    }

    /// Creates input buffers pre-filled with the given coordinate.
    pub fn from_coordinate(coordinate: Coordinate) -> Self {
        Self::new(coordinate.lat.to_string(), coordinate.lng.to_string())
    }

    /// Parses both buffers.
    pub fn parse(&self) -> Result<Coordinate, CoordinateError> {
        Coordinate::parse(&self.lat, &self.lng)
    }
}
