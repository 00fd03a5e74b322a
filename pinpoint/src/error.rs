//! Error types used by the crate.

use std::fmt::{Display, Formatter};

use thiserror::Error;

/// One of the two components of a coordinate pair.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Axis {
    /// Latitude (north/south).
    Latitude,
    /// Longitude (east/west).
    Longitude,
}

impl Display for Axis {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Latitude => write!(f, "latitude"),
            Axis::Longitude => write!(f, "longitude"),
        }
    }
}

/// Reason why a text buffer could not be turned into a coordinate component.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoordinateError {
    /// Nothing but whitespace was entered.
    #[error("{axis} is empty")]
    Empty {
        /// Offending axis.
        axis: Axis,
    },
    /// The text is not a number.
    #[error("{axis} '{value}' is not a number")]
    NotANumber {
        /// Offending axis.
        axis: Axis,
        /// Text as entered by the user.
        value: String,
    },
    /// The text is a number, but not a finite one (`NaN`, `inf`).
    #[error("{axis} must be a finite number")]
    NotFinite {
        /// Offending axis.
        axis: Axis,
    },
}

/// Pinpoint error type.
#[derive(Debug, Error)]
pub enum PinpointError {
    /// A map widget was already attached to the view binding.
    #[error("map widget is already attached")]
    AlreadyAttached,
    /// Configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
    /// Configuration file could not be read.
    #[error("failed to read configuration file")]
    ConfigFile(#[from] std::io::Error),
    /// Tile URL template could not be expanded.
    #[error("invalid tile url template: {0}")]
    TileTemplate(String),
    /// Marker icon geometry is unusable.
    #[error("invalid marker icon: {0}")]
    MarkerIcon(String),
    /// The map engine failed to construct the map or one of its layers.
    #[error("failed to create map: {0}")]
    Map(String),
    /// The UI could not be started.
    #[error("failed to start the UI: {0}")]
    Ui(String),
}

impl From<strfmt::FmtError> for PinpointError {
    fn from(value: strfmt::FmtError) -> Self {
        Self::TileTemplate(value.to_string())
    }
}
