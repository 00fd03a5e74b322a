//! Markers placed on the map and the collection that holds them.

use serde::{Deserialize, Serialize};

use crate::coordinate::Coordinate;

/// Identifier of a marker.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MarkerId(pub u32);

impl MarkerId {
    /// Id given to the marker created by a coordinate search. Every search reuses it, so a new
    /// search replaces the previous marker.
    pub const SEARCH: MarkerId = MarkerId(1);
}

/// A labeled point rendered on the map.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    /// Marker identifier.
    pub id: MarkerId,
    /// Location of the marker.
    pub position: Coordinate,
}

impl Marker {
    /// Creates a new marker.
    pub fn new(id: MarkerId, position: Coordinate) -> Self {
        Self { id, position }
    }
}

/// State of the single marker slot of the search map.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum MarkerSlot {
    /// No marker is shown.
    Empty,
    /// A marker is shown at the given position.
    Placed(Coordinate),
}

/// Ordered set of markers shown on the map.
///
/// The container is shaped as a list, but [`MarkerSet::replace`] is the only way to add a marker
/// and it drops everything that was there before.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkerSet {
    markers: Vec<Marker>,
}

impl MarkerSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole content of the set with the given marker.
    pub fn replace(&mut self, marker: Marker) {
        self.markers.clear();
        self.markers.push(marker);
    }

    /// Removes all markers.
    pub fn clear(&mut self) {
        self.markers.clear();
    }

    /// Number of markers in the set.
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    /// Returns true if there are no markers.
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Iterates over the markers.
    pub fn iter(&self) -> std::slice::Iter<'_, Marker> {
        self.markers.iter()
    }

    /// Returns the marker with the given id.
    pub fn get(&self, id: MarkerId) -> Option<&Marker> {
        self.markers.iter().find(|marker| marker.id == id)
    }

    /// Current state of the marker slot.
    pub fn slot(&self) -> MarkerSlot {
        match self.markers.first() {
            Some(marker) => MarkerSlot::Placed(marker.position),
            None => MarkerSlot::Empty,
        }
    }
}

impl<'a> IntoIterator for &'a MarkerSet {
    type Item = &'a Marker;
    type IntoIter = std::slice::Iter<'a, Marker>;

    fn into_iter(self) -> Self::IntoIter {
        self.markers.iter()
    }
}
