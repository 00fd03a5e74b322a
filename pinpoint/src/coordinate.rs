use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::error::{Axis, CoordinateError};

/// A point on the Earth's surface given as latitude and longitude in degrees.
///
/// Values are not range-checked: anything finite is accepted, as the map engine wraps or clamps
/// out-of-range positions itself.
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

impl Coordinate {
    /// Creates a new coordinate.
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Parses a coordinate from two text buffers.
    ///
    /// Each buffer is read up to the end of its leading number, so `"13abc"` reads as 13 and
    /// `"100.5 east"` as 100.5. Leading whitespace is ignored. Latitude is checked first, so when
    /// both buffers are invalid the latitude error is reported.
    ///
    /// ```
    /// use pinpoint::Coordinate;
    ///
    /// let coordinate = Coordinate::parse(" 13.811202", "100.504995").unwrap();
    /// assert_eq!(coordinate, Coordinate::new(13.811202, 100.504995));
    /// assert_eq!(Coordinate::parse("13abc", "1e2x").unwrap(), Coordinate::new(13.0, 100.0));
    /// assert!(Coordinate::parse("abc", "100").is_err());
    /// ```
    pub fn parse(lat: &str, lng: &str) -> Result<Self, CoordinateError> {
        Ok(Self {
            lat: parse_component(lat, Axis::Latitude)?,
            lng: parse_component(lng, Axis::Longitude)?,
        })
    }

    /// Text shown in the popup attached to a marker at this coordinate.
    pub fn popup_text(&self) -> String {
        format!("Marker Position: {self}")
    }
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.lat, self.lng)
    }
}

fn parse_component(value: &str, axis: Axis) -> Result<f64, CoordinateError> {
    if value.trim().is_empty() {
        return Err(CoordinateError::Empty { axis });
    }

    let trimmed = value.trim_start();
    let unsigned = trimmed.trim_start_matches(['+', '-']);
    if trimmed.len() - unsigned.len() <= 1 && unsigned.starts_with("Infinity") {
        return Err(CoordinateError::NotFinite { axis });
    }

    let parsed: f64 = numeric_prefix(trimmed)
        .parse()
        .map_err(|_| CoordinateError::NotANumber {
            axis,
            value: value.to_string(),
        })?;

    if !parsed.is_finite() {
        return Err(CoordinateError::NotFinite { axis });
    }

    Ok(parsed)
}

/// Longest prefix of `value` that reads as a decimal number: optional sign, digits with an
/// optional fraction, and an exponent only if it has at least one digit. Empty if there is none.
fn numeric_prefix(value: &str) -> &str {
    let bytes = value.as_bytes();
    let digits_from = |start: usize| {
        bytes[start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let integer = digits_from(end);
    end += integer;

    let mut fraction = 0;
    if bytes.get(end) == Some(&b'.') {
        fraction = digits_from(end + 1);
        if integer > 0 || fraction > 0 {
            end += 1 + fraction;
        }
    }

    if integer == 0 && fraction == 0 {
        return "";
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exponent = end + 1;
        if matches!(bytes.get(exponent), Some(b'+' | b'-')) {
            exponent += 1;
        }
        let exponent_digits = digits_from(exponent);
        if exponent_digits > 0 {
            end = exponent + exponent_digits;
        }
    }

    &value[..end]
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn parses_decimal_degrees() {
        let coordinate = Coordinate::parse("13.811202", "100.504995").unwrap();
        assert_relative_eq!(coordinate.lat, 13.811202);
        assert_relative_eq!(coordinate.lng, 100.504995);
    }

    #[test]
    fn accepts_negative_and_integer_values() {
        let coordinate = Coordinate::parse("-33", "-70.5").unwrap();
        assert_eq!(coordinate, Coordinate::new(-33.0, -70.5));
    }

    #[test]
    fn ignores_surrounding_whitespace() {
        let coordinate = Coordinate::parse("  1.5\t", "\n2.5 ").unwrap();
        assert_eq!(coordinate, Coordinate::new(1.5, 2.5));
    }

    #[test]
    fn rejects_text() {
        assert_matches!(
            Coordinate::parse("abc", "100"),
            Err(CoordinateError::NotANumber { axis: Axis::Latitude, ref value }) if value == "abc"
        );
        assert_matches!(
            Coordinate::parse("13", "east"),
            Err(CoordinateError::NotANumber {
                axis: Axis::Longitude,
                ..
            })
        );
    }

    #[test]
    fn rejects_empty_buffers() {
        assert_matches!(
            Coordinate::parse("", "100"),
            Err(CoordinateError::Empty {
                axis: Axis::Latitude
            })
        );
        assert_matches!(
            Coordinate::parse("13", "   "),
            Err(CoordinateError::Empty {
                axis: Axis::Longitude
            })
        );
    }

    #[test]
    fn reads_leading_number_and_ignores_the_rest() {
        assert_eq!(
            Coordinate::parse("13abc", "100.5 east").unwrap(),
            Coordinate::new(13.0, 100.5)
        );
        assert_eq!(
            Coordinate::parse("1e2x", "-.5deg").unwrap(),
            Coordinate::new(100.0, -0.5)
        );
        assert_eq!(
            Coordinate::parse("7.", "3e").unwrap(),
            Coordinate::new(7.0, 3.0)
        );
        assert_eq!(
            Coordinate::parse("+2.5e-1,", "1.2.3").unwrap(),
            Coordinate::new(0.25, 1.2)
        );
    }

    #[test]
    fn requires_a_leading_number() {
        for value in ["NaN", ".", "-", "e5", "--1", "x13"] {
            assert_matches!(
                Coordinate::parse(value, "0"),
                Err(CoordinateError::NotANumber {
                    axis: Axis::Latitude,
                    ..
                }),
                "{value}"
            );
        }
    }

    #[test]
    fn rejects_non_finite_numbers() {
        assert_matches!(
            Coordinate::parse("Infinity", "0"),
            Err(CoordinateError::NotFinite {
                axis: Axis::Latitude
            })
        );
        assert_matches!(
            Coordinate::parse("0", "-Infinity"),
            Err(CoordinateError::NotFinite {
                axis: Axis::Longitude
            })
        );
        assert_matches!(
            Coordinate::parse("1e999", "0"),
            Err(CoordinateError::NotFinite {
                axis: Axis::Latitude
            })
        );
    }

    #[test]
    fn latitude_error_wins() {
        assert_matches!(
            Coordinate::parse("x", "y"),
            Err(CoordinateError::NotANumber {
                axis: Axis::Latitude,
                ..
            })
        );
    }

    #[test]
    fn popup_text() {
        assert_eq!(
            Coordinate::new(13.811202, 100.504995).popup_text(),
            "Marker Position: [13.811202, 100.504995]"
        );
        assert_eq!(Coordinate::new(1.0, -2.0).to_string(), "[1, -2]");
    }
}
