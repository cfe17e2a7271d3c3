//! Location inputs accepted by the address formatter

use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Cache key built from the canonical display form of both values.
    ///
    /// `-6.2` and `-6.20` parse to the same `f64` and share a key, but values
    /// that differ in their last bits do not.
    pub fn cache_key(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }
}

/// Any of the shapes a stored location may arrive in
///
/// Older records stored a free-text string, sometimes of the form
/// `"Lat: -6.2, Long: 106.8"`; newer ones carry structured coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocationInput {
    Coordinates(GeoPoint),
    Legacy(String),
    Missing,
}

impl From<GeoPoint> for LocationInput {
    fn from(point: GeoPoint) -> Self {
        Self::Coordinates(point)
    }
}

impl From<Option<GeoPoint>> for LocationInput {
    fn from(point: Option<GeoPoint>) -> Self {
        point.map_or(Self::Missing, Self::Coordinates)
    }
}

impl From<&str> for LocationInput {
    fn from(text: &str) -> Self {
        Self::Legacy(text.to_string())
    }
}

impl From<String> for LocationInput {
    fn from(text: String) -> Self {
        Self::Legacy(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_key_uses_canonical_float_display() {
        assert_eq!(GeoPoint::new(-6.2, 106.8).cache_key(), "-6.2,106.8");
        assert_eq!(GeoPoint::new(-6.20, 106.80).cache_key(), "-6.2,106.8");
    }

    #[test]
    fn deserializes_structured_and_legacy_shapes() {
        let structured: LocationInput =
            serde_json::from_str(r#"{"latitude":-6.2,"longitude":106.8}"#).unwrap();
        assert_eq!(structured, LocationInput::Coordinates(GeoPoint::new(-6.2, 106.8)));

        let legacy: LocationInput = serde_json::from_str(r#""Lat: -6.2, Long: 106.8""#).unwrap();
        assert_eq!(legacy, LocationInput::Legacy("Lat: -6.2, Long: 106.8".to_string()));

        let missing: LocationInput = serde_json::from_str("null").unwrap();
        assert_eq!(missing, LocationInput::Missing);
    }

    #[test]
    fn optional_point_converts_to_missing() {
        assert_eq!(LocationInput::from(None::<GeoPoint>), LocationInput::Missing);
    }
}
