//! Legacy location text parsing
//!
//! Older records store locations as free text such as
//! `"Lat: -6.2, Long: 106.8"`. Anything else is treated as an address.

use once_cell::sync::Lazy;
use regex::Regex;
use wastetrack_domain::GeoPoint;

/// `Lat: <n>, Long: <n>` as whole words, any case, optional whitespace after colons
static LEGACY_COORDINATES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bLat:\s*(-?\d+(?:\.\d+)?),\s*\bLong:\s*(-?\d+(?:\.\d+)?)")
        .expect("LEGACY_COORDINATES should compile - this is a bug")
});

/// Extract coordinates embedded in legacy location text
///
/// # Examples
///
/// ```
/// use wastetrack_core::geocoding::parse_legacy_coordinates;
///
/// let point = parse_legacy_coordinates("Lat: -6.2, Long: 106.8").unwrap();
/// assert_eq!((point.latitude, point.longitude), (-6.2, 106.8));
/// assert!(parse_legacy_coordinates("Jl. Sudirman 1, Jakarta").is_none());
/// ```
pub fn parse_legacy_coordinates(text: &str) -> Option<GeoPoint> {
    let captures = LEGACY_COORDINATES.captures(text)?;
    let latitude = captures.get(1)?.as_str().parse().ok()?;
    let longitude = captures.get(2)?.as_str().parse().ok()?;
    Some(GeoPoint::new(latitude, longitude))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_canonical_form() {
        let point = parse_legacy_coordinates("Lat: -6.2, Long: 106.8").unwrap();
        assert_eq!(point, GeoPoint::new(-6.2, 106.8));
    }

    #[test]
    fn parses_case_insensitive_without_spaces() {
        let point = parse_legacy_coordinates("pickup at LAT:-7,LONG:112.75 (gate)").unwrap();
        assert_eq!(point, GeoPoint::new(-7.0, 112.75));
    }

    #[test]
    fn rejects_addresses_and_partial_matches() {
        assert!(parse_legacy_coordinates("Jl. Sudirman 1, Jakarta").is_none());
        assert!(parse_legacy_coordinates("Lat: -6.2").is_none());
        assert!(parse_legacy_coordinates("Lat: north, Long: east").is_none());
    }

    #[test]
    fn labels_must_be_whole_words() {
        assert!(parse_legacy_coordinates("Flat: 1, Long: 2").is_none());
        assert!(parse_legacy_coordinates("Lat: 1, Oblong: 2").is_none());
        assert_eq!(parse_legacy_coordinates("Lat: 1, Long: 2"), Some(GeoPoint::new(1.0, 2.0)));
    }
}
