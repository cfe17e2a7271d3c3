//! Reverse-geocoding provider adapters

mod mapbox;

pub use mapbox::MapboxGeocoder;
