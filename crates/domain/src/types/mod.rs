//! Domain types and models

pub mod location;
pub mod user;

pub use location::{GeoPoint, LocationInput};
pub use user::{CurrentUser, UserRole};
