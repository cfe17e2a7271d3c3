//! Time abstractions
//!
//! Components that depend on elapsed time or wall-clock time take a
//! [`Clock`] so tests can drive time deterministically with [`MockClock`].

mod clock;

pub use clock::{Clock, MockClock, SystemClock};
