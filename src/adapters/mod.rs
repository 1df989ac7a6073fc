//! Adapter implementations of the port traits.
//!
//! - `live`: real disk and system clock.
//! - `recording`: wraps another adapter and captures every call to a cassette.
//! - `replaying`: answers calls from a previously recorded cassette.

pub mod live;
pub mod recording;
pub mod replaying;
