//! Replaying adapters that serve recorded interactions.

pub mod clock;
pub mod filesystem;

pub use clock::ReplayingClock;
pub use filesystem::ReplayingFileSystem;
