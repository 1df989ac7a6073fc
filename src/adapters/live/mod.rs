//! Live adapters for real external interactions.

pub mod clock;
pub mod filesystem;

pub use clock::LiveClock;
pub use filesystem::LiveFileSystem;
