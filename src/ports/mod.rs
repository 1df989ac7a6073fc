//! Port traits defining external boundaries.
//!
//! The store talks to the outside world through two traits: one for the
//! filesystem and one for the wall clock. Implementations live in
//! `src/adapters/`.

pub mod clock;
pub mod filesystem;

pub use clock::Clock;
pub use filesystem::FileSystem;
